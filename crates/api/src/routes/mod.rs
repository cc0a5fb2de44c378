//! HTTP route handlers.

pub mod improve;
pub mod status;
