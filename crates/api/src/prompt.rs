//! Prompt composition for the text-improvement call.

/// Model used for every correction request.
pub const GEMINI_MODEL: &str = "gemini-2.5-flash-preview-09-2025";

/// Placeholder sent when the caller gives no extra instruction.
pub const NO_EXTRA_INSTRUCTIONS: &str = "Nenhuma";

/// Editorial persona sent as the system instruction.
pub const SYSTEM_INSTRUCTION: &str = "Você é um editor profissional de textos em Português.\n\
E a sua tarefa é rever o texto fornecido corrigindo acentuação, pontuação e gramática.\n\
Mantenha o tom original do texto. Retorne APENAS o texto corrigido.";

/// Builds the user message: the text verbatim, then the extra instruction.
pub fn user_message(text: &str, extra_instructions: Option<&str>) -> String {
    let extra = extra_instructions
        .filter(|prompt| !prompt.is_empty())
        .unwrap_or(NO_EXTRA_INSTRUCTIONS);
    format!("Reveja o texto:\n\n{text}\n\nInstruções extra: {extra}")
}
