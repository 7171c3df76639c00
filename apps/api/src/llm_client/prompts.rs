// Fixed fragments wrapped around the caller's context in the user message.

/// Placed between a template's instruction prefix and the raw context.
pub const CONTEXT_SEPARATOR: &str = "\n\nContext: ";

/// Trailing cue that asks the model to answer with the prompt text only.
pub const RESPONSE_CUE: &str = "\n\nGenerated prompt:";

/// `{instruction_prefix}{CONTEXT_SEPARATOR}{context}{RESPONSE_CUE}`
pub fn user_message(instruction_prefix: &str, context: &str) -> String {
    format!("{instruction_prefix}{CONTEXT_SEPARATOR}{context}{RESPONSE_CUE}")
}
