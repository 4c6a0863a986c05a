//! OpenInference attribute keys.

pub const SPAN_KIND: &str = "openinference.span.kind";
pub const INPUT_VALUE: &str = "input.value";
pub const OUTPUT_VALUE: &str = "output.value";
pub const LLM_MODEL_NAME: &str = "llm.model_name";
pub const LLM_INVOCATION_PARAMETERS: &str = "llm.invocation_parameters";
pub const LLM_FUNCTION_CALL: &str = "llm.function_call";
pub const LLM_TOKEN_COUNT_PROMPT: &str = "llm.token_count.prompt";
pub const LLM_TOKEN_COUNT_COMPLETION: &str = "llm.token_count.completion";

/// `llm.input_messages.{index}.message.role`
pub fn input_message_role(index: usize) -> String {
    format!("llm.input_messages.{index}.message.role")
}

/// `llm.input_messages.{index}.message.content`
pub fn input_message_content(index: usize) -> String {
    format!("llm.input_messages.{index}.message.content")
}
