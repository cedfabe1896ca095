/// Represents the provider (backend) used for chat-completion inference.
///
/// Only Groq is wired up; it speaks the OpenAI chat-completions protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    /// Groq's OpenAI-compatible API (`https://api.groq.com/openai`).
    Groq,
}
