//! Prompt builder: system instruction, prior turns, new question.

use ai_llm_service::ChatMessage;

/// Default system instruction for the assistant persona.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are Lumina, an elite AI Developer Productivity Copilot and Senior Software Architect. Your goal is to help developers ship high-quality, performant, and secure code with maximum efficiency.";

/// Builds `[system, ...history, user(question)]`.
///
/// History is passed through untouched: no truncation, no reordering.
///
/// # Example
/// ```
/// # use api::chat::prompt::compose_messages;
/// let msgs = compose_messages("be brief", Vec::new(), "hello");
/// assert_eq!(msgs.len(), 2);
/// ```
pub fn compose_messages(
    system: &str,
    history: Vec<ChatMessage>,
    question: &str,
) -> Vec<ChatMessage> {
    let mut out = Vec::with_capacity(history.len() + 2);
    out.push(ChatMessage::system(system));
    out.extend(history);
    out.push(ChatMessage::user(question));
    out
}

#[cfg(test)]
mod tests {
    use ai_llm_service::MessageRole;

    use super::*;

    #[test]
    fn empty_history_gives_system_and_question() {
        let msgs = compose_messages(DEFAULT_SYSTEM_PROMPT, Vec::new(), "hello");
        assert_eq!(
            msgs,
            vec![ChatMessage::system(DEFAULT_SYSTEM_PROMPT), ChatMessage::user("hello")]
        );
    }

    #[test]
    fn history_is_kept_verbatim_between_system_and_question() {
        let history = vec![
            ChatMessage::user("q1"),
            ChatMessage::assistant("a1"),
            ChatMessage::user("q2"),
            ChatMessage::assistant("a2"),
        ];
        let msgs = compose_messages("sys", history.clone(), "q3");

        assert_eq!(msgs.len(), 1 + history.len() + 1);
        assert_eq!(msgs[0], ChatMessage::system("sys"));
        assert_eq!(&msgs[1..=history.len()], history.as_slice());
        assert_eq!(msgs.last().map(|m| m.role), Some(MessageRole::User));
        assert_eq!(msgs.last().map(|m| m.content.as_str()), Some("q3"));
    }
}
