//! System prompt and message-array construction.
//!
//! Both functions are pure: the same inputs always produce the same output.

use serde::{Deserialize, Serialize};

use crate::types::{ConversationTurn, Role};

/// Number of most recent history turns forwarded to the provider.
pub const MAX_HISTORY_TURNS: usize = 10;

pub const BASE_SYSTEM_PROMPT: &str = "You are a helpful, professional dental assistant AI. \
You assist patients with questions about dental health, procedures, and aftercare. \
Always be empathetic, clear, and evidence-based. \
For any serious symptoms, always advise the patient to contact or visit the clinic. \
Never diagnose conditions - you are a helpful guide, not a substitute for professional care.";

pub const PATIENT_CONTEXT_LABEL: &str = "Patient context for this conversation:";

/// A `{role, content}` entry of the provider's `messages` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderMessage {
    pub role: Role,
    pub content: String,
}

/// Base instruction, followed by the labelled patient context when one is given.
///
/// An empty context is treated the same as a missing one.
pub fn build_system_prompt(patient_context: Option<&str>) -> String {
    match patient_context {
        Some(ctx) if !ctx.is_empty() => {
            format!("{BASE_SYSTEM_PROMPT}\n\n{PATIENT_CONTEXT_LABEL}\n{ctx}")
        }
        _ => BASE_SYSTEM_PROMPT.to_string(),
    }
}

/// The last [`MAX_HISTORY_TURNS`] turns in chronological order, then the new user message.
pub fn build_messages(history: &[ConversationTurn], user_message: &str) -> Vec<ProviderMessage> {
    let start = history.len().saturating_sub(MAX_HISTORY_TURNS);
    history[start..]
        .iter()
        .map(|turn| ProviderMessage {
            role: turn.role,
            content: turn.content.clone(),
        })
        .chain(std::iter::once(ProviderMessage {
            role: Role::User,
            content: user_message.to_string(),
        }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turns(n: usize) -> Vec<ConversationTurn> {
        (0..n)
            .map(|i| {
                if i % 2 == 0 {
                    ConversationTurn::user(format!("turn {i}"))
                } else {
                    ConversationTurn::assistant(format!("turn {i}"))
                }
            })
            .collect()
    }

    #[test]
    fn system_prompt_includes_context_verbatim() {
        let ctx = "Patient name: Jane Doe\nMedical notes: penicillin allergy";
        let prompt = build_system_prompt(Some(ctx));
        assert!(prompt.starts_with(BASE_SYSTEM_PROMPT));
        assert!(prompt.contains(PATIENT_CONTEXT_LABEL));
        assert!(prompt.contains(ctx));
    }

    #[test]
    fn system_prompt_without_context_has_no_label() {
        assert_eq!(build_system_prompt(None), BASE_SYSTEM_PROMPT);
        assert!(!build_system_prompt(Some("")).contains(PATIENT_CONTEXT_LABEL));
    }

    #[test]
    fn keeps_last_ten_turns_plus_new_message() {
        let history = turns(12);
        let msgs = build_messages(&history, "new question");

        assert_eq!(msgs.len(), 11);
        for (i, msg) in msgs[..10].iter().enumerate() {
            assert_eq!(msg.content, format!("turn {}", i + 2));
            assert_eq!(msg.role, history[i + 2].role);
        }
        assert_eq!(msgs[10].role, Role::User);
        assert_eq!(msgs[10].content, "new question");
    }

    #[test]
    fn short_history_is_forwarded_whole() {
        let msgs = build_messages(&turns(3), "q");
        assert_eq!(msgs.len(), 4);
        assert_eq!(msgs[0].content, "turn 0");
    }

    #[test]
    fn empty_history_yields_only_the_user_message() {
        let msgs = build_messages(&[], "hello");
        assert_eq!(
            msgs,
            vec![ProviderMessage {
                role: Role::User,
                content: "hello".to_string()
            }]
        );
    }

    #[test]
    fn messages_serialize_with_lowercase_roles() {
        let msgs = build_messages(&[ConversationTurn::assistant("a")], "b");
        let json = serde_json::to_value(&msgs).unwrap();
        assert_eq!(json[0]["role"], "assistant");
        assert_eq!(json[1]["role"], "user");
        assert_eq!(json[1]["content"], "b");
    }
}
