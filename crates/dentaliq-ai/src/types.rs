//! Wire types for the `/generate` and `/health` endpoints.

use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

/// Inclusive upper bound on `message`, counted in characters.
pub const MAX_MESSAGE_CHARS: usize = 2000;

/// Author of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One prior message in the conversation, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Request body for `POST /generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub message: String,
    #[serde(default)]
    pub patient_context: Option<String>,
    #[serde(default)]
    pub history: Vec<ConversationTurn>,
}

impl GenerateRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            patient_context: None,
            history: Vec::new(),
        }
    }

    pub fn with_patient_context(mut self, context: impl Into<String>) -> Self {
        self.patient_context = Some(context.into());
        self
    }

    pub fn with_history(mut self, history: Vec<ConversationTurn>) -> Self {
        self.history = history;
        self
    }

    /// Check the bounds serde cannot express. Roles are already constrained
    /// by [`Role`] at deserialization time.
    pub fn validate(&self) -> Result<(), ServiceError> {
        let len = self.message.chars().count();
        if len == 0 {
            return Err(ServiceError::InvalidRequest(
                "message must not be empty".to_string(),
            ));
        }
        if len > MAX_MESSAGE_CHARS {
            return Err(ServiceError::InvalidRequest(format!(
                "message must be at most {MAX_MESSAGE_CHARS} characters (got {len})"
            )));
        }
        if let Some(idx) = self.history.iter().position(|t| t.content.is_empty()) {
            return Err(ServiceError::InvalidRequest(format!(
                "history[{idx}].content must not be empty"
            )));
        }
        Ok(())
    }

    /// First 60 characters of the message, for log lines.
    pub fn message_preview(&self) -> String {
        self.message.chars().take(60).collect()
    }
}

/// Response body for `POST /generate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub reply: String,
    pub model: String,
    #[serde(default)]
    pub mock: bool,
}

/// Response body for `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub mock_mode: bool,
    pub model: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_default_when_omitted() {
        let req: GenerateRequest = serde_json::from_str(r#"{"message":"hi"}"#).unwrap();
        assert_eq!(req.message, "hi");
        assert!(req.patient_context.is_none());
        assert!(req.history.is_empty());
    }

    #[test]
    fn null_patient_context_is_accepted() {
        let req: GenerateRequest =
            serde_json::from_str(r#"{"message":"hi","patient_context":null}"#).unwrap();
        assert!(req.patient_context.is_none());
    }

    #[test]
    fn unknown_role_fails_to_deserialize() {
        let res: Result<GenerateRequest, _> = serde_json::from_str(
            r#"{"message":"hi","history":[{"role":"system","content":"x"}]}"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn message_bounds_are_enforced() {
        assert!(GenerateRequest::new("").validate().is_err());
        assert!(GenerateRequest::new("a").validate().is_ok());
        assert!(GenerateRequest::new("a".repeat(2000)).validate().is_ok());
        assert!(GenerateRequest::new("a".repeat(2001)).validate().is_err());
    }

    #[test]
    fn message_length_counts_characters_not_bytes() {
        // 2000 two-byte characters is 4000 bytes but still within bounds.
        assert!(GenerateRequest::new("é".repeat(2000)).validate().is_ok());
    }

    #[test]
    fn empty_history_content_is_rejected() {
        let req = GenerateRequest::new("hi")
            .with_history(vec![ConversationTurn::user("ok"), ConversationTurn::assistant("")]);
        let err = req.validate().unwrap_err();
        assert!(err.to_string().contains("history[1]"));
    }

    #[test]
    fn preview_truncates_to_sixty_characters() {
        let req = GenerateRequest::new("x".repeat(100));
        assert_eq!(req.message_preview().len(), 60);
    }
}
