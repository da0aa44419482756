use chrono::{DateTime, Utc};

/// A single message in the ephemeral chat transcript
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub text: String,
    pub from_assistant: bool,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(text: &str) -> Self {
        Self {
            text: text.to_string(),
            from_assistant: false,
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(text: &str) -> Self {
        Self {
            text: text.to_string(),
            from_assistant: true,
            timestamp: Utc::now(),
        }
    }
}
