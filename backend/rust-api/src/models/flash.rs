use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashKind {
    Success,
    Error,
}

/// One-shot status message kept in the session until the next view shows it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flash {
    pub message: String,
    #[serde(rename = "message_type")]
    pub kind: FlashKind,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: FlashKind::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: FlashKind::Error,
        }
    }
}
