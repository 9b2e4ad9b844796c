use thiserror::Error;

/// Errors reported by the embed (`onError` codes) or raised while issuing a
/// command against the player.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlayerError {
    #[error("Invalid parameter value")]
    InvalidParameter,
    #[error("HTML5 player error")]
    Html5,
    #[error("Video not found/removed")]
    NotFound,
    #[error("Video embedding not allowed")]
    EmbeddingNotAllowed { code: i32 },
    #[error("Unknown error")]
    Unknown { code: i32 },
    #[error("player command failed: {0}")]
    Command(String),
    #[error("video provider unavailable: {0}")]
    Unavailable(String),
}

impl PlayerError {
    pub fn from_code(code: i32) -> Self {
        match code {
            2 => PlayerError::InvalidParameter,
            5 => PlayerError::Html5,
            100 => PlayerError::NotFound,
            101 | 150 => PlayerError::EmbeddingNotAllowed { code },
            _ => PlayerError::Unknown { code },
        }
    }

    /// Numeric code as reported by the provider, when there is one.
    pub fn code(&self) -> Option<i32> {
        match self {
            PlayerError::InvalidParameter => Some(2),
            PlayerError::Html5 => Some(5),
            PlayerError::NotFound => Some(100),
            PlayerError::EmbeddingNotAllowed { code } | PlayerError::Unknown { code } => {
                Some(*code)
            }
            PlayerError::Command(_) | PlayerError::Unavailable(_) => None,
        }
    }
}
