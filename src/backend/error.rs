use serde::Deserialize;

/// Longest plain-text body kept as an error message.
const MAX_TEXT_MESSAGE: usize = 200;

/// Failure reported by a backend client.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The server answered with a non-success status.
    #[error("request rejected ({status}): {}", .message.as_deref().unwrap_or("no details"))]
    Rejected { status: u16, message: Option<String> },

    /// The request never produced a response.
    #[error("{0}")]
    Transport(#[source] reqwest::Error),

    /// The response body could not be understood.
    #[error("invalid response: {0}")]
    Decode(String),
}

/// Error body shapes used by the storage and PostgREST APIs.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error_description: Option<String>,
    msg: Option<String>,
    error: Option<String>,
}

impl BackendError {
    /// Build a rejection from a status and raw response body.
    ///
    /// The message is the body's `message` (or `error_description`, `msg`,
    /// `error`) field when it is JSON, the trimmed text otherwise, and `None`
    /// when the body is empty.
    pub fn rejected(status: u16, body: &str) -> Self {
        let message = match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => parsed
                .message
                .or(parsed.error_description)
                .or(parsed.msg)
                .or(parsed.error),
            Err(_) => {
                let text = body.trim();
                (!text.is_empty() && !text.starts_with('{'))
                    .then(|| text.chars().take(MAX_TEXT_MESSAGE).collect())
            }
        };

        Self::Rejected {
            status,
            message: message.filter(|m| !m.trim().is_empty()),
        }
    }

    /// The descriptive message carried by this error, if any.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Rejected { message, .. } => message.clone(),
            Self::Transport(e) => Some(e.to_string()),
            Self::Decode(m) => Some(format!("invalid response: {m}")),
        }
    }
}
