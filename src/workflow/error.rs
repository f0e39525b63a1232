use memoria_common::ValidationError;

use crate::notice::Notice;

/// Fallback when the storage step fails without a message.
pub const UPLOAD_FALLBACK: &str = "Failed to upload image";

/// Fallback when the record step fails without a message.
pub const PERSIST_FALLBACK: &str = "Failed to create memory";

/// Fallback for failures with no descriptive message at all.
pub const UNKNOWN_FALLBACK: &str = "An unexpected error occurred. Please try again.";

/// Why a submission did not produce a memory.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// The draft was rejected before any I/O.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The storage client could not complete the write.
    #[error("upload failed: {0}")]
    Upload(String),

    /// The record store rejected the insert. The uploaded image is orphaned.
    #[error("saving memory failed: {0}")]
    Persist(String),

    /// A failure with no more specific classification.
    #[error("{0}")]
    Unknown(String),

    /// Another submission is still in flight.
    #[error("a submission is already in progress")]
    Busy,
}

impl SubmitError {
    pub fn upload(message: Option<String>) -> Self {
        Self::Upload(message.unwrap_or_else(|| UPLOAD_FALLBACK.to_string()))
    }

    pub fn persist(message: Option<String>) -> Self {
        Self::Persist(message.unwrap_or_else(|| PERSIST_FALLBACK.to_string()))
    }

    pub fn unknown(message: Option<String>) -> Self {
        Self::Unknown(message.unwrap_or_else(|| UNKNOWN_FALLBACK.to_string()))
    }

    /// Validation errors shown next to a form field instead of as a notice.
    pub fn inline_error(&self) -> Option<ValidationError> {
        match self {
            Self::Validation(e) if e.is_inline() => Some(*e),
            _ => None,
        }
    }

    /// Notice shown to the user for this failure.
    pub fn notice(&self) -> Notice {
        match self {
            Self::Validation(e) => Notice::new("Error", e.user_message()),
            Self::Upload(m) | Self::Persist(m) | Self::Unknown(m) => {
                Notice::new("Upload Failed", m.clone())
            }
            Self::Busy => Notice::new("Please Wait", "An upload is already in progress."),
        }
    }
}
