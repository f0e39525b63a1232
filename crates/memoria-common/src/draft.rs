//! Client-side draft input and its validation rules.
//!
//! A [`Draft`] is created empty, mutated while the user edits, and discarded
//! after a successful submission. [`Draft::validate`] is the only way to get a
//! [`ValidDraft`], which is what the upload workflow consumes.

use std::path::{Path, PathBuf};

use bytes::Bytes;

use crate::error::Result;

/// Maximum title length, in characters, after trimming.
pub const TITLE_MAX_CHARS: usize = 100;

/// Maximum description length, in characters, after trimming.
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// File name used when a handle carries no usable name.
const FALLBACK_FILE_NAME: &str = "image.jpg";

/// A local, read-only image resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageHandle {
    /// An image file on the local filesystem, read on demand.
    File(PathBuf),
    /// An encoded image held in memory, e.g. the output of normalization.
    Encoded { bytes: Bytes, file_name: String },
}

impl ImageHandle {
    /// Handle to an image file on disk.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    /// Handle to an in-memory encoded image.
    pub fn encoded(bytes: impl Into<Bytes>, file_name: impl Into<String>) -> Self {
        Self::Encoded {
            bytes: bytes.into(),
            file_name: file_name.into(),
        }
    }

    /// The path backing this handle, if it refers to a file.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File(path) => Some(path),
            Self::Encoded { .. } => None,
        }
    }

    /// Base file name of the image.
    pub fn file_name(&self) -> String {
        match self {
            Self::File(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| FALLBACK_FILE_NAME.to_string()),
            Self::Encoded { file_name, .. } if !file_name.is_empty() => file_name.clone(),
            Self::Encoded { .. } => FALLBACK_FILE_NAME.to_string(),
        }
    }

    /// Read the full image contents.
    ///
    /// In-memory handles are returned without copying.
    pub async fn read_bytes(&self) -> Result<Bytes> {
        match self {
            Self::File(path) => Ok(Bytes::from(tokio::fs::read(path).await?)),
            Self::Encoded { bytes, .. } => Ok(bytes.clone()),
        }
    }
}

/// Form field a validation error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Image,
    Title,
    Description,
}

/// Reasons a draft cannot be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing image")]
    MissingImage,

    #[error("missing title")]
    MissingTitle,

    #[error("title exceeds {} characters", TITLE_MAX_CHARS)]
    TitleTooLong,

    #[error("description exceeds {} characters", DESCRIPTION_MAX_CHARS)]
    DescriptionTooLong,
}

impl ValidationError {
    /// The field the error refers to.
    pub fn field(&self) -> DraftField {
        match self {
            Self::MissingImage => DraftField::Image,
            Self::MissingTitle | Self::TitleTooLong => DraftField::Title,
            Self::DescriptionTooLong => DraftField::Description,
        }
    }

    /// Whether the error is shown next to its field instead of as a blocking notice.
    pub fn is_inline(&self) -> bool {
        !matches!(self.field(), DraftField::Image)
    }

    /// Message shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingImage => "Please select an image before uploading.".to_string(),
            Self::MissingTitle => "Title is required".to_string(),
            Self::TitleTooLong => format!("Title must be at most {TITLE_MAX_CHARS} characters"),
            Self::DescriptionTooLong => {
                format!("Description must be at most {DESCRIPTION_MAX_CHARS} characters")
            }
        }
    }
}

/// The user's in-progress input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub image: Option<ImageHandle>,
    pub title: String,
    pub description: String,
}

impl Draft {
    pub fn new(
        image: Option<ImageHandle>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            image,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn set_image(&mut self, image: ImageHandle) {
        self.image = Some(image);
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// True when nothing has been entered yet.
    pub fn is_empty(&self) -> bool {
        self.image.is_none() && self.title.is_empty() && self.description.is_empty()
    }

    /// Check the draft and produce trimmed, submittable input.
    ///
    /// The image is checked first, then the title, then lengths.
    pub fn validate(&self) -> std::result::Result<ValidDraft, ValidationError> {
        let image = self.image.clone().ok_or(ValidationError::MissingImage)?;

        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::MissingTitle);
        }
        if title.chars().count() > TITLE_MAX_CHARS {
            return Err(ValidationError::TitleTooLong);
        }

        let description = self.description.trim();
        if description.chars().count() > DESCRIPTION_MAX_CHARS {
            return Err(ValidationError::DescriptionTooLong);
        }

        Ok(ValidDraft {
            image,
            title: title.to_string(),
            description: description.to_string(),
        })
    }
}

/// A draft that passed validation, with trimmed text fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidDraft {
    pub image: ImageHandle,
    pub title: String,
    pub description: String,
}
