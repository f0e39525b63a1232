//! Image selection.
//!
//! An [`ImageSource`] yields the handle of a picked image, nothing when the
//! user backs out, or a [`PickError`]. Permission problems are reported
//! separately from workflow failures so front ends can show them as their own
//! notice.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use memoria_common::paths::is_image_file;
use memoria_common::ImageHandle;

use crate::notice::Notice;

/// Errors raised while picking an image.
#[derive(Debug, thiserror::Error)]
pub enum PickError {
    /// The OS refused access to the media.
    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    /// The picked file is not an image.
    #[error("not an image file: {}", .0.display())]
    Unsupported(PathBuf),

    /// Any other failure while reading the selection.
    #[error("failed to pick image: {0}")]
    Io(#[from] std::io::Error),
}

impl PickError {
    /// Notice shown to the user for this error.
    pub fn notice(&self) -> Notice {
        match self {
            Self::PermissionDenied(_) => Notice::new(
                "Permission Required",
                "Please grant permission to access your photos to upload a memory.",
            ),
            Self::Unsupported(path) => Notice::new(
                "Error",
                format!("{} is not a supported image.", path.display()),
            ),
            Self::Io(_) => Notice::new("Error", "Failed to pick image. Please try again."),
        }
    }
}

/// Device media picker.
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Pick an image. `Ok(None)` means the user cancelled.
    async fn pick(&self) -> Result<Option<ImageHandle>, PickError>;
}

/// Picks a single image file from the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct PathImageSource {
    path: Option<PathBuf>,
}

impl PathImageSource {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

#[async_trait]
impl ImageSource for PathImageSource {
    async fn pick(&self) -> Result<Option<ImageHandle>, PickError> {
        let Some(path) = self.path.as_ref() else {
            tracing::debug!("No image selected");
            return Ok(None);
        };

        if !is_image_file(path) {
            return Err(PickError::Unsupported(path.clone()));
        }

        // Opening surfaces permission problems before the workflow starts
        match tokio::fs::File::open(path).await {
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                return Err(PickError::PermissionDenied(path.clone()));
            }
            Err(e) => return Err(PickError::Io(e)),
        }

        tracing::debug!("Picked image {:?}", path);
        Ok(Some(ImageHandle::file(path.clone())))
    }
}
