//! Path utilities for detecting image files by extension.
//!
//! The image source uses these to refuse non-image picks before any bytes are
//! read.

use std::path::Path;

/// List of supported image file extensions.
const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "bmp", "heic", "tif", "tiff",
];

/// Check if a path has an image file extension.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use memoria_common::paths::is_image_file;
///
/// assert!(is_image_file(Path::new("beach.jpg")));
/// assert!(is_image_file(Path::new("/path/to/IMG_0042.PNG")));
/// assert!(!is_image_file(Path::new("notes.txt")));
/// ```
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
