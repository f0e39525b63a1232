//! Memoria-Common: Shared types, constants, and utilities.
//!
//! This crate provides the data model used across memoria:
//!
//! - **Typed IDs**: [`MemoryId`], the server-assigned key of a persisted memory
//! - **Records**: [`Memory`] as returned by the record store, [`NewMemory`] as sent
//! - **Drafts**: [`Draft`] and [`ImageHandle`], the transient client-side input
//! - **Path Utilities**: Functions to detect image files by extension
//! - **Error Handling**: The I/O error type and result alias
//!
//! # Examples
//!
//! ```
//! use memoria_common::{Draft, ImageHandle, ValidationError};
//!
//! let mut draft = Draft::default();
//! assert_eq!(draft.validate(), Err(ValidationError::MissingImage));
//!
//! draft.set_image(ImageHandle::file("beach.jpg"));
//! draft.set_title("  Beach  ");
//! let valid = draft.validate().unwrap();
//! assert_eq!(valid.title, "Beach");
//! ```

pub mod draft;
pub mod error;
pub mod ids;
pub mod paths;
pub mod types;

pub use draft::{
    Draft, DraftField, ImageHandle, ValidDraft, ValidationError, DESCRIPTION_MAX_CHARS,
    TITLE_MAX_CHARS,
};
pub use error::{Error, Result};
pub use ids::*;
pub use types::*;
