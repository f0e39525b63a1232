//! Image selection and normalization.
//!
//! Both are external collaborators of the upload workflow: the source yields
//! a local image handle, the normalizer shrinks and re-encodes it before upload.

mod normalizer;
mod source;

pub use normalizer::{
    encode_jpeg, ImageNormalizer, JpegNormalizer, NormalizeOptions, OutputFormat,
    PassthroughNormalizer,
};
pub use source::{ImageSource, PathImageSource, PickError};
