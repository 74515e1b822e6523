//! Upload normalization: every stored image has the exact size its record asks for.
//!
//! | Step | Crate / function |
//! |---|---|
//! | Decode (format sniffed from bytes) | `image::load_from_memory` |
//! | Fit inside target, shrink-only | [`fit_within`] + `resize_exact` (CatmullRom) |
//! | White letterbox, centered | `RgbImage::from_pixel` + `imageops::replace` |
//! | Encode (format from extension) | `DynamicImage::write_to` |
//! | Store without clobbering | `tempfile::NamedTempFile::persist_noclobber` |
//!
//! - **Calculations**: pure dimension math (unit testable)
//! - **Normalizer**: [`ImageNormalizer`], decoding, letterboxing and storage

mod calculations;
pub mod normalizer;

pub use calculations::{centered_offset, fit_within};
pub use normalizer::{ImageNormalizer, ImagingError, TargetSize, letterbox};
