use super::calculations::{centered_offset, fit_within};
use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, ImageFormat, Rgb, RgbImage};
use rand::Rng;
use std::ffi::OsStr;
use std::io::{self, Cursor, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

/// Letterbox fill color.
pub const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// Bicubic, same family as the usual thumbnail resampler.
const RESAMPLE_FILTER: FilterType = FilterType::CatmullRom;

/// Random bytes in a generated filename (hex-encoded, so twice as many chars).
const TOKEN_BYTES: usize = 8;

#[derive(Debug, Error)]
pub enum ImagingError {
    #[error("could not decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("could not encode image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("unsupported image extension in {0:?}")]
    UnsupportedFormat(String),

    #[error("invalid target size {width}x{height}")]
    InvalidTarget { width: u32, height: u32 },

    #[error("upload name already taken: {0}")]
    NameCollision(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Exact output size of a normalized image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSize {
    width: u32,
    height: u32,
}

impl TargetSize {
    /// Landing-page project card.
    pub const PROJECT: Self = Self {
        width: 450,
        height: 350,
    };

    /// Square client portrait.
    pub const CLIENT: Self = Self {
        width: 300,
        height: 300,
    };

    pub fn new(width: u32, height: u32) -> Result<Self, ImagingError> {
        if width == 0 || height == 0 {
            return Err(ImagingError::InvalidTarget { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(self) -> u32 {
        self.width
    }

    pub fn height(self) -> u32 {
        self.height
    }

    /// Fails with `InvalidTarget` when either side is zero.
    pub fn validate(self) -> Result<Self, ImagingError> {
        Self::new(self.width, self.height)
    }

    pub fn as_tuple(self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Writes uploaded images into a flat directory at a fixed size.
///
/// Each call decodes the source, shrinks it to fit the target box, centers it
/// on a white canvas of exactly the target size, and stores the result under a
/// fresh random name that keeps the original extension. The output format is
/// the one the extension names.
///
/// Stateless apart from the directory path, so one instance can be shared
/// freely between threads.
#[derive(Debug, Clone)]
pub struct ImageNormalizer {
    uploads_dir: PathBuf,
}

impl ImageNormalizer {
    pub fn new(uploads_dir: impl Into<PathBuf>) -> Self {
        Self {
            uploads_dir: uploads_dir.into(),
        }
    }

    pub fn uploads_dir(&self) -> &Path {
        &self.uploads_dir
    }

    pub fn path_of(&self, filename: &str) -> PathBuf {
        self.uploads_dir.join(filename)
    }

    /// Create the uploads directory if it is missing.
    pub fn ensure_dir(&self) -> Result<(), ImagingError> {
        std::fs::create_dir_all(&self.uploads_dir)?;
        Ok(())
    }

    /// Normalize `source` to `target` and store it. Returns the generated filename.
    ///
    /// `original_name` is only consulted for its extension.
    pub fn normalize(
        &self,
        source: &[u8],
        original_name: &str,
        target: TargetSize,
    ) -> Result<String, ImagingError> {
        let target = target.validate()?;
        let (extension, format) = output_format(original_name)?;
        let decoded = image::load_from_memory(source).map_err(ImagingError::Decode)?;
        let canvas = letterbox(&decoded, target);

        let mut encoded = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(canvas)
            .write_to(&mut encoded, format)
            .map_err(ImagingError::Encode)?;

        let filename = format!("{}{}", random_token(), extension);
        self.persist(&filename, encoded.get_ref())?;

        debug!(
            filename = %filename,
            source_width = decoded.width(),
            source_height = decoded.height(),
            width = target.width,
            height = target.height,
            "normalized upload"
        );
        Ok(filename)
    }

    /// Delete a stored image. A file that is already gone is not an error.
    pub fn remove(&self, filename: &str) -> Result<(), ImagingError> {
        match std::fs::remove_file(self.path_of(filename)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Stage `bytes` next to the destination and move them into place.
    /// An existing file under `filename` is never overwritten.
    fn persist(&self, filename: &str, bytes: &[u8]) -> Result<(), ImagingError> {
        let mut staged = NamedTempFile::new_in(&self.uploads_dir)?;
        staged.write_all(bytes)?;
        staged.as_file().sync_all()?;

        staged
            .persist_noclobber(self.path_of(filename))
            .map_err(|e| {
                if e.error.kind() == io::ErrorKind::AlreadyExists {
                    ImagingError::NameCollision(filename.to_string())
                } else {
                    ImagingError::Io(e.error)
                }
            })?;
        Ok(())
    }
}

/// Fit `source` inside `target` and paste it centered on a white RGB canvas.
///
/// Alpha is dropped, not composited.
pub fn letterbox(source: &DynamicImage, target: TargetSize) -> RgbImage {
    let original = source.dimensions();
    let (w, h) = fit_within(original, target.as_tuple());

    let scaled = if (w, h) == original {
        source.to_rgb8()
    } else {
        source.resize_exact(w, h, RESAMPLE_FILTER).to_rgb8()
    };

    let mut canvas = RgbImage::from_pixel(target.width, target.height, BACKGROUND);
    let (x, y) = centered_offset(target.as_tuple(), (w, h));
    imageops::replace(&mut canvas, &scaled, x as i64, y as i64);
    canvas
}

/// Resolve the dotted extension and the encoder it selects.
///
/// The extension keeps its original case (`photo.JPG` → `.JPG`); only
/// extensions with a compiled-in encoder are accepted.
pub fn output_format(original_name: &str) -> Result<(String, ImageFormat), ImagingError> {
    let unsupported = || ImagingError::UnsupportedFormat(original_name.to_string());

    let extension = Path::new(original_name)
        .extension()
        .and_then(OsStr::to_str)
        .filter(|ext| !ext.is_empty())
        .ok_or_else(unsupported)?;

    let format = ImageFormat::from_extension(extension)
        .filter(|format| format.writing_enabled())
        .ok_or_else(unsupported)?;

    Ok((format!(".{extension}"), format))
}

fn random_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
