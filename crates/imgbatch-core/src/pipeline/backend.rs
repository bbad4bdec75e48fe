//! Image decode/transform/save collaborator.
//!
//! Pixel work is delegated to the `image` crate. The trait exists so the
//! dispatch layer can be driven by a scripted backend in tests.

use image::{DynamicImage, ImageResult};
use std::path::Path;

/// Decode, transform and encode primitives used by the item processor.
///
/// All methods are synchronous and may block; callers run them under
/// `spawn_blocking`.
pub trait ImageBackend: Send + Sync + 'static {
    /// Open and decode the image at `path`.
    fn open(&self, path: &Path) -> ImageResult<DynamicImage>;

    /// Remap tones to luminance only.
    fn tone_remap(&self, image: DynamicImage) -> ImageResult<DynamicImage>;

    /// Gaussian blur with the given sigma.
    fn spatial_blur(&self, image: DynamicImage, sigma: f32) -> ImageResult<DynamicImage>;

    /// Encode `image` to `path`, choosing the format from the path's extension.
    fn save(&self, image: &DynamicImage, path: &Path) -> ImageResult<()>;
}

/// Backend built on the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCrateBackend;

impl ImageBackend for ImageCrateBackend {
    fn open(&self, path: &Path) -> ImageResult<DynamicImage> {
        image::ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
    }

    fn tone_remap(&self, image: DynamicImage) -> ImageResult<DynamicImage> {
        Ok(image.grayscale())
    }

    fn spatial_blur(&self, image: DynamicImage, sigma: f32) -> ImageResult<DynamicImage> {
        Ok(image.blur(sigma))
    }

    fn save(&self, image: &DynamicImage, path: &Path) -> ImageResult<()> {
        image.save(path)
    }
}
