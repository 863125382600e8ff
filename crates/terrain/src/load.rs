use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use std::path::{Path, PathBuf};

use crate::field::{ElevationField, FieldError, luma};

/// Errors from turning a raster into an elevation field.
///
/// Any of these is fatal to startup: no partial field is ever produced.
#[derive(Debug, thiserror::Error)]
pub enum AssetLoadError {
    #[error("failed to read raster {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode raster: {0}")]
    Decode(#[from] image::ImageError),
    #[error("grid size {0} does not fit a raster dimension")]
    GridTooLarge(usize),
    #[error(transparent)]
    Field(#[from] FieldError),
}

/// Read a raster file and convert it to a `size × size` elevation field.
pub fn load_path(path: impl AsRef<Path>, size: usize) -> Result<ElevationField, AssetLoadError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| AssetLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "read raster");
    load_bytes(&bytes, size)
}

/// Decode an encoded raster (PNG, JPEG) and convert it to a `size × size` elevation field.
pub fn load_bytes(bytes: &[u8], size: usize) -> Result<ElevationField, AssetLoadError> {
    check_size(size)?;
    let image = image::load_from_memory(bytes)?;
    load_image(&image, size)
}

/// Resample a decoded image to `size × size` and take the luma of every pixel.
///
/// Images that already match the grid are read as-is; others are resized with a
/// triangle filter, which averages neighbouring pixels when shrinking.
pub fn load_image(image: &DynamicImage, size: usize) -> Result<ElevationField, AssetLoadError> {
    let side = check_size(size)?;
    let (width, height) = image.dimensions();

    let rgba = if (width, height) == (side, side) {
        image.to_rgba8()
    } else {
        tracing::debug!(width, height, size, "resampling raster to grid");
        image.resize_exact(side, side, FilterType::Triangle).to_rgba8()
    };

    let samples: Vec<f32> = rgba
        .pixels()
        .map(|p| luma(p.0[0], p.0[1], p.0[2]))
        .collect();

    let field = ElevationField::from_samples(size, samples)?;
    tracing::debug!(size, min = field.min(), max = field.max(), "built elevation field");
    Ok(field)
}

fn check_size(size: usize) -> Result<u32, AssetLoadError> {
    if size < 2 {
        return Err(FieldError::GridTooSmall(size).into());
    }
    u32::try_from(size).map_err(|_| AssetLoadError::GridTooLarge(size))
}
