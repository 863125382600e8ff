use serde::Serialize;

/// Errors from constructing an elevation field out of raw samples.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    #[error("grid size must be at least 2, got {0}")]
    GridTooSmall(usize),
    #[error("expected {expected} samples for the grid, got {actual}")]
    SampleCount { expected: usize, actual: usize },
    #[error("sample {index} is {value}, outside [0, 1]")]
    OutOfRange { index: usize, value: f32 },
}

/// Perceptual brightness of an 8-bit RGB pixel, normalized to `[0, 1]`.
pub fn luma(r: u8, g: u8, b: u8) -> f32 {
    let y = (0.2126 * f64::from(r) + 0.7152 * f64::from(g) + 0.0722 * f64::from(b)) / 255.0;
    y.clamp(0.0, 1.0) as f32
}

/// Square grid of normalized height samples.
///
/// Row-major: the row index runs along world Z, the column index along world X.
/// Immutable after construction, so it can be shared freely between the
/// surface builder and any number of height samplers.
#[derive(Debug, Clone, PartialEq)]
pub struct ElevationField {
    size: usize,
    samples: Vec<f32>,
}

/// Summary statistics over a field's samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldStats {
    pub size: usize,
    pub min: f32,
    pub max: f32,
    pub mean: f32,
}

impl ElevationField {
    /// Build a field from `size * size` row-major samples in `[0, 1]`.
    pub fn from_samples(size: usize, samples: Vec<f32>) -> Result<Self, FieldError> {
        if size < 2 {
            return Err(FieldError::GridTooSmall(size));
        }
        let expected = size * size;
        if samples.len() != expected {
            return Err(FieldError::SampleCount {
                expected,
                actual: samples.len(),
            });
        }
        if let Some((index, &value)) = samples
            .iter()
            .enumerate()
            .find(|(_, v)| !(0.0..=1.0).contains(*v))
        {
            return Err(FieldError::OutOfRange { index, value });
        }
        Ok(Self { size, samples })
    }

    /// A field with every sample set to `value` (clamped into `[0, 1]`).
    pub fn flat(size: usize, value: f32) -> Result<Self, FieldError> {
        let value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
        Self::from_samples(size, vec![value; size.saturating_mul(size)])
    }

    /// Samples per side.
    pub fn size(&self) -> usize {
        self.size
    }

    /// All samples, row-major.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Sample at `row` (Z index) and `col` (X index). Both must be below `size`.
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.samples[row * self.size + col]
    }

    pub fn min(&self) -> f32 {
        self.samples.iter().copied().fold(f32::INFINITY, f32::min)
    }

    pub fn max(&self) -> f32 {
        self.samples.iter().copied().fold(f32::NEG_INFINITY, f32::max)
    }

    pub fn stats(&self) -> FieldStats {
        let sum: f64 = self.samples.iter().map(|&s| f64::from(s)).sum();
        FieldStats {
            size: self.size,
            min: self.min(),
            max: self.max(),
            mean: (sum / self.samples.len() as f64) as f32,
        }
    }
}

impl std::fmt::Display for FieldStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Field: {0}x{0} min={1:.4} max={2:.4} mean={3:.4}",
            self.size, self.min, self.max, self.mean
        )
    }
}
