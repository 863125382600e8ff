//! Terrain: elevation field, raster loading, height sampling and surface meshing.
//!
//! # Invariants
//! - An [`ElevationField`] is square, row-major, and every sample lies in `[0, 1]`.
//! - Fields are immutable once built; sampling and meshing only read them.
//! - Height sampling is total: any finite or non-finite position yields a finite height.

mod field;
mod load;
mod sampler;
mod surface;

pub use field::{ElevationField, FieldError, FieldStats, luma};
pub use load::{AssetLoadError, load_bytes, load_image, load_path};
pub use sampler::{GroundHeight, HeightSampler, sample_height};
pub use surface::{TerrainSurface, build_surface};

pub fn crate_info() -> &'static str {
    "terrawalk-terrain v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("terrain"));
    }
}
