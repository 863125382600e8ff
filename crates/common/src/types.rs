use serde::{Deserialize, Serialize};

/// Mapping from normalized field samples to world units.
///
/// The terrain is a square footprint centred on the origin: `world_size` wide
/// along both X and Z, with sample value `s` placed at `s * height_scale + base_y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainScale {
    pub world_size: f32,
    pub height_scale: f32,
    pub base_y: f32,
}

impl Default for TerrainScale {
    fn default() -> Self {
        Self {
            world_size: 400.0,
            height_scale: 60.0,
            base_y: 0.0,
        }
    }
}

impl TerrainScale {
    pub fn new(world_size: f32, height_scale: f32, base_y: f32) -> Self {
        Self {
            world_size,
            height_scale,
            base_y,
        }
    }

    /// Half the footprint width; the terrain spans `[-half_extent, half_extent]` on X and Z.
    pub fn half_extent(&self) -> f32 {
        self.world_size * 0.5
    }

    /// World elevation of a normalized sample.
    pub fn elevation(&self, sample: f32) -> f32 {
        sample * self.height_scale + self.base_y
    }
}
