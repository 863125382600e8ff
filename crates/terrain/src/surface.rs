use glam::Vec3;
use terrawalk_common::TerrainScale;

use crate::field::ElevationField;

/// Renderable grid mesh generated from an elevation field.
///
/// One vertex per field sample, laid out row-major like the field itself.
/// Triangles wind counter-clockwise when seen from above.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainSurface {
    size: usize,
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    indices: Vec<u32>,
}

impl TerrainSurface {
    /// Vertices per side.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Lowest and highest vertex elevation.
    pub fn elevation_range(&self) -> (f32, f32) {
        self.positions
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.y), hi.max(p.y))
            })
    }
}

/// Build the terrain mesh for `field` placed according to `scale`.
///
/// Pure: the same field and scale always give an identical surface.
pub fn build_surface(field: &ElevationField, scale: &TerrainScale) -> TerrainSurface {
    let _span = tracing::info_span!("build_surface", size = field.size()).entered();

    let size = field.size();
    let last = (size - 1) as f32;
    let half = scale.half_extent();

    let mut positions = Vec::with_capacity(size * size);
    for row in 0..size {
        let z = -half + row as f32 / last * scale.world_size;
        for col in 0..size {
            let x = -half + col as f32 / last * scale.world_size;
            positions.push(Vec3::new(x, scale.elevation(field.get(row, col)), z));
        }
    }

    let quads = (size - 1) * (size - 1);
    let mut indices = Vec::with_capacity(quads * 6);
    for row in 0..size - 1 {
        for col in 0..size - 1 {
            let a = (row * size + col) as u32;
            let b = a + 1;
            let c = a + size as u32;
            let d = c + 1;
            indices.extend_from_slice(&[a, c, b, b, c, d]);
        }
    }

    let normals = vertex_normals(&positions, &indices);

    tracing::debug!(
        vertices = positions.len(),
        triangles = indices.len() / 3,
        "built terrain surface"
    );

    TerrainSurface {
        size,
        positions,
        normals,
        indices,
    }
}

/// Smooth normals: sum the area-weighted face normals around each vertex.
fn vertex_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut acc = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let p0 = positions[i0];
        let face = (positions[i1] - p0).cross(positions[i2] - p0);
        acc[i0] += face;
        acc[i1] += face;
        acc[i2] += face;
    }
    acc.into_iter()
        .map(|n| n.try_normalize().unwrap_or(Vec3::Y))
        .collect()
}
