use terrawalk_common::TerrainScale;

use crate::field::ElevationField;

/// Anything that can answer "how high is the ground at world (x, z)".
///
/// The character controller only depends on this trait, so it can run against
/// the real terrain or against an analytic surface in tests.
pub trait GroundHeight {
    fn ground_height(&self, x: f32, z: f32) -> f32;
}

impl<F> GroundHeight for F
where
    F: Fn(f32, f32) -> f32,
{
    fn ground_height(&self, x: f32, z: f32) -> f32 {
        self(x, z)
    }
}

/// Grid coordinates this close to a node read the node itself.
const NODE_SNAP: f64 = 1e-4;

/// Bilinearly interpolated ground elevation at a world position.
///
/// Positions outside the footprint read the nearest edge: the terrain is treated
/// as extending outward at its boundary height. Non-finite coordinates read the centre.
/// A position on a grid node, such as a vertex of [`build_surface`](crate::build_surface),
/// returns that node's elevation exactly.
pub fn sample_height(field: &ElevationField, x: f32, z: f32, scale: &TerrainScale) -> f32 {
    let last = field.size() - 1;
    let gx = grid_coord(x, scale, last);
    let gy = grid_coord(z, scale, last);

    let x0 = (gx.floor() as usize).min(last);
    let y0 = (gy.floor() as usize).min(last);
    let x1 = (x0 + 1).min(last);
    let y1 = (y0 + 1).min(last);

    let tx = (gx - x0 as f64) as f32;
    let ty = (gy - y0 as f64) as f32;

    let h00 = field.get(y0, x0);
    let h10 = field.get(y0, x1);
    let h01 = field.get(y1, x0);
    let h11 = field.get(y1, x1);

    let hx0 = lerp(h00, h10, tx);
    let hx1 = lerp(h01, h11, tx);
    scale.elevation(lerp(hx0, hx1, ty))
}

/// World coordinate to a fractional grid index in `[0, last]`.
fn grid_coord(world: f32, scale: &TerrainScale, last: usize) -> f64 {
    let half = f64::from(scale.half_extent());
    let unit = (f64::from(world) + half) / f64::from(scale.world_size);
    let unit = if unit.is_nan() { 0.5 } else { unit.clamp(0.0, 1.0) };

    let g = unit * last as f64;
    let node = g.round();
    if (g - node).abs() < NODE_SNAP { node } else { g }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// A field paired with its world placement.
#[derive(Debug, Clone, Copy)]
pub struct HeightSampler<'a> {
    field: &'a ElevationField,
    scale: TerrainScale,
}

impl<'a> HeightSampler<'a> {
    pub fn new(field: &'a ElevationField, scale: TerrainScale) -> Self {
        Self { field, scale }
    }

    pub fn field(&self) -> &'a ElevationField {
        self.field
    }

    pub fn scale(&self) -> &TerrainScale {
        &self.scale
    }

    pub fn sample(&self, x: f32, z: f32) -> f32 {
        sample_height(self.field, x, z, &self.scale)
    }
}

impl GroundHeight for HeightSampler<'_> {
    fn ground_height(&self, x: f32, z: f32) -> f32 {
        self.sample(x, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 5x5 field on a 4-unit footprint: grid node (r, c) sits at world (c - 2, r - 2).
    fn ramp_field() -> ElevationField {
        let samples = (0..25)
            .map(|i| {
                let (r, c) = (i / 5, i % 5);
                ((r * 7 + c * 3) % 11) as f32 / 10.0
            })
            .collect();
        ElevationField::from_samples(5, samples).unwrap()
    }

    fn unit_scale() -> TerrainScale {
        TerrainScale::new(4.0, 10.0, -3.0)
    }

    #[test]
    fn exact_at_grid_nodes() {
        let field = ramp_field();
        let scale = unit_scale();
        for r in 0..5 {
            for c in 0..5 {
                let x = c as f32 - 2.0;
                let z = r as f32 - 2.0;
                let expected = field.samples()[r * 5 + c] * scale.height_scale + scale.base_y;
                assert_eq!(sample_height(&field, x, z, &scale), expected, "node ({r}, {c})");
            }
        }
    }

    #[test]
    fn surface_vertices_resample_exactly_at_default_scale() {
        let size = 256;
        let samples = (0..size * size)
            .map(|i| {
                let (r, c) = ((i / size) as f32, (i % size) as f32);
                0.5 + 0.3 * (r * 0.11).sin() * (c * 0.07).cos()
            })
            .collect();
        let field = ElevationField::from_samples(size, samples).unwrap();
        let scale = TerrainScale::default();
        let surface = crate::build_surface(&field, &scale);

        for p in surface.positions() {
            assert_eq!(sample_height(&field, p.x, p.z, &scale), p.y, "vertex {p}");
        }
    }

    #[test]
    fn between_nodes_still_interpolates() {
        let field = ElevationField::from_samples(2, vec![0.0, 1.0, 0.0, 1.0]).unwrap();
        let scale = TerrainScale::new(2.0, 1.0, 0.0);
        // Just off a node, but well outside the snap distance.
        let h = sample_height(&field, -1.0 + 0.01, 0.0, &scale);
        assert!((h - 0.005).abs() < 1e-6, "h = {h}");
    }

    #[test]
    fn midpoint_is_average_of_corners() {
        let field = ElevationField::from_samples(2, vec![0.0, 1.0, 0.5, 0.25]).unwrap();
        let scale = TerrainScale::new(2.0, 1.0, 0.0);
        let h = sample_height(&field, 0.0, 0.0, &scale);
        assert!((h - (0.0 + 1.0 + 0.5 + 0.25) / 4.0).abs() < 1e-6);
    }

    #[test]
    fn interpolates_linearly_along_an_edge() {
        let field = ElevationField::from_samples(2, vec![0.0, 1.0, 0.0, 1.0]).unwrap();
        let scale = TerrainScale::new(2.0, 8.0, 0.0);
        // x = -1 -> 0, x = 1 -> 8
        assert!((sample_height(&field, -0.5, 0.3, &scale) - 2.0).abs() < 1e-5);
        assert!((sample_height(&field, 0.5, -0.7, &scale) - 6.0).abs() < 1e-5);
    }

    #[test]
    fn bounded_by_field_extremes() {
        let field = ramp_field();
        let scale = unit_scale();
        let lo = field.min() * scale.height_scale + scale.base_y;
        let hi = field.max() * scale.height_scale + scale.base_y;
        for i in 0..=60 {
            for j in 0..=60 {
                let x = -3.0 + i as f32 * 0.1;
                let z = -3.0 + j as f32 * 0.1;
                let h = sample_height(&field, x, z, &scale);
                assert!(h >= lo - 1e-5 && h <= hi + 1e-5, "({x}, {z}) -> {h}");
            }
        }
    }

    #[test]
    fn clamps_outside_footprint_to_edge() {
        let field = ramp_field();
        let scale = unit_scale();
        for &(far, edge) in &[
            ((1e6, 0.7), (2.0, 0.7)),
            ((-1e6, -1.3), (-2.0, -1.3)),
            ((0.4, 5e4), (0.4, 2.0)),
            ((-9e9, -9e9), (-2.0, -2.0)),
        ] {
            assert_eq!(
                sample_height(&field, far.0, far.1, &scale),
                sample_height(&field, edge.0, edge.1, &scale)
            );
        }
    }

    #[test]
    fn non_finite_positions_stay_finite() {
        let field = ramp_field();
        let scale = unit_scale();
        for &(x, z) in &[
            (f32::NAN, 0.0),
            (0.0, f32::NAN),
            (f32::INFINITY, f32::NEG_INFINITY),
        ] {
            assert!(sample_height(&field, x, z, &scale).is_finite());
        }
    }

    #[test]
    fn sampler_matches_free_function() {
        let field = ramp_field();
        let sampler = HeightSampler::new(&field, unit_scale());
        assert_eq!(
            sampler.ground_height(0.37, -1.2),
            sample_height(&field, 0.37, -1.2, &unit_scale())
        );
    }

    #[test]
    fn closures_are_ground() {
        let slope = |x: f32, _z: f32| 0.5 * x;
        assert_eq!(slope.ground_height(4.0, 100.0), 2.0);
    }
}
