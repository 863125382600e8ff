use glam::{Mat4, Vec3};
use terrawalk_terrain::TerrainSurface;

/// First-person camera for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    /// Camera position in world space: the player's eye.
    pub eye: Vec3,
    /// Look direction, pitch included.
    pub forward: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 20.0, 0.0),
            forward: Vec3::NEG_Z,
            fov_degrees: 75.0,
            near: 0.1,
            far: 2000.0,
        }
    }
}

impl RenderView {
    pub fn first_person(eye: Vec3, forward: Vec3) -> Self {
        Self {
            eye,
            forward,
            ..Self::default()
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        let forward = self.forward.try_normalize().unwrap_or(Vec3::NEG_Z);
        Mat4::look_to_rh(self.eye, forward, Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_degrees.to_radians(),
            aspect.max(1e-3),
            self.near,
            self.far,
        )
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }
}

/// Colors and lights of the scene, in linear RGB.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneStyle {
    pub sky: [f32; 3],
    pub terrain: [f32; 3],
    pub water: [f32; 3],
    pub water_opacity: f32,
    /// Hemisphere light: sky and ground tints plus intensity.
    pub hemi_sky: [f32; 3],
    pub hemi_ground: [f32; 3],
    pub hemi_intensity: f32,
    /// Direction the sun light comes from (towards the light).
    pub sun_direction: Vec3,
    pub sun_intensity: f32,
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            sky: srgb_hex(0x0b0e14),
            terrain: srgb_hex(0x3b7a57),
            water: srgb_hex(0x234a7a),
            water_opacity: 0.55,
            hemi_sky: srgb_hex(0xffffff),
            hemi_ground: srgb_hex(0x223344),
            hemi_intensity: 0.9,
            sun_direction: Vec3::new(80.0, 120.0, 60.0).normalize(),
            sun_intensity: 1.0,
        }
    }
}

/// Convert a `0xRRGGBB` sRGB color to linear RGB.
pub(crate) fn srgb_hex(hex: u32) -> [f32; 3] {
    let channel = |shift: u32| {
        let c = ((hex >> shift) & 0xff) as f32 / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    [channel(16), channel(8), channel(0)]
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The terrain surface is built once at startup; the view changes every frame.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame of the terrain seen from `view`.
    fn render(&self, surface: &TerrainSurface, view: &RenderView) -> Self::Output;
}

/// Text renderer for headless runs: describes the surface and the camera.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, surface: &TerrainSurface, view: &RenderView) -> String {
        let (lo, hi) = surface.elevation_range();
        let mut out = String::new();
        out.push_str(&format!(
            "=== Terrain ({0}x{0}, {1} triangles) ===\n",
            surface.size(),
            surface.triangle_count()
        ));
        out.push_str(&format!("Elevation: {lo:.2} .. {hi:.2}\n"));
        out.push_str(&format!(
            "Camera: eye=({:.2}, {:.2}, {:.2}) forward=({:.2}, {:.2}, {:.2}) fov={:.0}\n",
            view.eye.x,
            view.eye.y,
            view.eye.z,
            view.forward.x,
            view.forward.y,
            view.forward.z,
            view.fov_degrees
        ));
        out
    }
}
