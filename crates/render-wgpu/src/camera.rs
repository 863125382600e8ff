use glam::Vec3;

/// Mouse-look state: yaw and pitch only. Position comes from the player.
#[derive(Debug, Clone, Copy)]
pub struct LookCamera {
    pub yaw: f32,
    pub pitch: f32,
    pub sensitivity: f32,
}

impl Default for LookCamera {
    fn default() -> Self {
        Self {
            // Looking down -Z.
            yaw: -90.0_f32.to_radians(),
            pitch: 0.0,
            sensitivity: 0.002,
        }
    }
}

impl LookCamera {
    /// Full look direction, pitch included.
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize()
    }

    /// Apply a mouse delta in pixels. Pitch stops just short of straight up/down.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.pitch -= dy * self.sensitivity;
        self.pitch = self
            .pitch
            .clamp(-89.0_f32.to_radians(), 89.0_f32.to_radians());
    }
}
