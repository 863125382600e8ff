use glam::Vec3;

/// Per-frame movement request handed to the character controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputIntent {
    /// +1 forward, -1 back.
    pub forward_axis: f32,
    /// +1 strafe right, -1 strafe left.
    pub strafe_axis: f32,
    pub run: bool,
    pub jump: bool,
    /// Camera look direction. Only its yaw is used for movement.
    pub look_forward: Vec3,
}

impl Default for InputIntent {
    fn default() -> Self {
        Self {
            forward_axis: 0.0,
            strafe_axis: 0.0,
            run: false,
            jump: false,
            look_forward: Vec3::NEG_Z,
        }
    }
}

impl InputIntent {
    /// Idle intent looking along `look_forward`.
    pub fn idle(look_forward: Vec3) -> Self {
        Self {
            look_forward,
            ..Self::default()
        }
    }

    pub fn has_movement(&self) -> bool {
        self.forward_axis != 0.0 || self.strafe_axis != 0.0
    }
}
