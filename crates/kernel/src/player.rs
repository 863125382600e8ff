use glam::Vec3;

/// Whether the player is standing on the terrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Contact {
    Grounded,
    Airborne,
}

impl std::fmt::Display for Contact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Grounded => f.write_str("grounded"),
            Self::Airborne => f.write_str("airborne"),
        }
    }
}

/// Mutable player state, owned by whoever drives the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerState {
    /// Eye position in world space.
    pub position: Vec3,
    pub vertical_velocity: f32,
    pub contact: Contact,
}

impl PlayerState {
    /// A player at `position` with no velocity. Airborne until the first ground check.
    pub fn spawn(position: Vec3) -> Self {
        Self {
            position,
            vertical_velocity: 0.0,
            contact: Contact::Airborne,
        }
    }

    /// A player standing on the ground with its eye at `position`.
    pub fn grounded(position: Vec3) -> Self {
        Self {
            contact: Contact::Grounded,
            ..Self::spawn(position)
        }
    }

    pub fn is_grounded(&self) -> bool {
        self.contact == Contact::Grounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_starts_airborne_at_rest() {
        let p = PlayerState::spawn(Vec3::new(0.0, 20.0, 0.0));
        assert_eq!(p.contact, Contact::Airborne);
        assert_eq!(p.vertical_velocity, 0.0);
        assert!(!p.is_grounded());
    }

    #[test]
    fn grounded_constructor() {
        let p = PlayerState::grounded(Vec3::Y * 2.0);
        assert!(p.is_grounded());
        assert_eq!(p.position, Vec3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn contact_display() {
        assert_eq!(Contact::Grounded.to_string(), "grounded");
        assert_eq!(Contact::Airborne.to_string(), "airborne");
    }
}
