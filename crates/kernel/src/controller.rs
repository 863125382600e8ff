use glam::Vec3;
use terrawalk_common::PlayerConfig;
use terrawalk_input::InputIntent;
use terrawalk_terrain::GroundHeight;

use crate::player::{Contact, PlayerState};

/// Per-frame character controller: camera-relative walking, gravity, jumping,
/// and snapping onto the ground surface.
#[derive(Debug, Clone)]
pub struct CharacterController {
    config: PlayerConfig,
}

impl CharacterController {
    pub fn new(config: PlayerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Bound a measured frame time to `[0, max_frame_dt]`. NaN counts as zero.
    pub fn clamp_dt(&self, dt: f32) -> f32 {
        if dt > 0.0 {
            dt.min(self.config.max_frame_dt)
        } else {
            0.0
        }
    }

    /// Advance `player` by one frame.
    ///
    /// Horizontal movement happens first, so the ground check reads the height
    /// under the new position. A jump is applied after the ground check so the
    /// same frame's snap cannot cancel it. Zero-length frames change nothing.
    pub fn update<G>(&self, player: &mut PlayerState, input: &InputIntent, ground: &G, dt: f32)
    where
        G: GroundHeight + ?Sized,
    {
        let dt = self.clamp_dt(dt);
        if dt == 0.0 {
            return;
        }
        let c = &self.config;
        let before = player.contact;

        let speed = if input.run { c.run_speed } else { c.walk_speed };
        let dir = movement_direction(input);
        if dir != Vec3::ZERO {
            player.position += dir * (speed * dt);
        }

        player.vertical_velocity -= c.gravity * dt;

        let ground_y = ground.ground_height(player.position.x, player.position.z);
        let target_y = ground_y + c.player_height;
        let projected_y = player.position.y + player.vertical_velocity * dt;

        if projected_y <= target_y {
            player.position.y = target_y;
            player.vertical_velocity = 0.0;
            player.contact = Contact::Grounded;
        } else {
            player.position.y = projected_y;
            player.contact = Contact::Airborne;
        }

        if input.jump && player.contact == Contact::Grounded {
            player.vertical_velocity = c.jump_velocity;
            player.contact = Contact::Airborne;
            tracing::debug!(position = %player.position, "jump");
        }

        if before == Contact::Airborne && player.contact == Contact::Grounded {
            tracing::debug!(position = %player.position, "landed");
        }
    }
}

/// Unit horizontal direction requested by `input`, or zero.
///
/// The look direction is flattened to its yaw and combined with its right-hand
/// perpendicular. The sum is normalized, so diagonal input is no faster than
/// straight input.
pub fn movement_direction(input: &InputIntent) -> Vec3 {
    let flat = Vec3::new(input.look_forward.x, 0.0, input.look_forward.z);
    let Some(forward) = flat.try_normalize() else {
        return Vec3::ZERO;
    };
    let right = forward.cross(Vec3::Y);

    let wish = forward * input.forward_axis + right * input.strafe_axis;
    if wish.length_squared() > 0.0 {
        wish.normalize()
    } else {
        Vec3::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn controller() -> CharacterController {
        CharacterController::new(PlayerConfig::default())
    }

    fn flat(_x: f32, _z: f32) -> f32 {
        0.0
    }

    fn walk(forward: f32, strafe: f32) -> InputIntent {
        InputIntent {
            forward_axis: forward,
            strafe_axis: strafe,
            ..InputIntent::idle(Vec3::NEG_Z)
        }
    }

    fn horizontal(v: Vec3) -> f32 {
        Vec3::new(v.x, 0.0, v.z).length()
    }

    #[test]
    fn strafe_right_is_right_of_look() {
        let dir = movement_direction(&walk(0.0, 1.0));
        assert!((dir - Vec3::X).length() < 1e-6);
        let dir = movement_direction(&walk(1.0, 0.0));
        assert!((dir - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn pitch_is_ignored() {
        let input = InputIntent {
            forward_axis: 1.0,
            look_forward: Vec3::new(0.0, -0.9, -0.1),
            ..InputIntent::default()
        };
        let dir = movement_direction(&input);
        assert_eq!(dir.y, 0.0);
        assert!((dir - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn looking_straight_down_does_not_move() {
        let input = InputIntent {
            forward_axis: 1.0,
            look_forward: Vec3::NEG_Y,
            ..InputIntent::default()
        };
        assert_eq!(movement_direction(&input), Vec3::ZERO);
    }

    #[test]
    fn diagonal_is_not_faster() {
        let c = controller();
        let start = Vec3::new(0.0, 2.0, 0.0);
        let mut diagonal = PlayerState::grounded(start);
        let mut straight = PlayerState::grounded(start);
        for _ in 0..60 {
            c.update(&mut diagonal, &walk(1.0, 1.0), &flat, DT);
            c.update(&mut straight, &walk(1.0, 0.0), &flat, DT);
        }
        let d = horizontal(diagonal.position - start);
        let s = horizontal(straight.position - start);
        assert!((d - 10.0).abs() < 1e-3, "diagonal moved {d}");
        assert!((s - 10.0).abs() < 1e-3, "straight moved {s}");
        assert!(diagonal.position.x > 0.0 && diagonal.position.z < 0.0);
    }

    #[test]
    fn run_uses_run_speed() {
        let c = controller();
        let mut p = PlayerState::grounded(Vec3::new(0.0, 2.0, 0.0));
        let input = InputIntent {
            run: true,
            ..walk(1.0, 0.0)
        };
        for _ in 0..30 {
            c.update(&mut p, &input, &flat, DT);
        }
        assert!((horizontal(p.position) - 18.0 * 0.5).abs() < 1e-3);
    }

    #[test]
    fn resting_player_stays_on_uneven_ground() {
        let c = controller();
        let ground = |x: f32, z: f32| 3.0 + (x * 0.3).sin() * 2.0 + z * 0.1;
        let mut p = PlayerState::grounded(Vec3::new(1.7, ground(1.7, -4.2) + 2.0, -4.2));
        for i in 0..200 {
            let dt = [DT, 0.004, 0.02, 0.033, 0.5][i % 5];
            c.update(&mut p, &InputIntent::default(), &ground, dt);
            assert!(p.is_grounded());
            assert_eq!(p.position.y, ground(p.position.x, p.position.z) + 2.0);
            assert_eq!(p.vertical_velocity, 0.0);
        }
    }

    #[test]
    fn walking_uphill_stays_grounded() {
        let c = controller();
        let slope = |x: f32, _z: f32| 0.5 * x;
        let mut p = PlayerState::grounded(Vec3::new(0.0, 2.0, 0.0));
        let input = InputIntent {
            forward_axis: 1.0,
            ..InputIntent::idle(Vec3::X)
        };
        for _ in 0..120 {
            c.update(&mut p, &input, &slope, DT);
            assert!(p.is_grounded());
            assert_eq!(p.position.y, slope(p.position.x, p.position.z) + 2.0);
        }
        assert!(p.position.x > 19.0);
    }

    #[test]
    fn jump_arc_on_flat_ground() {
        let c = controller();
        let mut p = PlayerState::grounded(Vec3::new(0.0, 2.0, 0.0));
        let jump = InputIntent {
            jump: true,
            ..InputIntent::default()
        };

        c.update(&mut p, &jump, &flat, DT);
        assert_eq!(p.vertical_velocity, 10.0);
        assert_eq!(p.contact, Contact::Airborne);
        assert_eq!(p.position.y, 2.0);

        let mut prev = p.vertical_velocity;
        let mut peak = p.position.y;
        let mut landed_after = None;
        for frame in 1..=200 {
            c.update(&mut p, &InputIntent::default(), &flat, DT);
            if p.is_grounded() {
                landed_after = Some(frame);
                break;
            }
            assert!((prev - p.vertical_velocity - 25.0 * DT).abs() < 1e-4);
            assert!(p.position.y > 2.0);
            prev = p.vertical_velocity;
            peak = peak.max(p.position.y);
        }

        let frames = landed_after.expect("player should land");
        // Airtime is about 2 * v / g = 0.8 s.
        assert!((45..=50).contains(&frames), "landed after {frames} frames");
        assert_eq!(p.position.y, 2.0);
        assert_eq!(p.vertical_velocity, 0.0);
        // Peak height v^2 / 2g = 2 above the eye line.
        assert!((peak - 4.0).abs() < 0.2, "peak {peak}");
    }

    #[test]
    fn cannot_jump_while_airborne() {
        let c = controller();
        let mut p = PlayerState::spawn(Vec3::new(0.0, 50.0, 0.0));
        let jump = InputIntent {
            jump: true,
            ..InputIntent::default()
        };
        c.update(&mut p, &jump, &flat, DT);
        assert!(p.vertical_velocity < 0.0);
        assert_eq!(p.contact, Contact::Airborne);
    }

    #[test]
    fn falling_player_lands_without_sinking() {
        let c = controller();
        let ground = |x: f32, _z: f32| 5.0 + x * 0.2;
        let mut p = PlayerState::spawn(Vec3::new(0.0, 40.0, 0.0));
        let input = walk(0.0, 1.0);
        let mut landed = false;
        for _ in 0..600 {
            c.update(&mut p, &input, &ground, DT);
            let target = ground(p.position.x, p.position.z) + 2.0;
            assert!(p.position.y >= target);
            if p.is_grounded() {
                landed = true;
                break;
            }
        }
        assert!(landed);
    }

    #[test]
    fn walking_off_a_ledge_falls() {
        let c = controller();
        let ledge = |x: f32, _z: f32| if x < 1.0 { 10.0 } else { 0.0 };
        let mut p = PlayerState::grounded(Vec3::new(0.9, 12.0, 0.0));
        let input = InputIntent {
            forward_axis: 1.0,
            ..InputIntent::idle(Vec3::X)
        };
        c.update(&mut p, &input, &ledge, DT);
        assert_eq!(p.contact, Contact::Airborne);
        assert!(p.position.y < 12.0 && p.position.y > 2.0);
    }

    #[test]
    fn dt_is_clamped() {
        let c = controller();
        assert_eq!(c.clamp_dt(1.0), 0.033);
        assert_eq!(c.clamp_dt(0.01), 0.01);
        assert_eq!(c.clamp_dt(-0.5), 0.0);
        assert_eq!(c.clamp_dt(f32::NAN), 0.0);

        let mut p = PlayerState::grounded(Vec3::new(0.0, 2.0, 0.0));
        c.update(&mut p, &walk(1.0, 0.0), &flat, 5.0);
        assert!((horizontal(p.position) - 10.0 * 0.033).abs() < 1e-5);
    }

    #[test]
    fn zero_frame_is_a_no_op() {
        let c = controller();
        // Deliberately below ground: a real frame would snap it up.
        let before = PlayerState::spawn(Vec3::new(3.0, -7.0, 1.0));
        let mut p = before;
        let input = InputIntent {
            jump: true,
            ..walk(1.0, 1.0)
        };
        c.update(&mut p, &input, &flat, 0.0);
        assert_eq!(p, before);
    }
}
