use glam::Vec3;
use std::collections::BTreeSet;

use crate::intent::InputIntent;

/// A movement action a held key can produce.
///
/// Windowing layers map their own key codes onto these; the controller never
/// sees platform key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    Forward,
    Back,
    StrafeLeft,
    StrafeRight,
    Run,
    Jump,
}

/// Set of currently held actions.
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    held: BTreeSet<Action>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press or release.
    pub fn set(&mut self, action: Action, pressed: bool) {
        let changed = if pressed {
            self.held.insert(action)
        } else {
            self.held.remove(&action)
        };
        if changed {
            tracing::trace!(?action, pressed, "action state changed");
        }
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    /// Release everything, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.held.clear();
    }

    /// Snapshot the held actions into an intent for this frame.
    ///
    /// Opposing actions cancel: holding both forward and back gives a zero forward axis.
    pub fn intent(&self, look_forward: Vec3) -> InputIntent {
        InputIntent {
            forward_axis: self.axis(Action::Forward, Action::Back),
            strafe_axis: self.axis(Action::StrafeRight, Action::StrafeLeft),
            run: self.is_held(Action::Run),
            jump: self.is_held(Action::Jump),
            look_forward,
        }
    }

    fn axis(&self, positive: Action, negative: Action) -> f32 {
        let mut axis = 0.0;
        if self.is_held(positive) {
            axis += 1.0;
        }
        if self.is_held(negative) {
            axis -= 1.0;
        }
        axis
    }
}
