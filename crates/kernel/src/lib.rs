//! Walk kernel: player state, the character controller, and the frame loop that drives it.
//!
//! # Invariants
//! - One controller update per frame, strictly sequential.
//! - A grounded player at rest sits exactly `player_height` above the sampled ground.
//! - A frame loop only exists once its elevation field has been fully loaded.

pub mod clock;
pub mod controller;
pub mod frame;
pub mod player;

pub use clock::{FrameClock, FrameStats};
pub use controller::CharacterController;
pub use frame::{FrameLoop, FrameReport};
pub use player::{Contact, PlayerState};
