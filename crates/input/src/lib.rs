//! Input: held movement actions folded into a per-frame [`InputIntent`].
//!
//! # Invariants
//! - The simulation consumes intents, never raw window events.
//! - An intent is a read-only snapshot; it carries no state between frames.

pub mod action;
pub mod intent;

pub use action::{Action, KeyState};
pub use intent::InputIntent;
