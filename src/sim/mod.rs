//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod problem;
pub mod state;
pub mod tick;

pub use problem::{Op, Problem};
pub use state::{Drop, GameState};
pub use tick::{FrameOutcome, Submission, advance, resolve_misses, step, submit};
