//! Platform abstraction layer
//!
//! Bridges host events to the simulation:
//! - Wall-clock timestamps to clamped frame deltas
//! - Held keys to a per-frame control snapshot

pub mod input;
pub mod time;

pub use input::HeldKeys;
pub use time::FrameClock;
