//! Star Strike - A vertical arcade shooter
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (movement, collisions, lifecycle, boss)
//! - `platform`: Wall-clock frame deltas and held-key input adapter
//! - `settings`: Player/runner preferences loaded from JSON
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed step used by the headless runner (60 Hz, one step per display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Largest frame delta the loop will integrate (tab switches, debugger pauses)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Lifetime of a score popup in seconds
    pub const POPUP_LIFETIME: f64 = 1.0;
    /// Delay between a regular kill and the adversary leaving the store
    pub const KILL_FADE_DELAY: f64 = 1.0;
    /// Delay between the craft being hit and the run ending
    pub const CRAFT_FADE_DELAY: f64 = 1.0;
    /// Damage flash shown on the boss after each hit
    pub const BOSS_DAMAGE_FLASH: f64 = 0.15;
    /// Total length of the boss explosion sequence
    pub const BOSS_EXPLOSION_DURATION: f64 = 2.5;
    /// Offsets (seconds after the killing blow) of each blast in the explosion sequence
    pub const BOSS_BLAST_STAGES: [f64; 3] = [0.0, 0.8, 1.6];
    /// Lifetime of a single explosion blast flash
    pub const BOSS_BLAST_FLASH: f64 = 0.6;

    /// Boss facing tilt in degrees per unit of horizontal direction
    pub const BOSS_TILT_DEGREES: f32 = 15.0;
}
