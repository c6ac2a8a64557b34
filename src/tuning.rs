//! Data-driven game balance
//!
//! Every number that shapes how a run plays lives here so it can be
//! overridden from a settings file without touching simulation code.
//! Missing fields fall back to the defaults below.

use serde::{Deserialize, Serialize};

/// Balance values read by the simulation each frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Field ===
    /// Playfield width in pixels
    pub field_width: f32,
    /// Playfield height in pixels
    pub field_height: f32,
    /// Distance the craft center keeps from every field edge
    pub craft_margin: f32,

    // === Speeds (pixels per second) ===
    pub craft_speed: f32,
    pub projectile_speed: f32,
    pub boss_projectile_speed: f32,
    pub adversary_speed: f32,
    pub boss_speed: f32,

    // === Timing (seconds) ===
    /// Length of a run
    pub countdown_secs: u32,
    /// Minimum gap between two player shots
    pub fire_cooldown: f64,
    /// Minimum gap between two boss shots
    pub boss_fire_interval: f64,
    /// How often the boss re-rolls its horizontal direction
    pub boss_turn_interval: f64,

    // === Spawning ===
    /// Per-frame probability of a regular adversary appearing
    pub spawn_chance: f64,
    /// Score at which the boss arrives
    pub boss_score_threshold: i64,
    /// Depth the boss is pinned to
    pub boss_depth: f32,
    pub boss_hit_points: u32,
    /// Hit points removed per player hit
    pub boss_damage_per_hit: u32,

    // === Collision half-extents ===
    pub adversary_half_extent: f32,
    pub projectile_half_extent: f32,
    pub boss_half_extent: f32,

    // === Scoring ===
    /// Score lost when a regular adversary leaves the bottom of the field
    pub escape_penalty: i64,
    /// Score gained per hit on the boss
    pub boss_hit_award: i64,
    /// Horizontal offset of each barrel when firing a twin shot
    pub twin_shot_offset: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: 800.0,
            field_height: 600.0,
            craft_margin: 30.0,

            craft_speed: 500.0,
            projectile_speed: 312.5,
            boss_projectile_speed: 250.0,
            adversary_speed: 125.0,
            boss_speed: 150.0,

            countdown_secs: 60,
            fire_cooldown: 0.25,
            boss_fire_interval: 1.0,
            boss_turn_interval: 2.0,

            spawn_chance: 0.02,
            boss_score_threshold: 1000,
            boss_depth: 120.0,
            boss_hit_points: 100,
            boss_damage_per_hit: 1,

            adversary_half_extent: 15.0,
            projectile_half_extent: 15.0,
            boss_half_extent: 60.0,

            escape_penalty: 10,
            boss_hit_award: 5,
            twin_shot_offset: 20.0,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Horizontal range the boss patrols (its center never leaves the field)
    pub fn boss_x_range(&self) -> (f32, f32) {
        let lo = self.boss_half_extent.min(self.field_width / 2.0);
        (lo, self.field_width - lo)
    }
}
