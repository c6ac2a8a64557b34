//! Score-gated progression
//!
//! Craft size, sprite, fire pattern, projectile look and adversary mix are
//! all step functions of the current score. Nothing here is stored on the
//! game state; callers recompute from score whenever they need a value.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Score at which the craft grows to its middle sprite
pub const MIDDLE_SPRITE_SCORE: i64 = 200;
/// Score at which the craft becomes the huge sprite (and size 120)
pub const HUGE_SPRITE_SCORE: i64 = 500;
/// Score at which the craft reaches its largest size
pub const MAX_SIZE_SCORE: i64 = 1000;
/// Score at which fire becomes a twin shot
pub const TWIN_SHOT_SCORE: i64 = 100;
/// Score at which Raiders start appearing
pub const RAIDER_SCORE: i64 = 300;
/// Score at which Destroyers start appearing
pub const DESTROYER_SCORE: i64 = 600;

/// Craft sprite selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CraftSprite {
    Small,
    Middle,
    Huge,
}

impl CraftSprite {
    pub fn label(&self) -> &'static str {
        match self {
            CraftSprite::Small => "Small Ship",
            CraftSprite::Middle => "Middle Ship",
            CraftSprite::Huge => "Huge Ship",
        }
    }
}

/// Projectile look, fixed at the moment it is fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileVariant {
    Plain,
    Neon,
    RedNeon,
    BossBolt,
}

/// Regular adversary variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdversaryVariant {
    Scout,
    Raider,
    Destroyer,
}

impl AdversaryVariant {
    /// Score awarded for destroying this variant
    pub fn award(&self) -> i64 {
        match self {
            AdversaryVariant::Scout => 10,
            AdversaryVariant::Raider => 20,
            AdversaryVariant::Destroyer => 30,
        }
    }
}

/// Rendered craft size in pixels (square)
pub fn craft_size(score: i64) -> f32 {
    if score >= MAX_SIZE_SCORE {
        180.0
    } else if score >= HUGE_SPRITE_SCORE {
        120.0
    } else {
        60.0
    }
}

pub fn craft_sprite(score: i64) -> CraftSprite {
    if score >= HUGE_SPRITE_SCORE {
        CraftSprite::Huge
    } else if score >= MIDDLE_SPRITE_SCORE {
        CraftSprite::Middle
    } else {
        CraftSprite::Small
    }
}

/// The sprite the player is working toward, if any (HUD upgrade preview)
pub fn next_sprite(score: i64) -> Option<CraftSprite> {
    match craft_sprite(score) {
        CraftSprite::Small => Some(CraftSprite::Middle),
        CraftSprite::Middle => Some(CraftSprite::Huge),
        CraftSprite::Huge => None,
    }
}

/// Distance from the bottom edge to the craft center in axis-locked mode.
/// The huge sprite rides higher so it stays on screen.
pub fn craft_offset(score: i64) -> f32 {
    match craft_sprite(score) {
        CraftSprite::Huge => 140.0,
        _ => 100.0,
    }
}

/// Whether a fire action produces two projectiles
pub fn twin_shot(score: i64) -> bool {
    score >= TWIN_SHOT_SCORE
}

pub fn projectile_variant(score: i64) -> ProjectileVariant {
    if score >= HUGE_SPRITE_SCORE {
        ProjectileVariant::RedNeon
    } else if score >= MIDDLE_SPRITE_SCORE {
        ProjectileVariant::Neon
    } else {
        ProjectileVariant::Plain
    }
}

/// Spawn weights (Scout, Raider, Destroyer) out of 100
pub fn spawn_weights(score: i64) -> [u32; 3] {
    if score >= DESTROYER_SCORE {
        [50, 30, 20]
    } else if score >= RAIDER_SCORE {
        [70, 30, 0]
    } else {
        [100, 0, 0]
    }
}

/// Weighted-random variant for a freshly spawned adversary
pub fn roll_variant(score: i64, rng: &mut impl Rng) -> AdversaryVariant {
    let [scout, raider, _] = spawn_weights(score);
    let roll = rng.random_range(0..100);
    if roll < scout {
        AdversaryVariant::Scout
    } else if roll < scout + raider {
        AdversaryVariant::Raider
    } else {
        AdversaryVariant::Destroyer
    }
}
