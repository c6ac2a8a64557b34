//! Frame-driven simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform dependencies:
//! - Caller-supplied frame delta only (no wall clock)
//! - Seeded RNG only
//! - Stable iteration order (insertion order, which is id order)
//! - Deferred mutations go through the schedule, never callbacks

pub mod autopilot;
pub mod boss;
pub mod clock;
pub mod collision;
pub mod schedule;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod tiers;

pub use autopilot::autopilot_input;
pub use clock::Clock;
pub use collision::{Hitbox, overlaps};
pub use schedule::{Action, Schedule};
pub use snapshot::{Hud, Snapshot};
pub use state::{
    Adversary, AdversaryKind, Boss, BossPhase, BossStage, ControlInput, ControlScheme, Craft,
    Effect, EntityId, FadeKind, GameEvent, GamePhase, GameState, Projectile, ProjectileOrigin,
};
pub use tick::{apply_action, tick};
pub use tiers::{AdversaryVariant, CraftSprite, ProjectileVariant};
