//! Read-only views for presentation and the HUD
//!
//! Renderers and UI shells consume these; nothing here feeds back into the
//! simulation.

use serde::Serialize;

use super::state::{
    AdversaryKind, BossPhase, Effect, EntityId, GamePhase, GameState, ProjectileOrigin,
};
use super::tiers::{self, AdversaryVariant, CraftSprite, ProjectileVariant};

#[derive(Debug, Clone, Serialize)]
pub struct CraftView {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub sprite: CraftSprite,
    pub fading: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectileView {
    pub id: EntityId,
    pub x: f32,
    pub y: f32,
    pub origin: ProjectileOrigin,
    pub variant: ProjectileVariant,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdversaryView {
    pub id: EntityId,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub variant: AdversaryVariant,
    pub fading: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BossView {
    pub id: EntityId,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub hit_points: u32,
    pub max_hit_points: u32,
    /// Facing tilt in degrees
    pub rotation: f32,
    pub damaged: bool,
    pub exploding: bool,
}

/// Scalar signals for HUD text and overlays
#[derive(Debug, Clone, Serialize)]
pub struct Hud {
    pub score: i64,
    pub time_left: u32,
    pub phase: GamePhase,
    /// Present while the boss is in the store
    pub boss_hit_points: Option<u32>,
    pub tier_label: &'static str,
    /// Upgrade preview ("next ship")
    pub next_sprite: Option<CraftSprite>,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub craft: CraftView,
    pub projectiles: Vec<ProjectileView>,
    pub adversaries: Vec<AdversaryView>,
    pub boss: Option<BossView>,
    pub effects: Vec<Effect>,
    pub hud: Hud,
}

impl GameState {
    pub fn hud(&self) -> Hud {
        Hud {
            score: self.score,
            time_left: self.clock.remaining(),
            phase: self.phase,
            boss_hit_points: self.boss().map(|(_, boss)| boss.hit_points),
            tier_label: tiers::craft_sprite(self.score).label(),
            next_sprite: tiers::next_sprite(self.score),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        let craft = CraftView {
            x: self.craft.pos.x,
            y: self.craft.pos.y,
            size: tiers::craft_size(self.score),
            sprite: tiers::craft_sprite(self.score),
            fading: self.craft.fading,
        };

        let projectiles = self
            .projectiles
            .iter()
            .map(|p| ProjectileView {
                id: p.id,
                x: p.pos.x,
                y: p.pos.y,
                origin: p.origin,
                variant: p.variant,
            })
            .collect();

        let mut adversaries = Vec::new();
        let mut boss = None;
        for a in &self.adversaries {
            let size = a.half_extent(&self.tuning) * 2.0;
            match &a.kind {
                AdversaryKind::Regular { variant } => adversaries.push(AdversaryView {
                    id: a.id,
                    x: a.pos.x,
                    y: a.pos.y,
                    size,
                    variant: *variant,
                    fading: self.is_fading(a.id),
                }),
                AdversaryKind::Boss(data) => {
                    boss = Some(BossView {
                        id: a.id,
                        x: a.pos.x,
                        y: a.pos.y,
                        size,
                        hit_points: data.hit_points,
                        max_hit_points: self.tuning.boss_hit_points,
                        rotation: data.rotation,
                        damaged: data.damaged,
                        exploding: data.phase == BossPhase::Exploding,
                    })
                }
            }
        }

        Snapshot {
            craft,
            projectiles,
            adversaries,
            boss,
            effects: self.effects.clone(),
            hud: self.hud(),
        }
    }
}
