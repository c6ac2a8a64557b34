//! Game state and core simulation types
//!
//! The entity store (craft, projectiles, adversaries, effects) plus the
//! scalar state the loop mutates each frame.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::Clock;
use super::collision::Hitbox;
use super::schedule::Schedule;
use super::tiers::{self, AdversaryVariant, ProjectileVariant};
use crate::tuning::Tuning;

/// Identifier shared by every entity and effect in a run
pub type EntityId = u32;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the player to pick a control mode
    Idle,
    /// Active gameplay
    Running,
    /// Run lost (clock ran out or the craft was hit)
    GameOver,
    /// Boss destroyed
    Won,
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Won)
    }
}

/// How the craft is steered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ControlScheme {
    /// Horizontal movement only; height follows the craft tier
    #[default]
    AxisLocked,
    /// Free movement on both axes
    Free,
}

/// Control snapshot read once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
}

impl ControlInput {
    /// Unit-free steering direction (-1, 0 or 1 per axis, y grows downward)
    pub fn axis(&self) -> Vec2 {
        let x = (self.right as i8 - self.left as i8) as f32;
        let y = (self.down as i8 - self.up as i8) as f32;
        Vec2::new(x, y)
    }
}

/// The player's craft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Craft {
    pub id: EntityId,
    pub pos: Vec2,
    /// Set once the craft has been hit; it stops moving, firing and colliding
    pub fading: bool,
}

impl Craft {
    pub fn hitbox(&self, score: i64) -> Hitbox {
        Hitbox::new(self.pos, tiers::craft_size(score) / 2.0)
    }
}

/// Who fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileOrigin {
    /// Travels toward the top edge
    Player,
    /// Travels toward the bottom edge
    Boss,
}

/// A projectile entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: EntityId,
    pub pos: Vec2,
    pub origin: ProjectileOrigin,
    pub variant: ProjectileVariant,
}

impl Projectile {
    /// Vertical direction of travel (screen space, y down)
    pub fn heading(&self) -> f32 {
        match self.origin {
            ProjectileOrigin::Player => -1.0,
            ProjectileOrigin::Boss => 1.0,
        }
    }

    pub fn hitbox(&self, tuning: &Tuning) -> Hitbox {
        Hitbox::new(self.pos, tuning.projectile_half_extent)
    }
}

/// Boss life cycle while it is in the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossPhase {
    Active,
    Exploding,
}

/// Boss-only attributes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub hit_points: u32,
    /// Horizontal direction, -1.0 or 1.0
    pub direction: f32,
    /// Facing tilt in degrees, derived from `direction`
    pub rotation: f32,
    pub phase: BossPhase,
    /// Damage flash visible after a hit
    pub damaged: bool,
    /// When the latest hit's flash ends
    pub damaged_until: f64,
    /// Time of the last boss shot
    pub last_fire_at: f64,
    /// Time of the next random direction change
    pub next_turn_at: f64,
}

/// Adversary flavour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AdversaryKind {
    Regular { variant: AdversaryVariant },
    Boss(Boss),
}

/// A hostile entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Adversary {
    pub id: EntityId,
    pub pos: Vec2,
    pub kind: AdversaryKind,
}

impl Adversary {
    pub fn is_boss(&self) -> bool {
        matches!(self.kind, AdversaryKind::Boss(_))
    }

    pub fn half_extent(&self, tuning: &Tuning) -> f32 {
        match self.kind {
            AdversaryKind::Regular { .. } => tuning.adversary_half_extent,
            AdversaryKind::Boss(_) => tuning.boss_half_extent,
        }
    }

    pub fn hitbox(&self, tuning: &Tuning) -> Hitbox {
        Hitbox::new(self.pos, self.half_extent(tuning))
    }
}

/// What kind of entity a fade marker belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FadeKind {
    Craft,
    Adversary,
    Boss,
}

/// Transient, non-interactive markers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    /// Floating "+10" / "-10"; pruned by age
    ScorePopup {
        id: EntityId,
        value: i64,
        pos: Vec2,
        created_at: f64,
    },
    /// Impact flash; removed by its paired scheduled action
    CollisionFlash { id: EntityId, pos: Vec2 },
    /// Entity `id` is fading out at `pos`
    Fading {
        id: EntityId,
        kind: FadeKind,
        pos: Vec2,
    },
}

/// Derived boss progress for the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossStage {
    Dormant,
    Active,
    Exploding,
    Defeated,
}

/// Notable things that happened during a tick (audio/HUD cues)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    PhaseChanged(GamePhase),
    Fired { shots: u8 },
    AdversarySpawned(EntityId),
    AdversaryDestroyed { id: EntityId, award: i64 },
    AdversaryEscaped { id: EntityId, penalty: i64 },
    CraftHit,
    BossSpawned(EntityId),
    BossFired,
    BossHit { hit_points: u32 },
    BossExploding,
    BossDefeated,
}

/// Complete state of a run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub scheme: ControlScheme,
    /// May go negative
    pub score: i64,
    pub clock: Clock,
    pub craft: Craft,
    /// Player and boss projectiles in firing order
    pub projectiles: Vec<Projectile>,
    /// Regular adversaries and the boss in spawn order
    pub adversaries: Vec<Adversary>,
    pub effects: Vec<Effect>,
    pub schedule: Schedule,
    /// Time of the last player shot
    pub last_shot_at: Option<f64>,
    /// The boss arrives once per run
    pub boss_spawned: bool,
    /// Next entity ID
    next_id: EntityId,
}

impl GameState {
    /// Create a new idle game state with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let craft_pos = Vec2::new(
            tuning.field_width / 2.0,
            tuning.field_height - tiers::craft_offset(0),
        );
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            clock: Clock::new(tuning.countdown_secs),
            tuning,
            phase: GamePhase::Idle,
            scheme: ControlScheme::default(),
            score: 0,
            craft: Craft {
                id: 0,
                pos: craft_pos,
                fading: false,
            },
            projectiles: Vec::new(),
            adversaries: Vec::new(),
            effects: Vec::new(),
            schedule: Schedule::new(),
            last_shot_at: None,
            boss_spawned: false,
            next_id: 1,
        };
        state.craft.id = state.next_entity_id();
        state.craft.pos = state.clamp_craft(state.craft.pos);
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Leave `Idle` with the chosen control scheme. Returns false if not idle.
    pub fn start(&mut self, scheme: ControlScheme) -> bool {
        if self.phase != GamePhase::Idle {
            return false;
        }
        self.scheme = scheme;
        self.phase = GamePhase::Running;
        log::info!("Run started (seed {}, {:?})", self.seed, scheme);
        true
    }

    /// Discard everything (entities, pending actions, score) and return to `Idle`
    pub fn restart(&mut self, seed: u64) {
        let tuning = self.tuning.clone();
        *self = Self::with_tuning(seed, tuning);
        log::info!("Run reset with seed {}", seed);
    }

    /// Move to a new phase, recording the transition
    pub(crate) fn set_phase(&mut self, phase: GamePhase, events: &mut Vec<GameEvent>) {
        if self.phase == phase {
            return;
        }
        log::info!("Phase {:?} -> {:?} (score {})", self.phase, phase, self.score);
        self.phase = phase;
        events.push(GameEvent::PhaseChanged(phase));
    }

    /// Whether `id` currently has a fade marker
    pub fn is_fading(&self, id: EntityId) -> bool {
        self.effects
            .iter()
            .any(|e| matches!(e, Effect::Fading { id: fid, .. } if *fid == id))
    }

    pub fn boss(&self) -> Option<(&Adversary, &Boss)> {
        self.adversaries.iter().find_map(|a| match &a.kind {
            AdversaryKind::Boss(boss) => Some((a, boss)),
            AdversaryKind::Regular { .. } => None,
        })
    }

    pub fn boss_mut(&mut self) -> Option<(&mut Vec2, &mut Boss, EntityId)> {
        self.adversaries.iter_mut().find_map(|a| match &mut a.kind {
            AdversaryKind::Boss(boss) => Some((&mut a.pos, boss, a.id)),
            AdversaryKind::Regular { .. } => None,
        })
    }

    pub fn boss_stage(&self) -> BossStage {
        match self.boss() {
            Some((_, boss)) => match boss.phase {
                BossPhase::Active => BossStage::Active,
                BossPhase::Exploding => BossStage::Exploding,
            },
            None if self.boss_spawned => BossStage::Defeated,
            None => BossStage::Dormant,
        }
    }

    /// Rectangle the craft center is confined to
    pub fn craft_bounds(&self) -> (Vec2, Vec2) {
        let t = &self.tuning;
        let min = Vec2::splat(t.craft_margin);
        let max = Vec2::new(
            (t.field_width - t.craft_margin).max(t.craft_margin),
            (t.field_height - t.craft_margin).max(t.craft_margin),
        );
        (min, max)
    }

    pub fn clamp_craft(&self, pos: Vec2) -> Vec2 {
        let (min, max) = self.craft_bounds();
        pos.clamp(min, max)
    }

    pub fn add_score(&mut self, delta: i64) {
        self.score = self.score.saturating_add(delta);
    }

    pub fn spawn_popup(&mut self, value: i64, pos: Vec2) {
        let id = self.next_entity_id();
        let created_at = self.clock.now();
        self.effects.push(Effect::ScorePopup {
            id,
            value,
            pos,
            created_at,
        });
    }

    /// Add an impact flash and return its id
    pub fn spawn_flash(&mut self, pos: Vec2) -> EntityId {
        let id = self.next_entity_id();
        self.effects.push(Effect::CollisionFlash { id, pos });
        id
    }

    /// Put `id` into the fading set (no-op if it is already fading)
    pub fn mark_fading(&mut self, id: EntityId, kind: FadeKind, pos: Vec2) {
        if !self.is_fading(id) {
            self.effects.push(Effect::Fading { id, kind, pos });
        }
    }

    pub fn clear_fading(&mut self, id: EntityId) {
        self.effects
            .retain(|e| !matches!(e, Effect::Fading { id: fid, .. } if *fid == id));
    }

    pub fn clear_flash(&mut self, id: EntityId) {
        self.effects
            .retain(|e| !matches!(e, Effect::CollisionFlash { id: fid, .. } if *fid == id));
    }
}
