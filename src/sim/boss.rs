//! Boss behaviour
//!
//! Dormant until the score threshold, then patrols a fixed depth, fires on
//! its own cooldown, soaks hits, and finally plays a staged explosion before
//! leaving the store.

use glam::Vec2;
use rand::Rng;

use super::schedule::Action;
use super::state::{
    Adversary, AdversaryKind, Boss, BossPhase, EntityId, FadeKind, GameEvent, GameState,
    Projectile, ProjectileOrigin,
};
use super::tiers::ProjectileVariant;
use crate::consts::*;

/// Spawn the boss once the score threshold is reached (at most once per run)
pub fn maybe_spawn(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.boss_spawned
        || state.score < state.tuning.boss_score_threshold
        || state.adversaries.iter().any(Adversary::is_boss)
    {
        return;
    }

    let now = state.clock.now();
    let id = state.next_entity_id();
    let t = &state.tuning;
    let boss = Boss {
        hit_points: t.boss_hit_points.max(1),
        direction: 1.0,
        rotation: BOSS_TILT_DEGREES,
        phase: BossPhase::Active,
        damaged: false,
        damaged_until: now,
        last_fire_at: now,
        next_turn_at: now + t.boss_turn_interval,
    };
    let pos = Vec2::new(t.field_width / 2.0, t.boss_depth);
    state.adversaries.push(Adversary {
        id,
        pos,
        kind: AdversaryKind::Boss(boss),
    });
    state.boss_spawned = true;
    log::info!("Boss {} arrived at score {}", id, state.score);
    events.push(GameEvent::BossSpawned(id));
}

/// Patrol, re-roll direction on its timer, and fire on its own cooldown
pub fn advance(state: &mut GameState, dt: f32, events: &mut Vec<GameEvent>) {
    let now = state.clock.now();
    let (lo, hi) = state.tuning.boss_x_range();
    let speed = state.tuning.boss_speed;
    let turn_interval = state.tuning.boss_turn_interval;
    let fire_interval = state.tuning.boss_fire_interval;
    let muzzle_drop = state.tuning.boss_half_extent;

    let turn_due = match state.boss() {
        Some((_, boss)) if boss.phase == BossPhase::Active => now >= boss.next_turn_at,
        _ => return,
    };
    let turn_roll = turn_due.then(|| state.rng.random_bool(0.5));

    let Some((pos, boss, _)) = state.boss_mut() else {
        return;
    };

    if let Some(rightward) = turn_roll {
        boss.direction = if rightward { 1.0 } else { -1.0 };
        boss.next_turn_at = now + turn_interval;
    }

    pos.x += boss.direction * speed * dt;
    if pos.x <= lo {
        pos.x = lo;
        boss.direction = 1.0;
    } else if pos.x >= hi {
        pos.x = hi;
        boss.direction = -1.0;
    }
    boss.rotation = boss.direction * BOSS_TILT_DEGREES;

    if now - boss.last_fire_at < fire_interval {
        return;
    }
    boss.last_fire_at = now;
    let muzzle = *pos + Vec2::new(0.0, muzzle_drop);

    let id = state.next_entity_id();
    state.projectiles.push(Projectile {
        id,
        pos: muzzle,
        origin: ProjectileOrigin::Boss,
        variant: ProjectileVariant::BossBolt,
    });
    events.push(GameEvent::BossFired);
}

/// Hits the boss can still absorb before it starts exploding
pub fn hits_to_kill(state: &GameState) -> u32 {
    let damage = state.tuning.boss_damage_per_hit.max(1);
    match state.boss() {
        Some((_, boss)) if boss.phase == BossPhase::Active => boss.hit_points.div_ceil(damage),
        _ => 0,
    }
}

/// Apply one qualifying player hit per impact point
pub fn apply_hits(state: &mut GameState, impacts: &[Vec2], events: &mut Vec<GameEvent>) {
    let now = state.clock.now();
    let damage = state.tuning.boss_damage_per_hit.max(1);
    let award = state.tuning.boss_hit_award;

    for &impact in impacts {
        let Some((pos, boss, id)) = state.boss_mut() else {
            return;
        };
        if boss.phase != BossPhase::Active {
            return;
        }
        boss.hit_points = boss.hit_points.saturating_sub(damage);
        boss.damaged = true;
        boss.damaged_until = now + BOSS_DAMAGE_FLASH;
        let hit_points = boss.hit_points;
        let boss_pos = *pos;

        state.add_score(award);
        if award != 0 {
            state.spawn_popup(award, impact);
        }
        state
            .schedule
            .push(now + BOSS_DAMAGE_FLASH, Action::ClearDamage(id));
        events.push(GameEvent::BossHit { hit_points });

        if hit_points == 0 {
            begin_explosion(state, id, boss_pos, events);
        }
    }
}

/// Active -> Exploding, exactly once
fn begin_explosion(
    state: &mut GameState,
    id: EntityId,
    pos: Vec2,
    events: &mut Vec<GameEvent>,
) {
    let now = state.clock.now();
    let Some((_, boss, _)) = state.boss_mut() else {
        return;
    };
    if boss.phase != BossPhase::Active {
        return;
    }
    boss.phase = BossPhase::Exploding;

    state.mark_fading(id, FadeKind::Boss, pos);
    for stage in BOSS_BLAST_STAGES {
        state.schedule.push(now + stage, Action::BossBlast(id));
    }
    state
        .schedule
        .push(now + BOSS_EXPLOSION_DURATION, Action::RemoveBoss(id));
    log::info!("Boss {} destroyed, exploding", id);
    events.push(GameEvent::BossExploding);
}

/// One stage of the explosion: a flash somewhere over the hull
pub fn blast(state: &mut GameState, id: EntityId) {
    let pos = match state.boss() {
        Some((adversary, _)) if adversary.id == id => adversary.pos,
        _ => return,
    };
    let spread = state.tuning.boss_half_extent * 0.6;
    let offset = Vec2::new(
        state.rng.random_range(-1.0f32..=1.0) * spread,
        state.rng.random_range(-1.0f32..=1.0) * spread,
    );
    let flash = state.spawn_flash(pos + offset);
    let at = state.clock.now() + BOSS_BLAST_FLASH;
    state.schedule.push(at, Action::ClearFlash(flash));
}

/// End the damage flash unless a later hit extended it
pub fn clear_damage(state: &mut GameState, id: EntityId) {
    let now = state.clock.now();
    if let Some((_, boss, boss_id)) = state.boss_mut() {
        if boss_id == id && now >= boss.damaged_until {
            boss.damaged = false;
        }
    }
}

/// Remove the boss. Returns true if it was still in the store.
pub fn remove(state: &mut GameState, id: EntityId) -> bool {
    let before = state.adversaries.len();
    state.adversaries.retain(|a| !(a.id == id && a.is_boss()));
    state.clear_fading(id);
    state.adversaries.len() != before
}
