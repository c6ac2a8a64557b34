//! Per-frame simulation step
//!
//! One call advances a running game by one rendered frame. The steps run in a
//! fixed order so that everything a frame's collisions cause (score, popups,
//! fades, scheduled removals) is applied before that frame prunes effects.

use glam::Vec2;
use rand::Rng;

use super::boss;
use super::schedule::Action;
use super::state::{
    Adversary, AdversaryKind, ControlInput, ControlScheme, Effect, EntityId, FadeKind, GameEvent,
    GamePhase, GameState, Projectile, ProjectileOrigin,
};
use super::tiers;
use crate::consts::*;

/// Advance a running game by `dt` seconds. Returns what happened this frame.
///
/// Outside `Running` this is a no-op.
pub fn tick(state: &mut GameState, input: &ControlInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase != GamePhase::Running {
        return events;
    }
    let dt = dt.max(0.0);

    if state.clock.advance(dt) {
        log::info!("Time up");
        state.set_phase(GamePhase::GameOver, &mut events);
        return events;
    }
    for action in state.schedule.drain_due(state.clock.now()) {
        apply_action(state, action, &mut events);
    }
    if state.phase != GamePhase::Running {
        return events;
    }

    move_craft(state, input, dt);
    fire(state, input, &mut events);
    move_projectiles(state, dt);
    move_adversaries(state, dt, &mut events);
    spawn_adversary(state, &mut events);
    boss::maybe_spawn(state, &mut events);
    boss::advance(state, dt, &mut events);
    resolve_boss_fire(state, &mut events);
    resolve_boss_hits(state, &mut events);
    resolve_regular_hits(state, &mut events);
    prune_effects(state);

    events
}

/// Carry out a scheduled action. Every action tolerates a missing target.
pub fn apply_action(state: &mut GameState, action: Action, events: &mut Vec<GameEvent>) {
    match action {
        Action::ClearFlash(id) => state.clear_flash(id),
        Action::RemoveAdversary(id) => {
            state.adversaries.retain(|a| a.id != id || a.is_boss());
            state.clear_fading(id);
        }
        Action::EndRun => {
            let craft_id = state.craft.id;
            state.clear_fading(craft_id);
            if state.phase == GamePhase::Running {
                state.set_phase(GamePhase::GameOver, events);
            }
        }
        Action::BossBlast(id) => boss::blast(state, id),
        Action::ClearDamage(id) => boss::clear_damage(state, id),
        Action::RemoveBoss(id) => {
            if boss::remove(state, id) && state.phase == GamePhase::Running {
                log::info!("Boss {} gone", id);
                events.push(GameEvent::BossDefeated);
                state.set_phase(GamePhase::Won, events);
            }
        }
    }
}

fn move_craft(state: &mut GameState, input: &ControlInput, dt: f32) {
    if state.craft.fading {
        return;
    }
    let step = input.axis() * state.tuning.craft_speed * dt;
    let mut pos = state.craft.pos;
    pos.x += step.x;
    match state.scheme {
        ControlScheme::AxisLocked => {
            pos.y = state.tuning.field_height - tiers::craft_offset(state.score);
        }
        ControlScheme::Free => pos.y += step.y,
    }
    state.craft.pos = state.clamp_craft(pos);
}

fn fire(state: &mut GameState, input: &ControlInput, events: &mut Vec<GameEvent>) {
    if !input.fire || state.craft.fading {
        return;
    }
    let now = state.clock.now();
    if let Some(last) = state.last_shot_at {
        if now - last < state.tuning.fire_cooldown {
            return;
        }
    }
    state.last_shot_at = Some(now);

    let variant = tiers::projectile_variant(state.score);
    let nose = state.craft.pos - Vec2::new(0.0, tiers::craft_size(state.score) / 2.0);
    let spread = state.tuning.twin_shot_offset;
    let barrels: &[f32] = if tiers::twin_shot(state.score) {
        &[-1.0, 1.0]
    } else {
        &[0.0]
    };

    for side in barrels {
        let id = state.next_entity_id();
        state.projectiles.push(Projectile {
            id,
            pos: nose + Vec2::new(side * spread, 0.0),
            origin: ProjectileOrigin::Player,
            variant,
        });
    }
    events.push(GameEvent::Fired {
        shots: barrels.len() as u8,
    });
}

fn move_projectiles(state: &mut GameState, dt: f32) {
    let player_speed = state.tuning.projectile_speed;
    let boss_speed = state.tuning.boss_projectile_speed;
    let height = state.tuning.field_height;

    for p in &mut state.projectiles {
        let speed = match p.origin {
            ProjectileOrigin::Player => player_speed,
            ProjectileOrigin::Boss => boss_speed,
        };
        p.pos.y += p.heading() * speed * dt;
    }
    state
        .projectiles
        .retain(|p| p.pos.y >= 0.0 && p.pos.y <= height);
}

/// Regular adversaries fall, escape off the bottom, or ram the craft
fn move_adversaries(state: &mut GameState, dt: f32, events: &mut Vec<GameEvent>) {
    let speed = state.tuning.adversary_speed;
    let height = state.tuning.field_height;
    let penalty = state.tuning.escape_penalty;
    let fading: Vec<EntityId> = state
        .adversaries
        .iter()
        .filter(|a| state.is_fading(a.id))
        .map(|a| a.id)
        .collect();

    for a in &mut state.adversaries {
        if matches!(a.kind, AdversaryKind::Regular { .. }) && !fading.contains(&a.id) {
            a.pos.y += speed * dt;
        }
    }

    // A lost run no longer pays for escapes
    let craft_down = state.craft.fading;
    let escaped: Vec<(EntityId, Vec2)> = state
        .adversaries
        .iter()
        .filter(|a| {
            !craft_down && !a.is_boss() && !fading.contains(&a.id) && a.pos.y >= height
        })
        .map(|a| (a.id, a.pos))
        .collect();
    if !escaped.is_empty() {
        state
            .adversaries
            .retain(|a| !escaped.iter().any(|(id, _)| *id == a.id));
        for (id, pos) in escaped {
            state.add_score(-penalty);
            state.spawn_popup(-penalty, Vec2::new(pos.x, height - 50.0));
            log::debug!("Adversary {} escaped, score {}", id, state.score);
            events.push(GameEvent::AdversaryEscaped { id, penalty });
        }
    }

    if state.craft.fading {
        return;
    }
    let craft_box = state.craft.hitbox(state.score);
    let rammed = state
        .adversaries
        .iter()
        .find(|a| {
            !a.is_boss()
                && !fading.contains(&a.id)
                && a.hitbox(&state.tuning).touches(&craft_box)
        })
        .map(|a| (a.id, a.pos));

    if let Some((id, pos)) = rammed {
        let now = state.clock.now();
        craft_hit(state, pos, events);
        state.mark_fading(id, FadeKind::Adversary, pos);
        state
            .schedule
            .push(now + CRAFT_FADE_DELAY, Action::RemoveAdversary(id));
    }
}

/// The craft has been hit: fade it out and end the run after the delay
fn craft_hit(state: &mut GameState, impact: Vec2, events: &mut Vec<GameEvent>) {
    if state.craft.fading {
        return;
    }
    let now = state.clock.now();
    state.craft.fading = true;
    let (id, pos) = (state.craft.id, state.craft.pos);
    state.mark_fading(id, FadeKind::Craft, pos);

    let flash = state.spawn_flash(impact);
    state
        .schedule
        .push(now + CRAFT_FADE_DELAY, Action::ClearFlash(flash));
    state.schedule.push(now + CRAFT_FADE_DELAY, Action::EndRun);
    log::debug!("Craft hit at ({:.0}, {:.0})", impact.x, impact.y);
    events.push(GameEvent::CraftHit);
}

fn spawn_adversary(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.adversaries.iter().any(Adversary::is_boss) {
        return;
    }
    let chance = state.tuning.spawn_chance;
    if !(chance > 0.0) || !state.rng.random_bool(chance.min(1.0)) {
        return;
    }

    let width = state.tuning.field_width;
    let margin = state.tuning.adversary_half_extent * 2.0;
    let x = if width - margin > margin {
        state.rng.random_range(margin..width - margin)
    } else {
        width / 2.0
    };
    let variant = tiers::roll_variant(state.score, &mut state.rng);
    let id = state.next_entity_id();
    state.adversaries.push(Adversary {
        id,
        pos: Vec2::new(x, 0.0),
        kind: AdversaryKind::Regular { variant },
    });
    events.push(GameEvent::AdversarySpawned(id));
}

/// Boss projectiles reaching the craft
fn resolve_boss_fire(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.craft.fading {
        return;
    }
    let craft_box = state.craft.hitbox(state.score);
    let hit = state.projectiles.iter().position(|p| {
        p.origin == ProjectileOrigin::Boss && p.hitbox(&state.tuning).touches(&craft_box)
    });
    if let Some(index) = hit {
        let projectile = state.projectiles.remove(index);
        craft_hit(state, projectile.pos, events);
    }
}

/// Player projectiles striking the boss
fn resolve_boss_hits(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let budget = boss::hits_to_kill(state) as usize;
    if budget == 0 {
        return;
    }
    let Some((adversary, _)) = state.boss() else {
        return;
    };
    let boss_box = adversary.hitbox(&state.tuning);

    let mut consumed = Vec::new();
    let mut impacts = Vec::new();
    for p in &state.projectiles {
        if impacts.len() == budget {
            break;
        }
        if p.origin == ProjectileOrigin::Player && p.hitbox(&state.tuning).touches(&boss_box) {
            consumed.push(p.id);
            impacts.push(p.pos);
        }
    }
    if impacts.is_empty() {
        return;
    }
    state.projectiles.retain(|p| !consumed.contains(&p.id));
    boss::apply_hits(state, &impacts, events);
}

/// A player projectile meeting a regular adversary this frame
#[derive(Debug, Clone, Copy)]
struct Kill {
    projectile: EntityId,
    adversary: EntityId,
    pos: Vec2,
    award: i64,
}

/// Pair projectiles with targets. Each projectile takes the first eligible
/// adversary in store order; each adversary is taken at most once.
fn find_kills(state: &GameState) -> Vec<Kill> {
    let mut kills: Vec<Kill> = Vec::new();
    for p in state
        .projectiles
        .iter()
        .filter(|p| p.origin == ProjectileOrigin::Player)
    {
        let probe = p.hitbox(&state.tuning);
        let target = state.adversaries.iter().find_map(|a| match a.kind {
            AdversaryKind::Regular { variant }
                if !state.is_fading(a.id)
                    && !kills.iter().any(|k| k.adversary == a.id)
                    && a.hitbox(&state.tuning).touches(&probe) =>
            {
                Some((a.id, a.pos, variant))
            }
            _ => None,
        });
        if let Some((adversary, pos, variant)) = target {
            kills.push(Kill {
                projectile: p.id,
                adversary,
                pos,
                award: variant.award(),
            });
        }
    }
    kills
}

fn resolve_regular_hits(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let kills = find_kills(state);
    if kills.is_empty() {
        return;
    }
    let now = state.clock.now();
    state
        .projectiles
        .retain(|p| !kills.iter().any(|k| k.projectile == p.id));

    for kill in kills {
        let flash = state.spawn_flash(kill.pos);
        state.mark_fading(kill.adversary, FadeKind::Adversary, kill.pos);
        state.add_score(kill.award);
        state.spawn_popup(kill.award, kill.pos);
        state
            .schedule
            .push(now + KILL_FADE_DELAY, Action::ClearFlash(flash));
        state
            .schedule
            .push(now + KILL_FADE_DELAY, Action::RemoveAdversary(kill.adversary));
        log::debug!("Adversary {} destroyed (+{})", kill.adversary, kill.award);
        events.push(GameEvent::AdversaryDestroyed {
            id: kill.adversary,
            award: kill.award,
        });
    }
}

fn prune_effects(state: &mut GameState) {
    let now = state.clock.now();
    state.effects.retain(|e| match e {
        Effect::ScorePopup { created_at, .. } => now - created_at < POPUP_LIFETIME,
        _ => true,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{BossPhase, BossStage};
    use crate::sim::tiers::{AdversaryVariant, ProjectileVariant};
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    const DT: f32 = 1.0 / 60.0;

    fn quiet() -> Tuning {
        Tuning {
            spawn_chance: 0.0,
            ..Default::default()
        }
    }

    fn running(tuning: Tuning) -> GameState {
        let mut state = GameState::with_tuning(7, tuning);
        state.start(ControlScheme::AxisLocked);
        state
    }

    fn add_regular(state: &mut GameState, pos: Vec2) -> EntityId {
        let id = state.next_entity_id();
        state.adversaries.push(Adversary {
            id,
            pos,
            kind: AdversaryKind::Regular {
                variant: AdversaryVariant::Scout,
            },
        });
        id
    }

    fn add_shot(state: &mut GameState, pos: Vec2, origin: ProjectileOrigin) -> EntityId {
        let id = state.next_entity_id();
        state.projectiles.push(Projectile {
            id,
            pos,
            origin,
            variant: ProjectileVariant::Plain,
        });
        id
    }

    fn run_for(state: &mut GameState, secs: f32) -> Vec<GameEvent> {
        let frames = (secs / DT).ceil() as usize;
        let mut events = Vec::new();
        for _ in 0..frames {
            events.extend(tick(state, &ControlInput::default(), DT));
        }
        events
    }

    #[test]
    fn test_idle_tick_is_noop() {
        let mut state = GameState::new(1);
        let events = tick(&mut state, &ControlInput::default(), DT);
        assert!(events.is_empty());
        assert_eq!(state.clock.now(), 0.0);
        assert_eq!(state.phase, GamePhase::Idle);
    }

    #[test]
    fn test_spawn_at_zero_score() {
        let mut state = running(Tuning {
            spawn_chance: 1.0,
            ..Default::default()
        });
        tick(&mut state, &ControlInput::default(), DT);

        assert_eq!(state.adversaries.len(), 1);
        let adversary = &state.adversaries[0];
        assert_eq!(adversary.pos.y, 0.0);
        assert!(adversary.pos.x >= 30.0 && adversary.pos.x <= 770.0);
        assert!(matches!(
            adversary.kind,
            AdversaryKind::Regular {
                variant: AdversaryVariant::Scout
            }
        ));
    }

    #[test]
    fn test_twin_shot_below_neon() {
        let mut state = running(quiet());
        state.score = 150;
        let fire = ControlInput {
            fire: true,
            ..Default::default()
        };
        let craft_x = state.craft.pos.x;

        let events = tick(&mut state, &fire, DT);
        assert!(events.contains(&GameEvent::Fired { shots: 2 }));
        assert_eq!(state.projectiles.len(), 2);
        assert_eq!(state.projectiles[0].pos.x, craft_x - 20.0);
        assert_eq!(state.projectiles[1].pos.x, craft_x + 20.0);
        assert!(state
            .projectiles
            .iter()
            .all(|p| p.variant == ProjectileVariant::Plain));

        // Still cooling down on the next frame
        tick(&mut state, &fire, DT);
        assert_eq!(state.projectiles.len(), 2);
    }

    #[test]
    fn test_fire_rate_is_capped() {
        let mut state = running(quiet());
        let fire = ControlInput {
            fire: true,
            ..Default::default()
        };
        let mut shots = 0;
        for _ in 0..60 {
            shots += tick(&mut state, &fire, DT)
                .iter()
                .filter(|e| matches!(e, GameEvent::Fired { .. }))
                .count();
        }
        // 0.25 s cooldown over one second of holding fire
        assert!((4..=5).contains(&shots), "fired {} times", shots);
    }

    #[test]
    fn test_kill_fades_then_removes() {
        let mut state = running(quiet());
        let target = add_regular(&mut state, Vec2::new(400.0, 300.0));
        add_shot(&mut state, Vec2::new(400.0, 300.0), ProjectileOrigin::Player);

        let events = tick(&mut state, &ControlInput::default(), DT);
        assert!(events.contains(&GameEvent::AdversaryDestroyed {
            id: target,
            award: 10
        }));
        assert_eq!(state.score, 10);
        assert!(state.is_fading(target));
        assert!(state.projectiles.is_empty());
        assert!(state
            .effects
            .iter()
            .any(|e| matches!(e, Effect::ScorePopup { value: 10, .. })));
        assert!(state
            .effects
            .iter()
            .any(|e| matches!(e, Effect::CollisionFlash { .. })));

        // Still rendered while fading
        assert!(state.adversaries.iter().any(|a| a.id == target));

        run_for(&mut state, 1.05);
        assert!(state.adversaries.iter().all(|a| a.id != target));
        assert!(state.effects.is_empty());
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_boss_defeat_wins() {
        let mut state = running(Tuning {
            boss_fire_interval: 1_000.0,
            boss_hit_award: 0,
            ..quiet()
        });
        state.score = 1000;
        tick(&mut state, &ControlInput::default(), DT);
        assert_eq!(state.boss_stage(), BossStage::Active);

        for hit in 1..=100 {
            let boss_pos = state.boss().map(|(a, _)| a.pos).expect("boss present");
            add_shot(&mut state, boss_pos, ProjectileOrigin::Player);
            tick(&mut state, &ControlInput::default(), DT);
            let (_, boss) = state.boss().expect("boss present");
            assert_eq!(boss.hit_points, 100 - hit);
        }
        assert_eq!(state.boss_stage(), BossStage::Exploding);
        assert_eq!(
            state.boss().map(|(_, b)| b.phase),
            Some(BossPhase::Exploding)
        );
        assert_eq!(state.phase, GamePhase::Running);

        let events = run_for(&mut state, 2.6);
        assert!(events.contains(&GameEvent::BossDefeated));
        assert_eq!(state.phase, GamePhase::Won);
        assert!(state.adversaries.iter().all(|a| !a.is_boss()));
        assert_eq!(state.boss_stage(), BossStage::Defeated);
    }

    #[test]
    fn test_exploding_boss_ignores_shots() {
        let mut state = running(Tuning {
            boss_hit_points: 1,
            boss_fire_interval: 1_000.0,
            ..quiet()
        });
        state.score = 1000;
        tick(&mut state, &ControlInput::default(), DT);
        let boss_pos = state.boss().map(|(a, _)| a.pos).expect("boss");
        add_shot(&mut state, boss_pos, ProjectileOrigin::Player);
        tick(&mut state, &ControlInput::default(), DT);
        assert_eq!(state.boss_stage(), BossStage::Exploding);

        let shot = add_shot(&mut state, boss_pos, ProjectileOrigin::Player);
        tick(&mut state, &ControlInput::default(), DT);
        assert!(state.projectiles.iter().any(|p| p.id == shot));
    }

    #[test]
    fn test_countdown_ends_run() {
        let mut state = running(quiet());
        state.score = 37;
        state.clock.set_remaining(1);

        let mut events = Vec::new();
        for _ in 0..4 {
            events.extend(tick(&mut state, &ControlInput::default(), 0.25));
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.score, 37);
        assert_eq!(events, vec![GameEvent::PhaseChanged(GamePhase::GameOver)]);

        // Terminal: nothing moves any more
        let now = state.clock.now();
        tick(&mut state, &ControlInput::default(), 0.25);
        assert_eq!(state.clock.now(), now);
    }

    #[test]
    fn test_ramming_ends_run_after_fade() {
        let mut state = running(quiet());
        let craft = state.craft.pos;
        let rammer = add_regular(&mut state, craft);

        let events = tick(&mut state, &ControlInput::default(), DT);
        assert!(events.contains(&GameEvent::CraftHit));
        assert!(state.craft.fading);
        assert!(state.is_fading(state.craft.id));
        assert!(state.is_fading(rammer));
        assert!(state.schedule.contains(Action::EndRun));
        assert_eq!(state.phase, GamePhase::Running);

        // A faded craft no longer steers
        let right = ControlInput {
            right: true,
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &right, DT);
        assert_eq!(state.craft.pos.x, craft.x);
        assert!(state.projectiles.is_empty());

        let events = run_for(&mut state, 1.05);
        assert!(events.contains(&GameEvent::PhaseChanged(GamePhase::GameOver)));
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_boss_bolt_hits_craft() {
        let mut state = running(quiet());
        let above = state.craft.pos - Vec2::new(0.0, 10.0);
        add_shot(&mut state, above, ProjectileOrigin::Boss);

        let events = tick(&mut state, &ControlInput::default(), DT);
        assert!(events.contains(&GameEvent::CraftHit));
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_escape_costs_score() {
        let mut state = running(quiet());
        let id = add_regular(&mut state, Vec2::new(100.0, 599.0));

        let events = tick(&mut state, &ControlInput::default(), DT);
        assert!(events.contains(&GameEvent::AdversaryEscaped { id, penalty: 10 }));
        assert_eq!(state.score, -10);
        assert!(state.adversaries.is_empty());
        assert!(state
            .effects
            .iter()
            .any(|e| matches!(e, Effect::ScorePopup { value: -10, .. })));
    }

    #[test]
    fn test_no_escape_penalty_while_craft_fades() {
        let mut state = running(quiet());
        let craft = state.craft.pos;
        add_regular(&mut state, craft);
        tick(&mut state, &ControlInput::default(), DT);
        assert!(state.craft.fading);

        add_regular(&mut state, Vec2::new(100.0, 599.0));
        let events = tick(&mut state, &ControlInput::default(), DT);
        assert!(!events
            .iter()
            .any(|e| matches!(e, GameEvent::AdversaryEscaped { .. })));
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_projectiles_leave_field() {
        let mut state = running(quiet());
        let gone_up = add_shot(&mut state, Vec2::new(100.0, 2.0), ProjectileOrigin::Player);
        let gone_down = add_shot(&mut state, Vec2::new(100.0, 598.0), ProjectileOrigin::Boss);
        let flying = add_shot(&mut state, Vec2::new(100.0, 300.0), ProjectileOrigin::Player);
        let bolt = add_shot(&mut state, Vec2::new(700.0, 300.0), ProjectileOrigin::Boss);

        tick(&mut state, &ControlInput::default(), DT);
        let ids: Vec<_> = state.projectiles.iter().map(|p| p.id).collect();
        assert!(!ids.contains(&gone_up));
        assert!(!ids.contains(&gone_down));
        assert_eq!(ids, vec![flying, bolt]);
        assert!(state.projectiles[0].pos.y < 300.0);
        assert!(state.projectiles[1].pos.y > 300.0);
    }

    #[test]
    fn test_zero_countdown_ends_run_at_once() {
        let mut state = running(Tuning {
            countdown_secs: 0,
            ..quiet()
        });
        let events = tick(&mut state, &ControlInput::default(), DT);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(events, vec![GameEvent::PhaseChanged(GamePhase::GameOver)]);
    }

    #[test]
    fn test_projectile_consumed_by_first_match_only() {
        let mut state = running(quiet());
        let first = add_regular(&mut state, Vec2::new(400.0, 300.0));
        let second = add_regular(&mut state, Vec2::new(410.0, 300.0));
        add_shot(&mut state, Vec2::new(405.0, 300.0), ProjectileOrigin::Player);

        tick(&mut state, &ControlInput::default(), DT);
        assert!(state.is_fading(first));
        assert!(!state.is_fading(second));
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_fading_adversary_is_exempt() {
        let mut state = running(quiet());
        let target = add_regular(&mut state, Vec2::new(400.0, 300.0));
        add_shot(&mut state, Vec2::new(400.0, 300.0), ProjectileOrigin::Player);
        add_shot(&mut state, Vec2::new(400.0, 305.0), ProjectileOrigin::Player);

        tick(&mut state, &ControlInput::default(), DT);
        assert_eq!(state.score, 10);
        // The second shot flew on instead of hitting the fading target
        assert_eq!(state.projectiles.len(), 1);

        let frozen = state
            .adversaries
            .iter()
            .find(|a| a.id == target)
            .map(|a| a.pos);
        add_shot(&mut state, Vec2::new(400.0, 300.0), ProjectileOrigin::Player);
        let events = tick(&mut state, &ControlInput::default(), DT);
        assert!(!events
            .iter()
            .any(|e| matches!(e, GameEvent::AdversaryDestroyed { .. })));
        assert_eq!(state.score, 10);
        assert_eq!(
            state.adversaries.iter().find(|a| a.id == target).map(|a| a.pos),
            frozen
        );
    }

    #[test]
    fn test_removal_is_idempotent() {
        let mut state = running(quiet());
        let target = add_regular(&mut state, Vec2::new(400.0, 300.0));
        add_regular(&mut state, Vec2::new(100.0, 100.0));
        state.mark_fading(target, FadeKind::Adversary, Vec2::new(400.0, 300.0));

        let mut events = Vec::new();
        apply_action(&mut state, Action::RemoveAdversary(target), &mut events);
        let ids: Vec<_> = state.adversaries.iter().map(|a| a.id).collect();
        let effects = state.effects.clone();

        apply_action(&mut state, Action::RemoveAdversary(target), &mut events);
        assert_eq!(state.adversaries.iter().map(|a| a.id).collect::<Vec<_>>(), ids);
        assert_eq!(state.effects, effects);
        assert!(events.is_empty());
    }

    #[test]
    fn test_stale_actions_are_noops() {
        let mut state = running(quiet());
        let mut events = Vec::new();
        apply_action(&mut state, Action::RemoveBoss(999), &mut events);
        apply_action(&mut state, Action::BossBlast(999), &mut events);
        apply_action(&mut state, Action::ClearDamage(999), &mut events);
        apply_action(&mut state, Action::ClearFlash(999), &mut events);
        assert_eq!(state.phase, GamePhase::Running);
        assert!(state.effects.is_empty());
        assert!(events.is_empty());
    }

    #[test]
    fn test_popups_expire_after_a_second() {
        let mut state = running(quiet());
        state.spawn_popup(10, Vec2::new(10.0, 10.0));
        run_for(&mut state, 0.9);
        assert_eq!(state.effects.len(), 1);
        run_for(&mut state, 0.2);
        assert!(state.effects.is_empty());
    }

    #[test]
    fn test_axis_locked_height_follows_tier() {
        let mut state = running(quiet());
        state.score = 600;
        tick(&mut state, &ControlInput::default(), DT);
        assert_eq!(state.craft.pos.y, 600.0 - 140.0);
    }

    fn control_strategy() -> impl Strategy<Value = Vec<([bool; 5], f32)>> {
        prop::collection::vec((any::<[bool; 5]>(), 0.0f32..0.1), 1..200)
    }

    proptest! {
        #[test]
        fn test_craft_stays_in_bounds(
            frames in control_strategy(),
            free in any::<bool>(),
            seed in any::<u64>(),
        ) {
            let mut state = GameState::new(seed);
            let scheme = if free { ControlScheme::Free } else { ControlScheme::AxisLocked };
            state.start(scheme);
            let (min, max) = state.craft_bounds();

            for ([left, right, up, down, fire], dt) in frames {
                let input = ControlInput { left, right, up, down, fire };
                tick(&mut state, &input, dt);
                let pos = state.craft.pos;
                prop_assert!(pos.x >= min.x && pos.x <= max.x);
                prop_assert!(pos.y >= min.y && pos.y <= max.y);
            }
        }

        #[test]
        fn test_single_boss(seed in any::<u64>(), frames in 1usize..400) {
            let mut state = GameState::with_tuning(seed, Tuning {
                spawn_chance: 1.0,
                boss_hit_points: 3,
                ..Default::default()
            });
            state.start(ControlScheme::Free);
            let fire = ControlInput { fire: true, ..Default::default() };

            for _ in 0..frames {
                state.score = state.score.max(1000);
                tick(&mut state, &fire, DT);
                prop_assert!(state.adversaries.iter().filter(|a| a.is_boss()).count() <= 1);
            }
        }

        #[test]
        fn test_fading_never_rescored(seed in any::<u64>(), extra_shots in 1usize..6) {
            let mut state = GameState::with_tuning(seed, quiet());
            state.start(ControlScheme::AxisLocked);
            let target = add_regular(&mut state, Vec2::new(300.0, 200.0));
            add_shot(&mut state, Vec2::new(300.0, 200.0), ProjectileOrigin::Player);
            tick(&mut state, &ControlInput::default(), DT);
            let score = state.score;

            for _ in 0..extra_shots {
                add_shot(&mut state, Vec2::new(300.0, 200.0), ProjectileOrigin::Player);
                let events = tick(&mut state, &ControlInput::default(), DT);
                let rescored = events.contains(&GameEvent::AdversaryDestroyed {
                    id: target,
                    award: 10,
                });
                prop_assert!(!rescored);
            }
            prop_assert_eq!(state.score, score);
        }
    }
}
