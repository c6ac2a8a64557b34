//! Demo AI
//!
//! Produces a control snapshot from the current state so the headless runner
//! (and attract screens) can play without a human. Holds fire constantly,
//! sidesteps incoming boss bolts, otherwise lines up under a target.

use super::state::{AdversaryKind, ControlInput, GameState, ProjectileOrigin};
use super::tiers;

/// Ignore horizontal error smaller than this to avoid jitter
const DEADZONE: f32 = 4.0;
/// How far above the craft a boss bolt is considered a threat
const THREAT_RANGE: f32 = 180.0;

pub fn autopilot_input(state: &GameState) -> ControlInput {
    let craft = state.craft.pos;
    let half = tiers::craft_size(state.score) / 2.0;
    let mut input = ControlInput {
        fire: true,
        ..Default::default()
    };

    // Dodge the nearest bolt that is about to land on us
    let threat = state
        .projectiles
        .iter()
        .filter(|p| p.origin == ProjectileOrigin::Boss)
        .filter(|p| p.pos.y < craft.y && craft.y - p.pos.y < THREAT_RANGE)
        .filter(|p| (p.pos.x - craft.x).abs() < half + state.tuning.projectile_half_extent)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));
    if let Some(bolt) = threat {
        let (min, max) = state.craft_bounds();
        let go_left = bolt.pos.x >= craft.x;
        let blocked = if go_left {
            craft.x <= min.x
        } else {
            craft.x >= max.x
        };
        // Pinned against a wall: break the other way
        let go_left = go_left != blocked;
        input.left = go_left;
        input.right = !go_left;
        return input;
    }

    // Boss first, otherwise the lowest live adversary
    let target_x = state
        .boss()
        .map(|(boss, _)| boss.pos.x)
        .or_else(|| {
            state
                .adversaries
                .iter()
                .filter(|a| matches!(a.kind, AdversaryKind::Regular { .. }))
                .filter(|a| !state.is_fading(a.id))
                .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
                .map(|a| a.pos.x)
        });

    if let Some(x) = target_x {
        let error = x - craft.x;
        input.left = error < -DEADZONE;
        input.right = error > DEADZONE;
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Adversary, ControlScheme, Projectile};
    use crate::sim::tiers::{AdversaryVariant, ProjectileVariant};
    use glam::Vec2;

    fn running() -> GameState {
        let mut state = GameState::new(11);
        state.start(ControlScheme::AxisLocked);
        state
    }

    #[test]
    fn test_steers_toward_lowest_adversary() {
        let mut state = running();
        for (x, y) in [(100.0, 50.0), (700.0, 300.0)] {
            let id = state.next_entity_id();
            state.adversaries.push(Adversary {
                id,
                pos: Vec2::new(x, y),
                kind: AdversaryKind::Regular {
                    variant: AdversaryVariant::Scout,
                },
            });
        }
        let input = autopilot_input(&state);
        assert!(input.fire);
        assert!(input.right && !input.left);
    }

    #[test]
    fn test_dodges_boss_bolt() {
        let mut state = running();
        let id = state.next_entity_id();
        let craft = state.craft.pos;
        state.projectiles.push(Projectile {
            id,
            pos: Vec2::new(craft.x + 5.0, craft.y - 60.0),
            origin: ProjectileOrigin::Boss,
            variant: ProjectileVariant::BossBolt,
        });
        let input = autopilot_input(&state);
        assert!(input.left && !input.right);
    }

    #[test]
    fn test_idles_without_targets() {
        let state = running();
        let input = autopilot_input(&state);
        assert!(!input.left && !input.right);
    }
}
