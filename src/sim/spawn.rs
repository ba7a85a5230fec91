//! Frame-gated random entity generation
//!
//! Each category keeps its own "next spawn frame" threshold. When the frame
//! counter reaches it, one uniformly random variant appears at the right
//! edge and the next threshold is drawn from the category's gap range.

use glam::Vec2;
use rand::Rng;

use super::state::{Coin, GameState, Obstacle, ObstacleKind, Pickup, PickupKind};
use crate::consts::*;

/// First spawn thresholds for a fresh session
pub const FIRST_OBSTACLE_FRAME: f64 = 100.0;
pub const FIRST_COIN_FRAME: f64 = 150.0;
pub const FIRST_PICKUP_FRAME: f64 = 300.0;

/// Per-category (min, max) frame gaps between spawns
const OBSTACLE_GAP: (f64, f64) = (150.0, 250.0);
const COIN_GAP: (f64, f64) = (100.0, 200.0);
const PICKUP_GAP: (f64, f64) = (500.0, 1000.0);

/// Run all three spawners for the current frame
pub fn run_spawners(state: &mut GameState) {
    spawn_obstacle(state);
    spawn_coin(state);
    spawn_pickup(state);
}

fn next_threshold(rng: &mut impl Rng, frame: u64, (min, max): (f64, f64)) -> f64 {
    frame as f64 + min + rng.random::<f64>() * (max - min)
}

fn spawn_obstacle(state: &mut GameState) {
    if (state.frame as f64) < state.next_obstacle_frame {
        return;
    }
    let kind = ObstacleKind::ALL[state.rng.random_range(0..ObstacleKind::ALL.len())];
    state.obstacles.push(Obstacle {
        pos: Vec2::new(WORLD_WIDTH, kind.spawn_y()),
        size: kind.size(),
        kind,
    });
    state.next_obstacle_frame = next_threshold(&mut state.rng, state.frame, OBSTACLE_GAP);
}

fn spawn_coin(state: &mut GameState) {
    if (state.frame as f64) < state.next_coin_frame {
        return;
    }
    let height = COIN_SPAWN_HEIGHTS[state.rng.random_range(0..COIN_SPAWN_HEIGHTS.len())];
    state.coins.push(Coin {
        pos: Vec2::new(WORLD_WIDTH, WORLD_HEIGHT - height),
    });
    state.next_coin_frame = next_threshold(&mut state.rng, state.frame, COIN_GAP);
}

fn spawn_pickup(state: &mut GameState) {
    if (state.frame as f64) < state.next_pickup_frame {
        return;
    }
    let kind = PickupKind::ALL[state.rng.random_range(0..PickupKind::ALL.len())];
    state.pickups.push(Pickup {
        pos: Vec2::new(WORLD_WIDTH, WORLD_HEIGHT - PICKUP_SPAWN_HEIGHT),
        kind,
    });
    state.next_pickup_frame = next_threshold(&mut state.rng, state.frame, PICKUP_GAP);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GamePhase;

    fn running_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.phase = GamePhase::Running;
        state.next_obstacle_frame = FIRST_OBSTACLE_FRAME;
        state.next_coin_frame = FIRST_COIN_FRAME;
        state.next_pickup_frame = FIRST_PICKUP_FRAME;
        state
    }

    #[test]
    fn test_nothing_spawns_before_thresholds() {
        let mut state = running_state(7);
        state.frame = 99;
        run_spawners(&mut state);
        assert!(state.obstacles.is_empty());
        assert!(state.coins.is_empty());
        assert!(state.pickups.is_empty());
    }

    #[test]
    fn test_spawns_at_right_edge_when_due() {
        let mut state = running_state(7);
        state.frame = 300;
        run_spawners(&mut state);

        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.coins.len(), 1);
        assert_eq!(state.pickups.len(), 1);
        assert_eq!(state.obstacles[0].pos.x, WORLD_WIDTH);
        assert_eq!(state.coins[0].pos.x, WORLD_WIDTH);
        assert_eq!(state.pickups[0].pos.y, WORLD_HEIGHT - PICKUP_SPAWN_HEIGHT);
    }

    #[test]
    fn test_rescheduled_thresholds_stay_in_gap_range() {
        let mut state = running_state(42);
        state.frame = 1000;
        run_spawners(&mut state);

        let gap = state.next_obstacle_frame - state.frame as f64;
        assert!((OBSTACLE_GAP.0..=OBSTACLE_GAP.1).contains(&gap));
        let gap = state.next_coin_frame - state.frame as f64;
        assert!((COIN_GAP.0..=COIN_GAP.1).contains(&gap));
        let gap = state.next_pickup_frame - state.frame as f64;
        assert!((PICKUP_GAP.0..=PICKUP_GAP.1).contains(&gap));
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let mut a = running_state(99);
        let mut b = running_state(99);
        for frame in 0..2000 {
            a.frame = frame;
            b.frame = frame;
            run_spawners(&mut a);
            run_spawners(&mut b);
        }
        assert_eq!(a.obstacles.len(), b.obstacles.len());
        assert_eq!(a.coins.len(), b.coins.len());
        for (oa, ob) in a.obstacles.iter().zip(&b.obstacles) {
            assert_eq!(oa.kind, ob.kind);
        }
        for (ca, cb) in a.coins.iter().zip(&b.coins) {
            assert_eq!(ca.pos.y, cb.pos.y);
        }
    }

    #[test]
    fn test_coin_heights_come_from_tiers() {
        let mut state = running_state(5);
        for frame in 0..20000 {
            state.frame = frame;
            spawn_coin(&mut state);
        }
        assert!(!state.coins.is_empty());
        for coin in &state.coins {
            let height = WORLD_HEIGHT - coin.pos.y;
            assert!(
                COIN_SPAWN_HEIGHTS.contains(&height),
                "unexpected coin height {height}"
            );
        }
    }
}
