//! Per-frame simulation driver
//!
//! One `tick` per display refresh while Running, in fixed order: frame and
//! scroll advance, score accrual, distance mission, player physics, effect
//! decay, spawners, entity movement with off-screen removal, collision
//! resolution, cosmetic particles. Jump requests arrive between ticks from
//! the host's input handler, never mid-tick.

use glam::Vec2;

use super::state::{
    ActiveEffects, EffectState, GameEvent, GamePhase, GameState, ParticleKind, PickupKind,
};
use super::{effects, physics, spawn};
use crate::consts::*;
use crate::missions::MissionKind;
use crate::profile::Profile;

/// Start a session: full state reset, Idle/GameOver -> Running
pub fn start_session(state: &mut GameState, profile: &Profile) {
    if state.phase == GamePhase::Running {
        return;
    }

    let max_jumps = profile.upgrades.max_jumps();
    state.phase = GamePhase::Running;
    state.score = 0.0;
    state.scroll_speed = INITIAL_SCROLL_SPEED;
    state.frame = 0;
    state.new_record = false;
    state.player.reset(max_jumps);
    state.obstacles.clear();
    state.coins.clear();
    state.pickups.clear();
    state.particles.clear();
    state.effects = ActiveEffects::default();
    state.next_obstacle_frame = spawn::FIRST_OBSTACLE_FRAME;
    state.next_coin_frame = spawn::FIRST_COIN_FRAME;
    state.next_pickup_frame = spawn::FIRST_PICKUP_FRAME;
    state.push_event(GameEvent::SessionStarted);

    log::info!("Session started (seed {})", state.seed);
}

/// Jump input from the host's key handler; ignored outside Running and
/// when the jump budget is spent
pub fn request_jump(state: &mut GameState) {
    if state.phase != GamePhase::Running {
        return;
    }
    if physics::request_jump(&mut state.player) {
        state.push_event(GameEvent::Jumped);
    }
}

/// GameOver -> Idle on user acknowledgment
pub fn acknowledge_game_over(state: &mut GameState) {
    if state.phase == GamePhase::GameOver {
        state.phase = GamePhase::Idle;
    }
}

/// Advance the session by one tick.
///
/// `elapsed_ms` is the wall-clock time since the previous frame and only
/// drives the effect timers; everything else advances in per-tick units.
pub fn tick(state: &mut GameState, profile: &mut Profile, elapsed_ms: f32) {
    if state.phase != GamePhase::Running {
        return;
    }

    state.frame += 1;
    state.scroll_speed += SCROLL_SPEED_INCREASE;

    let multiplier = if state.effects.is_active(PickupKind::ScoreDoubler) {
        2.0
    } else {
        1.0
    };
    state.score += SCORE_PER_TICK * multiplier;

    // Distance accrues every tick regardless of player action
    profile
        .missions
        .accrue(MissionKind::RunDistance, state.scroll_speed as f64 / 10.0);

    physics::apply_gravity(&mut state.player, profile.upgrades.max_jumps());
    effects::decay_timers(state, elapsed_ms);
    spawn::run_spawners(state);
    advance_entities(state, profile);
    resolve_collisions(state, profile);
    effects::update_particles(state);
}

/// Scroll entities left and drop the ones that left the play field
fn advance_entities(state: &mut GameState, profile: &mut Profile) {
    let scroll = state.scroll_speed;

    // An obstacle exiting fully off-screen counts as cleared
    let mut exited = 0u32;
    state.obstacles.retain_mut(|obs| {
        obs.pos.x -= scroll;
        if obs.pos.x + obs.size.x < 0.0 {
            exited += 1;
            false
        } else {
            true
        }
    });
    if exited > 0 {
        profile
            .missions
            .accrue(MissionKind::JumpObstacles, exited as f64);
    }

    let magnet_active = state.effects.is_active(PickupKind::Magnet);
    let player_center = state.player.center();
    state.coins.retain_mut(|coin| {
        effects::move_coin(coin, player_center, magnet_active, scroll);
        coin.pos.x + COIN_SIZE > 0.0
    });

    state.pickups.retain_mut(|pickup| {
        pickup.pos.x -= scroll;
        pickup.pos.x + PICKUP_SIZE > 0.0
    });
}

/// Resolution order: obstacles (can end the run), then coins, then pickups
fn resolve_collisions(state: &mut GameState, profile: &mut Profile) {
    let player_box = state.player.aabb();

    // The shield absorbs exactly one hit, destroying the obstacle; an
    // unshielded hit settles the run and nothing else is collected this
    // tick
    let mut idx = 0;
    while idx < state.obstacles.len() {
        if !player_box.overlaps(&state.obstacles[idx].aabb()) {
            idx += 1;
            continue;
        }
        if state.effects.is_active(PickupKind::Shield) {
            state.effects.shield = EffectState::Inactive;
            state.obstacles.remove(idx);
            state.push_event(GameEvent::ShieldAbsorbed);
        } else {
            settle(state, profile);
            return;
        }
    }

    let mut collected: Vec<Vec2> = Vec::new();
    state.coins.retain(|coin| {
        if player_box.overlaps(&coin.aabb()) {
            collected.push(coin.center());
            false
        } else {
            true
        }
    });
    for at in collected {
        state.score += COIN_SCORE;
        profile.missions.accrue(MissionKind::CollectCoins, 1.0);
        state.push_event(GameEvent::CoinCollected);
        effects::spawn_burst(state, ParticleKind::Coin, at);
    }

    let mut activated: Vec<(PickupKind, Vec2)> = Vec::new();
    state.pickups.retain(|pickup| {
        if player_box.overlaps(&pickup.aabb()) {
            activated.push((pickup.kind, pickup.center()));
            false
        } else {
            true
        }
    });
    for (kind, at) in activated {
        effects::activate(state, kind, &profile.upgrades, at);
    }
}

/// Terminal settlement; idempotent, runs at most once per session
fn settle(state: &mut GameState, profile: &mut Profile) {
    if state.phase == GamePhase::GameOver {
        return;
    }
    state.phase = GamePhase::GameOver;

    let final_score = state.display_score();
    profile.currency += final_score;
    if final_score > profile.high_score {
        profile.high_score = final_score;
        state.new_record = true;
    }

    // The magnet skin reverts when the run ends mid-effect
    if state.effects.is_active(PickupKind::Magnet) {
        state.effects.magnet = EffectState::Inactive;
        state.push_event(GameEvent::MagnetSkin { active: false });
    }

    state.push_event(GameEvent::GameEnded {
        final_score,
        high_score: profile.high_score,
        new_record: state.new_record,
    });

    log::info!(
        "Run over: score {}, high score {}{}",
        final_score,
        profile.high_score,
        if state.new_record { " (new record)" } else { "" }
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Coin, Obstacle, ObstacleKind, Pickup};
    use crate::upgrades::UpgradeId;

    fn new_session(seed: u64) -> (GameState, Profile) {
        let mut state = GameState::new(seed);
        let profile = Profile::default();
        start_session(&mut state, &profile);
        state.drain_events();
        (state, profile)
    }

    fn obstacle_on_player(state: &GameState) -> Obstacle {
        let kind = ObstacleKind::Short;
        Obstacle {
            pos: Vec2::new(state.player.pos.x, kind.spawn_y()),
            size: kind.size(),
            kind,
        }
    }

    fn coin_on_player(state: &GameState) -> Coin {
        Coin {
            pos: state.player.center() - Coin::size() * 0.5,
        }
    }

    #[test]
    fn test_start_session_resets_everything() {
        let mut state = GameState::new(1);
        let mut profile = Profile::default();
        start_session(&mut state, &profile);

        // Dirty the session, end it, restart
        state.score = 99.0;
        state.obstacles.push(obstacle_on_player(&state));
        tick(&mut state, &mut profile, NOMINAL_TICK_MS);
        assert_eq!(state.phase, GamePhase::GameOver);

        start_session(&mut state, &profile);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0.0);
        assert_eq!(state.frame, 0);
        assert_eq!(state.scroll_speed, INITIAL_SCROLL_SPEED);
        assert!(state.obstacles.is_empty());
        assert!(!state.new_record);
        assert!(state.events().contains(&GameEvent::SessionStarted));
    }

    #[test]
    fn test_tick_advances_frame_and_scroll() {
        let (mut state, mut profile) = new_session(3);
        tick(&mut state, &mut profile, NOMINAL_TICK_MS);
        assert_eq!(state.frame, 1);
        assert!(state.scroll_speed > INITIAL_SCROLL_SPEED);

        let speed = state.scroll_speed;
        tick(&mut state, &mut profile, NOMINAL_TICK_MS);
        assert!(state.scroll_speed > speed);
    }

    #[test]
    fn test_distance_mission_accrues_per_tick() {
        let (mut state, mut profile) = new_session(3);
        tick(&mut state, &mut profile, NOMINAL_TICK_MS);
        let expected = state.scroll_speed as f64 / 10.0;
        assert!((profile.missions.run_distance.progress - expected).abs() < 1e-9);
    }

    #[test]
    fn test_jump_only_while_running() {
        let mut state = GameState::new(3);
        request_jump(&mut state);
        assert!(!state.player.airborne);

        let profile = Profile::default();
        start_session(&mut state, &profile);
        state.drain_events();
        request_jump(&mut state);
        assert!(state.player.airborne);
        assert!(state.events().contains(&GameEvent::Jumped));

        // Budget spent, second press is silent
        request_jump(&mut state);
        assert_eq!(state.player.jumps_left, 0);
    }

    #[test]
    fn test_double_jump_budget_follows_upgrade() {
        let mut state = GameState::new(3);
        let mut profile = Profile::default();
        profile.currency = 2_000;
        assert!(profile.purchase_upgrade(UpgradeId::DoubleJump));

        start_session(&mut state, &profile);
        assert_eq!(state.player.jumps_left, 2);
        request_jump(&mut state);
        request_jump(&mut state);
        assert_eq!(state.player.jumps_left, 0);
    }

    #[test]
    fn test_coin_collection_scores_and_counts() {
        let (mut state, mut profile) = new_session(5);
        state.coins.push(coin_on_player(&state));

        tick(&mut state, &mut profile, NOMINAL_TICK_MS);

        assert!(state.coins.is_empty());
        assert!((state.score - (COIN_SCORE + SCORE_PER_TICK)).abs() < 1e-9);
        assert_eq!(profile.missions.collect_coins.progress, 1.0);
        assert!(state.events().contains(&GameEvent::CoinCollected));
        assert!(!state.particles.is_empty());
    }

    #[test]
    fn test_shield_absorbs_exactly_one_hit() {
        let (mut state, mut profile) = new_session(5);
        state.effects.shield = EffectState::Active { remaining_ms: 5000.0 };
        state.obstacles.push(obstacle_on_player(&state));

        tick(&mut state, &mut profile, NOMINAL_TICK_MS);

        assert_eq!(state.phase, GamePhase::Running);
        assert!(!state.effects.is_active(PickupKind::Shield));
        assert!(state.obstacles.is_empty());
        assert!(state.events().contains(&GameEvent::ShieldAbsorbed));

        // A second hit with the shield gone is fatal
        state.obstacles.push(obstacle_on_player(&state));
        tick(&mut state, &mut profile, NOMINAL_TICK_MS);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_fatal_hit_settles_floored_score() {
        let (mut state, mut profile) = new_session(5);
        state.score = 123.7;
        state.obstacles.push(obstacle_on_player(&state));

        tick(&mut state, &mut profile, NOMINAL_TICK_MS);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(profile.currency, 123);
        assert_eq!(profile.high_score, 123);
        assert!(state.new_record);
        assert!(matches!(
            state.events().last().copied(),
            Some(GameEvent::GameEnded {
                final_score: 123,
                high_score: 123,
                new_record: true,
            })
        ));

        // Further ticks are inert; settlement never repeats
        tick(&mut state, &mut profile, NOMINAL_TICK_MS);
        assert_eq!(profile.currency, 123);
    }

    #[test]
    fn test_no_new_record_below_high_score() {
        let (mut state, mut profile) = new_session(5);
        profile.high_score = 500;
        state.score = 123.7;
        state.obstacles.push(obstacle_on_player(&state));

        tick(&mut state, &mut profile, NOMINAL_TICK_MS);

        assert_eq!(profile.high_score, 500);
        assert!(!state.new_record);
        assert_eq!(profile.currency, 123);
    }

    #[test]
    fn test_fatal_hit_skips_remaining_pickups_same_tick() {
        let (mut state, mut profile) = new_session(5);
        state.obstacles.push(obstacle_on_player(&state));
        state.coins.push(coin_on_player(&state));
        state.pickups.push(Pickup {
            pos: state.player.center() - Pickup::size() * 0.5,
            kind: PickupKind::Shield,
        });

        tick(&mut state, &mut profile, NOMINAL_TICK_MS);

        assert_eq!(state.phase, GamePhase::GameOver);
        // The overlapping coin and pickup were not collected after death
        assert_eq!(state.coins.len(), 1);
        assert_eq!(state.pickups.len(), 1);
        assert_eq!(profile.missions.collect_coins.progress, 0.0);
        assert!(!state.effects.is_active(PickupKind::Shield));
    }

    #[test]
    fn test_score_doubler_doubles_tick_accrual() {
        let (mut state, mut profile) = new_session(5);
        tick(&mut state, &mut profile, NOMINAL_TICK_MS);
        let base_rate = state.score;

        let (mut doubled, mut profile2) = new_session(5);
        doubled.effects.score_doubler = EffectState::Active { remaining_ms: 60_000.0 };
        tick(&mut doubled, &mut profile2, NOMINAL_TICK_MS);

        assert!((doubled.score - base_rate * 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_doubler_expires_after_upgrade_duration() {
        let (mut state, mut profile) = new_session(5);
        state.pickups.push(Pickup {
            pos: state.player.center() - Pickup::size() * 0.5,
            kind: PickupKind::ScoreDoubler,
        });
        tick(&mut state, &mut profile, NOMINAL_TICK_MS);
        assert!(state.effects.is_active(PickupKind::ScoreDoubler));
        assert_eq!(state.effects.score_doubler.remaining_ms(), 5000.0);

        // 4999ms elapsed: still active. One more ms: gone.
        tick(&mut state, &mut profile, 4999.0);
        assert!(state.effects.is_active(PickupKind::ScoreDoubler));
        tick(&mut state, &mut profile, 1.0);
        assert!(!state.effects.is_active(PickupKind::ScoreDoubler));
    }

    #[test]
    fn test_magnet_skin_reverts_on_fatal_hit() {
        let (mut state, mut profile) = new_session(5);
        state.effects.magnet = EffectState::Active { remaining_ms: 5000.0 };
        state.obstacles.push(obstacle_on_player(&state));

        tick(&mut state, &mut profile, NOMINAL_TICK_MS);

        assert!(!state.effects.is_active(PickupKind::Magnet));
        assert!(
            state
                .events()
                .contains(&GameEvent::MagnetSkin { active: false })
        );
    }

    #[test]
    fn test_obstacle_exit_counts_toward_mission() {
        let (mut state, mut profile) = new_session(5);
        let kind = ObstacleKind::Tall;
        // Jump clear of it: park the obstacle just past the left edge
        state.obstacles.push(Obstacle {
            pos: Vec2::new(-kind.size().x + 1.0, kind.spawn_y()),
            size: kind.size(),
            kind,
        });

        tick(&mut state, &mut profile, NOMINAL_TICK_MS);

        assert!(state.obstacles.is_empty());
        assert_eq!(profile.missions.jump_obstacles.progress, 1.0);
    }

    #[test]
    fn test_same_seed_is_deterministic() {
        let (mut a, mut profile_a) = new_session(424242);
        let (mut b, mut profile_b) = new_session(424242);

        for _ in 0..1000 {
            tick(&mut a, &mut profile_a, NOMINAL_TICK_MS);
            tick(&mut b, &mut profile_b, NOMINAL_TICK_MS);
        }

        assert_eq!(a.phase, b.phase);
        assert_eq!(a.frame, b.frame);
        assert_eq!(a.score, b.score);
        assert_eq!(a.obstacles.len(), b.obstacles.len());
        for (oa, ob) in a.obstacles.iter().zip(&b.obstacles) {
            assert_eq!(oa.kind, ob.kind);
            assert_eq!(oa.pos, ob.pos);
        }
        assert_eq!(profile_a.currency, profile_b.currency);
    }

    #[test]
    fn test_acknowledge_returns_to_idle() {
        let (mut state, mut profile) = new_session(5);
        acknowledge_game_over(&mut state); // Running: no effect
        assert_eq!(state.phase, GamePhase::Running);

        state.obstacles.push(obstacle_on_player(&state));
        tick(&mut state, &mut profile, NOMINAL_TICK_MS);
        assert_eq!(state.phase, GamePhase::GameOver);

        acknowledge_game_over(&mut state);
        assert_eq!(state.phase, GamePhase::Idle);
    }
}
