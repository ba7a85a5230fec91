//! Timed power-up effects
//!
//! Activation reads the effect duration from the matching upgrade level.
//! Timers count down in wall-clock milliseconds; crossing zero deactivates
//! the effect. Re-activating a live effect resets its timer, durations do
//! not stack.

use glam::Vec2;
use rand::Rng;

use super::state::{
    Coin, EffectState, GameEvent, GameState, MAX_PARTICLES, Particle, ParticleKind, PickupKind,
};
use crate::consts::*;
use crate::upgrades::Upgrades;

/// Activate (or refresh) the effect for a collected pickup
pub fn activate(state: &mut GameState, kind: PickupKind, upgrades: &Upgrades, at: Vec2) {
    let duration = upgrades.effect_duration_ms(kind);
    *state.effects.get_mut(kind) = EffectState::Active {
        remaining_ms: duration,
    };
    state.push_event(GameEvent::PickupCollected(kind));

    match kind {
        PickupKind::Magnet => {
            state.push_event(GameEvent::MagnetSkin { active: true });
        }
        PickupKind::ScoreDoubler => {
            spawn_burst(state, ParticleKind::ScoreDoubler, at);
        }
        PickupKind::Shield => {}
    }

    log::debug!("Activated {:?} for {}ms", kind, duration);
}

/// Count all active timers down by the elapsed wall-clock time
pub fn decay_timers(state: &mut GameState, elapsed_ms: f32) {
    for kind in PickupKind::ALL {
        if let EffectState::Active { remaining_ms } = state.effects.get(kind) {
            let remaining = remaining_ms - elapsed_ms;
            if remaining <= 0.0 {
                *state.effects.get_mut(kind) = EffectState::Inactive;
                if kind == PickupKind::Magnet {
                    state.push_event(GameEvent::MagnetSkin { active: false });
                }
            } else {
                *state.effects.get_mut(kind) = EffectState::Active {
                    remaining_ms: remaining,
                };
            }
        }
    }
}

/// Move one coin for this tick.
///
/// While the magnet is active and the coin's center is within
/// [`MAGNET_RADIUS`] of the player's center, the coin moves toward the
/// player at a fixed pull speed instead of scrolling.
pub fn move_coin(coin: &mut Coin, player_center: Vec2, magnet_active: bool, scroll_speed: f32) {
    if magnet_active {
        let delta = player_center - coin.center();
        let distance = delta.length();
        if distance > 0.0 && distance < MAGNET_RADIUS {
            coin.pos += delta / distance * MAGNET_PULL_SPEED;
            return;
        }
    }
    coin.pos.x -= scroll_speed;
}

/// Spawn a small cosmetic burst at a collection point
pub fn spawn_burst(state: &mut GameState, kind: ParticleKind, at: Vec2) {
    let count = state.rng.random_range(5..8);
    for _ in 0..count {
        if state.particles.len() >= MAX_PARTICLES {
            break;
        }
        let size = state.rng.random::<f32>() * 9.0 + 6.0;
        let vel = Vec2::new(
            (state.rng.random::<f32>() - 0.5) * 7.0,
            state.rng.random::<f32>() * -10.0 - 3.0,
        );
        let life = 40.0 + state.rng.random::<f32>() * 40.0;
        state.particles.push(Particle {
            pos: at,
            vel,
            size,
            life,
            kind,
        });
    }
}

/// Advance cosmetic particles one tick; burst particles fall under half
/// gravity and expire by lifetime
pub fn update_particles(state: &mut GameState) {
    for particle in &mut state.particles {
        particle.pos += particle.vel;
        particle.vel.y += GRAVITY * 0.5;
        particle.life -= 1.0;
    }
    state.particles.retain(|p| p.life > 0.0);
}
