//! The per-tick simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per display frame, driven by the host
//! - Seeded RNG only
//! - Input arrives as discrete events at tick boundaries
//! - No rendering or platform dependencies

pub mod collision;
pub mod effects;
pub mod physics;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::Aabb;
pub use state::{
    ActiveEffects, Coin, EffectState, GameEvent, GamePhase, GameState, Obstacle, ObstacleKind,
    Particle, ParticleKind, Pickup, PickupKind, Player,
};
pub use tick::{acknowledge_game_over, request_jump, start_session, tick};
