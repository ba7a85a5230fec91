//! Dash Runner - an endless-runner simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, spawning, game state)
//! - `missions`: Tiered progress missions advanced by gameplay events
//! - `upgrades`: Double-jump unlock and leveled power-up duration upgrades
//! - `skins`: Cosmetic skin catalog and shop operations
//! - `profile`: Persisted player progress (currency, skins, high score)
//!
//! Rendering and audio are external collaborators: they read entity
//! positions from [`sim::GameState`] each frame and drain its event queue
//! for sound cues and overlay triggers.

pub mod missions;
pub mod profile;
pub mod sim;
pub mod skins;
pub mod upgrades;

pub use profile::Profile;

/// Game configuration constants
pub mod consts {
    /// Play field dimensions (world units)
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 400.0;

    /// Player placement and size
    pub const PLAYER_X: f32 = 75.0;
    pub const PLAYER_SIZE: f32 = 115.0;

    /// Vertical kinematics (per-tick units)
    pub const GRAVITY: f32 = 0.55;
    pub const JUMP_STRENGTH: f32 = -21.0;

    /// World scroll
    pub const INITIAL_SCROLL_SPEED: f32 = 3.5;
    pub const SCROLL_SPEED_INCREASE: f32 = 0.0005;

    /// Score accrued per tick (doubled while the score doubler is active)
    pub const SCORE_PER_TICK: f64 = 1.0 / 60.0;
    /// Score awarded per collected coin
    pub const COIN_SCORE: f64 = 5.0;

    /// Collectible sizes and spawn heights (heights measured up from the ground)
    pub const COIN_SIZE: f32 = 60.0;
    pub const COIN_SPAWN_HEIGHTS: [f32; 3] = [120.0, 210.0, 270.0];
    pub const PICKUP_SIZE: f32 = 50.0;
    pub const PICKUP_SPAWN_HEIGHT: f32 = 150.0;

    /// Magnet effect
    pub const MAGNET_RADIUS: f32 = 200.0;
    pub const MAGNET_PULL_SPEED: f32 = 5.0;

    /// Nominal tick duration used by headless drivers (ms at 60 Hz)
    pub const NOMINAL_TICK_MS: f32 = 1000.0 / 60.0;
}
