//! Session state and core entity types
//!
//! Everything a running session owns lives in [`GameState`]. Progress that
//! outlives a session (currency, skins, missions, upgrades) lives in
//! [`crate::profile::Profile`] and is only borrowed by the tick driver.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Aabb;
use crate::consts::*;

/// Current phase of a play session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// In the menus, no session running
    Idle,
    /// Active gameplay
    Running,
    /// Run ended, waiting for the player to acknowledge
    GameOver,
}

/// The auto-running player character
#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left corner; x never changes during a session
    pub pos: Vec2,
    pub size: Vec2,
    pub velocity_y: f32,
    /// Set by a jump, cleared on the next landing
    pub airborne: bool,
    /// Jumps remaining before the next landing
    pub jumps_left: u8,
}

impl Player {
    pub fn new(max_jumps: u8) -> Self {
        let size = Vec2::splat(PLAYER_SIZE);
        Self {
            pos: Vec2::new(PLAYER_X, WORLD_HEIGHT - size.y),
            size,
            velocity_y: 0.0,
            airborne: false,
            jumps_left: max_jumps,
        }
    }

    /// Put the player back on the ground with a full jump budget
    pub fn reset(&mut self, max_jumps: u8) {
        self.pos = Vec2::new(PLAYER_X, WORLD_HEIGHT - self.size.y);
        self.velocity_y = 0.0;
        self.airborne = false;
        self.jumps_left = max_jumps;
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

/// Obstacle archetypes, distinguished by footprint and height off the ground
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    Short,
    Tall,
    Flying,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 3] = [
        ObstacleKind::Short,
        ObstacleKind::Tall,
        ObstacleKind::Flying,
    ];

    pub fn size(self) -> Vec2 {
        match self {
            ObstacleKind::Short => Vec2::new(65.0, 75.0),
            ObstacleKind::Tall => Vec2::new(75.0, 130.0),
            ObstacleKind::Flying => Vec2::new(80.0, 50.0),
        }
    }

    /// Top edge at spawn. Ground archetypes sit on the ground line; the
    /// flying archetype hovers 180 units above it.
    pub fn spawn_y(self) -> f32 {
        match self {
            ObstacleKind::Short => WORLD_HEIGHT - 75.0,
            ObstacleKind::Tall => WORLD_HEIGHT - 130.0,
            ObstacleKind::Flying => WORLD_HEIGHT - 180.0,
        }
    }
}

/// An obstacle scrolling toward the player
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: ObstacleKind,
}

impl Obstacle {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// A collectible coin
#[derive(Debug, Clone)]
pub struct Coin {
    pub pos: Vec2,
}

impl Coin {
    pub fn size() -> Vec2 {
        Vec2::splat(COIN_SIZE)
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, Self::size())
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Self::size() * 0.5
    }
}

/// Power-up kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupKind {
    Shield,
    Magnet,
    ScoreDoubler,
}

impl PickupKind {
    pub const ALL: [PickupKind; 3] = [
        PickupKind::Shield,
        PickupKind::Magnet,
        PickupKind::ScoreDoubler,
    ];
}

/// A power-up floating in the play field
#[derive(Debug, Clone)]
pub struct Pickup {
    pub pos: Vec2,
    pub kind: PickupKind,
}

impl Pickup {
    pub fn size() -> Vec2 {
        Vec2::splat(PICKUP_SIZE)
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, Self::size())
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Self::size() * 0.5
    }
}

/// Per-effect timer state. An effect is active iff it carries remaining time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum EffectState {
    #[default]
    Inactive,
    Active {
        remaining_ms: f32,
    },
}

impl EffectState {
    pub fn is_active(self) -> bool {
        matches!(self, EffectState::Active { .. })
    }

    /// Remaining time in ms, 0 when inactive (for HUD display)
    pub fn remaining_ms(self) -> f32 {
        match self {
            EffectState::Active { remaining_ms } => remaining_ms,
            EffectState::Inactive => 0.0,
        }
    }
}

/// The three timed effects, independently tracked
#[derive(Debug, Clone, Default)]
pub struct ActiveEffects {
    pub shield: EffectState,
    pub magnet: EffectState,
    pub score_doubler: EffectState,
}

impl ActiveEffects {
    pub fn get(&self, kind: PickupKind) -> EffectState {
        match kind {
            PickupKind::Shield => self.shield,
            PickupKind::Magnet => self.magnet,
            PickupKind::ScoreDoubler => self.score_doubler,
        }
    }

    pub fn get_mut(&mut self, kind: PickupKind) -> &mut EffectState {
        match kind {
            PickupKind::Shield => &mut self.shield,
            PickupKind::Magnet => &mut self.magnet,
            PickupKind::ScoreDoubler => &mut self.score_doubler,
        }
    }

    pub fn is_active(&self, kind: PickupKind) -> bool {
        self.get(kind).is_active()
    }
}

/// What a cosmetic burst particle is drawn as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    Coin,
    ScoreDoubler,
}

/// A cosmetic particle (not gameplay-affecting)
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// Remaining lifetime in ticks
    pub life: f32,
    pub kind: ParticleKind,
}

/// Maximum particles kept alive at once
pub const MAX_PARTICLES: usize = 256;

/// Discrete outputs for the rendering/audio host, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    SessionStarted,
    Jumped,
    CoinCollected,
    PickupCollected(PickupKind),
    /// Shield consumed by an obstacle hit
    ShieldAbsorbed,
    /// Swap the player sprite to or from its magnet variant
    MagnetSkin { active: bool },
    /// Terminal settlement; drives the game-over overlay and sound cue
    GameEnded {
        final_score: u64,
        high_score: u64,
        new_record: bool,
    },
}

/// Complete per-session state, owned by the tick driver
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducible runs
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Real-valued; floored for display and settlement
    pub score: f64,
    pub scroll_speed: f32,
    /// Tick counter, drives the spawners
    pub frame: u64,
    /// Set at settlement when the run beat the stored high score
    pub new_record: bool,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub coins: Vec<Coin>,
    pub pickups: Vec<Pickup>,
    pub effects: ActiveEffects,
    pub particles: Vec<Particle>,
    /// Frame thresholds for the three spawners
    pub next_obstacle_frame: f64,
    pub next_coin_frame: f64,
    pub next_pickup_frame: f64,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh state in the Idle phase
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            score: 0.0,
            scroll_speed: INITIAL_SCROLL_SPEED,
            frame: 0,
            new_record: false,
            player: Player::new(1),
            obstacles: Vec::new(),
            coins: Vec::new(),
            pickups: Vec::new(),
            effects: ActiveEffects::default(),
            particles: Vec::new(),
            next_obstacle_frame: 0.0,
            next_coin_frame: 0.0,
            next_pickup_frame: 0.0,
            events: Vec::new(),
        }
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Hand pending events to the host (sound cues, overlay triggers)
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Pending events, without draining (used by tests)
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Floored score as shown to the player
    pub fn display_score(&self) -> u64 {
        self.score.floor().max(0.0) as u64
    }
}
