//! Featherfall - a side-scrolling flappy arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, game state)
//! - `skins`: Immutable cosmetic catalog
//! - `shop`: Storefront transactions over the economy store
//! - `persistence`: Key-value + set-membership store for progression

pub mod persistence;
pub mod shop;
pub mod sim;
pub mod skins;

pub use persistence::{JsonStore, MemoryStore, StatePort, StoreError};
pub use shop::{Shop, ShopError};
pub use sim::{FrameSnapshot, GamePhase, GameState, InputEvent, tick};
pub use skins::{SkinSpec, skin, skin_ids};

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (pixels)
    pub const WINDOW_WIDTH: f32 = 400.0;
    pub const WINDOW_HEIGHT: f32 = 600.0;

    /// Fixed simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;

    /// Bird physics (per-tick units)
    pub const GRAVITY: f32 = 0.5;
    pub const FLAP_STRENGTH: f32 = -6.0;
    pub const MAX_VELOCITY: f32 = 10.0;
    /// Fall acceleration multiplier, applied only while descending
    pub const ACCELERATION: f32 = 1.05;
    /// Bird bounding box side length
    pub const BIRD_SIZE: f32 = 30.0;
    /// Nose-up rotation while rising (degrees)
    pub const FLAP_ANGLE: f32 = 20.0;
    /// Maximum nose-down rotation (degrees)
    pub const MAX_DIVE_ANGLE: f32 = -70.0;
    /// Per-tick rotation decay while falling (degrees)
    pub const DIVE_ANGLE_STEP: f32 = 4.0;

    /// Obstacle scroll speed (pixels per tick, shared with coins)
    pub const PIPE_SPEED: f32 = 3.0;
    pub const PIPE_GAP: f32 = 150.0;
    pub const PIPE_WIDTH: f32 = 80.0;
    /// Spawn interval: 1500 ms at 60 Hz
    pub const PIPE_INTERVAL_TICKS: u64 = 90;

    /// Coin spawn interval: 2000 ms at 60 Hz
    pub const COIN_INTERVAL_TICKS: u64 = 120;
    pub const COIN_RADIUS: f32 = 10.0;
    pub const COIN_VALUE: u32 = 5;
    pub const SPECIAL_COIN_VALUE: u32 = 10;
    /// Probability that a freshly spawned coin is special
    pub const SPECIAL_COIN_CHANCE: f64 = 0.1;
    /// Vertical bob amplitude (pixels) and per-tick phase step
    pub const COIN_BOB_RANGE: f32 = 20.0;
    pub const COIN_BOB_SPEED: f32 = 0.05;
}
