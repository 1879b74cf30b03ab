//! Game state and core simulation types
//!
//! All gameplay entities live here: the bird, the scrolling pipes and
//! coins, and the session-level [`GameState`] that owns them.

use std::collections::BTreeSet;
use std::f32::consts::TAU;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::Rect;
use crate::consts::*;
use crate::persistence::{StatePort, keys};
use crate::shop::Shop;
use crate::skins::{self, DEFAULT_SKIN};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Shop menu is open; physics and spawning are frozen
    Shop,
    /// Run ended, waiting for restart
    GameOver,
}

/// The player's bird
#[derive(Debug, Clone)]
pub struct Bird {
    /// Top-left corner of the bounding box. x never changes.
    pub pos: Vec2,
    /// Vertical velocity, positive = falling
    pub velocity: f32,
    /// Visual tilt in degrees, derived from velocity sign
    pub angle: f32,
    /// Bounding box side length
    pub size: f32,
    /// Equipped skin, always a member of `owned_skins`
    pub current_skin: String,
    /// Owned catalog ids, always contains the default
    pub owned_skins: BTreeSet<String>,
}

impl Bird {
    /// Fresh bird with only the default skin. Skin state is usually
    /// loaded from the store via [`Bird::load`].
    pub fn new() -> Self {
        let mut owned = BTreeSet::new();
        owned.insert(DEFAULT_SKIN.to_string());
        Self {
            pos: Vec2::new(WINDOW_WIDTH / 3.0, WINDOW_HEIGHT / 2.0),
            velocity: 0.0,
            angle: 0.0,
            size: BIRD_SIZE,
            current_skin: DEFAULT_SKIN.to_string(),
            owned_skins: owned,
        }
    }

    /// Load skin ownership and selection from the store. A store failure
    /// defaults to the free skin only and the game stays playable.
    pub fn load(store: &dyn StatePort) -> Self {
        let mut bird = Self::new();

        match store.get_set(keys::OWNED_SKINS) {
            Ok(owned) => bird.owned_skins.extend(owned),
            Err(err) => log::warn!("could not load owned skins, using default only: {err}"),
        }
        // The default is owned no matter what the store says
        bird.owned_skins.insert(DEFAULT_SKIN.to_string());

        match store.get_str(keys::CURRENT_SKIN) {
            Ok(Some(id)) if skins::skin(&id).is_some() && bird.owned_skins.contains(&id) => {
                bird.current_skin = id;
            }
            Ok(_) => {}
            Err(err) => log::warn!("could not load equipped skin: {err}"),
        }

        bird
    }

    /// Upward impulse: fixed launch velocity and a nose-up tilt
    pub fn flap(&mut self) {
        self.velocity = FLAP_STRENGTH;
        self.angle = FLAP_ANGLE;
    }

    /// Advance one tick of physics.
    ///
    /// Falling applies a multiplicative acceleration before gravity,
    /// rising applies plain gravity. The asymmetry is the game's tuned
    /// feel; do not "fix" it. Position is never clamped here - the
    /// simulation checks screen bounds so it can trigger a proper game
    /// over instead of silently clipping.
    pub fn integrate(&mut self) {
        if self.velocity > 0.0 {
            self.velocity = (self.velocity * ACCELERATION + GRAVITY).min(MAX_VELOCITY);
        } else {
            self.velocity += GRAVITY;
        }
        self.pos.y += self.velocity;

        if self.velocity < 0.0 {
            self.angle = FLAP_ANGLE;
        } else {
            self.angle = (self.angle - DIVE_ANGLE_STEP).max(MAX_DIVE_ANGLE);
        }
    }

    /// Bounding box for pipe collisions
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }

    /// Center point for coin collection
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    /// Equip a skin. Succeeds only for catalog-known, owned ids; the
    /// choice is persisted (best-effort). Anything else is a no-op.
    pub fn select_skin(&mut self, id: &str, store: &mut dyn StatePort) -> bool {
        if skins::skin(id).is_none() || !self.owned_skins.contains(id) {
            return false;
        }
        self.current_skin = id.to_string();
        if let Err(err) = store.set_str(keys::CURRENT_SKIN, id) {
            log::warn!("failed to persist equipped skin: {err}");
        }
        true
    }

    /// Add a skin to the owned set if it is catalog-known, not yet owned,
    /// and affordable. Does NOT deduct currency - that is the
    /// storefront's side of the transaction.
    pub fn purchase_skin(&mut self, id: &str, available: u32, store: &mut dyn StatePort) -> bool {
        let Some(spec) = skins::skin(id) else {
            return false;
        };
        if self.owned_skins.contains(id) || available < spec.price {
            return false;
        }
        self.owned_skins.insert(id.to_string());
        if let Err(err) = store.add_to_set(keys::OWNED_SKINS, id) {
            log::warn!("failed to persist skin ownership: {err}");
        }
        true
    }
}

impl Default for Bird {
    fn default() -> Self {
        Self::new()
    }
}

/// A pair of vertically aligned barriers with a fixed gap, scrolling left
#[derive(Debug, Clone)]
pub struct Pipe {
    /// Left edge, decreases by `PIPE_SPEED` each tick
    pub x: f32,
    /// Gap center, fixed at creation
    pub gap_y: f32,
    pub width: f32,
    /// Set once when the bird's x passes this pipe; gates pass-scoring
    pub passed: bool,
}

impl Pipe {
    /// Spawn at the right edge with a uniformly sampled gap center inside
    /// the safe vertical band.
    pub fn spawn(rng: &mut Pcg32) -> Self {
        let band = 150;
        let gap_y = rng.random_range(band..=(WINDOW_HEIGHT as i32 - band)) as f32;
        Self {
            x: WINDOW_WIDTH,
            gap_y,
            width: PIPE_WIDTH,
            passed: false,
        }
    }

    /// Scroll left one tick; false once fully off the left edge
    pub fn advance(&mut self) -> bool {
        self.x -= PIPE_SPEED;
        self.x > -self.width
    }

    /// Upper barrier rectangle
    pub fn top_rect(&self) -> Rect {
        Rect::new(self.x, 0.0, self.width, self.gap_y - PIPE_GAP / 2.0)
    }

    /// Lower barrier rectangle
    pub fn bottom_rect(&self) -> Rect {
        let top = self.gap_y + PIPE_GAP / 2.0;
        Rect::new(self.x, top, self.width, WINDOW_HEIGHT - top)
    }

    /// True if the bird's bounding box hits either barrier
    pub fn collides(&self, bird_box: &Rect) -> bool {
        bird_box.intersects(&self.top_rect()) || bird_box.intersects(&self.bottom_rect())
    }
}

/// A bobbing collectible scrolling left at pipe speed
#[derive(Debug, Clone)]
pub struct Coin {
    pub pos: Vec2,
    pub radius: f32,
    /// Rare variant with a higher reward
    pub special: bool,
    pub value: u32,
    pub collected: bool,
    start_y: f32,
    phase: f32,
}

impl Coin {
    /// Spawn at (x, y). Rarity and the initial bob phase are drawn once
    /// here; a 10% draw makes the coin special.
    pub fn spawn(x: f32, y: f32, rng: &mut Pcg32) -> Self {
        let special = rng.random_bool(SPECIAL_COIN_CHANCE);
        Self {
            pos: Vec2::new(x, y),
            radius: COIN_RADIUS,
            special,
            value: if special { SPECIAL_COIN_VALUE } else { COIN_VALUE },
            collected: false,
            start_y: y,
            phase: rng.random_range(0.0..TAU),
        }
    }

    /// Scroll left and bob one tick; false once off the left edge
    pub fn advance(&mut self) -> bool {
        self.pos.x -= PIPE_SPEED;
        self.phase += COIN_BOB_SPEED;
        self.pos.y = self.start_y + self.phase.sin() * COIN_BOB_RANGE;
        self.pos.x > -self.radius * 2.0
    }

    /// Strict-inequality overlap against the bird's center
    pub fn collides(&self, bird_center: Vec2, bird_half_size: f32) -> bool {
        super::collision::within_reach(bird_center, self.pos, self.radius + bird_half_size)
    }
}

/// Complete session state owned by the simulation
#[derive(Debug)]
pub struct GameState {
    /// Run seed, kept for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub bird: Bird,
    pub pipes: Vec<Pipe>,
    pub coins: Vec<Coin>,
    pub score: u32,
    /// Best score across sessions, reloaded from the store
    pub high_score: u32,
    /// Authoritative coin balance for this session
    pub balance: u32,
    /// Shop menu state (selection cursor)
    pub shop: Shop,
    /// Ticks elapsed while Running
    pub time_ticks: u64,
    /// Set by the Quit input; the frontend flushes and exits
    pub quit_requested: bool,
    pub(crate) rng: Pcg32,
    pub(crate) last_pipe_tick: u64,
    pub(crate) last_coin_tick: u64,
}

impl GameState {
    /// Start a session: seed the RNG and reload all persisted progression.
    pub fn new(seed: u64, store: &mut dyn StatePort) -> Self {
        let mut state = Self {
            seed,
            phase: GamePhase::Running,
            bird: Bird::new(),
            pipes: Vec::new(),
            coins: Vec::new(),
            score: 0,
            high_score: 0,
            balance: 0,
            shop: Shop::new(),
            time_ticks: 0,
            quit_requested: false,
            rng: Pcg32::seed_from_u64(seed),
            last_pipe_tick: 0,
            last_coin_tick: 0,
        };
        state.reload_progression(store);
        state
    }

    /// Full session reset after a game over: fresh bird and entity
    /// collections, score zeroed, progression reloaded from the store.
    pub fn reset(&mut self, store: &mut dyn StatePort) {
        self.phase = GamePhase::Running;
        self.pipes.clear();
        self.coins.clear();
        self.score = 0;
        self.time_ticks = 0;
        self.last_pipe_tick = 0;
        self.last_coin_tick = 0;
        self.reload_progression(store);
        log::info!("session reset (high score {})", self.high_score);
    }

    fn reload_progression(&mut self, store: &mut dyn StatePort) {
        self.bird = Bird::load(store);
        self.high_score = match store.get_int(keys::HIGH_SCORE, 0) {
            Ok(v) => v,
            Err(err) => {
                log::warn!("could not load high score, defaulting to 0: {err}");
                0
            }
        };
        self.balance = match store.get_int(keys::COINS, 0) {
            Ok(v) => v,
            Err(err) => {
                log::warn!("could not load coin balance, defaulting to 0: {err}");
                0
            }
        };
    }

    /// Persist the high score if this run beat it. Called exactly once,
    /// on the Running -> GameOver transition.
    pub fn finalize_high_score(&mut self, store: &mut dyn StatePort) {
        if self.score > self.high_score {
            self.high_score = self.score;
            if let Err(err) = store.set_int(keys::HIGH_SCORE, self.high_score) {
                log::warn!("failed to persist high score: {err}");
            }
        }
    }

    /// Best-effort flush of the coin balance, used on shutdown
    pub fn flush(&self, store: &mut dyn StatePort) {
        if let Err(err) = store.set_int(keys::COINS, self.balance) {
            log::warn!("failed to flush coin balance: {err}");
        }
    }
}
