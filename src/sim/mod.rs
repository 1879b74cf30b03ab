//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - Fixed timestep only (60 ticks per second)
//! - Seeded RNG only
//! - No rendering or platform dependencies; persistence goes through the
//!   injected [`crate::persistence::StatePort`]

pub mod collision;
pub mod state;
pub mod tick;
pub mod view;

pub use collision::{Rect, within_reach};
pub use state::{Bird, Coin, GamePhase, GameState, Pipe};
pub use tick::{InputEvent, tick};
pub use view::{BirdView, CoinView, FrameSnapshot, PipeView, ShopRowView};
