//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation deterministically. Input
//! events are applied in order before the physics/spawn/collision phase
//! of the same tick.

use super::state::{Coin, GamePhase, GameState, Pipe};
use crate::consts::*;
use crate::persistence::{StatePort, keys};

/// Discrete input events, delivered once per tick in poll order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Flap while running; restart while game over
    Flap,
    /// Open/close the shop menu
    ToggleShop,
    /// End the session (flushes progression)
    Quit,
    /// Pointer click at playfield coordinates (shop transactions)
    Click(f32, f32),
    ScrollUp,
    ScrollDown,
}

/// Advance the game by one fixed tick.
///
/// Applies `events` in order, then (while Running) integrates physics,
/// runs the spawn timers, advances every live entity exactly once, and
/// resolves scoring, collisions, and coin collection.
pub fn tick(state: &mut GameState, store: &mut dyn StatePort, events: &[InputEvent]) {
    for event in events {
        apply_event(state, store, *event);
    }

    if state.phase != GamePhase::Running || state.quit_requested {
        return;
    }

    state.time_ticks += 1;

    // 1. Physics
    state.bird.integrate();

    // 2. Screen bounds end the run before anything else this tick
    if state.bird.pos.y <= 0.0 || state.bird.pos.y + state.bird.size >= WINDOW_HEIGHT {
        game_over(state, store);
        return;
    }

    // 3+4. Spawn timers, strict: the interval must have fully elapsed
    if state.time_ticks - state.last_pipe_tick > PIPE_INTERVAL_TICKS {
        let pipe = Pipe::spawn(&mut state.rng);
        state.pipes.push(pipe);
        state.last_pipe_tick = state.time_ticks;
    }
    if state.time_ticks - state.last_coin_tick > COIN_INTERVAL_TICKS {
        spawn_coin(state);
        state.last_coin_tick = state.time_ticks;
    }

    // 5. Pipes: advance, drop the dead, score passes once, collide
    state.pipes.retain_mut(|p| p.advance());
    let bird_box = state.bird.bounds();
    let mut hit = false;
    for pipe in &mut state.pipes {
        if !pipe.passed && pipe.x < state.bird.pos.x {
            pipe.passed = true;
            state.score += 1;
        }
        if pipe.collides(&bird_box) {
            hit = true;
        }
    }
    if hit {
        game_over(state, store);
        return;
    }

    // 6. Coins: advance, drop the dead, collect on overlap. Each
    // collection is persisted immediately so a crash cannot lose it.
    state.coins.retain_mut(|c| c.advance());
    let center = state.bird.center();
    let half = state.bird.size / 2.0;
    for coin in &mut state.coins {
        if !coin.collected && coin.collides(center, half) {
            coin.collected = true;
            state.balance += coin.value;
            if let Err(err) = store.set_int(keys::COINS, state.balance) {
                log::warn!("failed to persist coin balance: {err}");
            }
        }
    }
    state.coins.retain(|c| !c.collected);
}

fn apply_event(state: &mut GameState, store: &mut dyn StatePort, event: InputEvent) {
    match event {
        InputEvent::Flap => match state.phase {
            GamePhase::Running => state.bird.flap(),
            GamePhase::GameOver => state.reset(store),
            GamePhase::Shop => {}
        },
        InputEvent::ToggleShop => match state.phase {
            GamePhase::Running => state.phase = GamePhase::Shop,
            GamePhase::Shop => state.phase = GamePhase::Running,
            GamePhase::GameOver => {}
        },
        InputEvent::Quit => {
            state.quit_requested = true;
            state.flush(store);
        }
        InputEvent::Click(_, y) => {
            if state.phase == GamePhase::Shop {
                if let Some(row) = state.shop.row_at(y) {
                    let id = crate::skins::CATALOG[row].id;
                    if let Err(err) =
                        state
                            .shop
                            .purchase_and_equip(id, &mut state.bird, &mut state.balance, store)
                    {
                        log::info!("purchase rejected: {err}");
                    }
                }
            }
        }
        InputEvent::ScrollUp => {
            if state.phase == GamePhase::Shop {
                state.shop.scroll_up();
            }
        }
        InputEvent::ScrollDown => {
            if state.phase == GamePhase::Shop {
                state.shop.scroll_down();
            }
        }
    }
}

/// Sticky Running -> GameOver transition; finalizes the high score once.
fn game_over(state: &mut GameState, store: &mut dyn StatePort) {
    if state.phase == GamePhase::GameOver {
        return;
    }
    state.phase = GamePhase::GameOver;
    state.finalize_high_score(store);
    log::info!(
        "game over at tick {} (score {}, high score {})",
        state.time_ticks,
        state.score,
        state.high_score
    );
}

/// Spawn a coin, anchored to the newest pipe's gap when that pipe has
/// scrolled far enough in from the right edge, otherwise in the generic
/// mid-screen band.
fn spawn_coin(state: &mut GameState) {
    use rand::Rng;

    // The newest pipe is the rightmost one
    let anchor = state
        .pipes
        .iter()
        .max_by(|a, b| a.x.total_cmp(&b.x))
        .map(|p| (p.x, p.gap_y, p.width));

    let (x, y) = match anchor {
        Some((px, gap_y, width)) if px < WINDOW_WIDTH - 100.0 => {
            let jitter_limit = (PIPE_GAP / 4.0) as i32;
            let jitter = state.rng.random_range(-jitter_limit..=jitter_limit) as f32;
            (px + width + 50.0, gap_y + jitter)
        }
        _ => {
            let band_top = (WINDOW_HEIGHT / 3.0) as i32;
            let band_bottom = (WINDOW_HEIGHT * 2.0 / 3.0) as i32;
            let y = state.rng.random_range(band_top..=band_bottom) as f32;
            (WINDOW_WIDTH, y)
        }
    };

    let coin = Coin::spawn(x, y, &mut state.rng);
    state.coins.push(coin);
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use proptest::prelude::*;

    proptest! {
        /// Velocity never exceeds the cap, whatever the flap pattern
        #[test]
        fn prop_velocity_bounded(flaps in proptest::collection::vec(any::<bool>(), 1..400)) {
            let mut store = MemoryStore::new();
            let mut state = GameState::new(42, &mut store);
            for flap in flaps {
                let events = if flap { vec![InputEvent::Flap] } else { vec![] };
                tick(&mut state, &mut store, &events);
                prop_assert!(state.bird.velocity <= crate::consts::MAX_VELOCITY);
                if state.phase != GamePhase::Running {
                    break;
                }
            }
        }

        /// Score never exceeds the number of pipes ever spawned, and the
        /// balance only grows during a run.
        #[test]
        fn prop_score_and_balance_monotone(seed in any::<u64>()) {
            let mut store = MemoryStore::new();
            let mut state = GameState::new(seed, &mut store);
            let mut last_balance = state.balance;
            let mut spawned = 0u32;
            for i in 0..2000u32 {
                let before = state.pipes.len();
                let events = if i % 20 == 0 { vec![InputEvent::Flap] } else { vec![] };
                tick(&mut state, &mut store, &events);
                if state.pipes.len() > before {
                    spawned += (state.pipes.len() - before) as u32;
                }
                prop_assert!(state.score <= spawned);
                prop_assert!(state.balance >= last_balance);
                last_balance = state.balance;
                if state.phase != GamePhase::Running {
                    break;
                }
            }
        }
    }
}
