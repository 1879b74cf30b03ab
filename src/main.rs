//! Featherfall entry point
//!
//! Terminal frontend: polls input, drives the fixed-tick simulation, and
//! draws each frame from the read-only snapshot. All gameplay rules live
//! in the library; this file only translates key presses into
//! [`InputEvent`]s and snapshots into characters.

use std::io::{self, Write, stdout};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind},
    execute, queue,
    style::{self, Color},
    terminal,
};

use featherfall::consts::{TICK_RATE, WINDOW_HEIGHT, WINDOW_WIDTH};
use featherfall::shop::{MENU_TOP, ROW_HEIGHT};
use featherfall::sim::{FrameSnapshot, GamePhase, GameState, InputEvent, tick};
use featherfall::{JsonStore, MemoryStore, StatePort};

fn main() -> io::Result<()> {
    env_logger::init();

    // Disk store when possible, memory store otherwise; the game is
    // playable either way, progress just won't survive the session.
    let mut store: Box<dyn StatePort> = match JsonStore::open_default() {
        Ok(store) => Box::new(store),
        Err(err) => {
            log::warn!("progression store unavailable, playing without saves: {err}");
            Box::new(MemoryStore::new())
        }
    };

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut state = GameState::new(seed, store.as_mut());

    terminal::enable_raw_mode()?;
    let mut out = stdout();
    execute!(out, terminal::EnterAlternateScreen, cursor::Hide)?;

    let result = run(&mut out, &mut state, store.as_mut());

    execute!(out, terminal::LeaveAlternateScreen, cursor::Show)?;
    terminal::disable_raw_mode()?;
    result
}

fn run(out: &mut io::Stdout, state: &mut GameState, store: &mut dyn StatePort) -> io::Result<()> {
    let frame_dur = Duration::from_secs(1) / TICK_RATE;

    loop {
        let frame_start = Instant::now();

        // Poll all pending input for this tick, in order
        let mut events = Vec::new();
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => events.push(InputEvent::Quit),
                    KeyCode::Char(' ') | KeyCode::Char('f') => events.push(InputEvent::Flap),
                    KeyCode::Char('s') => events.push(InputEvent::ToggleShop),
                    KeyCode::Up => events.push(InputEvent::ScrollUp),
                    KeyCode::Down => events.push(InputEvent::ScrollDown),
                    KeyCode::Enter => {
                        // Activate the selected shop row through the
                        // click surface
                        let y = MENU_TOP + state.shop.cursor as f32 * ROW_HEIGHT + ROW_HEIGHT / 2.0;
                        events.push(InputEvent::Click(WINDOW_WIDTH / 2.0, y));
                    }
                    _ => {}
                }
            }
        }

        tick(state, store, &events);
        if state.quit_requested {
            return Ok(());
        }

        draw(out, &state.snapshot())?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_dur {
            std::thread::sleep(frame_dur - elapsed);
        }
    }
}

fn draw(out: &mut io::Stdout, snap: &FrameSnapshot) -> io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let cols = cols.max(20) as usize;
    let rows = rows.max(10) as usize;

    queue!(out, cursor::MoveTo(0, 0), style::ResetColor)?;

    match snap.phase {
        GamePhase::Shop => draw_shop(out, snap, cols, rows)?,
        _ => draw_field(out, snap, cols, rows)?,
    }

    out.flush()
}

/// Map playfield coordinates onto terminal cells and paint the scene.
fn draw_field(out: &mut io::Stdout, snap: &FrameSnapshot, cols: usize, rows: usize) -> io::Result<()> {
    let field_rows = rows.saturating_sub(2).max(1);
    let sx = cols as f32 / WINDOW_WIDTH;
    let sy = field_rows as f32 / WINDOW_HEIGHT;

    let mut grid = vec![(' ', Color::Reset); cols * field_rows];
    let mut put = |grid: &mut Vec<(char, Color)>, x: f32, y: f32, ch: char, color: Color| {
        let cx = (x * sx) as isize;
        let cy = (y * sy) as isize;
        if cx >= 0 && cy >= 0 && (cx as usize) < cols && (cy as usize) < field_rows {
            grid[cy as usize * cols + cx as usize] = (ch, color);
        }
    };

    for pipe in &snap.pipes {
        let top = pipe.gap_y - pipe.gap / 2.0;
        let bottom = pipe.gap_y + pipe.gap / 2.0;
        let mut y = 0.0;
        while y < WINDOW_HEIGHT {
            if y < top || y > bottom {
                let mut x = pipe.x;
                while x < pipe.x + pipe.width {
                    put(&mut grid, x, y, '#', Color::Green);
                    x += 1.0 / sx;
                }
            }
            y += 1.0 / sy;
        }
    }

    for coin in &snap.coins {
        let (ch, color) = if coin.special {
            ('O', Color::Magenta)
        } else {
            ('o', Color::Yellow)
        };
        put(&mut grid, coin.pos.x, coin.pos.y, ch, color);
    }

    let (br, bg, bb) = snap.bird.skin.body;
    let bird_color = Color::Rgb { r: br, g: bg, b: bb };
    let bird_ch = if snap.bird.angle > 0.0 { '^' } else { '@' };
    let bird_mid = snap.bird.pos + glam::Vec2::splat(snap.bird.size / 2.0);
    put(&mut grid, bird_mid.x, bird_mid.y, bird_ch, bird_color);

    for row in 0..field_rows {
        queue!(out, cursor::MoveTo(0, row as u16))?;
        for col in 0..cols {
            let (ch, color) = grid[row * cols + col];
            queue!(out, style::SetForegroundColor(color), style::Print(ch))?;
        }
    }

    queue!(
        out,
        cursor::MoveTo(0, field_rows as u16),
        style::SetForegroundColor(Color::White),
        terminal::Clear(terminal::ClearType::CurrentLine),
        style::Print(format!(
            "score {}  best {}  coins {}   [space] flap  [s] shop  [q] quit",
            snap.score, snap.high_score, snap.balance
        ))
    )?;
    if snap.phase == GamePhase::GameOver {
        queue!(
            out,
            cursor::MoveTo(0, (field_rows + 1) as u16),
            style::SetForegroundColor(Color::Red),
            terminal::Clear(terminal::ClearType::CurrentLine),
            style::Print("GAME OVER - press space to restart"),
        )?;
    } else {
        queue!(
            out,
            cursor::MoveTo(0, (field_rows + 1) as u16),
            terminal::Clear(terminal::ClearType::CurrentLine),
        )?;
    }
    Ok(())
}

fn draw_shop(out: &mut io::Stdout, snap: &FrameSnapshot, _cols: usize, rows: usize) -> io::Result<()> {
    queue!(
        out,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0),
        style::SetForegroundColor(Color::White),
        style::Print(format!("SHOP - coins {}   [up/down] select  [enter] buy/equip  [s] back", snap.balance))
    )?;

    for (i, row) in snap.shop_rows.iter().enumerate() {
        if i + 2 >= rows {
            break;
        }
        let marker = if row.selected { '>' } else { ' ' };
        let status = if row.equipped {
            "equipped".to_string()
        } else if row.owned {
            "owned".to_string()
        } else {
            format!("{} coins", row.skin.price)
        };
        let color = if row.equipped {
            Color::Green
        } else if row.owned {
            Color::Cyan
        } else if row.affordable {
            Color::Yellow
        } else {
            Color::DarkGrey
        };
        queue!(
            out,
            cursor::MoveTo(0, (i + 2) as u16),
            style::SetForegroundColor(color),
            style::Print(format!("{marker} {:<10} {status}", row.skin.id)),
        )?;
    }
    Ok(())
}
