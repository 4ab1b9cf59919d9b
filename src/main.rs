mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};
use rand::thread_rng;

use pigeon_patrol::compute::{
    init_state, move_tank_left, move_tank_right, tank_shoot, tick, TICK_MS,
};
use pigeon_patrol::entities::{GameState, GameStatus, SoundCue};
use pigeon_patrol::leaderboard;

const FRAME: Duration = Duration::from_millis(TICK_MS as u64); // ≈30 FPS

// ── Simultaneous-input constants ──────────────────────────────────────────────

/// Min frames between shots while Space is held.
/// 8 frames @ 30 FPS ≈ 3.75 shots/sec.
const SHOOT_COOLDOWN: u32 = 8;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 4 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 4;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start,
    Quit,
}

fn show_menu<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "★  PIGEON  PATROL  ★";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(9),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    let blurb = "Shoot the pigeons. Dodge the poop.";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(blurb.chars().count() as u16 / 2),
        cy.saturating_sub(7),
    ))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print(blurb))?;

    // Top-10 leaderboard
    let entries = leaderboard::load(&leaderboard::default_path());
    out.queue(cursor::MoveTo(cx.saturating_sub(10), cy.saturating_sub(5)))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print("── TOP SCORES ──"))?;
    if entries.is_empty() {
        out.queue(cursor::MoveTo(cx.saturating_sub(10), cy.saturating_sub(4)))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print("(none yet)"))?;
    }
    for (i, entry) in entries.iter().enumerate() {
        let row = cy.saturating_sub(4) + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(10), row))?;
        out.queue(style::SetForegroundColor(Color::White))?;
        out.queue(Print(format!("{:>2}. {:<12} {:>6}", i + 1, entry.name, entry.score)))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(10), cy + 7))?;
    out.queue(style::SetForegroundColor(Color::Green))?;
    out.queue(Print("ENTER : Start"))?;
    out.queue(cursor::MoveTo(cx.saturating_sub(10), cy + 8))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   Q : Quit"))?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    // Block until the user makes a choice
    loop {
        if let Ok(Event::Key(KeyEvent { code, kind, .. })) = rx.recv() {
            if kind != KeyEventKind::Press {
                continue;
            }
            match code {
                KeyCode::Enter | KeyCode::Char(' ') => return Ok(MenuResult::Start),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            }
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `true` → quit program,  `false` → session ended (game over).
///
/// Input model: instead of acting on each key event individually, we maintain
/// a `key_frame` map that records the frame number of the last press/repeat
/// event for every key.  Each frame we check which keys are still "fresh"
/// (within `HOLD_WINDOW` frames) and apply all their effects simultaneously,
/// so Space + A/D can be held at the same time with no interference.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
///   `Press` / `Repeat` / `Release` events → keys are removed on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`).  Keys expire naturally after `HOLD_WINDOW` frames of
///   silence, which is shorter than the OS repeat interval, so the key stays
///   live while it is actively generating repeats.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<bool> {
    let mut rng = thread_rng();

    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut shoot_cooldown: u32 = 0;
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code.clone(), frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(true);
                        }
                        KeyCode::Char('c')
                            if modifiers.contains(KeyModifiers::CONTROL) =>
                        {
                            return Ok(true);
                        }
                        _ => {}
                    }
                }
                // Repeat: refresh timestamp so key stays "held"
                KeyEventKind::Repeat => {
                    key_frame.insert(code.clone(), frame);
                }
                // Release: remove key immediately (keyboard-enhancement path)
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        // ── Apply held-key actions every frame ────────────────────────────────
        if state.status == GameStatus::Playing {
            let left = is_held(&key_frame, &KeyCode::Left, frame)
                || is_held(&key_frame, &KeyCode::Char('a'), frame)
                || is_held(&key_frame, &KeyCode::Char('A'), frame);
            let right = is_held(&key_frame, &KeyCode::Right, frame)
                || is_held(&key_frame, &KeyCode::Char('d'), frame)
                || is_held(&key_frame, &KeyCode::Char('D'), frame);
            let shoot = is_held(&key_frame, &KeyCode::Char(' '), frame);

            // Movement — a fixed velocity step per frame, so no throttling
            if left {
                *state = move_tank_left(state);
            } else if right {
                *state = move_tank_right(state);
            }

            // Shooting — throttled so holding Space doesn't fire every frame
            if shoot_cooldown == 0 && shoot {
                *state = tank_shoot(state);
                shoot_cooldown = SHOOT_COOLDOWN;
            }
        }

        shoot_cooldown = shoot_cooldown.saturating_sub(1);

        if state.status == GameStatus::Playing {
            *state = tick(state, &mut rng);
        }

        let (width, height) = terminal::size()?;
        display::render(out, state, width, height)?;

        // Audio cues → terminal bell (shots are too frequent to beep for)
        let cues: Vec<SoundCue> = state.sounds.drain(..).collect();
        if cues.iter().any(|c| {
            matches!(c, SoundCue::Scream | SoundCue::TankHit | SoundCue::WaveCleared)
        }) {
            out.write_all(b"\x07")?;
            out.flush()?;
        }

        if state.status == GameStatus::GameOver {
            return Ok(false);
        }

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Game-over name entry ──────────────────────────────────────────────────────

/// Prompt for a leaderboard name below the game-over overlay.
/// `Some(name)` on ENTER (defaults to "???" if left blank), `None` on ESC.
fn prompt_name<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<Option<String>> {
    let mut name = String::new();

    loop {
        let (width, height) = terminal::size()?;
        let row = height / 2 + 3;

        let label = format!("Name: {}_", name);
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;
        out.queue(cursor::MoveTo(
            (width / 2).saturating_sub(label.chars().count() as u16 / 2),
            row,
        ))?;
        out.queue(style::SetForegroundColor(Color::White))?;
        out.queue(Print(&label))?;

        let hint = "ENTER : Save score   ESC : Skip";
        out.queue(cursor::MoveTo(
            (width / 2).saturating_sub(hint.chars().count() as u16 / 2),
            row + 2,
        ))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(hint))?;
        out.queue(style::ResetColor)?;
        out.flush()?;

        match rx.recv() {
            Ok(Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. })) => match code {
                KeyCode::Enter => {
                    let trimmed = name.trim();
                    let name = if trimmed.is_empty() { "???" } else { trimmed };
                    return Ok(Some(name.to_string()));
                }
                KeyCode::Esc => return Ok(None),
                KeyCode::Backspace => {
                    name.pop();
                }
                KeyCode::Char(c) if (c.is_alphanumeric() || c == ' ') && name.len() < 12 => {
                    name.push(c);
                }
                _ => {}
            },
            Ok(_) => {}
            Err(_) => return Ok(None), // input thread gone
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break; // receiver dropped → program exiting
                    }
                }
                Err(_) => break,
            }
        }
    });

    let result = run(&mut out, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    loop {
        match show_menu(out, rx)? {
            MenuResult::Quit => break,
            MenuResult::Start => {
                let mut state = init_state();
                let quit = game_loop(out, &mut state, rx)?;
                if quit {
                    break;
                }

                // Game over: offer a leaderboard entry.  A failed save must
                // not take the session down with it.
                if state.status == GameStatus::GameOver {
                    if let Some(name) = prompt_name(out, rx)? {
                        let _ =
                            leaderboard::save_score(&leaderboard::default_path(), &name, state.score);
                    }
                }
                // Back to the menu (which re-reads the leaderboard)
            }
        }
    }
    Ok(())
}
