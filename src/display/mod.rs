/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// world coordinates (1344×1024) into terminal cells.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use pigeon_patrol::compute::{BACKGROUNDS, WORLD_H, WORLD_W};
use pigeon_patrol::entities::{GameState, GameStatus};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_TANK: Color = Color::White;
const C_PIGEON: Color = Color::Grey;
const C_BULLET: Color = Color::Cyan;
const C_POOP: Color = Color::DarkYellow;
const C_PARTICLE: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

/// Border colour doubles as the background scene tint.
fn background_color(index: usize) -> Color {
    match index % BACKGROUNDS.len() {
        0 => Color::DarkGreen, // City Park
        1 => Color::DarkBlue,  // Rooftops
        _ => Color::DarkCyan,  // Harbour
    }
}

// ── World → terminal mapping ──────────────────────────────────────────────────

/// Play area: row 0 is the HUD, row 1 the top bar, the last two rows the
/// bottom bar and the controls hint.
fn to_col(x: f32, width: u16) -> u16 {
    let rightmost = width.saturating_sub(2).max(1);
    let c = 1 + (x / WORLD_W * rightmost as f32) as u16;
    c.min(rightmost)
}

fn to_row(y: f32, height: u16) -> u16 {
    let bottom = height.saturating_sub(3).max(2);
    let r = 2 + (y / WORLD_H * height.saturating_sub(5) as f32) as u16;
    r.min(bottom)
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame into a `width`×`height` terminal.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, state, width, height)?;
    draw_hud(out, state, width)?;

    for particle in &state.particles {
        let (c, r) = (to_col(particle.x, width), to_row(particle.y, height));
        out.queue(cursor::MoveTo(c, r))?;
        out.queue(style::SetForegroundColor(C_PARTICLE))?;
        out.queue(Print("·"))?;
    }
    for pigeon in &state.pigeons {
        draw_pigeon(out, pigeon, width, height)?;
    }
    for bullet in &state.bullets {
        let (c, r) = (to_col(bullet.x, width), to_row(bullet.y, height));
        out.queue(cursor::MoveTo(c, r))?;
        out.queue(style::SetForegroundColor(C_BULLET))?;
        out.queue(Print("║"))?;
    }
    for poop in &state.poops {
        let (c, r) = (to_col(poop.x, width), to_row(poop.y, height));
        out.queue(cursor::MoveTo(c, r))?;
        out.queue(style::SetForegroundColor(C_POOP))?;
        out.queue(Print("•"))?;
    }

    draw_tank(out, state, width, height)?;
    draw_controls_hint(out, height)?;

    if state.status == GameStatus::GameOver {
        draw_game_over(out, state, width, height)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border (tinted by the current background scene) ───────────────────────────

fn draw_border<W: Write>(
    out: &mut W,
    state: &GameState,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let w = width as usize;

    out.queue(style::SetForegroundColor(background_color(state.background_index)))?;

    // Row 1 — top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2 — bottom bar
    out.queue(cursor::MoveTo(0, height.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..height.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, width: u16) -> std::io::Result<()> {
    // Score — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {:>8}", state.score)))?;

    // Scene — centre
    let scene = BACKGROUNDS[state.background_index % BACKGROUNDS.len()];
    let scene_str = format!("[ {} ]", scene);
    let sx = (width / 2).saturating_sub(scene_str.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(sx, 0))?;
    out.queue(style::SetForegroundColor(background_color(state.background_index)))?;
    out.queue(Print(&scene_str))?;

    // Lives — right
    let hearts: String = "♥".repeat(state.lives as usize);
    let lives_text = format!("Lives: {}", hearts);
    let rx = width.saturating_sub(lives_text.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_text))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_tank<W: Write>(
    out: &mut W,
    state: &GameState,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    // Sprite (2 rows, 3 cols):
    //    ╦       ← turret
    //   ▐█▌      ← hull
    let c = to_col(state.tank.x, width);
    let r = to_row(state.tank.y, height);

    out.queue(style::SetForegroundColor(C_TANK))?;
    out.queue(cursor::MoveTo(c.saturating_add(1).min(width.saturating_sub(2)), r))?;
    out.queue(Print("╦"))?;
    if r + 1 < height.saturating_sub(2) {
        out.queue(cursor::MoveTo(c, r + 1))?;
        out.queue(Print("▐█▌"))?;
    }
    Ok(())
}

fn draw_pigeon<W: Write>(
    out: &mut W,
    pigeon: &pigeon_patrol::entities::Pigeon,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let c = to_col(pigeon.x, width);
    let r = to_row(pigeon.y, height);
    out.queue(cursor::MoveTo(c, r))?;
    out.queue(style::SetForegroundColor(C_PIGEON))?;
    // Facing follows the flip flag toggled on each edge reflection
    out.queue(Print(if pigeon.flipped { "<o\\" } else { "/o>" }))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    state: &GameState,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let score_line = format!("Final Score: {}", state.score);
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", Color::Red),
        ("║    GAME  OVER    ║", Color::Red),
        ("╚══════════════════╝", Color::Red),
        (&score_line, Color::Yellow),
    ];

    let cx = width / 2;
    let start_row = (height / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
