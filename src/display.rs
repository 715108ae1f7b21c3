/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state. No game logic is performed; this module only scales the
/// fixed 1280×720 arena onto whatever terminal it finds and translates
/// state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use swarm::compute::{ARENA_HEIGHT, ARENA_WIDTH, MAX_BULLETS};
use swarm::entities::{Difficulty, Effect, Entity, GameState, PowerUp, Screen};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::Red;
const C_BULLET: Color = Color::Cyan;
const C_CROSSHAIR: Color = Color::White;
const C_HUD_HEALTH: Color = Color::Red;
const C_HUD_STATS: Color = Color::Blue;
const C_HINT: Color = Color::DarkGrey;
const C_TITLE: Color = Color::Yellow;

// ── Arena → terminal scaling ──────────────────────────────────────────────────

/// Map an arena coordinate to a terminal cell.
pub fn arena_to_cell(x: f32, y: f32, term_w: u16, term_h: u16) -> (u16, u16) {
    let col = (x / ARENA_WIDTH * term_w as f32) as i32;
    let row = (y / ARENA_HEIGHT * term_h as f32) as i32;
    (
        col.clamp(0, term_w.saturating_sub(1) as i32) as u16,
        row.clamp(0, term_h.saturating_sub(1) as i32) as u16,
    )
}

/// Inverse of `arena_to_cell`, used to turn the mouse cell into an aim
/// point.
pub fn cell_to_arena(col: u16, row: u16, term_w: u16, term_h: u16) -> (f32, f32) {
    (
        col as f32 / term_w.max(1) as f32 * ARENA_WIDTH,
        row as f32 / term_h.max(1) as f32 * ARENA_HEIGHT,
    )
}

/// An entity's footprint in cells, at least 1×1.
fn footprint(entity: &Entity, term_w: u16, term_h: u16) -> (u16, u16) {
    let w = (entity.body.width / ARENA_WIDTH * term_w as f32).round() as u16;
    let h = (entity.body.height / ARENA_HEIGHT * term_h as f32).round() as u16;
    (w.max(1), h.max(1))
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame of whichever screen is active.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    mouse_cell: (u16, u16),
) -> std::io::Result<()> {
    let (term_w, term_h) = terminal::size()?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match state.screen {
        Screen::Logo => draw_logo(out, term_w, term_h)?,
        Screen::Title => draw_title(out, state, term_w, term_h)?,
        Screen::Gameplay => {
            draw_gameplay(out, state, mouse_cell, term_w, term_h)?;
            draw_hud(out, state, term_w, term_h)?;
        }
        Screen::Pause => {
            // Same as gameplay, frozen, with a banner on top
            draw_gameplay(out, state, mouse_cell, term_w, term_h)?;
            draw_hud(out, state, term_w, term_h)?;
            draw_pause_banner(out, term_w, term_h)?;
        }
        Screen::Ending => draw_ending(out, state, term_w, term_h)?,
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, term_h.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Screens ───────────────────────────────────────────────────────────────────

fn centered<W: Write>(
    out: &mut W,
    text: &str,
    row: u16,
    term_w: u16,
    color: Color,
) -> std::io::Result<()> {
    let col = (term_w / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn draw_logo<W: Write>(out: &mut W, term_w: u16, term_h: u16) -> std::io::Result<()> {
    let cy = term_h / 2;
    centered(out, "S  W  A  R  M", cy.saturating_sub(1), term_w, C_TITLE)?;
    centered(out, "survive the swarm", cy + 1, term_w, C_HINT)?;
    Ok(())
}

fn draw_title<W: Write>(
    out: &mut W,
    state: &GameState,
    term_w: u16,
    term_h: u16,
) -> std::io::Result<()> {
    let cy = term_h / 2;
    centered(out, "★  S W A R M  ★", cy.saturating_sub(6), term_w, C_TITLE)?;
    if state.best_score > 0 {
        let hs = format!("Best Score: {}", state.best_score);
        centered(out, &hs, cy.saturating_sub(5), term_w, Color::Yellow)?;
    }
    centered(out, "Select difficulty:", cy.saturating_sub(3), term_w, Color::White)?;

    let options: &[(Difficulty, &str, Color, &str)] = &[
        (Difficulty::Easy, "[1] Easy  ", Color::Green, "enemies trickle in"),
        (Difficulty::Medium, "[2] Medium", Color::Yellow, "a steady stream"),
        (Difficulty::Hard, "[3] Hard  ", Color::Red, "the swarm never stops"),
    ];
    for (i, (difficulty, label, color, desc)) in options.iter().enumerate() {
        let row = cy.saturating_sub(1) + i as u16;
        let marker = if state.difficulty == *difficulty { "▶ " } else { "  " };
        let line = format!("{}{} — {}", marker, label, desc);
        let col = (term_w / 2).saturating_sub(14);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(line))?;
    }

    centered(out, "Click the mouse to begin", cy + 4, term_w, Color::White)?;
    centered(
        out,
        "W A S D : Move   CLICK : Shoot   SPACE : Pause   Q : Quit",
        cy + 6,
        term_w,
        C_HINT,
    )?;
    Ok(())
}

fn draw_gameplay<W: Write>(
    out: &mut W,
    state: &GameState,
    mouse_cell: (u16, u16),
    term_w: u16,
    term_h: u16,
) -> std::io::Result<()> {
    for (_, enemy) in state.enemies.iter_active() {
        draw_entity_block(out, enemy, '▓', C_ENEMY, term_w, term_h)?;
    }
    for (_, bullet) in state.bullets.iter_active() {
        let (col, row) = arena_to_cell(bullet.body.x, bullet.body.y, term_w, term_h);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(C_BULLET))?;
        out.queue(Print("•"))?;
    }
    draw_powerup(out, &state.powerup, term_w, term_h)?;

    let (col, row) = arena_to_cell(state.player.body.x, state.player.body.y, term_w, term_h);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(C_PLAYER))?;
    out.queue(Print("◉"))?;

    // Crosshair at the aim position
    out.queue(cursor::MoveTo(mouse_cell.0, mouse_cell.1))?;
    out.queue(style::SetForegroundColor(C_CROSSHAIR))?;
    out.queue(Print("+"))?;

    Ok(())
}

/// Draw an entity as a solid block covering its scaled footprint.
fn draw_entity_block<W: Write>(
    out: &mut W,
    entity: &Entity,
    glyph: char,
    color: Color,
    term_w: u16,
    term_h: u16,
) -> std::io::Result<()> {
    let (col, row) = arena_to_cell(entity.body.x, entity.body.y, term_w, term_h);
    let (w, h) = footprint(entity, term_w, term_h);
    let line: String = std::iter::repeat(glyph).take(w as usize).collect();
    out.queue(style::SetForegroundColor(color))?;
    for dy in 0..h {
        let r = row + dy;
        if r >= term_h {
            break;
        }
        out.queue(cursor::MoveTo(col, r))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

/// Power-up symbols:
///   B (blue)    — MaxBulletUp:   one more bullet slot
///   W (magenta) — EnemyWipe:     clears every enemy
///   S (grey)    — IncreaseSpeed: player moves faster
///   + (green)   — Plus10Score
///   $ (yellow)  — Plus50Score
///   ♥ (red)     — HealthUp
fn draw_powerup<W: Write>(
    out: &mut W,
    powerup: &PowerUp,
    term_w: u16,
    term_h: u16,
) -> std::io::Result<()> {
    if !powerup.is_active {
        return Ok(());
    }
    let (sym, color) = match powerup.effect {
        Effect::MaxBulletUp => ("B", Color::Blue),
        Effect::EnemyWipe => ("W", Color::Magenta),
        Effect::IncreaseSpeed => ("S", Color::Grey),
        Effect::Plus10Score => ("+", Color::Green),
        Effect::Plus50Score => ("$", Color::Yellow),
        Effect::HealthUp => ("♥", Color::Red),
    };
    let (col, row) = arena_to_cell(powerup.position.x, powerup.position.y, term_w, term_h);
    // Pickup ring around the symbol
    out.queue(style::SetForegroundColor(C_HINT))?;
    if col > 0 {
        out.queue(cursor::MoveTo(col - 1, row))?;
        out.queue(Print("("))?;
    }
    if col + 1 < term_w {
        out.queue(cursor::MoveTo(col + 1, row))?;
        out.queue(Print(")"))?;
    }
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(sym))?;
    Ok(())
}

// ── HUD ───────────────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    state: &GameState,
    term_w: u16,
    term_h: u16,
) -> std::io::Result<()> {
    // Health hearts — top left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_HEALTH))?;
    let hearts: String = "♥".repeat(state.player.health.max(0) as usize);
    out.queue(Print(format!("HEALTH {}", hearts)))?;

    // Score / speed / bullet watermark — bottom, centred
    let stats = format!(
        "Score: {}   Speed: {:.1}   Bullets: {}/{}",
        state.score,
        state.player.speed,
        state.bullets.watermark(),
        MAX_BULLETS
    );
    centered(out, &stats, term_h.saturating_sub(1), term_w, C_HUD_STATS)?;
    Ok(())
}

// ── Overlays & ending ─────────────────────────────────────────────────────────

fn draw_pause_banner<W: Write>(out: &mut W, term_w: u16, term_h: u16) -> std::io::Result<()> {
    let cy = term_h / 2;
    centered(out, "╔══════════════╗", cy.saturating_sub(1), term_w, Color::Yellow)?;
    centered(out, "║    PAUSED    ║", cy, term_w, Color::Yellow)?;
    centered(out, "╚══════════════╝", cy + 1, term_w, Color::Yellow)?;
    centered(out, "SPACE to resume", cy + 3, term_w, C_HINT)?;
    Ok(())
}

fn draw_ending<W: Write>(
    out: &mut W,
    state: &GameState,
    term_w: u16,
    term_h: u16,
) -> std::io::Result<()> {
    let cy = term_h / 2;
    centered(out, "╔════════════════════╗", cy.saturating_sub(3), term_w, Color::Red)?;
    centered(out, "║     GAME  OVER     ║", cy.saturating_sub(2), term_w, Color::Red)?;
    centered(out, "╚════════════════════╝", cy.saturating_sub(1), term_w, Color::Red)?;

    let score_line = format!("Score: {:>6}", state.score);
    centered(out, &score_line, cy + 1, term_w, Color::Yellow)?;

    let best = state.best_score.max(state.score);
    let best_line = if state.score >= state.best_score && state.score > 0 {
        format!("★ NEW BEST: {:>6} ★", best)
    } else {
        format!("Best Score: {:>6}", best)
    };
    centered(out, &best_line, cy + 2, term_w, Color::Yellow)?;

    centered(out, "Try again?  Y / N", cy + 4, term_w, Color::White)?;
    Ok(())
}
