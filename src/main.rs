mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use swarm::compute;
use swarm::entities::{Difficulty, GameState, Screen};
use swarm::geometry::Vec2;

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so the window is always refreshed
/// before expiry while the key is actually down.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: KeyCode, frame: u64) -> bool {
    key_frame
        .get(&key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    // RUST_LOG=debug swarm 2>swarm.log to capture the core's logging
    env_logger::init();

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

// ── Game-loop driver ──────────────────────────────────────────────────────────

/// Screen state machine: LOGO auto-advances to TITLE, a click starts
/// GAMEPLAY, SPACE toggles PAUSE, zero health lands on ENDING, and
/// ENDING either restarts (Y) or returns (N / Q), exiting with code 0.
///
/// Input model: instead of acting on each key event individually, a
/// `key_frame` map records the frame number of the last press/repeat
/// event for every key.  Each frame the driver checks which movement
/// keys are still "fresh" (within `HOLD_WINDOW` frames) and applies them
/// all simultaneously, so diagonals work even on classic terminals that
/// never report key releases.
fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    let mut rng = thread_rng();
    let mut state = compute::init_state(Difficulty::Medium, &mut rng);

    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut host_frame: u64 = 0;
    let mut mouse_cell: (u16, u16) = terminal::size().map(|(w, h)| (w / 2, h / 2))?;

    loop {
        let frame_start = Instant::now();
        host_frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                    // Press: record key + handle one-shot actions
                    KeyEventKind::Press => {
                        key_frame.insert(code.clone(), host_frame);
                        if handle_key_press(&mut state, code, modifiers) {
                            return Ok(());
                        }
                    }
                    // Repeat: refresh timestamp so key stays "held"
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, host_frame);
                    }
                    // Release: remove key immediately (keyboard-enhancement path)
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Mouse(MouseEvent { kind, column, row, .. }) => {
                    mouse_cell = (column, row);
                    if let MouseEventKind::Down(MouseButton::Left) = kind {
                        handle_click(&mut state, mouse_cell)?;
                    }
                }
                _ => {}
            }
        }

        // ── Advance whichever screen is live ──────────────────────────────────
        match state.screen {
            Screen::Logo => compute::advance_logo(&mut state),
            Screen::Gameplay => {
                let up = is_held(&key_frame, KeyCode::Char('w'), host_frame)
                    || is_held(&key_frame, KeyCode::Up, host_frame);
                let down = is_held(&key_frame, KeyCode::Char('s'), host_frame)
                    || is_held(&key_frame, KeyCode::Down, host_frame);
                let left = is_held(&key_frame, KeyCode::Char('a'), host_frame)
                    || is_held(&key_frame, KeyCode::Left, host_frame);
                let right = is_held(&key_frame, KeyCode::Char('d'), host_frame)
                    || is_held(&key_frame, KeyCode::Right, host_frame);
                compute::move_player(&mut state, up, down, left, right);
                compute::tick(&mut state, &mut rng);
            }
            // Title waits for a click; pause and ending wait for a key
            Screen::Title | Screen::Pause | Screen::Ending => {}
        }

        display::render(out, &state, mouse_cell)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

/// One-shot key actions.  Returns `true` when the program should exit.
fn handle_key_press(state: &mut GameState, code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return true,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Char(' ') => compute::toggle_pause(state),
        KeyCode::Char('1') if state.screen == Screen::Title => set_difficulty(state, Difficulty::Easy),
        KeyCode::Char('2') if state.screen == Screen::Title => set_difficulty(state, Difficulty::Medium),
        KeyCode::Char('3') if state.screen == Screen::Title => set_difficulty(state, Difficulty::Hard),
        KeyCode::Char('y') | KeyCode::Char('Y') if state.screen == Screen::Ending => {
            compute::reset(state);
            state.screen = Screen::Gameplay;
        }
        KeyCode::Char('n') | KeyCode::Char('N') if state.screen == Screen::Ending => {
            return true;
        }
        _ => {}
    }
    false
}

fn set_difficulty(state: &mut GameState, difficulty: Difficulty) {
    state.difficulty = difficulty;
    state.spawn_interval = compute::initial_spawn_interval(difficulty);
}

/// Left click: starts the game from the title, fires during gameplay.
fn handle_click(state: &mut GameState, mouse_cell: (u16, u16)) -> std::io::Result<()> {
    match state.screen {
        Screen::Title => state.screen = Screen::Gameplay,
        Screen::Gameplay => {
            let (term_w, term_h) = terminal::size()?;
            let (ax, ay) = display::cell_to_arena(mouse_cell.0, mouse_cell.1, term_w, term_h);
            compute::fire_bullet(state, Vec2::new(ax, ay));
        }
        _ => {}
    }
    Ok(())
}
