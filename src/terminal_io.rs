use std::collections::HashMap;
use std::io::{self, Write};
use std::time::Duration;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{self, Clear, ClearType},
};
use log::{error, info};

use crate::constants::{HOLD_GRACE_FRAMES, INITIAL_HOLD_FRAMES, START_BUTTON_CENTER};
use crate::rendering::Viewport;
use crate::world::FrameInput;

// --- SimulatedInput for debugging ---
pub struct SimulatedInput {
    events: HashMap<u64, Vec<Event>>,
}

impl SimulatedInput {
    pub fn new(events: HashMap<u64, Vec<Event>>) -> Self {
        SimulatedInput { events }
    }

    /// Scripted session for `--debug` runs: click start, sweep left then right
    /// while firing, then quit.
    pub fn demo(viewport: &Viewport) -> Self {
        let mut events: HashMap<u64, Vec<Event>> = HashMap::new();
        let (col, row) = viewport.to_cell(START_BUTTON_CENTER.0, START_BUTTON_CENTER.1);
        events.insert(1, vec![Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: col.max(0) as u16,
            row: row.max(0) as u16,
            modifiers: KeyModifiers::NONE,
        })]);
        for frame in (5..600).step_by(4) {
            let steer = if frame % 240 < 120 { KeyCode::Left } else { KeyCode::Right };
            let batch = events.entry(frame).or_default();
            batch.push(Event::Key(KeyEvent::new(steer, KeyModifiers::NONE)));
            if frame % 12 == 1 {
                batch.push(Event::Key(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE)));
            }
        }
        events.insert(600, vec![Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE))]);
        SimulatedInput::new(events)
    }

    /// Takes the events scripted for `frame_count`, if any.
    pub fn take(&mut self, frame_count: u64) -> Vec<Event> {
        self.events.remove(&frame_count).unwrap_or_default()
    }
}

// --- TerminalGuard: undoes terminal setup on every exit path ---
/// Owns the terminal modes the game switches on. Each mode is recorded as soon as
/// it is enabled, and dropping the guard undoes all of them, carrying on past
/// individual failures.
pub struct TerminalGuard<W: Write> {
    out: W,
    raw_mode: bool,
    key_releases: bool,
    mouse_captured: bool,
    cursor_hidden: bool,
}

impl<W: Write> TerminalGuard<W> {
    pub fn enable_raw_mode(out: W) -> io::Result<Self> {
        terminal::enable_raw_mode().map_err(|e| { error!("Failed to enable raw mode: {}", e); e })?;
        info!("Raw mode enabled.");
        Ok(TerminalGuard {
            out,
            raw_mode: true,
            key_releases: false,
            mouse_captured: false,
            cursor_hidden: false,
        })
    }

    pub fn report_key_releases(&mut self) -> io::Result<()> {
        execute!(self.out, PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES))
            .map_err(|e| { error!("Failed to enable key release events: {}", e); e })?;
        self.key_releases = true;
        Ok(())
    }

    pub fn capture_mouse(&mut self) -> io::Result<()> {
        execute!(self.out, EnableMouseCapture).map_err(|e| { error!("Failed to enable mouse capture: {}", e); e })?;
        self.mouse_captured = true;
        Ok(())
    }

    pub fn hide_cursor(&mut self) -> io::Result<()> {
        execute!(self.out, Hide).map_err(|e| { error!("Failed to hide cursor: {}", e); e })?;
        self.cursor_hidden = true;
        Ok(())
    }

    /// Undoes every recorded mode. Returns the steps that failed; running it
    /// again is a no-op.
    pub fn restore(&mut self) -> Vec<&'static str> {
        let mut failed = Vec::new();
        let mut step = |name: &'static str, result: io::Result<()>| {
            if let Err(e) = result {
                error!("Failed to {} on exit: {}", name, e);
                failed.push(name);
            }
        };

        step("clear screen", execute!(self.out, Clear(ClearType::All), MoveTo(0, 0)));
        if std::mem::take(&mut self.key_releases) {
            step("pop keyboard enhancement", execute!(self.out, PopKeyboardEnhancementFlags));
        }
        if std::mem::take(&mut self.mouse_captured) {
            step("disable mouse capture", execute!(self.out, DisableMouseCapture));
        }
        if std::mem::take(&mut self.cursor_hidden) {
            step("show cursor", execute!(self.out, Show));
        }
        if std::mem::take(&mut self.raw_mode) {
            step("disable raw mode", terminal::disable_raw_mode());
        }
        if failed.is_empty() {
            info!("Terminal restored.");
        }
        failed
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        self.restore();
    }
}

/// Drains every event the terminal has queued without blocking.
pub fn drain_terminal_events() -> io::Result<Vec<Event>> {
    let mut events = Vec::new();
    while event::poll(Duration::ZERO).map_err(|e| { error!("Failed to poll event: {}", e); e })? {
        events.push(event::read().map_err(|e| { error!("Failed to read event: {}", e); e })?);
    }
    Ok(events)
}

#[derive(Clone, Copy, Debug, Default)]
struct HeldKey {
    down: bool,
    repeating: bool,
    last_seen: u64,
}

impl HeldKey {
    fn press(&mut self, frame: u64, kind: KeyEventKind) {
        // A fresh press while still held is the terminal's auto-repeat in disguise
        let still_held = self.down && frame.saturating_sub(self.last_seen) < self.window();
        self.repeating = kind == KeyEventKind::Repeat || still_held;
        self.down = true;
        self.last_seen = frame;
    }

    fn release(&mut self) {
        self.down = false;
        self.repeating = false;
    }

    fn window(&self) -> u64 {
        if self.repeating { HOLD_GRACE_FRAMES } else { INITIAL_HOLD_FRAMES }
    }

    fn is_held(&self, frame: u64, reports_releases: bool) -> bool {
        self.down && (reports_releases || frame.saturating_sub(self.last_seen) < self.window())
    }
}

/// Turns raw terminal events into per-frame game input.
///
/// Without keyboard enhancement a terminal only sends presses and auto-repeats,
/// so a fresh press counts as down for `INITIAL_HOLD_FRAMES` (long enough for
/// auto-repeat to kick in), and once repeats flow the key stays down until
/// `HOLD_GRACE_FRAMES` pass without one. With enhancement, release events end
/// the hold directly.
pub struct InputState {
    reports_releases: bool,
    left: HeldKey,
    right: HeldKey,
    fire: bool,
    click: Option<(i32, i32)>,
    pub quit: bool,
    pub resize: Option<(u16, u16)>,
}

impl InputState {
    pub fn new(reports_releases: bool) -> Self {
        InputState {
            reports_releases,
            left: HeldKey::default(),
            right: HeldKey::default(),
            fire: false,
            click: None,
            quit: false,
            resize: None,
        }
    }

    pub fn apply(&mut self, event: &Event, frame: u64, viewport: &Viewport) {
        match event {
            Event::Key(key_event) => self.apply_key(key_event, frame),
            Event::Mouse(mouse_event) => {
                if let MouseEventKind::Down(MouseButton::Left) = mouse_event.kind {
                    self.click = Some(viewport.to_playfield(mouse_event.column, mouse_event.row));
                }
            }
            Event::Resize(width, height) => {
                info!("Terminal resized to {}x{}", width, height);
                self.resize = Some((*width, *height));
            }
            _ => {}
        }
    }

    fn apply_key(&mut self, key_event: &KeyEvent, frame: u64) {
        let pressed = key_event.kind != KeyEventKind::Release;
        match key_event.code {
            KeyCode::Left => {
                if pressed { self.left.press(frame, key_event.kind) } else { self.left.release() }
            }
            KeyCode::Right => {
                if pressed { self.right.press(frame, key_event.kind) } else { self.right.release() }
            }
            // Fire on the key-down edge only, never on auto-repeat
            KeyCode::Char(' ') if key_event.kind == KeyEventKind::Press => self.fire = true,
            KeyCode::Char('q') | KeyCode::Esc if pressed => {
                info!("Quit key pressed.");
                self.quit = true;
            }
            KeyCode::Char('c') if pressed && key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                info!("Ctrl-C pressed.");
                self.quit = true;
            }
            _ => {}
        }
    }

    /// Snapshot for the simulation. Clears the one-shot fields (fire, click, resize).
    pub fn take_frame_input(&mut self, frame: u64) -> FrameInput {
        let input = FrameInput {
            move_left: self.left.is_held(frame, self.reports_releases),
            move_right: self.right.is_held(frame, self.reports_releases),
            fire: self.fire,
            click: self.click,
        };
        self.fire = false;
        self.click = None;
        self.resize = None;
        input
    }
}
