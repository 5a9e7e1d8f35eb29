use std::io::{self, Stdout, Write};
use clap::Parser;
use crossterm::terminal::{size, supports_keyboard_enhancement};
use log::{error, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

mod audio;
mod clock;
mod collision;
mod config;
mod constants;
mod entities;
mod game;
mod rendering;
mod spawner;
mod terminal_io;
mod types;
mod world;

use audio::CueSink;
use config::LaunchOptions;
use game::{Game, SessionSummary};
use rendering::{GameGrid, OutputTarget, ScreenBuffer, Viewport};
use terminal_io::{SimulatedInput, TerminalGuard};

const LOG_FILE: &str = "space-shooter.log";

fn main() -> io::Result<()> {
    simple_logging::log_to_file(LOG_FILE, log::LevelFilter::Info)?;
    info!("Starting space-shooter.");

    let options = LaunchOptions::parse();
    info!("Launch options: {:?}", options);

    let rng = match options.seed {
        Some(seed) => {
            info!("Seeding RNG with {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };
    let cue_sink = CueSink::new(options.bell);

    if options.debug {
        let (width, height) = (options.width, options.height);
        info!("Debug mode enabled. Resolution {}x{}", width, height);
        let simulated_input = SimulatedInput::demo(&Viewport::new(width, height));
        let mut game = Game::new(
            width,
            height,
            OutputTarget::ScreenBuffer(ScreenBuffer::new(width, height)),
            Some(simulated_input),
            options.max_frames,
            false,
            rng,
            cue_sink,
        );
        let summary = game.run()?;
        log_summary(&summary);
        return Ok(());
    }

    info!("Attempting to enable raw mode.");
    // Dropping the guard hands the terminal back, whichever way this function exits
    let mut guard = TerminalGuard::enable_raw_mode(io::stdout())?;
    let mut stdout_target = OutputTarget::Stdout(io::stdout());
    let (reports_releases, width, height) = setup_terminal(&mut guard, &mut stdout_target)?;
    info!("Terminal size: {}x{}", width, height);

    let mut game = Game::new(width, height, stdout_target, None, options.max_frames, reports_releases, rng, cue_sink);
    let result = game.run();
    drop(guard);

    match &result {
        Ok(summary) => log_summary(summary),
        Err(e) => error!("Game loop failed: {}", e),
    }
    result.map(|_| ())
}

fn log_summary(summary: &SessionSummary) {
    info!(
        "Session finished in phase {:?} after {} frames. Score: {}, Missed: {}, held for {:?}",
        summary.phase, summary.frames, summary.score, summary.missed, summary.hold
    );
}

/// Hidden cursor, mouse capture, and key-release reporting where the terminal
/// supports it. Returns whether releases will be reported, and the terminal size.
fn setup_terminal(guard: &mut TerminalGuard<Stdout>, stdout_target: &mut OutputTarget) -> io::Result<(bool, u16, u16)> {
    let reports_releases = supports_keyboard_enhancement().unwrap_or(false);
    if reports_releases {
        guard.report_key_releases()?;
        info!("Keyboard enhancement enabled; key releases will be reported.");
    } else {
        warn!("Terminal does not report key releases; using hold windows.");
    }

    guard.capture_mouse()?;
    guard.hide_cursor()?;
    let (width, height) = size().map_err(|e| { error!("Failed to get terminal size: {}", e); e })?;
    GameGrid::new(width, height)
        .clear_screen_manual(stdout_target)
        .map_err(|e| { error!("Failed to clear screen manually: {}", e); e })?;
    stdout_target.flush()?;
    Ok((reports_releases, width, height))
}
