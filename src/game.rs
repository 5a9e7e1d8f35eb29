use std::io::{self, Write};
use std::time::Duration;
use log::{error, info};
use rand::rngs::StdRng;

use crate::audio::CueSink;
use crate::clock::FrameClock;
use crate::constants::*;
use crate::rendering::{GameGrid, OutputTarget, compose_frame};
use crate::terminal_io::{InputState, SimulatedInput, drain_terminal_events};
use crate::world::{Phase, World};

/// How a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionSummary {
    pub phase: Phase,
    pub score: u32,
    pub missed: u32,
    pub frames: u64,
    pub hold: Duration, // End-of-round banner time; zero on quit or frame limit
}

pub struct Game {
    pub terminal_width: u16,
    pub terminal_height: u16,
    pub stdout_target: OutputTarget,
    simulated_input: Option<SimulatedInput>,
    debug_mode_active: bool,
    max_frames: Option<u64>,
    reports_releases: bool,
    rng: StdRng,
    cue_sink: CueSink,
}

impl Game {
    pub fn new(
        terminal_width: u16,
        terminal_height: u16,
        stdout_target: OutputTarget,
        simulated_input: Option<SimulatedInput>,
        max_frames: Option<u64>,
        reports_releases: bool,
        rng: StdRng,
        cue_sink: CueSink,
    ) -> Self {
        Game {
            terminal_width,
            terminal_height,
            stdout_target,
            debug_mode_active: simulated_input.is_some(),
            simulated_input,
            max_frames,
            reports_releases,
            rng,
            cue_sink,
        }
    }

    /// Runs menu and round until quit, a frame limit, or the round ends.
    pub fn run(&mut self) -> io::Result<SessionSummary> {
        self.run_world(World::new())
    }

    pub fn run_world(&mut self, mut world: World) -> io::Result<SessionSummary> {
        let mut input = InputState::new(self.reports_releases);
        let mut game_grid = GameGrid::new(self.terminal_width, self.terminal_height);
        let mut clock = FrameClock::new(TARGET_FPS, !self.debug_mode_active);
        let mut frame_count = 0;
        let mut hold = Duration::ZERO;
        info!("Frame budget: {:?}", clock.budget());

        loop {
            if self.max_frames.is_some_and(|max| frame_count >= max) {
                info!("Frame limit of {} reached.", frame_count);
                break;
            }

            for event in self.poll_events(frame_count)? {
                input.apply(&event, frame_count, &game_grid.viewport);
            }
            if input.quit {
                info!("Quit requested on frame {}.", frame_count);
                break;
            }
            if let Some((width, height)) = input.resize {
                self.terminal_width = width;
                self.terminal_height = height;
                game_grid = GameGrid::new(width, height);
                game_grid.clear_screen_manual(&mut self.stdout_target)?;
            }

            let frame_input = input.take_frame_input(frame_count);
            for cue in world.step(&frame_input, &mut self.rng) {
                self.cue_sink.play(cue, &mut self.stdout_target)?;
            }

            self.render(&world, &mut game_grid)?;

            if world.check_round_end().is_over() {
                // Redraw with the banner and hold it before exiting
                self.render(&world, &mut game_grid)?;
                if self.debug_mode_active {
                    info!("Skipping end-of-round delay in debug mode.");
                }
                hold = clock.hold(Duration::from_millis(END_OF_ROUND_DELAY_MS));
                frame_count += 1;
                break;
            }

            clock.tick();
            frame_count += 1;
        }

        info!("Session over after {} frames, {} cues played.", frame_count, self.cue_sink.played());
        Ok(SessionSummary {
            phase: world.phase,
            score: world.score,
            missed: world.missed,
            frames: frame_count,
            hold,
        })
    }

    fn poll_events(&mut self, frame_count: u64) -> io::Result<Vec<crossterm::event::Event>> {
        match &mut self.simulated_input {
            Some(sim_input) => Ok(sim_input.take(frame_count)),
            None => drain_terminal_events(),
        }
    }

    fn render(&mut self, world: &World, game_grid: &mut GameGrid) -> io::Result<()> {
        compose_frame(world, game_grid);
        game_grid.render(&mut self.stdout_target).map_err(|e| { error!("Failed to render game grid: {}", e); e })?;
        self.stdout_target.flush().map_err(|e| { error!("Failed to flush stdout after rendering: {}", e); e })?;
        if self.debug_mode_active {
            self.stdout_target.log_snapshot();
        }
        Ok(())
    }
}
