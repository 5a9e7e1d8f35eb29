use clap::Parser;

use crate::constants::{DEBUG_DEFAULT_HEIGHT, DEBUG_DEFAULT_WIDTH};

/// What the process was launched with.
#[derive(Parser, Clone, Debug, PartialEq, Eq)]
#[command(name = "space-shooter")]
#[command(about = "Shoot down 30 enemy ships before 5 slip past")]
pub struct LaunchOptions {
    /// Stop after this many frames
    pub max_frames: Option<u64>,
    /// Run headless against a scripted input timeline, logging each frame
    #[arg(long)]
    pub debug: bool,
    /// Simulated terminal width in debug runs
    #[arg(long, default_value_t = DEBUG_DEFAULT_WIDTH, requires = "debug")]
    pub width: u16,
    /// Simulated terminal height in debug runs
    #[arg(long, default_value_t = DEBUG_DEFAULT_HEIGHT, requires = "debug")]
    pub height: u16,
    /// Seed the spawner for a reproducible round
    #[arg(long)]
    pub seed: Option<u64>,
    /// Ring the terminal bell for fire and impact cues
    #[arg(long)]
    pub bell: bool,
}
