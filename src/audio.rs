use std::io::{self, Write};
use log::info;

/// Sound events reported by the simulation. Playing them is up to the front-end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    BackgroundLoop,
    Fire,
    Impact,
}

impl Cue {
    pub fn is_one_shot(self) -> bool {
        !matches!(self, Cue::BackgroundLoop)
    }
}

/// Stand-in for a mixer: logs every cue and optionally rings the terminal bell
/// for one-shots.
pub struct CueSink {
    bell: bool,
    played: u64,
}

impl CueSink {
    pub fn new(bell: bool) -> Self {
        CueSink { bell, played: 0 }
    }

    pub fn play(&mut self, cue: Cue, out: &mut impl Write) -> io::Result<()> {
        self.played += 1;
        match cue {
            Cue::BackgroundLoop => info!("Background loop started."),
            Cue::Fire | Cue::Impact => info!("Cue: {:?}", cue),
        }
        if self.bell && cue.is_one_shot() {
            write!(out, "\x07")?;
        }
        Ok(())
    }

    pub fn played(&self) -> u64 {
        self.played
    }
}
