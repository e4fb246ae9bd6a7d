use std::path::PathBuf;

use clap::Parser;

use crate::error::Error;

/// A drifting, linked particle field rendered headlessly
#[derive(Parser, Debug)]
#[command()]
pub struct Args {
    /// Surface width in pixels
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Surface height in pixels
    #[arg(long, default_value_t = 600)]
    pub height: u32,

    /// Total Particles
    #[arg(short, long, default_value_t = 80)]
    pub particles: usize,

    /// The framerate the animation will run at
    ///
    /// `0` runs as fast as possible
    #[arg(short, long, default_value_t = 60)]
    pub framerate: u32,

    /// Stop after this many frames, runs forever if omitted
    #[arg(short = 'n', long)]
    pub frames: Option<u64>,

    /// Seed for particle generation, random if omitted
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Append every frame as raw RGBA to this file
    #[arg(short, long)]
    pub capture: Option<PathBuf>,

    /// Save the last frame as a PNG
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Resize the surface halfway through a bounded run
    #[arg(long, value_parser = parse_size)]
    pub resize: Option<(u32, u32)>,
}

impl Args {
    /// Frame after which `--resize` applies, together with the new size.
    ///
    /// Halfway through a bounded run, never before the first frame. Unbounded and empty runs
    /// never resize.
    pub fn resize_at(&self) -> Option<(u64, (u32, u32))> {
        let size = self.resize?;
        match self.frames? {
            0 => None,
            frames => Some(((frames / 2).max(1), size)),
        }
    }
}

/// Parses `WIDTHxHEIGHT`
pub fn parse_size(s: &str) -> Result<(u32, u32), Error> {
    let invalid = || Error::InvalidSize(s.to_owned());
    let (width, height) = s.split_once(['x', 'X']).ok_or_else(invalid)?;

    let width = width.trim().parse().map_err(|_| invalid())?;
    let height = height.trim().parse().map_err(|_| invalid())?;
    Ok((width, height))
}
