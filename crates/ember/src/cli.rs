use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "ember")]
#[command(about = "Stochastic path tracer writing plain-text PPM images")]
pub struct Args {
    /// Image width in pixels
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Samples per pixel
    #[arg(long, default_value_t = 100)]
    pub spp: u32,

    /// Maximum path depth
    #[arg(long, default_value_t = 50)]
    pub max_depth: u32,

    /// Aspect ratio (width / height)
    #[arg(long, default_value_t = 16.0 / 9.0)]
    pub aspect: f64,

    /// Output PPM path
    #[arg(short, long, default_value = "image.ppm")]
    pub out: PathBuf,

    /// Worker threads (absent or non-positive: all hardware threads)
    #[arg(short = 'j', long, allow_negative_numbers = true)]
    pub threads: Option<i64>,

    /// Seed for scene generation and sampling (random if absent)
    #[arg(long)]
    pub seed: Option<u64>,

    /// JSON scene file; renders the random sphere field if absent
    #[arg(long)]
    pub scene: Option<PathBuf>,

    /// Set the logging level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

impl Args {
    /// Requested worker count, `None` when the hardware default applies.
    pub fn worker_threads(&self) -> Option<usize> {
        self.threads.filter(|&n| n > 0).map(|n| n as usize)
    }
}
