use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Custom enum for log levels that can be used with clap's ValueEnum
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convert our custom LogLevel enum to log crate's LevelFilter
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

/// Command line arguments structure using clap derive macros
#[derive(Parser, Debug)]
#[command(name = "seethrough")]
#[command(about = "Render a frame of translucent spheres and boxes over a checkered backdrop")]
pub struct Args {
    /// Scene file (TOML); the built-in demo scene is used when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Set the logging level (defaults to "info")
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub debug_level: LogLevel,

    /// Image width in pixels, overriding the scene file
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels, overriding the scene file
    #[arg(long)]
    pub height: Option<u32>,

    /// Maximum see-through passes per pixel, overriding the scene file
    #[arg(long, short = 'b')]
    pub bounces: Option<u32>,

    /// Compare checkered planes by depth instead of drawing them only behind everything
    #[arg(long)]
    pub depth_test_backdrop: bool,

    /// Output file path (.png for 8-bit sRGB, .exr for linear HDR)
    #[arg(short, long, default_value = "output.png")]
    pub output: PathBuf,
}
