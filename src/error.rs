//! Error types for scene loading, validation and image output.
//!
//! The per-pixel core never fails: misses and degenerate denominators are
//! ordinary "no hit" outcomes. Everything that can go wrong happens while
//! building a frame (reading and validating the scene) or writing it out.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the host side of the renderer.
#[derive(Debug, Error)]
pub enum Error {
    /// The scene file could not be read.
    #[error("failed to read scene file {}: {source}", .path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The scene file is not valid TOML or does not match the schema.
    #[error("failed to parse scene file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Camera parameters cannot produce a valid view basis.
    #[error("invalid camera: {0}")]
    InvalidCamera(String),

    /// A primitive has out-of-range geometry or material values.
    #[error("invalid {kind} #{index}: {reason}")]
    InvalidPrimitive {
        /// Primitive kind ("sphere", "box" or "plane").
        kind: &'static str,
        /// Position of the primitive within its kind, starting at 0.
        index: usize,
        /// What is wrong with it.
        reason: String,
    },

    /// Resolution or tracing settings are out of range.
    #[error("invalid render settings: {0}")]
    InvalidSettings(String),

    /// PNG encoding or writing failed.
    #[error("failed to write PNG image: {0}")]
    Image(#[from] image::ImageError),

    /// EXR encoding or writing failed.
    #[error("failed to write EXR image: {0}")]
    Exr(#[from] exr::error::Error),

    /// The output path has an extension the renderer cannot write.
    #[error("unsupported output extension '{0}', only .png and .exr are supported")]
    UnsupportedOutput(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
