//! Domain-specific error types for the conversion engine.
//!
//! Library code returns the typed errors defined here; the binary converts
//! them to [`anyhow::Error`] at the command boundary and maps them back to a
//! process exit code with [`exit_code_for`].
//!
//! # Error hierarchy
//!
//! ```text
//! EmitError                      fatal, ends the run in the Failed state
//! ├── UnknownTarget              target key not in the registry
//! ├── SourceNotFound             --src / --assets missing or not a directory
//! ├── SourceRead                 a discovered HTML file could not be read
//! ├── DestinationCollision       two sources plan the same destination
//! ├── Config(ConfigError)        transpilex.toml unreadable or invalid
//! └── Incomplete                 one or more FileWriteErrors were reported
//!
//! FileWriteError                 per-file, collected in the EmissionReport
//! ManifestPatchError             per-manifest, reported as skipped
//! ```

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Exit code for a usage error; clap exits with this code on its own.
pub const EXIT_USAGE: u8 = 2;
/// Exit code when the requested target is not registered.
pub const EXIT_UNKNOWN_TARGET: u8 = 3;
/// Exit code when a source path is missing or unreadable.
pub const EXIT_SOURCE_NOT_FOUND: u8 = 4;
/// Exit code when two sources plan the same destination.
pub const EXIT_COLLISION: u8 = 5;
/// Exit code when one or more files could not be written.
pub const EXIT_WRITE_FAILED: u8 = 6;
/// Exit code for everything else.
pub const EXIT_OTHER: u8 = 1;

/// Fatal errors that end a conversion run.
#[derive(Error, Debug)]
pub enum EmitError {
    /// The requested target key is not registered.
    #[error("unknown target '{key}' (supported: {})", .supported.join(", "))]
    UnknownTarget {
        /// Key as given on the command line.
        key: String,
        /// Every registered key, in registry order.
        supported: Vec<&'static str>,
    },

    /// The source or assets folder does not exist or is not a directory.
    #[error("{role} folder not found: {}", .path.display())]
    SourceNotFound {
        /// Which input was missing (`"source"` or `"assets"`).
        role: &'static str,
        /// Path as resolved by the command.
        path: PathBuf,
    },

    /// A discovered HTML file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    SourceRead {
        /// Path of the unreadable file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Two or more source documents plan to the same destination path.
    #[error("destination collision:\n{}", format_collisions(.0))]
    DestinationCollision(Vec<Collision>),

    /// The settings file could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The run finished but some files could not be written.
    #[error("{failed} file(s) could not be written")]
    Incomplete {
        /// Number of failed writes.
        failed: usize,
    },
}

impl EmitError {
    /// Process exit code for this error kind.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::UnknownTarget { .. } => EXIT_UNKNOWN_TARGET,
            Self::SourceNotFound { .. } | Self::SourceRead { .. } => EXIT_SOURCE_NOT_FOUND,
            Self::DestinationCollision(_) => EXIT_COLLISION,
            Self::Incomplete { .. } => EXIT_WRITE_FAILED,
            Self::Config(_) => EXIT_OTHER,
        }
    }
}

/// One destination claimed by more than one source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    /// Destination path relative to the output root.
    pub destination: PathBuf,
    /// Every source path (relative to the source root) planning it, sorted.
    pub sources: Vec<PathBuf>,
}

impl fmt::Display for Collision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sources = self
            .sources
            .iter()
            .map(|s| s.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{} <- {sources}", self.destination.display())
    }
}

fn format_collisions(collisions: &[Collision]) -> String {
    collisions
        .iter()
        .map(|c| format!("  {c}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Errors that arise while loading `transpilex.toml`.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An explicitly requested settings file does not exist.
    #[error("settings file not found: {}", .path.display())]
    NotFound {
        /// Requested path.
        path: PathBuf,
    },

    /// The settings file could not be read.
    #[error("IO error reading settings file {}: {source}", .path.display())]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The settings file is not valid TOML or has unknown keys.
    #[error("invalid settings in {}: {message}", .path.display())]
    Invalid {
        /// Path to the offending file.
        path: PathBuf,
        /// Parser message.
        message: String,
    },
}

/// A single output file that could not be created or written.
#[derive(Error, Debug)]
#[error("failed to write {}: {source}", .path.display())]
pub struct FileWriteError {
    /// Absolute or output-relative path of the file.
    pub path: PathBuf,
    /// Underlying I/O error.
    #[source]
    pub source: std::io::Error,
}

/// An existing manifest could not be patched; it is left unmodified.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot patch {}: {reason}", .path.display())]
pub struct ManifestPatchError {
    /// Path of the manifest relative to the output root.
    pub path: PathBuf,
    /// Why the managed region could not be located or replaced.
    pub reason: String,
}

/// Map an error surfaced at the binary boundary to a process exit code.
#[must_use]
pub fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<EmitError>())
        .map_or(EXIT_OTHER, EmitError::exit_code)
}
