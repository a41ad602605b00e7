//! Build-time error kinds for script assembly.
//!
//! Mapping guide:
//! - All build-time failures map to exit code 1; no partial output is written.
//! - The generated script owns its run-time exit codes: the failing command's
//!   code under `set -e`, or 255 when the temporary directory cannot be created.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors raised while assembling a script, before any output is produced.
#[derive(Debug)]
pub enum BuildError {
    /// Destination path is not a simple relative path (absolute, `..` segment,
    /// empty segment, or control bytes).
    InvalidPath { dest: String, reason: &'static str },
    /// A source file could not be read while assembling the bundle.
    SourceRead { path: PathBuf, source: io::Error },
    /// The rendered script could not be written to the output destination.
    OutputWrite { dest: String, source: io::Error },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::InvalidPath { dest, reason } => {
                write!(f, "invalid destination path {dest:?}: {reason}")
            }
            BuildError::SourceRead { path, source } => {
                write!(f, "cannot read {}: {source}", path.display())
            }
            BuildError::OutputWrite { dest, source } => {
                write!(f, "cannot write {dest}: {source}")
            }
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BuildError::InvalidPath { .. } => None,
            BuildError::SourceRead { source, .. } | BuildError::OutputWrite { source, .. } => {
                Some(source)
            }
        }
    }
}

/// Convert a BuildError to a process exit code. All build-time errors map to 1;
/// distinct codes are reserved for the generated script's own run-time failures.
pub fn exit_code_for_build_error(e: &BuildError) -> u8 {
    match e {
        BuildError::InvalidPath { .. }
        | BuildError::SourceRead { .. }
        | BuildError::OutputWrite { .. } => 1,
    }
}
