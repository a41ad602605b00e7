//! bashify: build self-contained, pipe-able shell scripts.
//!
//! A [`ScriptBuilder`] accumulates files and commands, then renders a single
//! POSIX shell script that extracts the files into a fresh temporary
//! directory, runs the commands in order, and removes the directory on every
//! exit path (normal exit, error exit, interrupt). Running the result only
//! needs the common UNIX utilities `sh`, `mktemp`, `base64`, and `chmod`.
//!
//! ```
//! let mut b = bashify::ScriptBuilder::new();
//! b.add_file("greeting.txt", "hi", false)?;
//! b.add_command("cat greeting.txt");
//! let script = b.render();
//! assert!(script.starts_with("#!/bin/sh"));
//! # Ok::<(), bashify::BuildError>(())
//! ```

pub mod bundle;
mod color;
pub mod errors;
pub mod script;
pub mod util;

pub use color::{color_enabled_stderr, log_error_stderr, log_info_stderr, set_color_mode, ColorMode};
pub use errors::{exit_code_for_build_error, BuildError};
pub use script::{FileContent, ScriptBuilder};
