//! Script builder: accumulate files and commands, render one pipe-able shell
//! script.
//!
//! The generated script creates a fresh temporary directory, extracts the
//! embedded files into it, runs the commands in order, and removes the
//! directory through an unconditional exit trap. File payloads travel as
//! base64 inside quoted heredocs, so arbitrary bytes survive the trip through
//! a text script.

use std::io::{self, Write};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::errors::BuildError;
use crate::util::{shell_escape, shell_join, ShellFile};

/// Heredoc terminator for inline payload blocks. Contains `_`, which is
/// outside the base64 alphabet, so no encoded payload line can match it.
const HEREDOC_EOF: &str = "EOF_b64";

/// Wrap encoded payload lines at the conventional base64 column width.
const B64_LINE_WIDTH: usize = 76;

/// File payloads are accepted as text or raw bytes and canonicalized to a
/// byte sequence before encoding.
#[derive(Debug, Clone)]
pub enum FileContent {
    Text(String),
    Binary(Vec<u8>),
}

impl FileContent {
    fn into_bytes(self) -> Vec<u8> {
        match self {
            FileContent::Text(s) => s.into_bytes(),
            FileContent::Binary(b) => b,
        }
    }
}

impl From<&str> for FileContent {
    fn from(s: &str) -> Self {
        FileContent::Text(s.to_string())
    }
}

impl From<String> for FileContent {
    fn from(s: String) -> Self {
        FileContent::Text(s)
    }
}

impl From<&[u8]> for FileContent {
    fn from(b: &[u8]) -> Self {
        FileContent::Binary(b.to_vec())
    }
}

impl From<Vec<u8>> for FileContent {
    fn from(b: Vec<u8>) -> Self {
        FileContent::Binary(b)
    }
}

#[derive(Debug)]
struct FileEntry {
    dest: String,
    content: Vec<u8>,
    executable: bool,
}

/// Accumulates files, commands, and optional captured stdin, then renders the
/// whole thing as one POSIX shell script.
///
/// Entries are add-only; `render` is pure and callable repeatedly. Duplicate
/// destination paths are tolerated: sections execute top to bottom, so the
/// later entry overwrites the earlier one at run time.
#[derive(Debug, Default)]
pub struct ScriptBuilder {
    files: Vec<FileEntry>,
    commands: Vec<String>,
    stdin: Option<Vec<u8>>,
}

impl ScriptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a file to be extracted at `dest` (relative to the script's
    /// temporary directory). Parent directories are created by the script.
    ///
    /// Fails when `dest` is not a simple relative path: absolute paths,
    /// `..` segments, empty segments, and control bytes are all rejected here
    /// so that `render` never fails later.
    pub fn add_file(
        &mut self,
        dest: impl Into<String>,
        content: impl Into<FileContent>,
        executable: bool,
    ) -> Result<&mut Self, BuildError> {
        let dest = dest.into();
        validate_dest(&dest)?;
        self.files.push(FileEntry {
            dest,
            content: content.into().into_bytes(),
            executable,
        });
        Ok(self)
    }

    /// Append a command line, passed through verbatim. No shell syntax
    /// validation is performed; composing a safe command is the caller's
    /// responsibility.
    pub fn add_command(&mut self, command: impl Into<String>) -> &mut Self {
        self.commands.push(command.into());
        self
    }

    /// Embed `content` as an executable file at `dest` and append a command
    /// that runs it with the given arguments (shell-escaped).
    pub fn add_script(
        &mut self,
        dest: impl Into<String>,
        content: impl Into<FileContent>,
        args: &[String],
    ) -> Result<&mut Self, BuildError> {
        let dest = dest.into();
        self.add_file(dest.clone(), content, true)?;
        let invocation = if args.is_empty() {
            format!("./{}", shell_escape(&dest))
        } else {
            format!("./{} {}", shell_escape(&dest), shell_join(args))
        };
        self.add_command(invocation);
        Ok(self)
    }

    /// Store captured input bytes to be fed to the last command's standard
    /// input. The bytes are embedded at render time because the script itself
    /// may arrive via a pipe, leaving no live stream to forward at run time.
    pub fn set_stdin_passthrough(&mut self, input: impl Into<Vec<u8>>) -> &mut Self {
        self.stdin = Some(input.into());
        self
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Render the full script text. Pure: identical builder state always
    /// produces byte-identical output.
    pub fn render(&self) -> String {
        let mut out = ShellFile::new();
        out.push("#!/bin/sh");
        out.push("# SECTION: INIT");
        out.push("set -e");
        out.push("bashify_tmpdir=$(mktemp -d) || exit 255");
        out.push("test -d \"$bashify_tmpdir\" || exit 255");
        out.push("bashify_cleanup() { cd /; rm -rf \"$bashify_tmpdir\"; }");
        out.push("trap bashify_cleanup EXIT");
        // Signal traps exit so the EXIT trap still fires on interrupt.
        out.push("trap 'exit 130' INT");
        out.push("trap 'exit 143' TERM");
        out.push("trap 'exit 129' HUP");
        out.push("cd \"$bashify_tmpdir\"");

        out.push("# SECTION: FILES");
        for entry in &self.files {
            if let Some((parent, _)) = entry.dest.rsplit_once('/') {
                out.push(format!("mkdir -p {}", shell_escape(parent)));
            }
            out.push(format!(
                "base64 -d > {} <<\"{HEREDOC_EOF}\"",
                shell_escape(&entry.dest)
            ));
            push_encoded(&mut out, &entry.content);
            out.push(HEREDOC_EOF);
            if entry.executable {
                out.push(format!("chmod 700 {}", shell_escape(&entry.dest)));
            }
        }

        out.push("# SECTION: COMMANDS");
        let last = self.commands.len().saturating_sub(1);
        for (i, command) in self.commands.iter().enumerate() {
            match &self.stdin {
                // Captured stdin lands on the last command's standard input;
                // with no commands there is nothing to feed and no block is
                // emitted.
                Some(input) if i == last => {
                    out.push(format!("base64 -d <<\"{HEREDOC_EOF}\" | {command}"));
                    push_encoded(&mut out, input);
                    out.push(HEREDOC_EOF);
                }
                _ => {
                    out.push(command.clone());
                }
            }
        }
        out.build()
    }

    /// Write the rendered script to the given sink.
    pub fn dump<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(self.render().as_bytes())
    }
}

fn push_encoded(out: &mut ShellFile, bytes: &[u8]) {
    let encoded = STANDARD.encode(bytes);
    let mut rest = encoded.as_str();
    while !rest.is_empty() {
        let take = rest.len().min(B64_LINE_WIDTH);
        out.push(&rest[..take]);
        rest = &rest[take..];
    }
}

fn validate_dest(dest: &str) -> Result<(), BuildError> {
    let invalid = |reason: &'static str| BuildError::InvalidPath {
        dest: dest.to_string(),
        reason,
    };
    if dest.is_empty() {
        return Err(invalid("empty path"));
    }
    if dest.contains('\0') || dest.contains('\n') || dest.contains('\r') {
        return Err(invalid("contains control bytes"));
    }
    if dest.starts_with('/') {
        return Err(invalid("absolute path"));
    }
    for segment in dest.split('/') {
        if segment.is_empty() {
            return Err(invalid("empty path segment"));
        }
        if segment == ".." {
            return Err(invalid("parent-directory segment"));
        }
    }
    Ok(())
}
