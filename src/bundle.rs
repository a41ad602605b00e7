//! Host-side bundle assembly: read sources from disk and populate a
//! ScriptBuilder. This is the only layer that touches the filesystem; reads
//! are scoped (open, read fully, close) with no retained handles.

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::BuildError;
use crate::script::ScriptBuilder;

/// Parse an extra-file spec of the form `SRC` or `SRC:DEST`. Without a DEST,
/// the source's basename is used as the destination.
pub fn parse_file_spec(spec: &str) -> (PathBuf, Option<String>) {
    match spec.split_once(':') {
        Some((src, dest)) if !dest.is_empty() => (PathBuf::from(src), Some(dest.to_string())),
        Some((src, _)) => (PathBuf::from(src), None),
        None => (PathBuf::from(spec), None),
    }
}

fn read_source(path: &Path) -> Result<Vec<u8>, BuildError> {
    fs::read(path).map_err(|e| BuildError::SourceRead {
        path: path.to_path_buf(),
        source: e,
    })
}

fn basename(path: &Path) -> Result<String, BuildError> {
    match path.file_name() {
        Some(name) => Ok(name.to_string_lossy().into_owned()),
        None => Err(BuildError::InvalidPath {
            dest: path.display().to_string(),
            reason: "no file name component",
        }),
    }
}

/// Build a ScriptBuilder that embeds `script` as an executable under its
/// basename, runs it with `args`, embeds the extra files, and forwards the
/// captured stdin bytes if provided.
pub fn bundle_script(
    script: &Path,
    args: &[String],
    extra_files: &[String],
    stdin: Option<Vec<u8>>,
) -> Result<ScriptBuilder, BuildError> {
    let mut builder = ScriptBuilder::new();
    let dest = basename(script)?;
    let content = read_source(script)?;
    builder.add_script(dest, content, args)?;
    for spec in extra_files {
        let (src, dest) = parse_file_spec(spec);
        let dest = match dest {
            Some(d) => d,
            None => basename(&src)?,
        };
        let content = read_source(&src)?;
        builder.add_file(dest, content, false)?;
    }
    if let Some(bytes) = stdin {
        builder.set_stdin_passthrough(bytes);
    }
    Ok(builder)
}
