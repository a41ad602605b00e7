use std::fs;
use std::io::{self, Read, Write};
use std::process::ExitCode;

use clap::Parser;

use bashify::{exit_code_for_build_error, BuildError};

mod cli;

fn run(cli: &cli::Cli) -> Result<(), BuildError> {
    let stdin = if cli.stdin {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .map_err(|e| BuildError::SourceRead {
                path: "<stdin>".into(),
                source: e,
            })?;
        Some(buf)
    } else {
        None
    };

    let builder = bashify::bundle::bundle_script(&cli.script, &cli.args, &cli.files, stdin)?;

    if cli.verbose {
        let use_err = bashify::color_enabled_stderr();
        bashify::log_info_stderr(
            use_err,
            &format!(
                "bashify: embedded {} file(s), {} command(s)",
                builder.file_count(),
                builder.command_count()
            ),
        );
        let dest = match &cli.output {
            Some(p) => p.display().to_string(),
            None => "stdout".to_string(),
        };
        bashify::log_info_stderr(use_err, &format!("bashify: output: {dest}"));
    }

    // Render before touching the output so a build failure never leaves a
    // partial file behind.
    let text = builder.render();
    match &cli.output {
        Some(path) => {
            fs::write(path, &text).map_err(|e| BuildError::OutputWrite {
                dest: path.display().to_string(),
                source: e,
            })?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(text.as_bytes())
                .map_err(|e| BuildError::OutputWrite {
                    dest: "stdout".to_string(),
                    source: e,
                })?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    if let Some(mode) = cli.color {
        bashify::set_color_mode(mode);
    }
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let use_err = bashify::color_enabled_stderr();
            bashify::log_error_stderr(use_err, &format!("bashify: {e}"));
            ExitCode::from(exit_code_for_build_error(&e))
        }
    }
}
