use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "bashify",
    version,
    about = "Pack a script and its data files into one self-extracting, pipe-able shell script.",
    override_usage = "bashify [OPTIONS] <SCRIPT> [-- [SCRIPT-ARGS]]",
    after_long_help = "Examples:\n  bashify deploy.sh -- --target prod > bundle.sh\n  bashify --file config.yml --file data/seed.sql:seed.sql job.sh\n  echo 'input' | bashify --stdin filter.sh | ssh host sh\n"
)]
pub(crate) struct Cli {
    /// Script to embed; it is extracted, made executable, and run
    pub(crate) script: PathBuf,

    /// Arguments forwarded to the embedded script (after --)
    #[arg(trailing_var_arg = true)]
    pub(crate) args: Vec<String>,

    /// Extra file to embed, SRC or SRC:DEST (repeatable)
    #[arg(long = "file", short = 'f', value_name = "SRC[:DEST]")]
    pub(crate) files: Vec<String>,

    /// Capture this process's stdin and forward it to the embedded script
    #[arg(long)]
    pub(crate) stdin: bool,

    /// Write the generated script here instead of stdout
    #[arg(long, short = 'o', value_name = "PATH")]
    pub(crate) output: Option<PathBuf>,

    /// Print detailed build info
    #[arg(long)]
    pub(crate) verbose: bool,

    /// Colorize output: auto|always|never
    #[arg(long = "color", value_enum)]
    pub(crate) color: Option<bashify::ColorMode>,
}
