use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::application::dto::DEFAULT_OUTPUT_DIR;

/// Detect build ecosystems in a project tree and generate CycloneDX SBOMs
#[derive(Parser, Debug)]
#[command(name = "env-sbom")]
#[command(version)]
#[command(
    about = "Detect build ecosystems in a project tree and generate CycloneDX SBOMs",
    long_about = None
)]
pub struct Args {
    /// Root directory to inspect (defaults to current directory)
    #[arg(value_name = "ROOT_DIR", default_value = ".")]
    pub root_dir: PathBuf,

    /// Directory receiving SBOMs, logs and summaries
    /// [default: generated-sboms]
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Print the detected build systems and commands without running them
    #[arg(long)]
    pub dry_run: bool,

    /// Merge all generated SBOMs into merged-bom.json
    #[arg(short, long)]
    pub merge: bool,

    /// Write per-instance JSON logs and sbom-summary.json
    #[arg(short, long)]
    pub json: bool,

    /// Extra arguments appended to every generation command
    #[arg(short, long, value_name = "ARGS", allow_hyphen_values = true)]
    pub additional_args: Option<String>,

    /// Install missing generator tools before running them
    #[arg(long)]
    pub allow_tool_install: bool,

    /// Run every command from this directory instead of the instance's own
    #[arg(short = 'r', long = "root", value_name = "DIR")]
    pub working_dir: Option<PathBuf>,

    /// Skip discovery and scan the whole root directory with Syft
    #[arg(short, long)]
    pub sbom_only: bool,

    /// Ecosystem to leave out (e.g. "Maven"); can be given multiple times
    #[arg(long = "skip", value_name = "ECOSYSTEM")]
    pub skip: Vec<String>,

    /// Path to a config file (defaults to env-sbom.config.yml in ROOT_DIR)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase diagnostic output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Output directory when neither the CLI nor a config file names one
    pub fn default_output_dir() -> PathBuf {
        PathBuf::from(DEFAULT_OUTPUT_DIR)
    }
}
