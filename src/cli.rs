use clap::{Parser, Subcommand, ValueEnum};
use dte_lib::ArtifactKind;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dte")]
#[command(
    version,
    about = "Design Token Extractor - Reduce sampled page styles to design tokens",
    long_about = "Design Token Extractor (DTE)\n\nModes:\n- extract: aggregate one capture file into a token set (JSON, CSS custom properties, Tailwind config).\n- batch: aggregate many capture files concurrently into an output directory.\n\nUse --help on any subcommand for details."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Optional config file (TOML) to set caps/heuristics/sampling defaults; CLI flags override config"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Aggregate one capture file into design tokens
    Extract {
        #[arg(long, short, value_name = "PATH|-", help = "Capture JSON file, or - for stdin")]
        input: String,

        #[arg(
            long,
            value_name = "PATH",
            help = "JSON array of motion events; replaces any motionEvents in the capture"
        )]
        motion_events: Option<PathBuf>,

        #[arg(long, short, help = "Source URL (http/https); overrides the capture's url")]
        url: Option<String>,

        #[arg(
            long,
            default_value = "2000",
            help = "Max DOM elements the sampler was asked for (echoed into metadata)"
        )]
        max_elements: u32,

        #[arg(long, help = "Record that hover/click/scroll probing was disabled")]
        no_interactions: bool,

        #[arg(long, help = "Fast mode: caps max elements at 700 and disables interactions")]
        fast: bool,

        #[arg(long, value_enum, default_value = "json", help = "Artifacts to write")]
        emit: EmitFormat,

        #[arg(
            long,
            short,
            value_name = "PATH",
            help = "Output file OR directory (default: <host>-extract.json etc. in the working directory)"
        )]
        out: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "json", help = "Status output format")]
        format: OutputFormat,
    },

    /// Aggregate many capture files concurrently
    Batch {
        #[arg(required = true, value_name = "INPUT", help = "Capture JSON files")]
        inputs: Vec<PathBuf>,

        #[arg(long, value_name = "DIR", help = "Directory for generated artifacts; created if missing")]
        out_dir: PathBuf,

        #[arg(long, value_enum, default_value = "json", help = "Artifacts to write per input")]
        emit: EmitFormat,

        #[arg(long, short, default_value = "4", help = "Captures processed concurrently")]
        jobs: usize,

        #[arg(long, value_enum, default_value = "json", help = "Status output format")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Default)]
pub enum EmitFormat {
    #[default]
    Json,
    Css,
    Tailwind,
    All,
}

impl EmitFormat {
    pub fn artifacts(self) -> Vec<ArtifactKind> {
        match self {
            EmitFormat::Json => vec![ArtifactKind::Json],
            EmitFormat::Css => vec![ArtifactKind::Css],
            EmitFormat::Tailwind => vec![ArtifactKind::Tailwind],
            EmitFormat::All => ArtifactKind::ALL.to_vec(),
        }
    }
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Pretty,
}

pub fn parse() -> Cli {
    Cli::parse()
}
