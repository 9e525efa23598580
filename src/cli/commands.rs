use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hansard")]
#[command(
    author,
    version,
    about = "Readable paragraphs from raw legislative-proceeding transcripts"
)]
#[command(
    long_about = "Fuses silence gaps in speech-to-text timing with camera cuts detected \
in the broadcast video to split a flat transcript into readable paragraphs"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute the per-second frame-diff series of a video and save it as CSV
    Diff {
        /// Video file (mp4)
        #[arg(long)]
        video: PathBuf,
        /// Output frame-diff file (csv)
        #[arg(long)]
        out: PathBuf,
    },

    /// Segment recordings into paragraphs
    Segment {
        /// Recording ID; when omitted, every recording without output is processed
        #[arg(short, long)]
        id: Option<String>,
        /// Directory holding <id>.json / <id>.diff files (overrides config)
        #[arg(long)]
        dir: Option<PathBuf>,
        /// Silence gap (seconds) that starts a new paragraph (overrides config)
        #[arg(long)]
        gap_threshold: Option<f64>,
        /// Frame-diff ratio above which a second counts as a camera cut (overrides config)
        #[arg(long)]
        diff_threshold: Option<f64>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Show config file path
    Path,
    /// Reset configuration to defaults
    Reset,
}
