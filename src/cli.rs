use clap::{ArgAction, Parser};
use std::path::PathBuf;

pub const DEFAULT_OUTPUT_DIR: &str = "split_pdfs";

#[derive(Parser)]
#[command(name = "pdfsplit")]
#[command(about = "Split a PDF file according to its bookmarks")]
#[command(version)]
pub struct Cli {
    /// PDF file to split
    pub input: PathBuf,

    /// Directory where split PDFs will be saved
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Maximum bookmark depth to split at (e.g., 2 for second-level headings).
    /// All levels are used when omitted.
    #[arg(short, long, allow_negative_numbers = true)]
    pub depth: Option<i64>,

    /// Show the sections that would be written without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Print the dry-run plan as JSON
    #[arg(long, requires = "dry_run")]
    pub json: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn log_level(&self) -> log::LevelFilter {
        if self.quiet {
            return log::LevelFilter::Warn;
        }
        match self.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}
