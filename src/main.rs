mod cli;
mod commands;
mod error;
mod filename;
mod pdf;
mod resolve;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use commands::split::SplitOptions;

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .format_timestamp(None)
        .init();

    let options = SplitOptions {
        output_dir: cli.output_dir,
        depth: cli.depth,
        dry_run: cli.dry_run,
        json: cli.json,
    };

    let summary = commands::split::run(&cli.input, &options)?;
    if options.dry_run {
        return Ok(());
    }

    println!(
        "Split {} into {} file(s) in {}",
        cli.input.display(),
        summary.written.len(),
        options.output_dir.display()
    );
    if summary.skipped_empty > 0 {
        println!("Skipped {} section(s) without pages", summary.skipped_empty);
    }
    if summary.failed > 0 {
        anyhow::bail!("{} section(s) could not be written", summary.failed);
    }

    Ok(())
}
