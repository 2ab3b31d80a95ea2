use std::path::PathBuf;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use go_analyze_core::{analyze, logging, AnalyzeError, AnalyzeOptions};

/// Prints `{"packageName", "functionName", "watch"}` for a Go entrypoint.
#[derive(Parser)]
#[command(author, version, about = "Finds the Go files an entrypoint depends on", long_about = None)]
struct Cli {
    /// Entrypoint Go file; its directory is scanned recursively
    file: PathBuf,

    /// Log every candidate decision to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(_) => {
            return Err(AnalyzeError::Usage {
                program: "go-analyze".to_string(),
            }
            .into())
        }
    };

    logging::init(cli.verbose);

    let manifest = analyze(&cli.file, &AnalyzeOptions::default())?;
    print!("{}", manifest.to_json()?);
    Ok(())
}
