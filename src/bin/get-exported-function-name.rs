//! Prints the exported top-level function names of one Go file, comma-separated.

use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::Parser;
use go_analyze_core::analyzer::extract::exported_function_names;
use go_analyze_core::{logging, parse_file, AnalyzeError};

#[derive(Parser)]
#[command(author, version, about = "Lists exported Go function names", long_about = None)]
struct Cli {
    /// Go source file
    file: PathBuf,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(_) => {
            let usage = AnalyzeError::Usage {
                program: "get-exported-function-name".to_string(),
            };
            println!("{}", usage);
            std::process::exit(1);
        }
    };

    logging::init(false);

    match parse_file(&cli.file) {
        Ok(file) => println!("{}", exported_function_names(&file).join(",")),
        Err(err) => {
            // failures go to stdout so callers capturing it see the reason
            println!("{:#}", anyhow::Error::new(err));
            std::process::exit(1);
        }
    }
}
