//! rulediff CLI
//!
//! Compares the alerting rules of two rule files

use clap::Parser;
use rulediff_core::logging_facility::{init, Profile};

mod commands;
mod output;

#[derive(Debug, Parser)]
#[command(name = "rulediff")]
#[command(
    about = "rulediff - Compare the alerts of two Prometheus rule files",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    compare: commands::compare::CompareArgs,
}

fn main() {
    let cli = Cli::parse();

    init(if cli.compare.verbose {
        Profile::Development
    } else {
        Profile::Standard
    });

    let mut out = match output::Tee::open(cli.compare.output_file.as_deref()) {
        Ok(out) => out,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    match commands::compare::execute(cli.compare, &mut out) {
        Ok(outcome) => std::process::exit(outcome.exit_code()),
        Err(e) => {
            out.error(&format!("Error: {}", e));
            std::process::exit(1);
        }
    }
}
