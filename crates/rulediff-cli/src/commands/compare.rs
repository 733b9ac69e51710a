//! Alert file comparison command

use crate::output::Tee;
use clap::{Args, ValueEnum};
use rulediff_core::diagnostics::TracingSink;
use rulediff_core::diff::{diff_documents, render_human_summary, render_json_report};
use rulediff_core::document::load_pair;
use rulediff_core_types::InputSide;
use std::path::PathBuf;

/// Exit code of a completed comparison that found differences, with `--exit-code`
pub const EXIT_DIFFS_FOUND: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain-text report
    #[value(name = "pp", alias = "pretty-print")]
    PrettyPrint,
    /// JSON array of diff records
    Json,
}

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// First alert rule file (YAML or JSON)
    #[arg(value_name = "ALERT_FILE_1")]
    pub first: PathBuf,

    /// Second alert rule file (YAML or JSON)
    #[arg(value_name = "ALERT_FILE_2")]
    pub second: PathBuf,

    /// Debug logging and input file names on stderr
    #[arg(short, long)]
    pub verbose: bool,

    #[arg(
        long = "output-format",
        visible_alias = "of",
        value_enum,
        default_value_t = OutputFormat::PrettyPrint
    )]
    pub output_format: OutputFormat,

    /// Also write the report (or error) to this file
    #[arg(short = 'o', long = "output-file", value_name = "PATH")]
    pub output_file: Option<PathBuf>,

    /// Exit with status 2 when differences are found
    #[arg(long)]
    pub exit_code: bool,
}

/// Result of a completed comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompareOutcome {
    pub diff_count: usize,
    pub fail_on_diff: bool,
}

impl CompareOutcome {
    pub fn exit_code(&self) -> i32 {
        if self.fail_on_diff && self.diff_count > 0 {
            EXIT_DIFFS_FOUND
        } else {
            0
        }
    }
}

pub fn execute(args: CompareArgs, out: &mut Tee) -> Result<CompareOutcome, Box<dyn std::error::Error>> {
    for (side, path) in [(InputSide::First, &args.first), (InputSide::Second, &args.second)] {
        tracing::info!(side = %side, path = %path.display(), "comparing alert file");
    }

    let (first, second) = load_pair(&args.first, &args.second)?;
    let diffs = diff_documents(&first, &second, &TracingSink);

    let report = match args.output_format {
        OutputFormat::PrettyPrint => render_human_summary(&diffs),
        OutputFormat::Json => render_json_report(&diffs)?,
    };
    out.report(&report)?;

    Ok(CompareOutcome {
        diff_count: diffs.len(),
        fail_on_diff: args.exit_code,
    })
}
