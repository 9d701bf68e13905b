//! Command-line entry point.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use filmrank::{FieldWidths, JobConfig, ReportFormat, TopScope};

#[derive(Parser, Debug)]
#[command(name = "filmrank", version)]
#[command(about = "Shard-and-merge aggregation over large film CSV datasets")]
struct Args {
    /// Input CSV file; the first line must be a header row.
    input: PathBuf,

    /// Target original-language code (exact match).
    #[arg(long, default_value = "pt")]
    language: String,

    /// Number of top-rated films to report.
    #[arg(long, default_value_t = 30)]
    top: usize,

    /// Number of scan workers.
    #[arg(long, default_value_t = num_cpus::get())]
    workers: usize,

    /// Which films feed the top chart.
    #[arg(long, value_enum, default_value_t = ScopeArg::All)]
    scope: ScopeArg,

    /// Row-batch fan-out inside each worker; 1 streams without buffering.
    #[arg(long, default_value_t = 1)]
    parallelism: usize,

    /// Drop the release_date column from the scan and the report.
    #[arg(long)]
    no_release_date: bool,

    /// Report format.
    #[arg(long, value_enum, default_value_t = FormatArg::Text)]
    format: FormatArg,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ScopeArg {
    /// Rank films of every language.
    All,
    /// Rank only films matching --language.
    Language,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

fn main() -> ExitCode {
    // Enable ANSI colors only when stdout is a terminal and NO_COLOR is unset.
    let ansi = std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
    tracing_subscriber::fmt()
        .with_ansi(ansi)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let cfg = JobConfig {
        input: args.input.clone(),
        language: args.language.clone(),
        top_k: args.top,
        workers: args.workers,
        scope: match args.scope {
            ScopeArg::All => TopScope::AllLanguages,
            ScopeArg::Language => TopScope::TargetLanguage,
        },
        track_release_date: !args.no_release_date,
        parallelism: args.parallelism,
        widths: FieldWidths::default(),
    };

    let summary = filmrank::run(&cfg)?;

    let format = match args.format {
        FormatArg::Text => ReportFormat::Text,
        FormatArg::Json => ReportFormat::Json,
    };
    print!("{}", filmrank::render(&summary, &cfg, format)?);
    Ok(())
}
