// rbook - player rounds and transactions reports from casino back-office exports

mod exit_codes;
mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use roundbook_recon::{ReportError, StatusFilter};
use tracing_subscriber::prelude::*;

use exit_codes::{report_exit_code, EXIT_IO, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "rbook")]
#[command(about = "Player rounds and transactions reports (headless)")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the player report from a rounds export and a transactions export
    #[command(after_help = "\
Examples:
  rbook report rounds.csv transactions.csv
  rbook report rounds.csv transactions.csv --status-filter all --no-solvency
  rbook report rounds.csv transactions.csv --cashback --json
  rbook report rounds.csv transactions.csv --config report.toml --output report.txt
  rbook report rounds.csv transactions.csv --fail-on-insolvent")]
    Report {
        /// Rounds export (CSV, `,` or `;` delimited)
        rounds: PathBuf,

        /// Transactions export (CSV, `,` or `;` delimited)
        transactions: PathBuf,

        /// TOML report config
        #[arg(long, short = 'c', env = "RBOOK_CONFIG")]
        config: Option<PathBuf>,

        /// Which processing statuses count toward the headline totals
        #[arg(long, value_enum)]
        status_filter: Option<StatusFilterArg>,

        /// Include the solvency analysis
        #[arg(long, overrides_with = "no_solvency")]
        solvency: bool,

        /// Omit the solvency analysis
        #[arg(long, overrides_with = "solvency")]
        no_solvency: bool,

        /// Include the cashback section
        #[arg(long)]
        cashback: bool,

        /// Output JSON instead of the text report
        #[arg(long)]
        json: bool,

        /// Write the report to a file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Exit 6 when pending withdrawals exceed the player's net value
        #[arg(long)]
        fail_on_insolvent: bool,
    },

    /// Compute cashback from a rounds export alone
    #[command(after_help = "\
Examples:
  rbook cashback rounds.csv
  rbook cashback rounds.csv --json")]
    Cashback {
        /// Rounds export (CSV, `,` or `;` delimited)
        rounds: PathBuf,

        /// TOML report config (column keyword overrides)
        #[arg(long, short = 'c', env = "RBOOK_CONFIG")]
        config: Option<PathBuf>,

        /// Output JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Validate a report config without running
    #[command(after_help = "\
Examples:
  rbook validate report.toml")]
    Validate {
        /// Path to the TOML config file
        config: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StatusFilterArg {
    All,
    Completed,
    ManualApproveRequired,
}

impl From<StatusFilterArg> for StatusFilter {
    fn from(arg: StatusFilterArg) -> Self {
        match arg {
            StatusFilterArg::All => StatusFilter::All,
            StatusFilterArg::Completed => StatusFilter::Completed,
            StatusFilterArg::ManualApproveRequired => StatusFilter::ManualApproveRequired,
        }
    }
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (",
        env!("GIT_COMMIT_HASH"),
        ")",
        "\nengine:  roundbook-recon ",
        env!("CARGO_PKG_VERSION"),
    )
}

/// Diagnostics go to stderr so stdout stays a clean report or JSON value.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env("RBOOK_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    let result = match cli.command {
        Commands::Report {
            rounds,
            transactions,
            config,
            status_filter,
            solvency,
            no_solvency,
            cashback,
            json,
            output,
            fail_on_insolvent,
        } => {
            let overrides = report::Overrides {
                status_filter: status_filter.map(StatusFilter::from),
                include_solvency: match (solvency, no_solvency) {
                    (true, _) => Some(true),
                    (_, true) => Some(false),
                    _ => None,
                },
                include_cashback: cashback.then_some(true),
            };
            report::cmd_report(report::ReportArgs {
                rounds,
                transactions,
                config,
                overrides,
                json,
                output,
                fail_on_insolvent,
            })
        }
        Commands::Cashback { rounds, config, json } => report::cmd_cashback(rounds, config, json),
        Commands::Validate { config } => report::cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    pub fn args(msg: impl Into<String>) -> Self {
        Self::new(EXIT_USAGE, msg)
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self::new(EXIT_IO, msg)
    }

    /// Create error from an engine error with the matching exit code.
    pub fn report(err: ReportError) -> Self {
        let code = report_exit_code(&err);
        let hint = match &err {
            ReportError::MissingColumn { table, role } => Some(format!(
                "override the keywords with [columns.{table}] {role} = [...] in the config"
            )),
            ReportError::ConfigParse(_) => {
                Some("known sections are [report], [columns.rounds] and [columns.transactions]".to_string())
            }
            _ => None,
        };
        Self { code, message: err.to_string(), hint }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
