//! `rbook report`, `rbook cashback`, `rbook validate`.

use std::path::{Path, PathBuf};

use roundbook_recon::model::CashbackSummary;
use roundbook_recon::render::render_cashback;
use roundbook_recon::table::read_file;
use roundbook_recon::{generate, generate_cashback, render, ReportConfig, StatusFilter};

use crate::exit_codes::EXIT_INSOLVENT;
use crate::CliError;

/// Flag values that take precedence over the config file.
#[derive(Debug, Default, Clone, Copy)]
pub struct Overrides {
    pub status_filter: Option<StatusFilter>,
    pub include_solvency: Option<bool>,
    pub include_cashback: Option<bool>,
}

impl Overrides {
    fn apply(self, config: &mut ReportConfig) {
        if let Some(filter) = self.status_filter {
            config.report.status_filter = filter;
        }
        if let Some(solvency) = self.include_solvency {
            config.report.include_solvency = solvency;
        }
        if let Some(cashback) = self.include_cashback {
            config.report.include_cashback = cashback;
        }
    }
}

pub struct ReportArgs {
    pub rounds: PathBuf,
    pub transactions: PathBuf,
    pub config: Option<PathBuf>,
    pub overrides: Overrides,
    pub json: bool,
    pub output: Option<PathBuf>,
    pub fail_on_insolvent: bool,
}

/// Load the config file when given, else the built-in defaults.
fn load_config(path: Option<&Path>) -> Result<ReportConfig, CliError> {
    let Some(path) = path else {
        return Ok(ReportConfig::default());
    };
    let config_str = std::fs::read_to_string(path)
        .map_err(|e| CliError::io(format!("cannot read config {}: {e}", path.display())))?;
    let config = ReportConfig::from_toml(&config_str).map_err(CliError::report)?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

fn read_input(path: &Path) -> Result<String, CliError> {
    read_file(path).map_err(CliError::report)
}

fn emit(content: &str, output: Option<&Path>) -> Result<(), CliError> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .map_err(|e| CliError::io(format!("cannot write output: {e}")))?;
            eprintln!("wrote {}", path.display());
        }
        None => print!("{content}"),
    }
    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value)
        .map(|mut s| {
            s.push('\n');
            s
        })
        .map_err(|e| CliError::io(format!("JSON serialization error: {e}")))
}

// ============================================================================
// report
// ============================================================================

pub fn cmd_report(args: ReportArgs) -> Result<(), CliError> {
    let mut config = load_config(args.config.as_deref())?;
    args.overrides.apply(&mut config);

    if args.fail_on_insolvent && !config.report.include_solvency {
        return Err(CliError::args("--fail-on-insolvent needs the solvency analysis")
            .with_hint("drop --no-solvency or set report.include_solvency = true"));
    }

    let rounds_text = read_input(&args.rounds)?;
    let transactions_text = read_input(&args.transactions)?;

    let report = generate(&config, &rounds_text, &transactions_text).map_err(CliError::report)?;
    tracing::debug!(
        player = %report.player_id,
        rounds = report.rounds.totals.round_count,
        transactions = report.financials.transaction_count,
        "report generated"
    );

    let content = if args.json {
        to_json(&report)?
    } else {
        render(&report)
    };
    emit(&content, args.output.as_deref())?;

    if args.fail_on_insolvent {
        if let Some(ref verdict) = report.solvency {
            if !verdict.is_approvable {
                return Err(CliError::new(
                    EXIT_INSOLVENT,
                    format!(
                        "player {} not approvable: pending withdrawals exceed net value by {:.2}",
                        report.player_id, verdict.shortfall
                    ),
                ));
            }
        }
    }

    Ok(())
}

// ============================================================================
// cashback
// ============================================================================

#[derive(serde::Serialize)]
struct CashbackOutput<'a> {
    player_id: &'a str,
    #[serde(flatten)]
    cashback: &'a CashbackSummary,
}

pub fn cmd_cashback(rounds: PathBuf, config: Option<PathBuf>, json: bool) -> Result<(), CliError> {
    let config = load_config(config.as_deref())?;
    let rounds_text = read_input(&rounds)?;

    let (player_id, cashback) = generate_cashback(&config, &rounds_text).map_err(CliError::report)?;

    let content = if json {
        to_json(&CashbackOutput {
            player_id: &player_id,
            cashback: &cashback,
        })?
    } else {
        render_cashback(&player_id, &cashback)
    };
    emit(&content, None)
}

// ============================================================================
// validate
// ============================================================================

pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config = load_config(Some(&config_path))?;

    let overridden = config.columns.overridden_roles();
    eprintln!(
        "valid: status filter '{}', solvency {}, cashback {}, {} column override(s)",
        config.report.status_filter,
        on_off(config.report.include_solvency),
        on_off(config.report.include_cashback),
        overridden,
    );
    Ok(())
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}
