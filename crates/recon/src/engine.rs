use crate::aggregate::aggregate_rounds;
use crate::cashback::compute_cashback;
use crate::classify::classify;
use crate::columns::{KeywordTable, RoundColumns, TransactionColumns};
use crate::config::ReportConfig;
use crate::error::ReportError;
use crate::model::{
    CashbackSummary, FreeSpinFlag, PlayerReport, ReportMeta, ReportWarning, RoundRecord, TableKind,
    TransactionRecord,
};
use crate::normalize::{parse_cell, parse_timestamp};
use crate::reconcile::{reconcile, solvency};
use crate::table::read_table;

/// Placeholder when the rounds export carries no player identifier.
pub const UNKNOWN_PLAYER: &str = "N/A";

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct LoadedRounds {
    pub player_id: Option<String>,
    pub records: Vec<RoundRecord>,
    /// Whether the export had a free-spin column.
    pub has_free_spin_column: bool,
}

#[derive(Debug, Clone)]
pub struct LoadedTransactions {
    pub records: Vec<TransactionRecord>,
    /// Whether processing statuses are meaningful for these records.
    pub status_known: bool,
}

/// Parse the rounds export into normalized records.
///
/// Text with no header line yields zero records without column checks.
pub fn load_rounds(content: &str, keywords: &KeywordTable) -> Result<LoadedRounds, ReportError> {
    let table = read_table(TableKind::Rounds, content)?;
    if !table.has_headers() {
        return Ok(LoadedRounds {
            player_id: None,
            records: Vec::new(),
            has_free_spin_column: false,
        });
    }

    let cols = RoundColumns::resolve(&table.headers, keywords)?;
    tracing::debug!(
        game = %table.headers[cols.game],
        bet = %table.headers[cols.bet],
        payout = %table.headers[cols.payout],
        timestamp = ?cols.timestamp.map(|i| &table.headers[i]),
        free_spin = ?cols.free_spin.map(|i| &table.headers[i]),
        "resolved rounds columns"
    );

    let player_id = cols
        .player_id
        .and_then(|i| table.cell(0, i))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let records = table
        .rows
        .iter()
        .map(|row| RoundRecord {
            game: row.get(cols.game).unwrap_or("").to_string(),
            bet: parse_cell(row.get(cols.bet)),
            payout: parse_cell(row.get(cols.payout)),
            timestamp: cols
                .timestamp
                .and_then(|i| row.get(i))
                .and_then(parse_timestamp),
            free_spin: match cols.free_spin {
                Some(i) => FreeSpinFlag::from_cell(row.get(i).unwrap_or("")),
                None => FreeSpinFlag::RealMoney,
            },
        })
        .collect();

    Ok(LoadedRounds {
        player_id,
        records,
        has_free_spin_column: cols.free_spin.is_some(),
    })
}

/// Parse the transactions export into classified records.
///
/// Type text is lowercased and processing status uppercased before use.
pub fn load_transactions(
    content: &str,
    keywords: &KeywordTable,
    require_status: bool,
) -> Result<LoadedTransactions, ReportError> {
    let table = read_table(TableKind::Transactions, content)?;
    if !table.has_headers() {
        return Ok(LoadedTransactions {
            records: Vec::new(),
            status_known: true,
        });
    }

    let cols = TransactionColumns::resolve(&table.headers, keywords, require_status)?;
    tracing::debug!(
        amount = %table.headers[cols.amount],
        kind = %table.headers[cols.kind],
        processing_status = ?cols.processing_status.map(|i| &table.headers[i]),
        "resolved transactions columns"
    );

    let records = table
        .rows
        .iter()
        .map(|row| {
            let kind = row.get(cols.kind).unwrap_or("").to_lowercase();
            TransactionRecord {
                amount: parse_cell(row.get(cols.amount)),
                category: classify(&kind),
                kind,
                processing_status: cols
                    .processing_status
                    .and_then(|i| row.get(i))
                    .unwrap_or("")
                    .to_uppercase(),
                timestamp: cols
                    .timestamp
                    .and_then(|i| row.get(i))
                    .and_then(parse_timestamp),
            }
        })
        .collect();

    Ok(LoadedTransactions {
        records,
        status_known: cols.processing_status.is_some(),
    })
}

// ---------------------------------------------------------------------------
// Report generation
// ---------------------------------------------------------------------------

/// Build a complete player report from the two raw exports.
///
/// All-or-nothing: any fatal error aborts before a report exists. Empty
/// tables are not fatal; they produce zero totals and a warning.
pub fn generate(
    config: &ReportConfig,
    rounds_text: &str,
    transactions_text: &str,
) -> Result<PlayerReport, ReportError> {
    let rounds = load_rounds(rounds_text, &config.round_keywords())?;
    let transactions = load_transactions(
        transactions_text,
        &config.transaction_keywords(),
        config.requires_status_column(),
    )?;

    let mut warnings = Vec::new();
    if rounds.records.is_empty() {
        warnings.push(ReportWarning::EmptyInput { table: TableKind::Rounds });
    }
    if transactions.records.is_empty() {
        warnings.push(ReportWarning::EmptyInput { table: TableKind::Transactions });
    }

    let rounds_summary = aggregate_rounds(&rounds.records);
    if rounds.has_free_spin_column && rounds_summary.flags.unknown > 0 {
        warnings.push(ReportWarning::UnknownFreeSpinFlags {
            count: rounds_summary.flags.unknown,
        });
    }

    let financials = reconcile(
        &transactions.records,
        config.report.status_filter,
        transactions.status_known,
    );

    let solvency_verdict = if config.report.include_solvency {
        let completed = financials.completed.unwrap_or_default();
        let pending = financials.pending.unwrap_or_default();
        Some(solvency(
            completed.deposits,
            rounds_summary.totals.net_result,
            pending.withdrawals,
        ))
    } else {
        None
    };

    let cashback = if config.report.include_cashback {
        Some(compute_cashback(&rounds.records))
    } else {
        None
    };

    for w in &warnings {
        tracing::warn!("{w}");
    }

    Ok(PlayerReport {
        meta: ReportMeta {
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
        },
        player_id: rounds.player_id.unwrap_or_else(|| UNKNOWN_PLAYER.to_string()),
        rounds: rounds_summary,
        financials,
        solvency: solvency_verdict,
        cashback,
        warnings,
    })
}

/// Cashback for the rounds export alone, with the player id it names.
pub fn generate_cashback(
    config: &ReportConfig,
    rounds_text: &str,
) -> Result<(String, CashbackSummary), ReportError> {
    let rounds = load_rounds(rounds_text, &config.round_keywords())?;
    if rounds.records.is_empty() {
        tracing::warn!("{}", ReportWarning::EmptyInput { table: TableKind::Rounds });
    }
    let player_id = rounds.player_id.unwrap_or_else(|| UNKNOWN_PLAYER.to_string());
    Ok((player_id, compute_cashback(&rounds.records)))
}
