use chrono::NaiveDateTime;
use serde::Serialize;

use crate::config::StatusFilter;

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

/// Which of the two uploaded exports a row or error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Rounds,
    Transactions,
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rounds => write!(f, "rounds"),
            Self::Transactions => write!(f, "transactions"),
        }
    }
}

// ---------------------------------------------------------------------------
// Rounds
// ---------------------------------------------------------------------------

/// Free-spin marker of a round, resolved once at load time.
///
/// Only a cell equal to `"false"` (any case) marks a real-money round and
/// only `"true"` marks a free spin. Anything else is `Unknown`. When the
/// table has no free-spin column at all, every round is `RealMoney`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FreeSpinFlag {
    RealMoney,
    FreeSpin,
    Unknown,
}

impl FreeSpinFlag {
    pub fn from_cell(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "false" => Self::RealMoney,
            "true" => Self::FreeSpin,
            _ => Self::Unknown,
        }
    }

    /// Rounds that count towards cashback volume.
    pub fn is_cashback_eligible(self) -> bool {
        self == Self::RealMoney
    }
}

/// A single normalized row of the rounds export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundRecord {
    pub game: String,
    pub bet: f64,
    pub payout: f64,
    pub timestamp: Option<NaiveDateTime>,
    pub free_spin: FreeSpinFlag,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ActivityWindow {
    pub first: Option<NaiveDateTime>,
    pub last: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSummary {
    pub game: String,
    pub round_count: usize,
    pub total_bet: f64,
    pub total_payout: f64,
    pub net_result: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RoundTotals {
    pub round_count: usize,
    pub total_bet: f64,
    pub total_payout: f64,
    pub net_result: f64,
}

/// Breakdown of rounds by free-spin flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FlagCounts {
    pub real_money: usize,
    pub free_spin: usize,
    pub unknown: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundsSummary {
    pub window: ActivityWindow,
    pub games: Vec<GameSummary>,
    pub totals: RoundTotals,
    pub flags: FlagCounts,
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Deposit,
    Withdrawal,
    Other,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Deposit => write!(f, "deposit"),
            Self::Withdrawal => write!(f, "withdrawal"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// A single normalized row of the transactions export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRecord {
    pub amount: f64,
    /// Transaction type text, lowercased.
    pub kind: String,
    pub category: Category,
    /// Processing status, uppercased. Empty when the table has no status column.
    pub processing_status: String,
    pub timestamp: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CategoryTotals {
    pub deposits: f64,
    pub withdrawals: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialSummary {
    pub status_filter: StatusFilter,
    /// Deposits admitted by `status_filter`.
    pub deposits: f64,
    /// Withdrawals admitted by `status_filter`.
    pub withdrawals: f64,
    /// `COMPLETED` bucket; `None` when the table has no status column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<CategoryTotals>,
    /// `MANUAL_APPROVE_REQUIRED` bucket; `None` when the table has no status column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending: Option<CategoryTotals>,
    pub transaction_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolvencyVerdict {
    pub completed_deposits: f64,
    pub game_net_result: f64,
    pub net_player_value: f64,
    pub pending_withdrawals: f64,
    pub is_approvable: bool,
    /// How much the pending withdrawals exceed the net player value; 0 when approvable.
    pub shortfall: f64,
}

// ---------------------------------------------------------------------------
// Cashback
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CashbackSummary {
    pub eligible_rounds: usize,
    pub total_bet: f64,
    pub total_payout: f64,
    pub net_loss: f64,
    pub percentage: f64,
    pub cashback: f64,
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Non-fatal conditions noticed while building a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportWarning {
    /// The table had no data rows. Its aggregates are all zero.
    EmptyInput { table: TableKind },
    /// Free-spin cells that were neither `true` nor `false`.
    UnknownFreeSpinFlags { count: usize },
}

impl std::fmt::Display for ReportWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyInput { table } => write!(f, "{table} table has no data rows"),
            Self::UnknownFreeSpinFlags { count } => {
                write!(f, "{count} round(s) with an unrecognized free-spin flag (excluded from cashback)")
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMeta {
    pub engine_version: String,
    pub generated_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerReport {
    pub meta: ReportMeta,
    pub player_id: String,
    pub rounds: RoundsSummary,
    pub financials: FinancialSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solvency: Option<SolvencyVerdict>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cashback: Option<CashbackSummary>,
    pub warnings: Vec<ReportWarning>,
}
