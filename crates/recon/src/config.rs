use serde::{Deserialize, Serialize};

use crate::columns::{
    keyword_table, KeywordTable, Role, DEFAULT_ROUND_KEYWORDS, DEFAULT_TRANSACTION_KEYWORDS,
};
use crate::error::ReportError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Report shape and column-detection settings.
///
/// The default reproduces the detailed report: completed-only headline
/// totals, a pending section, and the solvency analysis.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    #[serde(default)]
    pub report: ReportOptions,
    #[serde(default)]
    pub columns: ColumnOverrides,
}

// ---------------------------------------------------------------------------
// Report variant
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportOptions {
    #[serde(default = "default_true")]
    pub include_solvency: bool,
    #[serde(default)]
    pub include_cashback: bool,
    #[serde(default)]
    pub status_filter: StatusFilter,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            include_solvency: true,
            include_cashback: false,
            status_filter: StatusFilter::default(),
        }
    }
}

fn default_true() -> bool {
    true
}

pub const STATUS_COMPLETED: &str = "COMPLETED";
pub const STATUS_MANUAL_APPROVE_REQUIRED: &str = "MANUAL_APPROVE_REQUIRED";

/// Which processing statuses feed the headline deposit/withdrawal totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    /// Every transaction regardless of status.
    All,
    Completed,
    ManualApproveRequired,
}

impl Default for StatusFilter {
    fn default() -> Self {
        Self::Completed
    }
}

impl StatusFilter {
    /// Whether a transaction with this (uppercased) status is counted.
    pub fn admits(&self, status: &str) -> bool {
        match self {
            Self::All => true,
            Self::Completed => status == STATUS_COMPLETED,
            Self::ManualApproveRequired => status == STATUS_MANUAL_APPROVE_REQUIRED,
        }
    }

    pub fn requires_status_column(&self) -> bool {
        !matches!(self, Self::All)
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Completed => write!(f, "completed"),
            Self::ManualApproveRequired => write!(f, "manual_approve_required"),
        }
    }
}

// ---------------------------------------------------------------------------
// Column keyword overrides
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnOverrides {
    #[serde(default)]
    pub rounds: RoundKeywordOverrides,
    #[serde(default)]
    pub transactions: TransactionKeywordOverrides,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoundKeywordOverrides {
    pub game: Option<Vec<String>>,
    pub bet: Option<Vec<String>>,
    pub payout: Option<Vec<String>>,
    pub timestamp: Option<Vec<String>>,
    pub free_spin: Option<Vec<String>>,
    pub player_id: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransactionKeywordOverrides {
    pub amount: Option<Vec<String>>,
    #[serde(rename = "type")]
    pub kind: Option<Vec<String>>,
    pub processing_status: Option<Vec<String>>,
    pub timestamp: Option<Vec<String>>,
}

impl ColumnOverrides {
    /// Number of roles whose keyword list is overridden, across both tables.
    pub fn overridden_roles(&self) -> usize {
        let rounds = DEFAULT_ROUND_KEYWORDS
            .iter()
            .filter(|(role, _)| self.rounds.get(*role).is_some())
            .count();
        let transactions = DEFAULT_TRANSACTION_KEYWORDS
            .iter()
            .filter(|(role, _)| self.transactions.get(*role).is_some())
            .count();
        rounds + transactions
    }
}

impl RoundKeywordOverrides {
    fn get(&self, role: Role) -> Option<&Vec<String>> {
        match role {
            Role::Game => self.game.as_ref(),
            Role::Bet => self.bet.as_ref(),
            Role::Payout => self.payout.as_ref(),
            Role::Timestamp => self.timestamp.as_ref(),
            Role::FreeSpin => self.free_spin.as_ref(),
            Role::PlayerId => self.player_id.as_ref(),
            _ => None,
        }
    }
}

impl TransactionKeywordOverrides {
    fn get(&self, role: Role) -> Option<&Vec<String>> {
        match role {
            Role::Amount => self.amount.as_ref(),
            Role::Type => self.kind.as_ref(),
            Role::ProcessingStatus => self.processing_status.as_ref(),
            Role::Timestamp => self.timestamp.as_ref(),
            _ => None,
        }
    }
}

/// Apply overrides on top of a default table. Keywords are lowercased so
/// they compare against lowercased headers.
fn merge_keywords(
    defaults: KeywordTable,
    lookup: impl Fn(Role) -> Option<Vec<String>>,
) -> KeywordTable {
    defaults
        .into_iter()
        .map(|(role, kws)| match lookup(role) {
            Some(custom) => (role, custom.iter().map(|k| k.to_lowercase()).collect()),
            None => (role, kws),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ReportConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReportError> {
        let config: ReportConfig =
            toml::from_str(input).map_err(|e| ReportError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReportError> {
        let rounds = DEFAULT_ROUND_KEYWORDS
            .iter()
            .filter_map(|(role, _)| self.columns.rounds.get(*role).map(|k| ("rounds", *role, k)));
        let transactions = DEFAULT_TRANSACTION_KEYWORDS.iter().filter_map(|(role, _)| {
            self.columns
                .transactions
                .get(*role)
                .map(|k| ("transactions", *role, k))
        });

        for (table, role, keywords) in rounds.chain(transactions) {
            if keywords.is_empty() {
                return Err(ReportError::ConfigValidation(format!(
                    "columns.{table}.{role}: keyword list is empty"
                )));
            }
            if keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(ReportError::ConfigValidation(format!(
                    "columns.{table}.{role}: blank keyword"
                )));
            }
        }

        Ok(())
    }

    pub fn round_keywords(&self) -> KeywordTable {
        merge_keywords(keyword_table(DEFAULT_ROUND_KEYWORDS), |role| {
            self.columns.rounds.get(role).cloned()
        })
    }

    pub fn transaction_keywords(&self) -> KeywordTable {
        merge_keywords(keyword_table(DEFAULT_TRANSACTION_KEYWORDS), |role| {
            self.columns.transactions.get(role).cloned()
        })
    }

    /// Status-based reconciliation needs the processing-status column.
    pub fn requires_status_column(&self) -> bool {
        self.report.include_solvency || self.report.status_filter.requires_status_column()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
