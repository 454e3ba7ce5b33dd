// Column-intent detection: map semantic roles onto whatever headers an export uses.

use serde::Serialize;

use crate::error::ReportError;
use crate::model::TableKind;

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    // Rounds
    Game,
    Bet,
    Payout,
    Timestamp,
    FreeSpin,
    PlayerId,
    // Transactions
    Amount,
    Type,
    ProcessingStatus,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Game => write!(f, "game"),
            Self::Bet => write!(f, "bet"),
            Self::Payout => write!(f, "payout"),
            Self::Timestamp => write!(f, "timestamp"),
            Self::FreeSpin => write!(f, "free_spin"),
            Self::PlayerId => write!(f, "player_id"),
            Self::Amount => write!(f, "amount"),
            Self::Type => write!(f, "type"),
            Self::ProcessingStatus => write!(f, "processing_status"),
        }
    }
}

/// Priority-ordered keyword table: role → substrings matched against lowercased headers.
pub type KeywordTable = Vec<(Role, Vec<String>)>;

pub const DEFAULT_ROUND_KEYWORDS: &[(Role, &[&str])] = &[
    (Role::Game, &["game", "nome"]),
    (Role::Bet, &["bet"]),
    (Role::Payout, &["payout"]),
    (Role::Timestamp, &["date", "creation"]),
    (Role::FreeSpin, &["free"]),
    (Role::PlayerId, &["client"]),
];

pub const DEFAULT_TRANSACTION_KEYWORDS: &[(Role, &[&str])] = &[
    (Role::Amount, &["amount", "valor", "value", "delta"]),
    (Role::Type, &["type", "operation", "action", "transaction"]),
    (Role::ProcessingStatus, &["processing"]),
    (Role::Timestamp, &["date", "creation"]),
];

pub fn keyword_table(defaults: &[(Role, &[&str])]) -> KeywordTable {
    defaults
        .iter()
        .map(|(role, kws)| (*role, kws.iter().map(|k| k.to_string()).collect()))
        .collect()
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedColumn {
    pub index: usize,
    pub header: String,
}

/// Role → resolved header, one entry per role in the keyword table.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ColumnMap {
    entries: Vec<(Role, Option<ResolvedColumn>)>,
}

impl ColumnMap {
    pub fn get(&self, role: Role) -> Option<&ResolvedColumn> {
        self.entries
            .iter()
            .find(|(r, _)| *r == role)
            .and_then(|(_, col)| col.as_ref())
    }

    pub fn header(&self, role: Role) -> Option<&str> {
        self.get(role).map(|c| c.header.as_str())
    }

    pub fn index(&self, role: Role) -> Option<usize> {
        self.get(role).map(|c| c.index)
    }

    pub fn require(&self, table: TableKind, role: Role) -> Result<usize, ReportError> {
        self.index(role)
            .ok_or(ReportError::MissingColumn { table, role })
    }
}

/// For each role, pick the first header (in table order) whose lowercased
/// text contains any of the role's keywords. Unmatched roles stay absent.
pub fn resolve_columns(headers: &[String], role_keywords: &KeywordTable) -> ColumnMap {
    let lowered: Vec<String> = headers.iter().map(|h| h.to_lowercase()).collect();

    let entries = role_keywords
        .iter()
        .map(|(role, keywords)| {
            let found = lowered
                .iter()
                .position(|h| keywords.iter().any(|k| h.contains(k.as_str())))
                .map(|index| ResolvedColumn {
                    index,
                    header: headers[index].clone(),
                });
            (*role, found)
        })
        .collect();

    ColumnMap { entries }
}

// ---------------------------------------------------------------------------
// Typed column sets
// ---------------------------------------------------------------------------

/// Column indices for the rounds export, validated once per table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundColumns {
    pub game: usize,
    pub bet: usize,
    pub payout: usize,
    pub timestamp: Option<usize>,
    /// Absent ⇒ every round is treated as real-money.
    pub free_spin: Option<usize>,
    pub player_id: Option<usize>,
}

impl RoundColumns {
    pub fn resolve(headers: &[String], keywords: &KeywordTable) -> Result<Self, ReportError> {
        let map = resolve_columns(headers, keywords);
        let t = TableKind::Rounds;
        Ok(Self {
            game: map.require(t, Role::Game)?,
            bet: map.require(t, Role::Bet)?,
            payout: map.require(t, Role::Payout)?,
            timestamp: map.index(Role::Timestamp),
            free_spin: map.index(Role::FreeSpin),
            player_id: map.index(Role::PlayerId),
        })
    }
}

/// Column indices for the transactions export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionColumns {
    pub amount: usize,
    pub kind: usize,
    pub processing_status: Option<usize>,
    pub timestamp: Option<usize>,
}

impl TransactionColumns {
    /// `require_status`: fail when no processing-status column exists.
    pub fn resolve(
        headers: &[String],
        keywords: &KeywordTable,
        require_status: bool,
    ) -> Result<Self, ReportError> {
        let map = resolve_columns(headers, keywords);
        let t = TableKind::Transactions;
        let amount = map.require(t, Role::Amount)?;
        let kind = map.require(t, Role::Type)?;
        let processing_status = if require_status {
            Some(map.require(t, Role::ProcessingStatus)?)
        } else {
            map.index(Role::ProcessingStatus)
        };
        Ok(Self {
            amount,
            kind,
            processing_status,
            timestamp: map.index(Role::Timestamp),
        })
    }
}
