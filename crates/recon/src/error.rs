use std::fmt;

use crate::columns::Role;
use crate::model::TableKind;

#[derive(Debug)]
pub enum ReportError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (empty keyword list, blank keyword, etc.).
    ConfigValidation(String),
    /// A required column role could not be resolved from the table headers.
    MissingColumn { table: TableKind, role: Role },
    /// Malformed delimited text (unterminated quote, bad UTF-8 record, etc.).
    Csv { table: TableKind, message: String },
    /// IO error (file read, etc.).
    Io(String),
}

impl ReportError {
    /// The unresolved role, when this is a missing-column error.
    pub fn missing_role(&self) -> Option<Role> {
        match self {
            Self::MissingColumn { role, .. } => Some(*role),
            _ => None,
        }
    }
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::MissingColumn { table, role } => {
                write!(f, "{table} table: no column found for role '{role}'")
            }
            Self::Csv { table, message } => write!(f, "{table} table: {message}"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for ReportError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_column_names_role() {
        let err = ReportError::MissingColumn {
            table: TableKind::Rounds,
            role: Role::Bet,
        };
        assert_eq!(err.to_string(), "rounds table: no column found for role 'bet'");
        assert_eq!(err.missing_role(), Some(Role::Bet));
    }

    #[test]
    fn other_errors_have_no_role() {
        let err = ReportError::Io("denied".into());
        assert_eq!(err.missing_role(), None);
        assert_eq!(err.to_string(), "IO error: denied");
    }
}
