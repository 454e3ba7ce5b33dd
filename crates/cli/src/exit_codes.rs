//! CLI Exit Code Registry
//!
//! Single source of truth for `rbook` exit codes. Scripts rely on them.
//!
//! | Code | Meaning                                                   |
//! |------|-----------------------------------------------------------|
//! | 0    | Success                                                   |
//! | 2    | Usage error (bad arguments, conflicting options)          |
//! | 3    | Input or output file cannot be read or written            |
//! | 4    | Invalid config (TOML parse or validation failure)         |
//! | 5    | Input table unusable (missing column role, malformed CSV) |
//! | 6    | Player is not approvable and `--fail-on-insolvent` is set |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant with a doc comment describing what triggers it
//! 2. Update the table above
//! 3. Wire it into `report_exit_code` or the command that raises it

use roundbook_recon::ReportError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// Usage error - bad arguments, conflicting options.
/// clap also exits with 2 on its own parse failures.
pub const EXIT_USAGE: u8 = 2;

/// File could not be read or the output could not be written.
pub const EXIT_IO: u8 = 3;

/// Config file failed to parse or validate.
pub const EXIT_INVALID_CONFIG: u8 = 4;

/// A required column role was not found, or the delimited text is malformed.
pub const EXIT_BAD_INPUT: u8 = 5;

/// Pending withdrawals exceed the player's net value.
/// Only raised with `--fail-on-insolvent`; the report is still written.
pub const EXIT_INSOLVENT: u8 = 6;

/// Map an engine error to its exit code.
pub fn report_exit_code(err: &ReportError) -> u8 {
    match err {
        ReportError::ConfigParse(_) | ReportError::ConfigValidation(_) => EXIT_INVALID_CONFIG,
        ReportError::MissingColumn { .. } | ReportError::Csv { .. } => EXIT_BAD_INPUT,
        ReportError::Io(_) => EXIT_IO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundbook_recon::columns::Role;
    use roundbook_recon::model::TableKind;

    #[test]
    fn codes_are_distinct() {
        let codes = [
            EXIT_SUCCESS,
            EXIT_USAGE,
            EXIT_IO,
            EXIT_INVALID_CONFIG,
            EXIT_BAD_INPUT,
            EXIT_INSOLVENT,
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn engine_errors_map_to_codes() {
        let missing = ReportError::MissingColumn {
            table: TableKind::Rounds,
            role: Role::Bet,
        };
        assert_eq!(report_exit_code(&missing), EXIT_BAD_INPUT);
        let csv = ReportError::Csv {
            table: TableKind::Transactions,
            message: "unterminated quote".into(),
        };
        assert_eq!(report_exit_code(&csv), EXIT_BAD_INPUT);
        assert_eq!(report_exit_code(&ReportError::Io("x".into())), EXIT_IO);
        assert_eq!(
            report_exit_code(&ReportError::ConfigParse("x".into())),
            EXIT_INVALID_CONFIG
        );
    }
}
