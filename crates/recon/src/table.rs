// Delimited-text loading: delimiter sniffing, decoding, header + record extraction.

use std::path::Path;

use csv::StringRecord;

use crate::error::ReportError;
use crate::model::TableKind;

/// A whole export held in memory.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<StringRecord>,
}

impl Table {
    /// True when the text had no header line at all.
    pub fn has_headers(&self) -> bool {
        !self.headers.is_empty()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col))
    }
}

/// Pick `,` when it occurs strictly more often than `;`, otherwise `;`.
///
/// Counts over the whole text, so free-text fields full of commas can tip
/// the choice.
pub fn sniff_delimiter(content: &str) -> u8 {
    let commas = content.bytes().filter(|&b| b == b',').count();
    let semicolons = content.bytes().filter(|&b| b == b';').count();
    if commas > semicolons {
        b','
    } else {
        b';'
    }
}

/// Decode raw bytes as UTF-8, falling back to Windows-1252 (common for
/// spreadsheet-exported CSVs).
pub fn decode_bytes(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            decoded.into_owned()
        }
    }
}

pub fn read_file(path: &Path) -> Result<String, ReportError> {
    let bytes =
        std::fs::read(path).map_err(|e| ReportError::Io(format!("{}: {e}", path.display())))?;
    Ok(decode_bytes(bytes))
}

/// Parse the whole text with the sniffed delimiter. Records may be shorter
/// or longer than the header row.
pub fn read_table(kind: TableKind, content: &str) -> Result<Table, ReportError> {
    if content.trim().is_empty() {
        return Ok(Table::default());
    }

    let delimiter = sniff_delimiter(content);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let csv_err = |e: csv::Error| ReportError::Csv {
        table: kind,
        message: e.to_string(),
    };

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                h.trim_start_matches('\u{feff}').to_string()
            } else {
                h.to_string()
            }
        })
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record.map_err(csv_err)?);
    }

    let delimiter_char = delimiter as char;
    tracing::debug!(
        table = %kind,
        delimiter = %delimiter_char,
        columns = headers.len(),
        rows = rows.len(),
        "read table"
    );

    Ok(Table { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniff_prefers_comma_when_more_frequent() {
        assert_eq!(sniff_delimiter("a,b,c\n1,2,3\n"), b',');
    }

    #[test]
    fn sniff_semicolon_with_decimal_commas() {
        assert_eq!(sniff_delimiter("game;bet;payout\nSlots;10,00;15,00\n"), b';');
    }

    #[test]
    fn sniff_tie_goes_to_semicolon() {
        assert_eq!(sniff_delimiter("a,b;c"), b';');
        assert_eq!(sniff_delimiter("no delimiters"), b';');
    }

    #[test]
    fn read_semicolon_table() {
        let t = read_table(TableKind::Rounds, "Game;Bet\nSlots;10,00\nRoulette;5\n").unwrap();
        assert_eq!(t.headers, vec!["Game", "Bet"]);
        assert_eq!(t.rows.len(), 2);
        assert_eq!(t.cell(0, 1), Some("10,00"));
        assert_eq!(t.cell(1, 0), Some("Roulette"));
        assert_eq!(t.cell(2, 0), None);
    }

    #[test]
    fn read_strips_bom_and_allows_short_rows() {
        let t = read_table(TableKind::Rounds, "\u{feff}Game,Bet,Payout\nSlots,1\n").unwrap();
        assert_eq!(t.headers[0], "Game");
        assert_eq!(t.cell(0, 1), Some("1"));
        assert_eq!(t.cell(0, 2), None);
    }

    #[test]
    fn read_quoted_fields() {
        let t = read_table(
            TableKind::Transactions,
            "Amount,Type\n\"1.234,56\",deposit\n\"7,5\",withdraw\n",
        )
        .unwrap();
        assert_eq!(t.cell(0, 0), Some("1.234,56"));
        assert_eq!(t.cell(1, 1), Some("withdraw"));
    }

    #[test]
    fn empty_text_has_no_headers() {
        let t = read_table(TableKind::Rounds, "  \n").unwrap();
        assert!(!t.has_headers());
        assert!(t.rows.is_empty());
    }

    #[test]
    fn header_only() {
        let t = read_table(TableKind::Rounds, "Game;Bet;Payout\n").unwrap();
        assert!(t.has_headers());
        assert!(t.rows.is_empty());
    }

    #[test]
    fn decode_windows_1252_fallback() {
        // "Depósito" with ó encoded as 0xF3
        let bytes = vec![0x44, 0x65, 0x70, 0xF3, 0x73, 0x69, 0x74, 0x6F];
        assert_eq!(decode_bytes(bytes), "Depósito");
    }

    #[test]
    fn read_file_reports_missing_path() {
        let err = read_file(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, ReportError::Io(_)));
    }

    #[test]
    fn read_file_decodes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rounds.csv");
        std::fs::write(&path, "Game;Bet\nSlots;1\n").unwrap();
        assert_eq!(read_file(&path).unwrap(), "Game;Bet\nSlots;1\n");
    }
}
