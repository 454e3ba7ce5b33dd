// Cell normalization: locale-ambiguous numbers and loosely formatted timestamps.
// Never fails; garbage becomes 0 / None so sums stay well-defined.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

// ---------------------------------------------------------------------------
// Numbers
// ---------------------------------------------------------------------------

/// Parse a numeric cell that may use `,` or `.` as the decimal separator.
///
/// - Both `,` and `.` present: every `.` is a thousands separator and `,` is
///   the decimal separator, whichever comes first. `"1.234,56"` → `1234.56`.
///   US-style `"1,234.56"` does NOT give `1234.56`: the dot is stripped,
///   leaving `"1,23456"` → `1.23456`.
/// - Only `,` present: it is the decimal separator. `"1234,56"` → `1234.56`.
/// - Otherwise the trimmed text is parsed as-is.
///
/// Empty, non-numeric and non-finite input (`"nan"`, `"inf"`) all yield `0.0`.
pub fn parse_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    let has_comma = trimmed.contains(',');
    let has_dot = trimmed.contains('.');

    let cleaned = if has_comma && has_dot {
        trimmed.replace('.', "").replace(',', ".")
    } else if has_comma {
        trimmed.replace(',', ".")
    } else {
        trimmed.to_string()
    };

    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// [`parse_number`] for a cell that may be missing from a short record.
pub fn parse_cell(raw: Option<&str>) -> f64 {
    raw.map(parse_number).unwrap_or(0.0)
}

// ---------------------------------------------------------------------------
// Timestamps
// ---------------------------------------------------------------------------

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

/// Parse a timestamp cell. Slash dates are day-first. Unparseable → `None`.
///
/// Offsets in RFC 3339 input are dropped after conversion to UTC.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt);
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(trimmed, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    None
}
