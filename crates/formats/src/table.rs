use std::collections::HashSet;
use std::io::Read;

use serde::de::DeserializeOwned;

use crate::records::{
    CaseRecord, CountryCount, DeathTypeRecord, EmploymentRecord, GlobalTimelineRow,
    ImpunityRecord, MotiveRecord, StatusYearRecord, TimelinePoint,
};

/// A delimited-file row type with a fixed set of required columns.
pub trait Record: DeserializeOwned {
    const COLUMNS: &'static [&'static str];
}

impl Record for CountryCount {
    const COLUMNS: &'static [&'static str] = &["country", "killed_count"];
}

impl Record for TimelinePoint {
    const COLUMNS: &'static [&'static str] = &["country", "year", "killed_count"];
}

impl Record for GlobalTimelineRow {
    const COLUMNS: &'static [&'static str] = &["year", "killed_count"];
}

impl Record for ImpunityRecord {
    const COLUMNS: &'static [&'static str] = &["country", "case_type", "count"];
}

impl Record for MotiveRecord {
    const COLUMNS: &'static [&'static str] = &["motive", "killed_count"];
}

impl Record for DeathTypeRecord {
    const COLUMNS: &'static [&'static str] = &["motive", "type_of_death", "count"];
}

impl Record for EmploymentRecord {
    const COLUMNS: &'static [&'static str] = &["motive", "employment_type", "count"];
}

impl Record for StatusYearRecord {
    const COLUMNS: &'static [&'static str] = &["year", "case_status", "count"];
}

impl Record for CaseRecord {
    // `role` is optional.
    const COLUMNS: &'static [&'static str] = &["country", "year", "case_status"];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    MissingColumn { column: String },
    /// `line` is 1-based and counts the header.
    InvalidRow { line: u64, reason: String },
    DuplicateKey { key: String },
    Malformed(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::MissingColumn { column } => write!(f, "missing required column {column:?}"),
            ParseError::InvalidRow { line, reason } => write!(f, "line {line}: {reason}"),
            ParseError::DuplicateKey { key } => write!(f, "duplicate row for {key:?}"),
            ParseError::Malformed(msg) => write!(f, "malformed table: {msg}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parses a comma-separated table with a header row into typed records.
///
/// Every column in `R::COLUMNS` must be present in the header; extra columns
/// are ignored. Cells are trimmed.
pub fn parse_table<R: Record>(reader: impl Read) -> Result<Vec<R>, ParseError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| ParseError::Malformed(e.to_string()))?
        .clone();
    for column in R::COLUMNS {
        if !headers.iter().any(|h| h == *column) {
            return Err(ParseError::MissingColumn {
                column: (*column).to_string(),
            });
        }
    }

    let mut rows = Vec::new();
    for result in rdr.deserialize::<R>() {
        let row = result.map_err(|e| {
            let line = e.position().map(|p| p.line()).unwrap_or(0);
            ParseError::InvalidRow {
                line,
                reason: csv_error_reason(&e),
            }
        })?;
        rows.push(row);
    }
    Ok(rows)
}

pub fn parse_table_str<R: Record>(payload: &str) -> Result<Vec<R>, ParseError> {
    parse_table(payload.as_bytes())
}

fn csv_error_reason(err: &csv::Error) -> String {
    match err.kind() {
        csv::ErrorKind::Deserialize { err, .. } => match err.field() {
            Some(field) => format!("field {}: {err}", field + 1),
            None => err.to_string(),
        },
        _ => err.to_string(),
    }
}

/// Rejects the table if `key` yields the same value for two rows.
pub fn ensure_unique<R, K>(rows: &[R], key: impl Fn(&R) -> K) -> Result<(), ParseError>
where
    K: std::hash::Hash + Eq + std::fmt::Debug,
{
    let mut seen = HashSet::with_capacity(rows.len());
    for row in rows {
        let k = key(row);
        if seen.contains(&k) {
            return Err(ParseError::DuplicateKey {
                key: format!("{k:?}"),
            });
        }
        seen.insert(k);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{ParseError, ensure_unique, parse_table_str};
    use crate::records::{CaseRecord, CaseStatus, CaseType, CountryCount, ImpunityRecord};
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_typed_rows_and_ignores_extra_columns() {
        let rows: Vec<CountryCount> =
            parse_table_str("country,killed_count,notes\nMexico, 12 ,x\nSyria,40,\n").unwrap();
        assert_eq!(
            rows,
            vec![
                CountryCount {
                    country: "Mexico".to_string(),
                    count: 12
                },
                CountryCount {
                    country: "Syria".to_string(),
                    count: 40
                },
            ]
        );
    }

    #[test]
    fn missing_column_fails_fast() {
        let err = parse_table_str::<CountryCount>("country,count\nMexico,1\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingColumn {
                column: "killed_count".to_string()
            }
        );
    }

    #[test]
    fn non_numeric_count_reports_line() {
        let err = parse_table_str::<CountryCount>("country,killed_count\nMexico,1\nSyria,many\n")
            .unwrap_err();
        match err {
            ParseError::InvalidRow { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn enums_are_validated() {
        let ok: Vec<ImpunityRecord> =
            parse_table_str("country,case_type,count\nMexico,confirmed,10\nMexico,unconfirmed,40\n")
                .unwrap();
        assert_eq!(ok[1].case_type, CaseType::Unconfirmed);

        let err =
            parse_table_str::<ImpunityRecord>("country,case_type,count\nMexico,maybe,1\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidRow { line: 2, .. }));
    }

    #[test]
    fn optional_role_may_be_absent_or_empty() {
        let rows: Vec<CaseRecord> =
            parse_table_str("country,year,case_status,role\nMexico,2012,killed,\nIran,2013,imprisoned,Editor\n")
                .unwrap();
        assert_eq!(rows[0].role, None);
        assert_eq!(rows[0].role_or_default(), "Journalist");
        assert_eq!(rows[1].case_status, CaseStatus::Imprisoned);
        assert_eq!(rows[1].role_or_default(), "Editor");

        let rows: Vec<CaseRecord> =
            parse_table_str("country,year,case_status\nMexico,2012,killed\n").unwrap();
        assert_eq!(rows[0].role, None);
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let rows: Vec<CountryCount> =
            parse_table_str("country,killed_count\nMexico,1\nMexico,2\n").unwrap();
        let err = ensure_unique(&rows, |r| r.country.clone()).unwrap_err();
        assert!(matches!(err, ParseError::DuplicateKey { .. }));
    }
}
