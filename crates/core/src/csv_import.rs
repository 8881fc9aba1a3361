//! Semicolon-delimited win import parsing.
//!
//! [`CsvRows`] streams records after checking the header width and numbers
//! each data row by its position in the file (the header is row 1).
//! [`WinCsvRow::from_record`] maps one record to typed fields. Validation
//! and persistence are left to the caller so a single bad row never stops
//! the stream.

use std::io::Read;

use serde::Serialize;

use crate::error::CoreError;

/// `team;hackathon;result;prize;award_date;year`, with an optional 7th
/// `link` column.
pub const WIN_MIN_COLUMNS: usize = 6;

/// One row's failure, reported back to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportRowError {
    pub row: usize,
    pub message: String,
}

/// Aggregate result of an import run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub total: usize,
    pub imported: usize,
    pub skipped: usize,
    pub errors: Vec<ImportRowError>,
}

impl ImportReport {
    pub fn record_imported(&mut self) {
        self.total += 1;
        self.imported += 1;
    }

    pub fn record_skipped(&mut self, row: usize, message: impl Into<String>) {
        self.total += 1;
        self.skipped += 1;
        self.errors.push(ImportRowError {
            row,
            message: message.into(),
        });
    }
}

/// Streaming iterator over the data rows of a semicolon-delimited file.
///
/// Yields `(row_number, record)`; a record that cannot be read is yielded
/// as an `Err` with a readable message and iteration continues.
pub struct CsvRows<R: Read> {
    records: csv::StringRecordsIntoIter<R>,
    next_row: usize,
}

impl<R: Read> CsvRows<R> {
    /// Open `reader`, consume the header row and require at least
    /// `min_columns` header cells.
    pub fn open(reader: R, min_columns: usize) -> Result<Self, CoreError> {
        let mut records = csv::ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader)
            .into_records();

        let header = match records.next() {
            Some(Ok(header)) => header,
            Some(Err(e)) => {
                return Err(CoreError::Validation(format!(
                    "Failed to read CSV header: {e}"
                )))
            }
            None => return Err(CoreError::Validation("CSV file is empty".into())),
        };

        if header.len() < min_columns {
            return Err(CoreError::Validation(format!(
                "CSV header must have at least {min_columns} columns, got {}",
                header.len()
            )));
        }

        Ok(Self {
            records,
            next_row: 2,
        })
    }
}

impl<R: Read> Iterator for CsvRows<R> {
    type Item = (usize, Result<csv::StringRecord, String>);

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.next()?;
        let row = self.next_row;
        self.next_row += 1;
        Some((row, record.map_err(|e| format!("Failed to parse row: {e}"))))
    }
}

/// A win as it appears in an import file, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinCsvRow {
    pub team_name: String,
    pub hackathon_name: String,
    pub result: String,
    pub prize: i32,
    pub award_date: Option<String>,
    pub year: i32,
    pub link: Option<String>,
}

impl WinCsvRow {
    /// Map positional columns to fields.
    ///
    /// Numeric columns never fail here: unparseable values become zero and
    /// are caught by validation afterwards.
    pub fn from_record(record: &csv::StringRecord) -> Result<Self, String> {
        if record.len() < WIN_MIN_COLUMNS {
            return Err(format!(
                "Expected at least {WIN_MIN_COLUMNS} columns, got {}",
                record.len()
            ));
        }

        let cell = |i: usize| record.get(i).unwrap_or("").trim().to_string();
        let non_empty = |s: String| if s.is_empty() { None } else { Some(s) };

        Ok(Self {
            team_name: cell(0),
            hackathon_name: cell(1),
            result: cell(2),
            prize: parse_amount(&cell(3)),
            award_date: non_empty(cell(4)),
            year: parse_year(&cell(5)),
            link: non_empty(cell(6)),
        })
    }
}

/// Parse a money amount such as `"1 500 000 ₽"` or `"250,000"`.
///
/// Whitespace, commas and currency signs are stripped first. Anything that
/// still is not an integer yields `0`.
pub fn parse_amount(input: &str) -> i32 {
    let digits: String = input
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, ',' | '₽' | '$' | '€' | '£'))
        .collect();
    digits.parse().unwrap_or(0)
}

/// Parse a year cell; unparseable input yields `0`.
pub fn parse_year(input: &str) -> i32 {
    input.trim().parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const HEADER: &str = "team;hackathon;result;prize;award_date;year;link\n";

    fn rows(body: &str) -> Vec<(usize, Result<csv::StringRecord, String>)> {
        let input = format!("{HEADER}{body}");
        CsvRows::open(input.as_bytes(), WIN_MIN_COLUMNS)
            .unwrap()
            .collect()
    }

    #[test]
    fn amounts_tolerate_separators_and_currency() {
        assert_eq!(parse_amount("1 500 000 ₽"), 1_500_000);
        assert_eq!(parse_amount("250,000"), 250_000);
        assert_eq!(parse_amount("\u{a0}300\u{a0}000"), 300_000);
        assert_eq!(parse_amount(""), 0);
        assert_eq!(parse_amount("about a million"), 0);
    }

    #[test]
    fn year_defaults_to_zero() {
        assert_eq!(parse_year(" 2024 "), 2024);
        assert_eq!(parse_year("next year"), 0);
    }

    #[test]
    fn rows_are_numbered_from_two() {
        let rows = rows("A;Hack;1st;100;01.02.2024;2024\nB;Hack;2nd;50;;2024\n");
        let numbers: Vec<usize> = rows.iter().map(|(n, _)| *n).collect();
        assert_eq!(numbers, vec![2, 3]);
    }

    #[test]
    fn row_maps_fields_and_trims() {
        let rows = rows(" Alpha ; Big Hack ; 1 место ; 100 000 ; 05.03.2024 ; 2024 ; https://x.io \n");
        let record = rows[0].1.as_ref().unwrap();
        let row = WinCsvRow::from_record(record).unwrap();
        assert_eq!(
            row,
            WinCsvRow {
                team_name: "Alpha".into(),
                hackathon_name: "Big Hack".into(),
                result: "1 место".into(),
                prize: 100_000,
                award_date: Some("05.03.2024".into()),
                year: 2024,
                link: Some("https://x.io".into()),
            }
        );
    }

    #[test]
    fn short_row_is_a_row_error() {
        let rows = rows("Alpha;Hack;1st\n");
        let record = rows[0].1.as_ref().unwrap();
        let err = WinCsvRow::from_record(record).unwrap_err();
        assert!(err.contains("at least 6 columns"), "{err}");
    }

    #[test]
    fn link_column_is_optional() {
        let rows = rows("Alpha;Hack;1st;0;;2023\n");
        let row = WinCsvRow::from_record(rows[0].1.as_ref().unwrap()).unwrap();
        assert_eq!(row.link, None);
        assert_eq!(row.award_date, None);
    }

    #[test]
    fn narrow_header_is_rejected() {
        let result = CsvRows::open("team;hackathon;result\n".as_bytes(), WIN_MIN_COLUMNS);
        assert_matches!(result.err(), Some(CoreError::Validation(msg)) if msg.contains("at least 6"));
    }

    #[test]
    fn empty_input_is_rejected() {
        let result = CsvRows::open("".as_bytes(), WIN_MIN_COLUMNS);
        assert_matches!(result.err(), Some(CoreError::Validation(_)));
    }

    #[test]
    fn report_counts_add_up() {
        let mut report = ImportReport::default();
        report.record_imported();
        report.record_skipped(3, "team_name is required");
        report.record_imported();
        assert_eq!(report.total, 3);
        assert_eq!(report.imported, 2);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.errors, vec![ImportRowError { row: 3, message: "team_name is required".into() }]);
    }
}
