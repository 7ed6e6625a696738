//! Strongly-typed CSV reader for daily OHLC files.

use crate::data::DataError;
use crate::domain::PriceObservation;
use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const DATE: &str = "Date";
const OPEN: &str = "Open";
const HIGH: &str = "High";
const LOW: &str = "Low";
const CLOSE: &str = "Close";

/// Column positions resolved from the header row.
#[derive(Debug, Clone, Copy)]
struct Columns {
    date: usize,
    open: usize,
    high: usize,
    low: usize,
    close: usize,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self, DataError> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .ok_or(DataError::MissingColumn { column: name })
        };
        Ok(Self {
            date: find(DATE)?,
            open: find(OPEN)?,
            high: find(HIGH)?,
            low: find(LOW)?,
            close: find(CLOSE)?,
        })
    }
}

/// Read observations from a CSV file with a `Date,Open,High,Low,Close` header.
pub fn read_csv(path: &Path) -> Result<Vec<PriceObservation>, DataError> {
    let file = File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let observations = read_csv_from(file)?;
    log::debug!("loaded {} observations from {}", observations.len(), path.display());
    Ok(observations)
}

/// Read observations from any CSV source.
///
/// Header names match case-insensitively; extra columns are ignored. Rows
/// must be strictly ascending by date.
pub fn read_csv_from<R: Read>(source: R) -> Result<Vec<PriceObservation>, DataError> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(source);

    let headers = reader.headers()?.clone();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(DataError::EmptyFile);
    }
    let columns = Columns::resolve(&headers)?;

    let mut observations: Vec<PriceObservation> = Vec::new();
    let mut insane = 0usize;

    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let line = record
            .position()
            .map_or(i as u64 + 2, |pos| pos.line());
        let obs = parse_record(&record, columns, line)?;

        if let Some(prev) = observations.last() {
            if obs.date <= prev.date {
                return Err(DataError::OutOfOrder {
                    line,
                    previous: prev.date,
                    current: obs.date,
                });
            }
        }
        if !obs.is_sane() {
            insane += 1;
        }
        observations.push(obs);
    }

    if observations.is_empty() {
        return Err(DataError::EmptyFile);
    }
    if insane > 0 {
        log::warn!("{insane} rows have inconsistent OHLC values; only Close is charted");
    }
    Ok(observations)
}

fn parse_record(
    record: &StringRecord,
    columns: Columns,
    line: u64,
) -> Result<PriceObservation, DataError> {
    let field = |idx: usize| record.get(idx).unwrap_or("").trim();

    let raw_date = field(columns.date);
    let date = parse_date(raw_date).ok_or_else(|| DataError::InvalidField {
        line,
        column: DATE,
        value: raw_date.to_string(),
    })?;

    let price = |idx: usize, column: &'static str| -> Result<f64, DataError> {
        let raw = field(idx);
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| DataError::InvalidField {
                line,
                column,
                value: raw.to_string(),
            })
    };

    Ok(PriceObservation {
        date,
        open: price(columns.open, OPEN)?,
        high: price(columns.high, HIGH)?,
        low: price(columns.low, LOW)?,
        close: price(columns.close, CLOSE)?,
    })
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    ["%Y-%m-%d", "%Y/%m/%d"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"]
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(text: &str) -> Result<Vec<PriceObservation>, DataError> {
        read_csv_from(text.as_bytes())
    }

    #[test]
    fn reads_minimal_file() {
        let obs = read(
            "Date,Open,High,Low,Close\n\
             2024-01-02,100,101,99,100.5\n\
             2024-01-03,100.5,103,100,102.25\n",
        )
        .unwrap();
        assert_eq!(obs.len(), 2);
        assert_eq!(obs[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(obs[1].close, 102.25);
    }

    #[test]
    fn header_order_and_case_do_not_matter() {
        let obs = read(
            "close, volume ,DATE,low,high,open\n\
             10.5,1000,2024/03/01,9,11,10\n",
        )
        .unwrap();
        assert_eq!(obs[0].close, 10.5);
        assert_eq!(obs[0].open, 10.0);
        assert_eq!(obs[0].date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn datetime_dates_keep_the_day() {
        let obs = read("Date,Open,High,Low,Close\n2024-05-06 16:00:00,1,1,1,1\n").unwrap();
        assert_eq!(obs[0].date, NaiveDate::from_ymd_opt(2024, 5, 6).unwrap());
    }

    #[test]
    fn missing_close_column_is_named() {
        let err = read("Date,Open,High,Low\n2024-01-02,1,1,1\n").unwrap_err();
        assert!(matches!(err, DataError::MissingColumn { column: "Close" }));
    }

    #[test]
    fn header_only_is_empty() {
        let err = read("Date,Open,High,Low,Close\n").unwrap_err();
        assert!(matches!(err, DataError::EmptyFile));
    }

    #[test]
    fn zero_bytes_is_empty() {
        assert!(matches!(read("").unwrap_err(), DataError::EmptyFile));
    }

    #[test]
    fn bad_number_reports_line_and_column() {
        let err = read(
            "Date,Open,High,Low,Close\n\
             2024-01-02,1,1,1,1\n\
             2024-01-03,1,1,1,abc\n",
        )
        .unwrap_err();
        match err {
            DataError::InvalidField { line, column, value } => {
                assert_eq!(line, 3);
                assert_eq!(column, "Close");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn nan_price_is_rejected() {
        let err = read("Date,Open,High,Low,Close\n2024-01-02,1,1,1,NaN\n").unwrap_err();
        assert!(matches!(err, DataError::InvalidField { column: "Close", .. }));
    }

    #[test]
    fn bad_date_is_rejected() {
        let err = read("Date,Open,High,Low,Close\n02.01.2024,1,1,1,1\n").unwrap_err();
        assert!(matches!(err, DataError::InvalidField { column: "Date", .. }));
    }

    #[test]
    fn descending_dates_are_rejected() {
        let err = read(
            "Date,Open,High,Low,Close\n\
             2024-01-03,1,1,1,1\n\
             2024-01-02,1,1,1,1\n",
        )
        .unwrap_err();
        assert!(matches!(err, DataError::OutOfOrder { line: 3, .. }));
    }

    #[test]
    fn ragged_row_is_a_csv_error() {
        let err = read("Date,Open,High,Low,Close\n2024-01-02,1,1\n").unwrap_err();
        assert!(matches!(err, DataError::Csv(_)));
    }
}
