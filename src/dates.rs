use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use tracing::warn;

use crate::models::{CareRecord, CellValue};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

const DATETIME_FORMATS: [&str; 8] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d/%m/%Y %Hh%M",
    "%d-%m-%Y %H:%M",
];

const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y/%m/%d"];

/// Spreadsheet serial day zero. Anchoring on Dec 30 absorbs the 1900 leap-year miscount.
pub fn serial_epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Converts a cell into a timestamp. Unparseable values are logged and read as no date.
pub fn parse_date(value: &CellValue) -> Option<NaiveDateTime> {
    match value {
        CellValue::Empty => None,
        CellValue::DateTime(value) => Some(*value),
        CellValue::Number(serial) => {
            let parsed = from_serial(*serial);
            if parsed.is_none() {
                warn!(serial, "spreadsheet date serial out of range");
            }
            parsed
        }
        CellValue::Text(text) => {
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            let parsed = parse_text(text);
            if parsed.is_none() {
                warn!(value = text, "unparseable date");
            }
            parsed
        }
    }
}

fn from_serial(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() {
        return None;
    }
    let millis = (serial * MILLIS_PER_DAY).round();
    if millis.abs() > i64::MAX as f64 / 2.0 {
        return None;
    }
    serial_epoch().checked_add_signed(Duration::try_milliseconds(millis as i64)?)
}

// ISO forms first, then day-first (French) forms.
fn parse_text(text: &str) -> Option<NaiveDateTime> {
    if let Ok(value) = DateTime::parse_from_rfc3339(text) {
        return Some(value.naive_local());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

pub fn date_range<'a, I>(records: I) -> Option<(NaiveDateTime, NaiveDateTime)>
where
    I: IntoIterator<Item = &'a CareRecord>,
{
    records
        .into_iter()
        .filter_map(|record| record.completed_at)
        .fold(None, |range, value| match range {
            None => Some((value, value)),
            Some((min, max)) => Some((min.min(value), max.max(value))),
        })
}
