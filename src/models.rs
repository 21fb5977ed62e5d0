use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Serialize;

/// Placeholder for every missing or blank value (names, statuses, labels, sources).
pub const UNSPECIFIED: &str = "Non spécifié";

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    DateTime(NaiveDateTime),
}

impl CellValue {
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(value) => {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            CellValue::Number(value) => {
                if value.fract() == 0.0 && value.is_finite() {
                    Some(format!("{}", *value as i64))
                } else {
                    Some(value.to_string())
                }
            }
            CellValue::DateTime(value) => Some(value.format("%Y-%m-%d %H:%M:%S").to_string()),
        }
    }
}

pub type RawRow = BTreeMap<String, CellValue>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Resident,
    CareLabel,
    Status,
    Caregiver,
    Source,
    CompletedAt,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Resident,
        Field::CareLabel,
        Field::Status,
        Field::Caregiver,
        Field::Source,
        Field::CompletedAt,
    ];
}

#[derive(Debug, Clone, PartialEq)]
pub struct CareRecord {
    pub resident: Option<String>,
    pub care_label: String,
    pub status: String,
    pub caregiver: Option<String>,
    pub source: String,
    pub completed_at: Option<NaiveDateTime>,
}

impl CareRecord {
    pub fn resident_name(&self) -> String {
        crate::names::clean_name(self.resident.as_deref())
    }

    pub fn caregiver_name(&self) -> String {
        crate::names::clean_name(self.caregiver.as_deref())
    }

    pub fn is_completed(&self) -> bool {
        crate::status::is_completed(&self.status)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
    pub color: String,
}

/// Chart payload: every series and `colors` are aligned with `labels`.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Chart {
    pub labels: Vec<String>,
    pub series: Vec<Series>,
    pub colors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub label: String,
    pub counts: Vec<usize>,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub chart: Chart,
    pub ranked: Vec<RankedEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<Table>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Aggregation {
    NoData,
    Data(DashboardView),
}

impl Aggregation {
    pub fn view(&self) -> Option<&DashboardView> {
        match self {
            Aggregation::NoData => None,
            Aggregation::Data(view) => Some(view),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Aggregation::NoData)
    }
}
