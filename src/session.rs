use std::path::Path;

use chrono::NaiveDateTime;
use tracing::{debug, info};

use crate::aggregate::{aggregate, CaregiverMode, Tab};
use crate::columns::ColumnMap;
use crate::dates::{date_range, parse_date};
use crate::error::IngestError;
use crate::filter::Filter;
use crate::ingest;
use crate::models::{Aggregation, CareRecord, Field, RawRow, UNSPECIFIED};

/// Everything the dashboard knows about one loaded export.
#[derive(Debug, Clone)]
pub struct Session {
    columns: ColumnMap,
    records: Vec<CareRecord>,
    filter: Filter,
}

impl Session {
    pub fn load(rows: &[RawRow]) -> Self {
        let columns = ColumnMap::resolve(rows.first());
        let records: Vec<CareRecord> = rows.iter().map(|row| normalize(&columns, row)).collect();
        let filter = Filter::from_records(&records);

        let dated = records.iter().filter(|r| r.completed_at.is_some()).count();
        info!(records = records.len(), dated, "dataset loaded");
        Self {
            columns,
            records,
            filter,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, IngestError> {
        let rows = ingest::load_path(path)?;
        Ok(Self::load(&rows))
    }

    pub fn columns(&self) -> &ColumnMap {
        &self.columns
    }

    pub fn records(&self) -> &[CareRecord] {
        &self.records
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn filter_mut(&mut self) -> &mut Filter {
        &mut self.filter
    }

    pub fn filtered(&self) -> Vec<&CareRecord> {
        let filtered = self.filter.apply(&self.records);
        debug!(kept = filtered.len(), total = self.records.len(), "filters applied");
        filtered
    }

    pub fn date_range(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        date_range(&self.records)
    }

    pub fn view(&self, tab: Tab, mode: CaregiverMode) -> Aggregation {
        aggregate(tab, mode, &self.filtered())
    }
}

fn normalize(columns: &ColumnMap, row: &RawRow) -> CareRecord {
    let text = |field: Field| columns.cell(row, field).and_then(|cell| cell.as_text());
    let or_unspecified = |field: Field| text(field).unwrap_or_else(|| UNSPECIFIED.to_string());

    CareRecord {
        resident: text(Field::Resident),
        care_label: or_unspecified(Field::CareLabel),
        status: or_unspecified(Field::Status),
        caregiver: text(Field::Caregiver),
        source: or_unspecified(Field::Source),
        completed_at: columns.cell(row, Field::CompletedAt).and_then(parse_date),
    }
}
