use std::collections::BTreeMap;

use crate::aggregate::{rank_counts, rank_desc, ratio, round_to, top};
use crate::models::{Aggregation, CareRecord, Chart, DashboardView, RankedEntry, Series};
use crate::status::is_tablet;

pub const TABLET_SERIES: &str = "% Utilisation Tablette";
pub const TABLET_COLOR: &str = "#10b981";

#[derive(Debug, Default, Clone, Copy)]
struct SourceUsage {
    total: usize,
    tablet: usize,
}

impl SourceUsage {
    fn tablet_percentage(self) -> f64 {
        round_to(ratio(self.tablet, self.total) * 100.0, 1)
    }
}

pub fn operational_view(records: &[&CareRecord]) -> Aggregation {
    if records.is_empty() {
        return Aggregation::NoData;
    }

    let mut usage: BTreeMap<String, SourceUsage> = BTreeMap::new();
    for record in records {
        let entry = usage.entry(record.caregiver_name()).or_default();
        entry.total += 1;
        if is_tablet(&record.source) {
            entry.tablet += 1;
        }
    }

    let ranked = rank_desc(
        usage
            .iter()
            .map(|(caregiver, stats)| (caregiver.clone(), stats.tablet_percentage())),
    );
    let labels: Vec<String> = ranked.iter().map(|entry| entry.label.clone()).collect();

    Aggregation::Data(DashboardView {
        chart: Chart {
            series: vec![Series {
                name: TABLET_SERIES.to_string(),
                values: ranked.iter().map(|entry| entry.value).collect(),
                color: TABLET_COLOR.to_string(),
            }],
            colors: vec![TABLET_COLOR.to_string(); labels.len()],
            labels,
        },
        ranked: top(&ranked),
        table: None,
    })
}

/// Entries per input method, folding tablet and computer variants together.
pub fn source_mix(records: &[&CareRecord]) -> Vec<RankedEntry> {
    rank_counts(records.iter().map(|record| {
        if is_tablet(&record.source) {
            "Tablette".to_string()
        } else if record.source.to_lowercase().contains("ordi") {
            "Ordinateur".to_string()
        } else {
            record.source.clone()
        }
    }))
}
