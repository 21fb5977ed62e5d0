use crate::aggregate::rank_counts;
use crate::models::{Aggregation, CareRecord, Chart, DashboardView, Series};
use crate::status::status_color;

pub const QUALITY_SERIES: &str = "Actes";
pub const QUALITY_COLOR: &str = "#3b82f6";

pub fn quality_view(records: &[&CareRecord]) -> Aggregation {
    if records.is_empty() {
        return Aggregation::NoData;
    }

    let ranked = rank_counts(records.iter().map(|record| record.status.clone()));
    let labels: Vec<String> = ranked.iter().map(|entry| entry.label.clone()).collect();
    let colors: Vec<String> = labels
        .iter()
        .map(|label| status_color(label).to_string())
        .collect();

    Aggregation::Data(DashboardView {
        chart: Chart {
            series: vec![Series {
                name: QUALITY_SERIES.to_string(),
                values: ranked.iter().map(|entry| entry.value).collect(),
                color: QUALITY_COLOR.to_string(),
            }],
            labels,
            colors,
        },
        ranked,
        table: None,
    })
}
