use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::aggregate::{
    dominant_color, rank_counts, rank_desc, ratio, round_to, top, CaregiverMode,
};
use crate::models::{
    Aggregation, CareRecord, Chart, DashboardView, RankedEntry, Series, Table, TableRow,
};
use crate::status::{is_refusal, status_color};

const COMPLETED_SERIES: &str = "Soins réalisés";
const AVERAGE_SERIES: &str = "Moyenne de soins/jour";
const COMPLETED_COLOR: &str = "#3b82f6";
const AVERAGE_COLOR: &str = "#16a34a";

#[derive(Debug, Default)]
struct CaregiverTally {
    counts: BTreeMap<String, usize>,
    total: usize,
    completed: usize,
    completed_dated: usize,
    active_days: BTreeSet<NaiveDate>,
}

impl CaregiverTally {
    fn daily_average(&self) -> f64 {
        round_to(ratio(self.completed_dated, self.active_days.len()), 2)
    }
}

pub fn caregiver_view(records: &[&CareRecord], mode: CaregiverMode) -> Aggregation {
    if records.is_empty() {
        return Aggregation::NoData;
    }

    let statuses: Vec<String> = records
        .iter()
        .map(|record| record.status.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut tallies: BTreeMap<String, CaregiverTally> = BTreeMap::new();
    for record in records {
        let tally = tallies.entry(record.caregiver_name()).or_default();
        *tally.counts.entry(record.status.clone()).or_insert(0) += 1;
        tally.total += 1;
        if record.is_completed() {
            tally.completed += 1;
            if let Some(completed_at) = record.completed_at {
                tally.completed_dated += 1;
                tally.active_days.insert(completed_at.date());
            }
        }
    }

    let by_total = rank_desc(
        tallies
            .iter()
            .map(|(name, tally)| (name.clone(), tally.total as f64)),
    );
    let ranking: Vec<RankedEntry> = match mode {
        CaregiverMode::Total => by_total.clone(),
        CaregiverMode::Average => rank_desc(
            tallies
                .iter()
                .map(|(name, tally)| (name.clone(), tally.daily_average())),
        ),
    };

    let labels: Vec<String> = ranking.iter().map(|entry| entry.label.clone()).collect();

    let mut series: Vec<Series> = statuses
        .iter()
        .map(|status| Series {
            name: status.clone(),
            values: labels
                .iter()
                .map(|name| tallies[name].counts.get(status).copied().unwrap_or(0) as f64)
                .collect(),
            color: status_color(status).to_string(),
        })
        .collect();
    series.push(match mode {
        CaregiverMode::Total => Series {
            name: COMPLETED_SERIES.to_string(),
            values: labels
                .iter()
                .map(|name| tallies[name].completed as f64)
                .collect(),
            color: COMPLETED_COLOR.to_string(),
        },
        CaregiverMode::Average => Series {
            name: AVERAGE_SERIES.to_string(),
            values: ranking.iter().map(|entry| entry.value).collect(),
            color: AVERAGE_COLOR.to_string(),
        },
    });

    let colors = labels
        .iter()
        .map(|name| dominant_color(&tallies[name].counts))
        .collect();

    let refused = rank_counts(
        records
            .iter()
            .filter(|record| is_refusal(&record.status))
            .map(|record| record.care_label.clone()),
    );

    let table = Table {
        headers: std::iter::once("Intervenant".to_string())
            .chain(statuses.iter().cloned())
            .chain(std::iter::once("Total".to_string()))
            .collect(),
        rows: by_total
            .iter()
            .map(|entry| {
                let tally = &tallies[&entry.label];
                let counts: Vec<usize> = statuses
                    .iter()
                    .map(|status| tally.counts.get(status).copied().unwrap_or(0))
                    .collect();
                TableRow {
                    label: entry.label.clone(),
                    total: counts.iter().sum(),
                    counts,
                }
            })
            .collect(),
    };

    Aggregation::Data(DashboardView {
        chart: Chart {
            labels,
            series,
            colors,
        },
        ranked: top(&refused),
        table: Some(table),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UNSPECIFIED;
    use chrono::NaiveDateTime;

    fn at(day: u32, hour: u32) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(2025, 9, day).and_then(|date| date.and_hms_opt(hour, 0, 0))
    }

    fn act(
        caregiver: &str,
        label: &str,
        status: &str,
        completed_at: Option<NaiveDateTime>,
    ) -> CareRecord {
        CareRecord {
            resident: Some("MME DUPONT".to_string()),
            care_label: label.to_string(),
            status: status.to_string(),
            caregiver: Some(caregiver.to_string()),
            source: UNSPECIFIED.to_string(),
            completed_at,
        }
    }

    fn dataset() -> Vec<CareRecord> {
        vec![
            act("IDE ASQ", "Toilette", "Fait", at(1, 8)),
            act("IDE ASQ", "Toilette", "Fait", at(1, 14)),
            act("IDE ASQ (remplaçante)", "Pansement", "Fait", at(2, 9)),
            act("IDE ASQ", "Marche", "Refus du résident", None),
            act("KINE", "Marche", "Fait", None),
            act("KINE", "Marche", "Refus du résident", None),
            act("AS Nuit", "Change", "Absent(e)", None),
        ]
    }

    #[test]
    fn table_totals_equal_status_sums() {
        let records = dataset();
        let filtered: Vec<&CareRecord> = records.iter().collect();
        let result = caregiver_view(&filtered, CaregiverMode::Total);
        let table = result.view().unwrap().table.clone().unwrap();
        assert_eq!(table.headers.first().map(String::as_str), Some("Intervenant"));
        assert_eq!(table.headers.last().map(String::as_str), Some("Total"));
        for row in &table.rows {
            assert_eq!(row.total, row.counts.iter().sum::<usize>());
            assert_eq!(row.counts.len(), table.headers.len() - 2);
        }
        assert_eq!(table.rows[0].label, "IDE ASQ");
        assert_eq!(table.rows[0].total, 4);
    }

    #[test]
    fn total_mode_ranks_by_total_and_counts_completions() {
        let records = dataset();
        let filtered: Vec<&CareRecord> = records.iter().collect();
        let result = caregiver_view(&filtered, CaregiverMode::Total);
        let chart = &result.view().unwrap().chart;
        assert_eq!(chart.labels, ["IDE ASQ", "KINE", "AS Nuit"]);
        let completed = chart.series.last().unwrap();
        assert_eq!(completed.name, COMPLETED_SERIES);
        assert_eq!(completed.values, [3.0, 1.0, 0.0]);
        for series in &chart.series {
            assert_eq!(series.values.len(), chart.labels.len());
        }
    }

    #[test]
    fn average_mode_divides_by_distinct_days() {
        let records = dataset();
        let filtered: Vec<&CareRecord> = records.iter().collect();
        let result = caregiver_view(&filtered, CaregiverMode::Average);
        let chart = &result.view().unwrap().chart;
        let average = chart.series.last().unwrap();
        assert_eq!(average.name, AVERAGE_SERIES);

        let ide = chart.labels.iter().position(|label| label == "IDE ASQ").unwrap();
        let kine = chart.labels.iter().position(|label| label == "KINE").unwrap();
        assert!((average.values[ide] - 1.5).abs() < 1e-9);
        assert_eq!(average.values[kine], 0.0);
        assert_eq!(chart.labels[0], "IDE ASQ");
        assert!(average.values.iter().all(|value| value.is_finite()));
    }

    #[test]
    fn side_list_ranks_refused_care_labels() {
        let mut records = dataset();
        records.push(act("AS Nuit", "Toilette", "Refus de soin", None));
        let filtered: Vec<&CareRecord> = records.iter().collect();
        let result = caregiver_view(&filtered, CaregiverMode::Total);
        let ranked = &result.view().unwrap().ranked;
        assert_eq!(ranked[0].label, "Marche");
        assert_eq!(ranked[0].value, 2.0);
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn side_list_is_capped_at_five() {
        let records: Vec<CareRecord> = (0..8)
            .map(|index| act("KINE", &format!("Soin {index}"), "Refus", None))
            .collect();
        let filtered: Vec<&CareRecord> = records.iter().collect();
        let result = caregiver_view(&filtered, CaregiverMode::Average);
        assert_eq!(result.view().unwrap().ranked.len(), 5);
    }

    #[test]
    fn rerunning_is_idempotent_in_both_modes() {
        let records = dataset();
        let filtered: Vec<&CareRecord> = records.iter().collect();
        for mode in [CaregiverMode::Total, CaregiverMode::Average] {
            assert_eq!(caregiver_view(&filtered, mode), caregiver_view(&filtered, mode));
        }
    }

    #[test]
    fn empty_input_has_no_data() {
        assert!(caregiver_view(&[], CaregiverMode::Total).is_empty());
        assert!(caregiver_view(&[], CaregiverMode::Average).is_empty());
    }
}
