use std::collections::{BTreeMap, BTreeSet};

use crate::aggregate::{dominant_color, rank_desc, top};
use crate::models::{Aggregation, CareRecord, Chart, DashboardView, Series};
use crate::status::status_color;

pub fn resident_view(records: &[&CareRecord]) -> Aggregation {
    if records.is_empty() {
        return Aggregation::NoData;
    }

    let mut statuses: BTreeSet<String> = BTreeSet::new();
    let mut per_resident: BTreeMap<String, BTreeMap<String, usize>> = BTreeMap::new();
    for record in records.iter().filter(|record| !record.is_completed()) {
        statuses.insert(record.status.clone());
        *per_resident
            .entry(record.resident_name())
            .or_default()
            .entry(record.status.clone())
            .or_insert(0) += 1;
    }

    let ranked = rank_desc(
        per_resident
            .iter()
            .map(|(resident, counts)| (resident.clone(), counts.values().sum::<usize>() as f64)),
    );
    let labels: Vec<String> = ranked.iter().map(|entry| entry.label.clone()).collect();

    let series = statuses
        .iter()
        .map(|status| Series {
            name: status.clone(),
            values: labels
                .iter()
                .map(|resident| per_resident[resident].get(status).copied().unwrap_or(0) as f64)
                .collect(),
            color: status_color(status).to_string(),
        })
        .collect();
    let colors = labels
        .iter()
        .map(|resident| dominant_color(&per_resident[resident]))
        .collect();

    Aggregation::Data(DashboardView {
        chart: Chart {
            labels,
            series,
            colors,
        },
        ranked: top(&ranked),
        table: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UNSPECIFIED;

    fn act(resident: &str, status: &str) -> CareRecord {
        CareRecord {
            resident: Some(resident.to_string()),
            care_label: "Toilette".to_string(),
            status: status.to_string(),
            caregiver: Some("IDE ASQ".to_string()),
            source: UNSPECIFIED.to_string(),
            completed_at: None,
        }
    }

    #[test]
    fn only_non_completed_acts_are_counted() {
        let records = vec![
            act("MME DUPONT Jacqueline", "Refus du résident"),
            act("MME DUPONT Jacqueline (chambre 12)", "Refus du résident"),
            act("MME DUPONT Jacqueline", "Absent(e)"),
            act("MME DUPONT Jacqueline", "Fait"),
            act("M. LEROY", "FAIT"),
            act("M. LEROY", "Reporté"),
        ];
        let filtered: Vec<&CareRecord> = records.iter().collect();
        let result = resident_view(&filtered);
        let view = result.view().unwrap();

        assert_eq!(view.chart.labels, ["MME DUPONT Jacqueline", "M. LEROY"]);
        let names: Vec<&str> = view.chart.series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Absent(e)", "Refus du résident", "Reporté"]);

        let refusals = &view.chart.series[1];
        assert_eq!(refusals.values, [2.0, 0.0]);
        assert_eq!(view.ranked[0].value, 3.0);
        assert_eq!(view.ranked[1].value, 1.0);
    }

    #[test]
    fn all_completed_yields_an_empty_chart_not_no_data() {
        let records = vec![act("M. LEROY", "Fait")];
        let filtered: Vec<&CareRecord> = records.iter().collect();
        let result = resident_view(&filtered);
        let view = result.view().unwrap();
        assert!(view.chart.labels.is_empty());
        assert!(view.ranked.is_empty());
    }

    #[test]
    fn side_list_keeps_top_five() {
        let records: Vec<CareRecord> = (0..7)
            .map(|index| act(&format!("Résident {index}"), "Absent(e)"))
            .collect();
        let filtered: Vec<&CareRecord> = records.iter().collect();
        let result = resident_view(&filtered);
        let view = result.view().unwrap();
        assert_eq!(view.ranked.len(), 5);
        assert_eq!(view.chart.labels.len(), 7);
    }

    #[test]
    fn rerunning_is_idempotent() {
        let records = vec![
            act("MME DUPONT", "Refus du résident"),
            act("M. LEROY", "Absent(e)"),
            act("M. LEROY", "Reporté"),
            act("MME MARTIN", "Absent(e)"),
        ];
        let filtered: Vec<&CareRecord> = records.iter().collect();
        assert_eq!(resident_view(&filtered), resident_view(&filtered));
    }

    #[test]
    fn empty_input_has_no_data() {
        assert!(resident_view(&[]).is_empty());
    }
}
