use std::collections::BTreeMap;

use crate::models::{Aggregation, CareRecord, RankedEntry};
use crate::status::status_color;
use crate::{caregivers, operational, quality, residents};

pub const SIDE_LIST_LEN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Quality,
    Caregivers,
    Residents,
    Operational,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Quality, Tab::Caregivers, Tab::Residents, Tab::Operational];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Quality => "Qualité des soins",
            Tab::Caregivers => "Analyse intervenants",
            Tab::Residents => "Suivi résidents",
            Tab::Operational => "Opérationnel",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaregiverMode {
    #[default]
    Total,
    Average,
}

pub fn aggregate(tab: Tab, mode: CaregiverMode, records: &[&CareRecord]) -> Aggregation {
    match tab {
        Tab::Quality => quality::quality_view(records),
        Tab::Caregivers => caregivers::caregiver_view(records, mode),
        Tab::Residents => residents::resident_view(records),
        Tab::Operational => operational::operational_view(records),
    }
}

pub fn rank_desc<I>(values: I) -> Vec<RankedEntry>
where
    I: IntoIterator<Item = (String, f64)>,
{
    let mut ranked: Vec<RankedEntry> = values
        .into_iter()
        .map(|(label, value)| RankedEntry { label, value })
        .collect();
    ranked.sort_by(|a, b| {
        b.value
            .partial_cmp(&a.value)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked
}

pub fn top(ranked: &[RankedEntry]) -> Vec<RankedEntry> {
    ranked.iter().take(SIDE_LIST_LEN).cloned().collect()
}

pub fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

pub fn rank_counts<I>(keys: I) -> Vec<RankedEntry>
where
    I: IntoIterator<Item = String>,
{
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    rank_desc(counts.into_iter().map(|(label, count)| (label, count as f64)))
}

pub fn dominant_color(counts: &BTreeMap<String, usize>) -> String {
    let mut dominant: Option<(&str, usize)> = None;
    for (status, count) in counts {
        if dominant.map_or(true, |(_, best)| *count > best) {
            dominant = Some((status, *count));
        }
    }
    status_color(dominant.map_or("", |(status, _)| status)).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranking_is_descending_with_stable_ties() {
        let ranked = rank_counts(
            ["b", "c", "a", "c", "b", "a", "c", "c", "c"]
                .into_iter()
                .map(String::from),
        );
        let labels: Vec<&str> = ranked.iter().map(|entry| entry.label.as_str()).collect();
        assert_eq!(labels, ["c", "a", "b"]);
    }

    #[test]
    fn ranking_keeps_input_order_on_ties() {
        let ranked = rank_desc(vec![("z".to_string(), 1.0), ("y".to_string(), 1.0)]);
        assert_eq!(ranked[0].label, "z");
    }

    #[test]
    fn dominant_color_picks_most_frequent_status() {
        let mut counts = BTreeMap::new();
        counts.insert("Fait".to_string(), 1);
        counts.insert("Refus du résident".to_string(), 4);
        assert_eq!(dominant_color(&counts), crate::status::REFUSED_COLOR);
    }

    #[test]
    fn ratio_guards_division_by_zero() {
        assert_eq!(ratio(3, 0), 0.0);
        assert_eq!(ratio(3, 2), 1.5);
    }

    #[test]
    fn rounding_keeps_requested_precision() {
        assert_eq!(round_to(2.0 / 3.0, 2), 0.67);
        assert_eq!(round_to(90.04, 1), 90.0);
    }
}
