use std::fmt::Write;

use crate::aggregate::{CaregiverMode, Tab};
use crate::models::{Aggregation, RankedEntry};
use crate::operational::source_mix;
use crate::session::Session;

/// Side-list value formatting: two decimals, with whole numbers shown bare.
pub fn format_value(value: f64) -> String {
    let formatted = format!("{value:.2}");
    match formatted.strip_suffix(".00") {
        Some(whole) => whole.to_string(),
        None => formatted,
    }
}

fn side_list_title(tab: Tab) -> &'static str {
    match tab {
        Tab::Quality => "Répartition des actes",
        Tab::Caregivers => "Soins les plus refusés (par type)",
        Tab::Residents => "Top 5 des résidents avec le plus d'actes non faits",
        Tab::Operational => "Top 5 utilisation tablette (%)",
    }
}

fn write_list(output: &mut String, entries: &[RankedEntry]) {
    if entries.is_empty() {
        let _ = writeln!(output, "Aucune donnée à afficher.");
        return;
    }
    for entry in entries {
        let _ = writeln!(output, "- {}: {}", entry.label, format_value(entry.value));
    }
}

pub fn build_report(session: &Session, mode: CaregiverMode) -> String {
    let filtered = session.filtered();
    let mut output = String::new();

    let _ = writeln!(output, "# Tableau de bord d'analyse des soins");
    match session.date_range() {
        Some((start, end)) => {
            let _ = writeln!(
                output,
                "{} actes retenus sur {} (du {} au {})",
                filtered.len(),
                session.records().len(),
                start.format("%d/%m/%Y"),
                end.format("%d/%m/%Y")
            );
        }
        None => {
            let _ = writeln!(
                output,
                "{} actes retenus sur {}",
                filtered.len(),
                session.records().len()
            );
        }
    }

    for tab in Tab::ALL {
        let _ = writeln!(output);
        let _ = writeln!(output, "## {}", tab.title());

        let view = match session.view(tab, mode) {
            Aggregation::NoData => {
                let _ = writeln!(output, "Aucune donnée ne correspond aux filtres sélectionnés.");
                continue;
            }
            Aggregation::Data(view) => view,
        };

        let _ = writeln!(output, "### {}", side_list_title(tab));
        write_list(&mut output, &view.ranked);

        if let Some(table) = &view.table {
            let _ = writeln!(output);
            let _ = writeln!(output, "| {} |", table.headers.join(" | "));
            let _ = writeln!(output, "|{}", " --- |".repeat(table.headers.len()));
            for row in &table.rows {
                let counts: Vec<String> = row.counts.iter().map(usize::to_string).collect();
                let _ = writeln!(
                    output,
                    "| {} | {} | {} |",
                    row.label,
                    counts.join(" | "),
                    row.total
                );
            }
        }

        if tab == Tab::Operational {
            let _ = writeln!(output);
            let _ = writeln!(output, "### Détail par source");
            write_list(&mut output, &source_mix(&filtered));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Dimension;
    use crate::models::{CellValue, RawRow};

    fn export() -> Vec<RawRow> {
        let rows = [
            ("MME DUPONT", "IDE ASQ", "Fait", "Tablette"),
            ("MME DUPONT", "KINE", "Refus du résident", "Ordinateur"),
            ("M. LEROY", "IDE ASQ", "Absent(e)", "Tablette"),
        ];
        rows.iter()
            .map(|(resident, caregiver, status, source)| {
                [
                    ("Résident", resident),
                    ("Intervenant", caregiver),
                    ("État", status),
                    ("Source", source),
                    ("Information", &"Toilette"),
                ]
                .iter()
                .map(|(header, value)| (header.to_string(), CellValue::Text(value.to_string())))
                .collect()
            })
            .collect()
    }

    #[test]
    fn whole_values_drop_decimals() {
        assert_eq!(format_value(3.0), "3");
        assert_eq!(format_value(1.5), "1.50");
        assert_eq!(format_value(66.7), "66.70");
    }

    #[test]
    fn report_covers_every_tab() {
        let session = Session::load(&export());
        let report = build_report(&session, CaregiverMode::Total);
        for tab in Tab::ALL {
            assert!(report.contains(tab.title()));
        }
        assert!(report.contains("| Intervenant |"));
        assert!(report.contains("- Tablette: 2"));
    }

    #[test]
    fn report_marks_empty_selection() {
        let mut session = Session::load(&export());
        session.filter_mut().clear(Dimension::Caregiver);
        let report = build_report(&session, CaregiverMode::Average);
        assert_eq!(
            report
                .matches("Aucune donnée ne correspond aux filtres sélectionnés.")
                .count(),
            Tab::ALL.len()
        );
    }
}
