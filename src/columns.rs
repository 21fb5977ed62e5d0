use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::models::{CellValue, Field, RawRow};

/// Header spellings in priority order; the first doubles as the fallback header.
pub fn aliases(field: Field) -> &'static [&'static str] {
    match field {
        Field::Resident => &["Résident", "Resident", "Nom du résident", "Patient"],
        Field::CareLabel => &["Information", "Soin", "Acte", "Libellé"],
        Field::Status => &["État", "Etat", "Statut", "Status"],
        Field::Caregiver => &["Intervenant", "Soignant", "Signataire", "Auteur"],
        Field::Source => &["Source", "Origine", "Support"],
        Field::CompletedAt => &["Date fait", "Date de réalisation", "Date réalisation", "Date"],
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Resolution {
    header: String,
    matched: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMap {
    resolved: BTreeMap<Field, Resolution>,
}

impl ColumnMap {
    /// Maps each field to the first alias present among the first row's keys, compared
    /// trimmed and case-insensitively. Unmatched fields fall back to their first alias.
    pub fn resolve(first_row: Option<&RawRow>) -> Self {
        let observed: Vec<&str> = first_row
            .map(|row| row.keys().map(String::as_str).collect())
            .unwrap_or_default();

        let mut resolved = BTreeMap::new();
        for field in Field::ALL {
            let found = aliases(field).iter().find_map(|alias| {
                let wanted = normalize_header(alias);
                observed
                    .iter()
                    .find(|header| normalize_header(header) == wanted)
                    .copied()
            });

            let resolution = match found {
                Some(header) => {
                    debug!(?field, header, "resolved column");
                    Resolution {
                        header: header.to_string(),
                        matched: true,
                    }
                }
                None => {
                    let fallback = aliases(field)[0];
                    warn!(?field, fallback, "no matching column, field will be empty");
                    Resolution {
                        header: fallback.to_string(),
                        matched: false,
                    }
                }
            };
            resolved.insert(field, resolution);
        }

        Self { resolved }
    }

    pub fn header(&self, field: Field) -> &str {
        self.resolved
            .get(&field)
            .map(|resolution| resolution.header.as_str())
            .unwrap_or_else(|| aliases(field)[0])
    }

    pub fn unresolved(&self) -> Vec<Field> {
        self.resolved
            .iter()
            .filter(|(_, resolution)| !resolution.matched)
            .map(|(field, _)| *field)
            .collect()
    }

    /// Looks a field up in a raw row; absent headers and empty cells both yield `None`.
    pub fn cell<'a>(&self, row: &'a RawRow, field: Field) -> Option<&'a CellValue> {
        row.get(self.header(field))
            .filter(|value| !matches!(value, CellValue::Empty))
    }
}

fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(headers: &[&str]) -> RawRow {
        headers
            .iter()
            .map(|header| (header.to_string(), CellValue::Text("x".to_string())))
            .collect()
    }

    #[test]
    fn matches_headers_case_insensitively_and_trimmed() {
        let first = row(&["  résident ", "ÉTAT", "Intervenant"]);
        let map = ColumnMap::resolve(Some(&first));
        assert_eq!(map.header(Field::Resident), "  résident ");
        assert_eq!(map.header(Field::Status), "ÉTAT");
        assert_eq!(map.header(Field::Caregiver), "Intervenant");
    }

    #[test]
    fn first_alias_wins_on_ambiguity() {
        let first = row(&["Date", "Date fait"]);
        let map = ColumnMap::resolve(Some(&first));
        assert_eq!(map.header(Field::CompletedAt), "Date fait");
    }

    #[test]
    fn missing_columns_fall_back_to_default_header() {
        let first = row(&["Résident"]);
        let map = ColumnMap::resolve(Some(&first));
        assert_eq!(map.header(Field::Source), "Source");
        assert!(map.unresolved().contains(&Field::Source));
        assert!(!map.unresolved().contains(&Field::Resident));

        let other = row(&["Résident", "Colonne inconnue"]);
        assert!(map.cell(&other, Field::Source).is_none());
    }

    #[test]
    fn empty_input_resolves_everything_to_defaults() {
        let map = ColumnMap::resolve(None);
        assert_eq!(map.unresolved().len(), Field::ALL.len());
        assert_eq!(map.header(Field::Status), "État");
    }

    #[test]
    fn empty_cells_read_as_absent() {
        let map = ColumnMap::resolve(Some(&row(&["État"])));
        let mut blank = RawRow::new();
        blank.insert("État".to_string(), CellValue::Empty);
        assert!(map.cell(&blank, Field::Status).is_none());
    }
}
