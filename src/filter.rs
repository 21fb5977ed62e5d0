use std::collections::BTreeSet;

use crate::models::CareRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    Resident,
    Caregiver,
    CareLabel,
    Status,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Resident,
        Dimension::Caregiver,
        Dimension::CareLabel,
        Dimension::Status,
    ];

    pub fn key(self, record: &CareRecord) -> String {
        match self {
            Dimension::Resident => record.resident_name(),
            Dimension::Caregiver => record.caregiver_name(),
            Dimension::CareLabel => record.care_label.clone(),
            Dimension::Status => record.status.clone(),
        }
    }

    fn index(self) -> usize {
        match self {
            Dimension::Resident => 0,
            Dimension::Caregiver => 1,
            Dimension::CareLabel => 2,
            Dimension::Status => 3,
        }
    }
}

/// Accepted values per dimension. A record passes only if every dimension accepts it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Filter {
    options: [Vec<String>; 4],
    accepted: [BTreeSet<String>; 4],
}

impl Filter {
    pub fn from_records(records: &[CareRecord]) -> Self {
        let mut options: [BTreeSet<String>; 4] = Default::default();
        for record in records {
            for dimension in Dimension::ALL {
                options[dimension.index()].insert(dimension.key(record));
            }
        }

        let accepted = options.clone();
        Self {
            options: options.map(|values| values.into_iter().collect()),
            accepted,
        }
    }

    pub fn options(&self, dimension: Dimension) -> &[String] {
        &self.options[dimension.index()]
    }

    pub fn search_options(&self, dimension: Dimension, term: &str) -> Vec<&str> {
        let term = term.trim().to_lowercase();
        self.options(dimension)
            .iter()
            .filter(|option| option.to_lowercase().contains(&term))
            .map(String::as_str)
            .collect()
    }

    pub fn accepted(&self, dimension: Dimension) -> &BTreeSet<String> {
        &self.accepted[dimension.index()]
    }

    pub fn select<I, S>(&mut self, dimension: Dimension, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.accepted[dimension.index()] = values.into_iter().map(Into::into).collect();
    }

    pub fn toggle(&mut self, dimension: Dimension, value: &str, accepted: bool) {
        let set = &mut self.accepted[dimension.index()];
        if accepted {
            set.insert(value.to_string());
        } else {
            set.remove(value);
        }
    }

    pub fn select_all(&mut self, dimension: Dimension) {
        let index = dimension.index();
        self.accepted[index] = self.options[index].iter().cloned().collect();
    }

    pub fn clear(&mut self, dimension: Dimension) {
        self.accepted[dimension.index()].clear();
    }

    pub fn reset(&mut self) {
        for dimension in Dimension::ALL {
            self.select_all(dimension);
        }
    }

    pub fn accepts(&self, record: &CareRecord) -> bool {
        Dimension::ALL
            .iter()
            .all(|dimension| self.accepted(*dimension).contains(&dimension.key(record)))
    }

    pub fn apply<'a>(&self, records: &'a [CareRecord]) -> Vec<&'a CareRecord> {
        records.iter().filter(|record| self.accepts(record)).collect()
    }
}
