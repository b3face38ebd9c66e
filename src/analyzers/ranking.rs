use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::models::{Extreme, Field, FieldCatalog, RankResult, Subset};

/// Standings of a window's valid readings for one field.
///
/// Ranks use the "max" tie-break: a reading's descending rank is the number of
/// valid readings greater than or equal to it.
#[derive(Debug, Clone)]
pub struct FieldStandings {
    sorted: Vec<f64>,
    extreme: Extreme,
}

impl FieldStandings {
    pub fn new(values: impl IntoIterator<Item = f64>, extreme: Extreme) -> Self {
        let mut sorted: Vec<f64> = values.into_iter().collect();
        sorted.sort_by(f64::total_cmp);
        Self { sorted, extreme }
    }

    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    pub fn descending_rank(&self, value: f64) -> usize {
        self.sorted.len() - self.sorted.partition_point(|&x| x < value)
    }

    /// 1 for the most extreme reading in this field's record direction.
    pub fn rank(&self, value: f64) -> usize {
        let descending = self.descending_rank(value);
        match self.extreme {
            Extreme::Max => descending,
            Extreme::Min => self.sorted.len() - descending + 1,
        }
    }
}

/// Ranks the selected date against a window and finds prior record holders.
pub struct RecordRanker<'c> {
    catalog: &'c FieldCatalog,
}

impl<'c> RecordRanker<'c> {
    pub fn new(catalog: &'c FieldCatalog) -> Self {
        Self { catalog }
    }

    /// Rank `columns` for `selected_date` within `subset`.
    ///
    /// Columns without an extreme direction, or without a single valid reading
    /// in the window, are left out of the result.
    pub fn rank_subset(
        &self,
        subset: &Subset<'_>,
        columns: &[Field],
        selected_date: NaiveDate,
    ) -> BTreeMap<Field, RankResult> {
        let selected = subset.get(selected_date);
        let mut results = BTreeMap::new();

        for &field in columns {
            let Some(extreme) = self.catalog.extreme(field) else {
                continue;
            };
            let standings = FieldStandings::new(subset.values(field), extreme);
            if standings.is_empty() {
                continue;
            }

            let rank = selected
                .and_then(|r| r.get(field))
                .map(|v| standings.rank(v));

            // most recent runner-up
            let previous_record = subset
                .records()
                .filter_map(|r| r.get(field).map(|v| (r.date, v)))
                .filter(|&(_, v)| standings.rank(v) == 2)
                .last();

            results.insert(
                field,
                RankResult {
                    field,
                    rank,
                    total: standings.len(),
                    previous_record,
                },
            );
        }

        results
    }
}
