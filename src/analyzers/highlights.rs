use std::collections::BTreeMap;

use crate::models::{
    DailyRecord, Field, FieldCatalog, HighlightEntry, RankResult, RuleSet, Statistic,
};
use crate::utils::constants::{COLOR_YELLOW, DEFAULT_RECORD_TOP_N};
use crate::utils::units::{format_value, split_units};

/// Qualitative badges for a single day.
///
/// Every rule set is independent and returns its own entries; callers collect
/// them in evaluation order (heat, cold, precipitation, wind, records).
pub struct HighlightClassifier<'c> {
    catalog: &'c FieldCatalog,
    record_top_n: usize,
}

impl<'c> HighlightClassifier<'c> {
    pub fn new(catalog: &'c FieldCatalog) -> Self {
        Self {
            catalog,
            record_top_n: DEFAULT_RECORD_TOP_N,
        }
    }

    pub fn with_record_top_n(mut self, record_top_n: usize) -> Self {
        self.record_top_n = record_top_n;
        self
    }

    pub fn heat(&self, row: &DailyRecord) -> Option<HighlightEntry> {
        self.classify_rule(&self.catalog.heat, row)
    }

    pub fn cold(&self, row: &DailyRecord) -> Option<HighlightEntry> {
        self.classify_rule(&self.catalog.cold, row)
    }

    pub fn precipitation(&self, row: &DailyRecord) -> Option<HighlightEntry> {
        self.classify_rule(&self.catalog.precipitation, row)
    }

    pub fn wind(&self, row: &DailyRecord) -> Option<HighlightEntry> {
        self.classify_rule(&self.catalog.wind, row)
    }

    /// Day-of-year record badges: top fields first, then bottom fields, each in column order.
    pub fn records(
        &self,
        row: &DailyRecord,
        ranks: &BTreeMap<Field, RankResult>,
    ) -> Vec<HighlightEntry> {
        let top = self.catalog.top_fields();
        let bottom = self.catalog.bottom_fields();

        top.iter()
            .chain(bottom.iter())
            .filter_map(|field| ranks.get(field))
            .filter_map(|result| {
                let rank = result.rank.filter(|&r| r >= 1 && r <= self.record_top_n)?;
                let label = self.catalog.label(result.field);
                let label = if rank > 1 {
                    format!("#{} {}", rank, label)
                } else {
                    format!("Record {}", label)
                };
                let tooltip = self.record_tooltip(row, result, rank);
                entry(COLOR_YELLOW, label, tooltip)
            })
            .collect()
    }

    /// All badges for `row`; record badges only when `ranks` is given.
    pub fn classify(
        &self,
        row: &DailyRecord,
        ranks: Option<&BTreeMap<Field, RankResult>>,
    ) -> Vec<HighlightEntry> {
        let mut entries: Vec<HighlightEntry> = [
            self.heat(row),
            self.cold(row),
            self.precipitation(row),
            self.wind(row),
        ]
        .into_iter()
        .flatten()
        .collect();

        if let Some(ranks) = ranks {
            entries.extend(self.records(row, ranks));
        }
        entries
    }

    fn classify_rule(&self, rules: &RuleSet, row: &DailyRecord) -> Option<HighlightEntry> {
        let (field, value) = match rules.statistic {
            Statistic::Max => row.max_of(&rules.fields)?,
            Statistic::Min => row.min_of(&rules.fields)?,
        };
        let band = rules.classify(value)?;
        entry(band.color, band.label, self.value_tooltip(row, field))
    }

    fn value_tooltip(&self, row: &DailyRecord, field: Field) -> String {
        let Some(value) = row.get(field) else {
            return String::new();
        };
        let (name, unit) = split_units(field.display_name(), true);
        format!("The {} was {}.", name, format_value(value, &unit))
    }

    fn record_tooltip(&self, row: &DailyRecord, result: &RankResult, rank: usize) -> String {
        let Some(value) = row.get(result.field) else {
            return String::new();
        };
        let (name, unit) = split_units(result.field.display_name(), true);
        let mut tooltip = format!(
            "The {} ranks #{} at {}.",
            name,
            rank,
            format_value(value, &unit)
        );
        if rank == 1 {
            if let Some((date, previous)) = result.previous_record {
                tooltip.push_str(&format!(
                    " The previous record was in {} at {}!",
                    date.format("%Y"),
                    format_value(previous, &unit)
                ));
            }
        }
        tooltip
    }
}

/// Entries with an empty tooltip are suppressed.
fn entry(color: &str, label: impl Into<String>, tooltip: String) -> Option<HighlightEntry> {
    if tooltip.is_empty() {
        None
    } else {
        Some(HighlightEntry::new(color, label, tooltip))
    }
}
