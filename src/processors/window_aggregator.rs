use chrono::{Datelike, NaiveDate};
use tracing::{debug, info};

use crate::analyzers::{HighlightClassifier, HistogramBinner, RecordRanker};
use crate::config::AnalysisConfig;
use crate::error::{FlashError, Result};
use crate::models::{
    Field, FieldCatalog, HighlightEntry, Report, StationSeries, Subset, WindowPanels,
};
use crate::utils::constants::{FIRST_ROW_Y_LABEL, PAST_YEARS_LABEL};

/// A lookback window over the series ending at the selected date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    /// The selected month-day in every year up to the selected date.
    PastYears,
    /// Every row within this many days before the selected date.
    Trailing(i64),
}

impl Window {
    pub fn label(&self) -> String {
        match self {
            Window::PastYears => PAST_YEARS_LABEL.to_string(),
            Window::Trailing(days) => format!("Past {} Days", days),
        }
    }

    pub fn select<'a>(&self, station: &'a StationSeries, date: NaiveDate) -> Subset<'a> {
        match *self {
            Window::PastYears => station.series.same_calendar_day(date),
            Window::Trailing(days) => station.series.trailing(date, days),
        }
    }
}

/// Runs binning over every window and highlights over the calendar-day window.
pub struct WindowAggregator<'c> {
    catalog: &'c FieldCatalog,
    config: &'c AnalysisConfig,
}

impl<'c> WindowAggregator<'c> {
    pub fn new(catalog: &'c FieldCatalog, config: &'c AnalysisConfig) -> Self {
        Self { catalog, config }
    }

    pub fn windows(&self) -> Vec<Window> {
        std::iter::once(Window::PastYears)
            .chain(self.config.trailing_days.iter().map(|&d| Window::Trailing(d)))
            .collect()
    }

    /// Recompute every window for `selected_date`. Nothing is cached between calls.
    pub fn analyze(&self, station: &StationSeries, selected_date: NaiveDate) -> Result<Report> {
        if station.series.get(selected_date).is_none() {
            return Err(FlashError::DateNotInSeries(selected_date));
        }

        let binner = HistogramBinner::new(self.catalog);
        let mut windows = Vec::new();
        let mut highlights = Vec::new();

        for window in self.windows() {
            let subset = window.select(station, selected_date);
            debug!(window = %window.label(), days = subset.len(), "selected window");

            if window == Window::PastYears {
                highlights = self.highlights(&subset, selected_date);
            }

            let panels = Field::OBSERVED
                .iter()
                .enumerate()
                .map(|(i, &field)| {
                    let y_label = if i < self.config.panel_columns {
                        FIRST_ROW_Y_LABEL
                    } else {
                        ""
                    };
                    binner.build_panel(&subset, field, selected_date, y_label)
                })
                .collect();

            windows.push(WindowPanels {
                label: window.label(),
                title: self.title(station, window, &subset, selected_date),
                start_date: subset.start_date(),
                day_count: subset.len(),
                columns: self.config.panel_columns,
                panels,
            });
        }

        info!(
            station = %station.metadata.stid,
            date = %selected_date,
            highlights = highlights.len(),
            "analysis complete"
        );

        Ok(Report {
            station: station.metadata.stid.clone(),
            station_name: station.metadata.title(),
            selected_date,
            windows,
            highlights,
        })
    }

    /// Highlights for the selected day; record badges need enough calendar-day history.
    pub fn highlights(&self, subset: &Subset<'_>, selected_date: NaiveDate) -> Vec<HighlightEntry> {
        let Some(row) = subset.get(selected_date) else {
            return Vec::new();
        };
        let classifier =
            HighlightClassifier::new(self.catalog).with_record_top_n(self.config.record_top_n);

        if subset.len() > self.config.record_min_history {
            let ranks = RecordRanker::new(self.catalog).rank_subset(
                subset,
                &self.catalog.ranked_fields(),
                selected_date,
            );
            classifier.classify(row, Some(&ranks))
        } else {
            debug!(
                days = subset.len(),
                "not enough calendar-day history for record highlights"
            );
            classifier.classify(row, None)
        }
    }

    fn title(
        &self,
        station: &StationSeries,
        window: Window,
        subset: &Subset<'_>,
        selected_date: NaiveDate,
    ) -> String {
        let heading = format!("{} ({})", station.metadata.title(), station.metadata.stid);
        match window {
            Window::PastYears => format!(
                "{} Histograms on {}s from {} to {}",
                heading,
                selected_date.format("%B %d"),
                station
                    .metadata
                    .first_year(&station.series)
                    .unwrap_or_else(|| selected_date.year()),
                selected_date.year()
            ),
            Window::Trailing(_) => format!(
                "{} Histograms from {} to {}",
                heading,
                subset
                    .start_date()
                    .unwrap_or(selected_date)
                    .format("%B %d, %Y"),
                selected_date.format("%B %d, %Y")
            ),
        }
    }
}
