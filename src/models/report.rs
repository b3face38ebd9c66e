use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::Field;

/// Bin edges and shared axis ranges for one histogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinSpec {
    pub field: Field,
    pub edges: Vec<f64>,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub x_mid: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramPanel {
    pub field: Field,
    pub pair: Option<Field>,
    /// `None` when neither the field nor its pair has a valid value in the window.
    pub bins: Option<BinSpec>,
    pub frequencies: Vec<usize>,
    pub pair_frequencies: Vec<usize>,
    pub highlighted_bin: Option<usize>,
    pub label: String,
    pub y_label: String,
    pub data_unavailable: bool,
    pub climatology: Option<f64>,
}

impl HistogramPanel {
    pub fn total(&self) -> usize {
        self.frequencies.iter().sum()
    }
}

/// A field's standing for the selected date within one window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankResult {
    pub field: Field,
    /// 1 is most extreme; `None` when the selected day's reading is missing.
    pub rank: Option<usize>,
    pub total: usize,
    pub previous_record: Option<(NaiveDate, f64)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightEntry {
    pub color: String,
    pub label: String,
    pub tooltip: String,
}

impl HighlightEntry {
    pub fn new(color: &str, label: impl Into<String>, tooltip: String) -> Self {
        Self {
            color: color.to_string(),
            label: label.into(),
            tooltip,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowPanels {
    pub label: String,
    pub title: String,
    pub start_date: Option<NaiveDate>,
    pub day_count: usize,
    pub columns: usize,
    pub panels: Vec<HistogramPanel>,
}

impl WindowPanels {
    /// Panels grouped into display rows.
    pub fn rows(&self) -> impl Iterator<Item = &[HistogramPanel]> {
        self.panels.chunks(self.columns.max(1))
    }
}

/// Everything the presentation layer needs for one station and date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub station: String,
    pub station_name: String,
    pub selected_date: NaiveDate,
    pub windows: Vec<WindowPanels>,
    pub highlights: Vec<HighlightEntry>,
}

impl Report {
    pub fn window(&self, label: &str) -> Option<&WindowPanels> {
        self.windows.iter().find(|w| w.label == label)
    }

    pub fn summary(&self) -> String {
        let mut out = format!(
            "{} ({}) on {}\n",
            self.station_name,
            self.station,
            self.selected_date.format("%B %d, %Y")
        );

        if self.highlights.is_empty() {
            out.push_str("\nNo highlights\n");
        } else {
            out.push_str("\nHighlights:\n");
            for entry in &self.highlights {
                out.push_str(&format!("- {}: {}\n", entry.label, entry.tooltip));
            }
        }

        for window in &self.windows {
            out.push_str(&format!(
                "\n{} ({} days)\n{}\n",
                window.label, window.day_count, window.title
            ));
            for panel in &window.panels {
                let bin = match (&panel.bins, panel.highlighted_bin) {
                    (Some(bins), Some(i)) => {
                        format!("bin {:.2}..{:.2}", bins.edges[i], bins.edges[i + 1])
                    }
                    _ if panel.data_unavailable => "Data N/A".to_string(),
                    _ => "no highlight".to_string(),
                };
                out.push_str(&format!(
                    "  {:<24} {:>5} days  {}\n",
                    panel.label,
                    panel.total(),
                    bin
                ));
            }
        }
        out
    }
}
