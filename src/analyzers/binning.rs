use chrono::NaiveDate;
use tracing::debug;

use crate::error::{FlashError, Result};
use crate::models::{BinSpec, Field, FieldCatalog, HistogramPanel, Subset};
use crate::utils::constants::{
    BIN_BASE_MULTIPLIER, DATA_NA_NOTE, DEGENERATE_NUDGE, FEW_BINS, MIN_BIN_CEILING, SOME_BINS,
    Y_HEADROOM,
};
use crate::utils::units::format_value;

/// Bins plus the counts of a field and its pair over the shared edges.
#[derive(Debug, Clone, PartialEq)]
pub struct BinnedHistogram {
    pub spec: BinSpec,
    pub frequencies: Vec<usize>,
    pub pair_frequencies: Vec<usize>,
    pub highlighted_bin: Option<usize>,
    pub selected_value: Option<f64>,
}

/// Adaptive histogram binning shared between a field and its paired field.
pub struct HistogramBinner<'c> {
    catalog: &'c FieldCatalog,
}

impl<'c> HistogramBinner<'c> {
    pub fn new(catalog: &'c FieldCatalog) -> Self {
        Self { catalog }
    }

    /// Compute bins for `field` over `subset`, sharing the x-axis with `pair`.
    ///
    /// Fails with [`FlashError::InsufficientHistory`] when neither field has a
    /// single valid value in the window.
    pub fn compute_bins(
        &self,
        subset: &Subset<'_>,
        field: Field,
        pair: Option<Field>,
        selected_date: NaiveDate,
    ) -> Result<BinnedHistogram> {
        let values: Vec<f64> = subset.values(field).collect();
        let pair_values: Vec<f64> = pair
            .map(|p| subset.values(p).collect())
            .unwrap_or_default();

        let (lo, hi) = values
            .iter()
            .chain(pair_values.iter())
            .fold(None, |acc: Option<(f64, f64)>, &v| match acc {
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
                None => Some((v, v)),
            })
            .ok_or_else(|| FlashError::InsufficientHistory {
                field: field.display_name().to_string(),
                window: format!("{} days", subset.len()),
            })?;

        let base = bin_base(hi);
        let var_min = round_down(lo, base);
        let mut var_max = round_up(hi, base);
        if var_max < MIN_BIN_CEILING {
            var_max = MIN_BIN_CEILING;
        }

        let num_bins = (var_max - var_min) / base;
        let step = if num_bins <= FEW_BINS {
            base / 3.0
        } else if num_bins <= SOME_BINS {
            base / 2.0
        } else {
            base
        };
        let edges = bin_edges(var_min, var_max, step);

        if var_max == var_min {
            var_max += DEGENERATE_NUDGE;
        }
        let x_range = (var_min - base / 3.0, var_max + base / 3.0);
        let x_mid = (x_range.0 + x_range.1) / 2.0;

        let frequencies = histogram(&values, &edges);
        let pair_frequencies = if pair.is_some() {
            histogram(&pair_values, &edges)
        } else {
            Vec::new()
        };
        let y_max = frequencies
            .iter()
            .chain(pair_frequencies.iter())
            .copied()
            .max()
            .unwrap_or(0) as f64;

        let selected_value = subset.get(selected_date).and_then(|r| r.get(field));
        let highlighted_bin = selected_value.and_then(|v| locate_bin(&edges, v));

        debug!(
            field = field.display_name(),
            base,
            step,
            bins = edges.len().saturating_sub(1),
            "computed histogram bins"
        );

        Ok(BinnedHistogram {
            spec: BinSpec {
                field,
                edges,
                x_range,
                x_mid,
                y_range: (0.0, y_max * Y_HEADROOM),
            },
            frequencies,
            pair_frequencies,
            highlighted_bin,
            selected_value,
        })
    }

    /// Full panel for `field`, degrading to an "N/A" placeholder when the window has no data.
    pub fn build_panel(
        &self,
        subset: &Subset<'_>,
        field: Field,
        selected_date: NaiveDate,
        y_label: &str,
    ) -> HistogramPanel {
        let pair = self.catalog.pair(field);
        let climatology = field
            .climatology()
            .and_then(|c| subset.first().and_then(|r| r.get(c)));
        let na_label = format!("{}: N/A", self.catalog.label(field));

        match self.compute_bins(subset, field, pair, selected_date) {
            Ok(binned) => {
                let data_unavailable = binned.frequencies.iter().all(|&f| f == 0);
                let label = match binned.selected_value {
                    _ if data_unavailable => na_label,
                    Some(v) => format!(
                        "{}: {}",
                        self.catalog.label(field),
                        format_value(v, self.catalog.unit(field))
                    ),
                    None => field.display_name().to_string(),
                };
                HistogramPanel {
                    field,
                    pair,
                    bins: Some(binned.spec),
                    frequencies: binned.frequencies,
                    pair_frequencies: binned.pair_frequencies,
                    highlighted_bin: binned.highlighted_bin,
                    label,
                    y_label: y_label.to_string(),
                    data_unavailable,
                    climatology,
                }
            }
            Err(e) => {
                debug!("{}; emitting {} placeholder", e, DATA_NA_NOTE);
                HistogramPanel {
                    field,
                    pair,
                    bins: None,
                    frequencies: Vec::new(),
                    pair_frequencies: Vec::new(),
                    highlighted_bin: None,
                    label: na_label,
                    y_label: y_label.to_string(),
                    data_unavailable: true,
                    climatology,
                }
            }
        }
    }
}

fn order_of_magnitude(x: f64) -> f64 {
    if x == 0.0 {
        0.0
    } else {
        x.abs().log10().floor()
    }
}

/// Rounding base for a distribution whose maximum is `var_max`.
///
/// Orders of magnitude above 10 are log-compressed before scaling; bin count
/// thresholds downstream depend on this exact formula.
pub fn bin_base(var_max: f64) -> f64 {
    let oom = order_of_magnitude(var_max) - 1.0;
    let mut scale = 10f64.powf(oom);
    if oom > 0.0 {
        scale = scale.log10();
    }
    scale * BIN_BASE_MULTIPLIER
}

fn round_down(x: f64, base: f64) -> f64 {
    let r = (x / base).floor() * base;
    if r > x {
        r - base
    } else {
        r
    }
}

fn round_up(x: f64, base: f64) -> f64 {
    let r = (x / base).ceil() * base;
    if r < x {
        r + base
    } else {
        r
    }
}

/// Edges from `start` through at least `stop`, `step` apart.
pub fn bin_edges(start: f64, stop: f64, step: f64) -> Vec<f64> {
    let count = ((stop - start) / step + 1.0 - 1e-9).ceil().max(2.0) as usize;
    let mut edges: Vec<f64> = (0..count).map(|i| start + i as f64 * step).collect();
    if let Some(&last) = edges.last() {
        if last < stop {
            edges.push(last + step);
        }
    }
    edges
}

/// Bin holding `value`: last edge at or below it, with the closing edge folded
/// into the final bin.
pub fn locate_bin(edges: &[f64], value: f64) -> Option<usize> {
    if edges.len() < 2 || value < edges[0] || value > edges[edges.len() - 1] {
        return None;
    }
    let idx = edges.partition_point(|&e| e <= value).checked_sub(1)?;
    Some(idx.min(edges.len() - 2))
}

/// Counts per half-open bin; the last bin also includes its right edge.
pub fn histogram(values: &[f64], edges: &[f64]) -> Vec<usize> {
    let mut counts = vec![0; edges.len().saturating_sub(1)];
    for &v in values {
        if let Some(i) = locate_bin(edges, v) {
            counts[i] += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DailyRecord, Series};
    use chrono::Duration;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 8, 10).unwrap()
    }

    fn series_from(field: Field, values: &[Option<f64>]) -> Series {
        let records = values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                DailyRecord::builder(start() + Duration::days(i as i64))
                    .maybe(field, *v)
                    .build()
            })
            .collect();
        Series::new(records).unwrap()
    }

    fn last_day(values: &[Option<f64>]) -> NaiveDate {
        start() + Duration::days(values.len() as i64 - 1)
    }

    #[test]
    fn test_bin_base_heuristic() {
        assert_eq!(bin_base(90.0), 5.0);
        assert!((bin_base(1.2) - 0.5).abs() < 1e-12);
        // log-compressed above two digits
        assert_eq!(bin_base(105.0), 5.0);
        assert_eq!(bin_base(1500.0), 10.0);
        assert!((bin_base(0.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_locate_bin_rejects_unusable_edges() {
        let nan_edges = [f64::NAN, f64::NAN, f64::NAN];
        assert_eq!(locate_bin(&nan_edges, 5.0), None);
        assert_eq!(histogram(&[5.0, 80.0], &nan_edges), vec![0, 0]);
        assert_eq!(locate_bin(&[0.0, 1.0], f64::INFINITY), None);
    }

    #[test]
    fn test_infinite_wind_does_not_break_panel() {
        let selected = start() + Duration::days(1);
        let records = vec![
            DailyRecord::builder(start())
                .value(Field::MaxWindKts, f64::INFINITY)
                .build(),
            DailyRecord::builder(selected)
                .value(Field::MaxWindKts, 5.0)
                .build(),
        ];
        let series = Series::new(records).unwrap();
        let subset = series.trailing(selected, 14);
        let catalog = FieldCatalog::standard();
        let panel =
            HistogramBinner::new(&catalog).build_panel(&subset, Field::MaxWindKts, selected, "");

        assert_eq!(panel.total(), 1);
        assert_eq!(panel.highlighted_bin, Some(0));
        assert!(panel.bins.unwrap().edges.iter().all(|e| e.is_finite()));
    }

    #[test]
    fn test_paired_temperatures_share_axis() {
        let max_temps = [70.0, 85.0, 90.0, 85.0, 60.0];
        let min_temps = [50.0, 60.0, 65.0, 60.0, 40.0];
        let records = max_temps
            .iter()
            .zip(min_temps.iter())
            .enumerate()
            .map(|(i, (&hi, &lo))| {
                DailyRecord::builder(start() + Duration::days(i as i64))
                    .temps(lo, hi)
                    .build()
            })
            .collect();
        let series = Series::new(records).unwrap();
        let subset = series.trailing(start() + Duration::days(2), 30);
        let catalog = FieldCatalog::standard();
        let binner = HistogramBinner::new(&catalog);

        let binned = binner
            .compute_bins(
                &subset,
                Field::MaxTempF,
                Some(Field::MinTempF),
                start() + Duration::days(2),
            )
            .unwrap();

        // days 0..=2 only: lo=50 (min temp), hi=90 (max temp)
        let edges = &binned.spec.edges;
        assert_eq!(edges[0], 50.0);
        assert!(*edges.last().unwrap() >= 90.0 - 1e-9);
        assert_eq!(binned.frequencies.iter().sum::<usize>(), 3);
        assert_eq!(binned.pair_frequencies.iter().sum::<usize>(), 3);
        let hl = binned.highlighted_bin.unwrap();
        assert!(edges[hl] <= 90.0 && 90.0 <= edges[hl + 1]);
        assert_eq!(binned.spec.x_range.0, 50.0 - 5.0 / 3.0);
    }

    #[test]
    fn test_max_edge_value_lands_in_last_bin() {
        let edges = bin_edges(40.0, 90.0, 2.5);
        assert_eq!(edges.len(), 21);
        assert_eq!(locate_bin(&edges, 90.0), Some(19));
        assert_eq!(locate_bin(&edges, 40.0), Some(0));
        assert_eq!(locate_bin(&edges, 91.0), None);
    }

    #[test]
    fn test_all_zero_precip_forces_unit_ceiling() {
        let values = [Some(0.0); 10];
        let series = series_from(Field::PrecipIn, &values);
        let subset = series.trailing(last_day(&values), 14);
        let catalog = FieldCatalog::standard();
        let binned = HistogramBinner::new(&catalog)
            .compute_bins(&subset, Field::PrecipIn, Some(Field::SnowIn), last_day(&values))
            .unwrap();

        assert_eq!(binned.spec.edges.first(), Some(&0.0));
        assert!(*binned.spec.edges.last().unwrap() >= 1.0 - 1e-9);
        assert_eq!(binned.frequencies[0], 10);
        assert!(binned.pair_frequencies.iter().all(|&f| f == 0));
        assert_eq!(binned.highlighted_bin, Some(0));
        assert_eq!(binned.spec.y_range, (0.0, 12.5));
    }

    #[test]
    fn test_constant_series_is_not_zero_width() {
        let values = [Some(5.0); 4];
        let series = series_from(Field::MaxWindKts, &values);
        let subset = series.trailing(last_day(&values), 14);
        let catalog = FieldCatalog::standard();
        let binned = HistogramBinner::new(&catalog)
            .compute_bins(&subset, Field::MaxWindKts, None, last_day(&values))
            .unwrap();

        assert!(binned.spec.edges.len() >= 2);
        assert!(binned.spec.x_range.1 > binned.spec.x_range.0);
        assert!(binned.spec.x_range.1 - 5.0 > 0.5 / 3.0);
        assert_eq!(binned.frequencies.iter().sum::<usize>(), 4);
        assert_eq!(binned.highlighted_bin, Some(0));
    }

    #[test]
    fn test_edges_ascending_and_span_values() {
        let samples: [&[f64]; 5] = [
            &[-12.0, -3.5, 4.0, 18.0],
            &[0.01, 0.02, 0.35, 2.75],
            &[102.0, 97.0, 88.0],
            &[1200.0, 1450.0, 990.0],
            &[33.0],
        ];
        let catalog = FieldCatalog::standard();
        for sample in samples {
            let values: Vec<Option<f64>> = sample.iter().map(|v| Some(*v)).collect();
            let series = series_from(Field::MaxTempF, &values);
            let subset = series.trailing(last_day(&values), 30);
            let binned = HistogramBinner::new(&catalog)
                .compute_bins(&subset, Field::MaxTempF, None, last_day(&values))
                .unwrap();
            let edges = &binned.spec.edges;

            assert!(edges.windows(2).all(|w| w[0] < w[1]), "{:?}", edges);
            for v in sample {
                assert!(edges[0] <= *v && *v <= *edges.last().unwrap());
            }
            assert_eq!(binned.frequencies.iter().sum::<usize>(), sample.len());
        }
    }

    #[test]
    fn test_missing_selected_value_has_no_highlight() {
        let values = [Some(70.0), Some(75.0), None];
        let series = series_from(Field::MaxTempF, &values);
        let subset = series.trailing(last_day(&values), 14);
        let catalog = FieldCatalog::standard();
        let panel = HistogramBinner::new(&catalog).build_panel(
            &subset,
            Field::MaxTempF,
            last_day(&values),
            "",
        );

        assert_eq!(panel.highlighted_bin, None);
        assert_eq!(panel.label, "Max Temp F");
        assert_eq!(panel.total(), 2);
        assert!(!panel.data_unavailable);
    }

    #[test]
    fn test_all_missing_field_yields_na_panel() {
        let values = [None, None, None];
        let series = series_from(Field::SnowIn, &values);
        let subset = series.trailing(last_day(&values), 14);
        let catalog = FieldCatalog::standard();
        let binner = HistogramBinner::new(&catalog);

        assert!(matches!(
            binner.compute_bins(&subset, Field::SnowIn, Some(Field::PrecipIn), last_day(&values)),
            Err(FlashError::InsufficientHistory { .. })
        ));

        let panel = binner.build_panel(&subset, Field::SnowIn, last_day(&values), "");
        assert!(panel.data_unavailable);
        assert!(panel.bins.is_none());
        assert_eq!(panel.highlighted_bin, None);
        assert_eq!(panel.label, "Snow: N/A");
    }

    #[test]
    fn test_field_missing_but_pair_present() {
        let records = (0..5)
            .map(|i| {
                DailyRecord::builder(start() + Duration::days(i))
                    .value(Field::PrecipIn, 0.1 * i as f64)
                    .build()
            })
            .collect();
        let series = Series::new(records).unwrap();
        let selected = start() + Duration::days(4);
        let subset = series.trailing(selected, 14);
        let catalog = FieldCatalog::standard();
        let panel =
            HistogramBinner::new(&catalog).build_panel(&subset, Field::SnowIn, selected, "");

        assert!(panel.bins.is_some());
        assert!(panel.data_unavailable);
        assert_eq!(panel.label, "Snow: N/A");
        assert_eq!(panel.pair_frequencies.iter().sum::<usize>(), 5);
    }

    #[test]
    fn test_selected_label_and_climatology() {
        let records = (0..3)
            .map(|i| {
                DailyRecord::builder(start() + Duration::days(i))
                    .temps(60.0, 80.0 + i as f64)
                    .value(Field::ClimoMaxTempF, 84.0 + i as f64)
                    .build()
            })
            .collect();
        let series = Series::new(records).unwrap();
        let selected = start() + Duration::days(2);
        let subset = series.trailing(selected, 14);
        let catalog = FieldCatalog::standard();
        let panel = HistogramBinner::new(&catalog).build_panel(
            &subset,
            Field::MaxTempF,
            selected,
            "Number of Days",
        );

        assert_eq!(panel.label, "Max Temp: 82.00F");
        assert_eq!(panel.climatology, Some(84.0));
        assert_eq!(panel.y_label, "Number of Days");
    }
}
