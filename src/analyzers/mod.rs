pub mod binning;
pub mod highlights;
pub mod ranking;

pub use binning::{BinnedHistogram, HistogramBinner};
pub use highlights::HighlightClassifier;
pub use ranking::{FieldStandings, RecordRanker};
