pub mod catalog;
pub mod daily;
pub mod field;
pub mod report;
pub mod series;
pub mod station;

pub use catalog::{Band, Extreme, FieldCatalog, FieldSpec, RuleSet, Statistic, Threshold};
pub use daily::{DailyRecord, DailyRecordBuilder};
pub use field::Field;
pub use report::{BinSpec, HighlightEntry, HistogramPanel, RankResult, Report, WindowPanels};
pub use series::{Series, Subset};
pub use station::{StationMetadata, StationSeries};
