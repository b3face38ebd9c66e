pub mod dashboard;
pub mod window_aggregator;

pub use dashboard::{Dashboard, Status, UpdateKind, UpdateOutcome};
pub use window_aggregator::{Window, WindowAggregator};
