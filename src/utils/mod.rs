pub mod constants;
pub mod progress;
pub mod units;

pub use constants::*;
pub use progress::ProgressReporter;
pub use units::{format_value, split_units};
