/// Window labels, in evaluation order
pub const PAST_YEARS_LABEL: &str = "Past Years";
pub const DEFAULT_TRAILING_DAYS: [i64; 4] = [365, 90, 30, 14];

/// Panel layout defaults
pub const DEFAULT_PANEL_COLUMNS: usize = 4;
pub const FIRST_ROW_Y_LABEL: &str = "Number of Days";
pub const DATA_NA_NOTE: &str = "Data N/A";

/// Record highlight defaults
pub const DEFAULT_RECORD_MIN_HISTORY: usize = 3;
pub const DEFAULT_RECORD_TOP_N: usize = 3;

/// Binning heuristics
pub const BIN_BASE_MULTIPLIER: f64 = 5.0;
pub const FEW_BINS: f64 = 7.0;
pub const SOME_BINS: f64 = 14.0;
pub const MIN_BIN_CEILING: f64 = 1.0;
pub const DEGENERATE_NUDGE: f64 = 0.01;
pub const Y_HEADROOM: f64 = 1.25;

/// Palette
pub const COLOR_YELLOW: &str = "#F6CA06";
pub const COLOR_DARK_BROWN: &str = "#8c520a";
pub const COLOR_FRESH_BLUE: &str = "#7eccba";
pub const COLOR_SKY_BLUE: &str = "#41b7c4";
pub const COLOR_SEA_BLUE: &str = "#5bb5ae";
pub const COLOR_GREEN_BLUE: &str = "#01665e";

/// Station files
pub const SERIES_FILE_EXTENSION: &str = "csv";
pub const STATIONS_FILE: &str = "stations.csv";

/// Config
pub const ENV_PREFIX: &str = "WEATHER_FLASH";
