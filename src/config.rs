use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::Validate;

use crate::error::{FlashError, Result};
use crate::readers::DirectorySeriesLoader;
use crate::utils::constants::{
    DEFAULT_PANEL_COLUMNS, DEFAULT_RECORD_MIN_HISTORY, DEFAULT_RECORD_TOP_N,
    DEFAULT_TRAILING_DAYS, ENV_PREFIX, STATIONS_FILE,
};

/// Analysis settings, layered from defaults, an optional file and `WEATHER_FLASH_*` variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Trailing window lengths in days, evaluated after the calendar-day window.
    #[validate(length(min = 1))]
    pub trailing_days: Vec<i64>,

    #[validate(range(min = 1, max = 12))]
    pub panel_columns: usize,

    /// Record badges need strictly more calendar-day rows than this.
    pub record_min_history: usize,

    #[validate(range(min = 1))]
    pub record_top_n: usize,

    /// Keep rows whose minimum temperature is missing.
    pub keep_incomplete_rows: bool,

    pub data_dir: PathBuf,

    pub stations_file: Option<PathBuf>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            trailing_days: DEFAULT_TRAILING_DAYS.to_vec(),
            panel_columns: DEFAULT_PANEL_COLUMNS,
            record_min_history: DEFAULT_RECORD_MIN_HISTORY,
            record_top_n: DEFAULT_RECORD_TOP_N,
            keep_incomplete_rows: false,
            data_dir: PathBuf::from("data"),
            stations_file: None,
        }
    }
}

impl AnalysisConfig {
    /// Load settings; a missing `path` falls back to defaults plus environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        let settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("trailing_days"),
            )
            .build()?;

        let config: AnalysisConfig = settings.try_deserialize()?;
        config.validate()?;
        if config.trailing_days.iter().any(|&d| d <= 0) {
            return Err(FlashError::Config(format!(
                "trailing window lengths must be positive: {:?}",
                config.trailing_days
            )));
        }
        Ok(config)
    }

    /// Directory loader honouring the reader settings.
    pub fn loader(&self) -> DirectorySeriesLoader {
        let loader = DirectorySeriesLoader::new(&self.data_dir)
            .with_stations_file(self.stations_path());
        if self.keep_incomplete_rows {
            loader.keep_incomplete_rows()
        } else {
            loader
        }
    }

    /// Station metadata file, defaulting to one inside the data directory.
    pub fn stations_path(&self) -> PathBuf {
        self.stations_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join(STATIONS_FILE))
    }
}
