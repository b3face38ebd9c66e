use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{FlashError, Result};
use crate::models::{StationMetadata, StationSeries};
use crate::readers::{SeriesReader, StationReader};
use crate::utils::constants::SERIES_FILE_EXTENSION;

/// Source of a station's daily series.
///
/// Any failure to produce data surfaces as [`FlashError::DataUnavailable`];
/// loaders never retry.
pub trait SeriesLoader {
    fn load(&self, station: &str) -> Result<StationSeries>;
}

/// Loads `{data_dir}/{STATION}.csv`, with names from an optional metadata file.
pub struct DirectorySeriesLoader {
    data_dir: PathBuf,
    stations_file: Option<PathBuf>,
    reader: SeriesReader,
}

impl DirectorySeriesLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            stations_file: None,
            reader: SeriesReader::new(),
        }
    }

    pub fn with_stations_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.stations_file = Some(path.into());
        self
    }

    /// Keep rows without a minimum temperature instead of dropping them.
    pub fn keep_incomplete_rows(mut self) -> Self {
        self.reader = self.reader.keep_incomplete_rows();
        self
    }

    pub fn series_path(&self, station: &str) -> PathBuf {
        self.data_dir
            .join(station.to_uppercase())
            .with_extension(SERIES_FILE_EXTENSION)
    }

    fn metadata(&self, station: &str) -> Result<StationMetadata> {
        let Some(path) = self.stations_file.as_deref().filter(|p| p.exists()) else {
            return Ok(StationMetadata::unnamed(station));
        };
        let mut stations = StationReader::new().read_stations_map(path)?;
        stations
            .remove(&station.to_uppercase())
            .ok_or_else(|| FlashError::StationNotFound {
                station: station.to_uppercase(),
            })
    }

    fn load_inner(&self, station: &str, path: &Path) -> Result<StationSeries> {
        let metadata = self.metadata(station)?;
        let series = self.reader.read_series(path)?;
        if series.is_empty() {
            return Err(FlashError::data_unavailable(station, "empty response"));
        }
        Ok(StationSeries::new(metadata, series))
    }
}

impl SeriesLoader for DirectorySeriesLoader {
    fn load(&self, station: &str) -> Result<StationSeries> {
        let station = station.trim();
        if station.is_empty() {
            return Err(FlashError::data_unavailable(station, "empty station identifier"));
        }

        let path = self.series_path(station);
        debug!(path = %path.display(), "loading station series");

        let loaded = self.load_inner(station, &path).map_err(|e| match e {
            FlashError::DataUnavailable { .. } => e,
            other => FlashError::data_unavailable(station, other.to_string()),
        })?;

        info!(
            station = %loaded.metadata.stid,
            days = loaded.series.len(),
            "loaded station series"
        );
        Ok(loaded)
    }
}
