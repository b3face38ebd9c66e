use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use validator::Validate;

use crate::error::{FlashError, Result};
use crate::models::StationMetadata;

#[derive(Debug, Deserialize)]
struct RawStationRow {
    stid: String,
    #[serde(alias = "station_name")]
    name: String,
    #[serde(default, alias = "iem_network")]
    network: String,
    #[serde(default)]
    archive_begin: Option<String>,
    #[serde(default, alias = "lat")]
    latitude: Option<f64>,
    #[serde(default, alias = "lon")]
    longitude: Option<f64>,
}

pub struct StationReader;

impl StationReader {
    pub fn new() -> Self {
        Self
    }

    /// Read station metadata from a `stid,name,network,archive_begin[,lat,lon]` CSV.
    pub fn read_stations(&self, path: &Path) -> Result<Vec<StationMetadata>> {
        let file = File::open(path)?;
        self.read_from(file)
    }

    pub fn read_from<R: Read>(&self, reader: R) -> Result<Vec<StationMetadata>> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut stations = Vec::new();
        for row in csv_reader.deserialize::<RawStationRow>() {
            let row = row?;
            let archive_begin = match row.archive_begin.as_deref() {
                None | Some("") | Some("None") => None,
                Some(raw) => Some(parse_archive_begin(raw)?),
            };

            let mut station =
                StationMetadata::new(&row.stid, &row.name, &row.network, archive_begin);
            station.latitude = row.latitude;
            station.longitude = row.longitude;
            station.validate()?;
            stations.push(station);
        }

        Ok(stations)
    }

    /// Stations keyed by upper-case identifier.
    pub fn read_stations_map(&self, path: &Path) -> Result<HashMap<String, StationMetadata>> {
        let stations = self.read_stations(path)?;
        let mut map = HashMap::with_capacity(stations.len());

        for station in stations {
            map.insert(station.stid.clone(), station);
        }

        Ok(map)
    }
}

impl Default for StationReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Accepts a plain date or a timestamp whose first ten characters are the date.
fn parse_archive_begin(raw: &str) -> Result<NaiveDate> {
    let date_part = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|_| FlashError::InvalidFormat(format!("Invalid archive begin date: '{}'", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_stations_file() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "stid,name,network,archive_begin,lat,lon")?;
        writeln!(
            temp_file,
            "CMI,CHAMPAIGN/URBANA,IL_ASOS,1928-01-01 00:00:00,40.04,-88.28"
        )?;
        writeln!(temp_file, "ord,CHICAGO O'HARE,IL_ASOS,,41.96,-87.93")?;

        let stations = StationReader::new().read_stations(temp_file.path())?;

        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].stid, "CMI");
        assert_eq!(stations[0].archive_begin, NaiveDate::from_ymd_opt(1928, 1, 1));
        assert_eq!(stations[1].stid, "ORD");
        assert_eq!(stations[1].archive_begin, None);
        assert_eq!(stations[1].longitude, Some(-87.93));

        Ok(())
    }

    #[test]
    fn test_invalid_station_is_rejected() {
        let data = "stid,name,network,archive_begin,lat,lon\nXYZ,BAD,NET,,95.0,0.0\n";
        assert!(matches!(
            StationReader::new().read_from(data.as_bytes()),
            Err(FlashError::Validation(_))
        ));
    }

    #[test]
    fn test_stations_map_keys_are_upper_case() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "stid,name,network")?;
        writeln!(temp_file, "cmi,CHAMPAIGN/URBANA,IL_ASOS")?;

        let map = StationReader::new().read_stations_map(temp_file.path())?;
        assert!(map.contains_key("CMI"));
        Ok(())
    }
}
