use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::Series;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct StationMetadata {
    #[validate(length(min = 1))]
    pub stid: String,

    #[validate(length(min = 1))]
    pub name: String,

    pub network: String,

    /// First day of the station's archive.
    pub archive_begin: Option<NaiveDate>,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}

impl StationMetadata {
    pub fn new(stid: &str, name: &str, network: &str, archive_begin: Option<NaiveDate>) -> Self {
        Self {
            stid: stid.to_uppercase(),
            name: name.to_string(),
            network: network.to_string(),
            archive_begin,
            latitude: None,
            longitude: None,
        }
    }

    /// Placeholder metadata for a station known only by its identifier.
    pub fn unnamed(stid: &str) -> Self {
        Self::new(stid, stid, "", None)
    }

    /// Station name in title case ("CHAMPAIGN/URBANA" -> "Champaign/Urbana").
    pub fn title(&self) -> String {
        let mut out = String::with_capacity(self.name.len());
        let mut boundary = true;
        for c in self.name.chars() {
            if c.is_alphabetic() {
                if boundary {
                    out.extend(c.to_uppercase());
                } else {
                    out.extend(c.to_lowercase());
                }
                boundary = false;
            } else {
                out.push(c);
                boundary = true;
            }
        }
        out
    }

    /// Year the station's record starts, falling back to the series itself.
    pub fn first_year(&self, series: &Series) -> Option<i32> {
        self.archive_begin
            .or_else(|| series.first_date())
            .map(|d| d.year())
    }
}

/// A loaded station: its metadata and daily series.
#[derive(Debug, Clone)]
pub struct StationSeries {
    pub metadata: StationMetadata,
    pub series: Series,
}

impl StationSeries {
    pub fn new(metadata: StationMetadata, series: Series) -> Self {
        Self { metadata, series }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_validation() {
        let mut station = StationMetadata::new(
            "cmi",
            "CHAMPAIGN/URBANA",
            "IL_ASOS",
            NaiveDate::from_ymd_opt(1928, 1, 1),
        );
        station.latitude = Some(40.03);
        station.longitude = Some(-88.27);

        assert!(station.validate().is_ok());
        assert_eq!(station.stid, "CMI");
        assert_eq!(station.title(), "Champaign/Urbana");
    }

    #[test]
    fn test_invalid_coordinates() {
        let mut station = StationMetadata::unnamed("CMI");
        station.latitude = Some(91.0);

        assert!(station.validate().is_err());
    }

    #[test]
    fn test_first_year_falls_back_to_series() {
        let station = StationMetadata::unnamed("CMI");
        let series = Series::new(vec![crate::models::DailyRecord::new(
            NaiveDate::from_ymd_opt(1995, 3, 2).unwrap(),
        )])
        .unwrap();

        assert_eq!(station.first_year(&series), Some(1995));
    }
}
