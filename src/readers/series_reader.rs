use chrono::NaiveDate;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{FlashError, Result};
use crate::models::{DailyRecord, Field, Series};

/// One row of a daily summary CSV. Readings stay textual until parsed, since
/// archives write "None" or "M" for missing values.
#[derive(Debug, Deserialize)]
struct RawDailyRow {
    day: String,
    #[serde(default)]
    min_temp_f: Option<String>,
    #[serde(default)]
    max_temp_f: Option<String>,
    #[serde(default)]
    precip_in: Option<String>,
    #[serde(default)]
    snow_in: Option<String>,
    #[serde(default)]
    min_feel: Option<String>,
    #[serde(default)]
    max_feel: Option<String>,
    #[serde(default)]
    max_wind_speed_kts: Option<String>,
    #[serde(default)]
    max_wind_gust_kts: Option<String>,
    #[serde(default)]
    climo_high_f: Option<String>,
    #[serde(default)]
    climo_low_f: Option<String>,
    #[serde(default)]
    climo_precip_in: Option<String>,
}

impl RawDailyRow {
    fn column(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::MinTempF => &self.min_temp_f,
            Field::MaxTempF => &self.max_temp_f,
            Field::PrecipIn => &self.precip_in,
            Field::SnowIn => &self.snow_in,
            Field::MinFeelF => &self.min_feel,
            Field::MaxFeelF => &self.max_feel,
            Field::MaxWindKts => &self.max_wind_speed_kts,
            Field::MaxGustKts => &self.max_wind_gust_kts,
            Field::ClimoMaxTempF => &self.climo_high_f,
            Field::ClimoMinTempF => &self.climo_low_f,
            Field::ClimoPrecipIn => &self.climo_precip_in,
        };
        value.as_deref()
    }
}

pub struct SeriesReader {
    drop_missing_min_temp: bool,
}

impl SeriesReader {
    pub fn new() -> Self {
        Self {
            drop_missing_min_temp: true,
        }
    }

    /// Keep rows whose minimum temperature is missing (dropped by default).
    pub fn keep_incomplete_rows(mut self) -> Self {
        self.drop_missing_min_temp = false;
        self
    }

    pub fn read_series(&self, path: &Path) -> Result<Series> {
        let file = File::open(path)?;
        self.read_from(file)
    }

    pub fn read_from<R: Read>(&self, reader: R) -> Result<Series> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut records = Vec::new();
        let mut dropped = 0usize;

        for (line, row) in csv_reader.deserialize::<RawDailyRow>().enumerate() {
            let row = row?;
            let record = self.parse_row(&row, line + 2)?;
            if self.drop_missing_min_temp && record.get(Field::MinTempF).is_none() {
                dropped += 1;
                continue;
            }
            records.push(record);
        }

        if dropped > 0 {
            debug!(dropped, "dropped rows without a minimum temperature");
        }

        Series::new(records)
    }

    fn parse_row(&self, row: &RawDailyRow, line: usize) -> Result<DailyRecord> {
        let date = NaiveDate::parse_from_str(&row.day, "%Y-%m-%d").map_err(|_| {
            FlashError::InvalidFormat(format!("Invalid date '{}' on line {}", row.day, line))
        })?;

        let mut record = DailyRecord::new(date);
        for field in Field::ALL {
            let value = row
                .column(field)
                .map(|raw| parse_reading(raw, field, line))
                .transpose()?
                .flatten();
            match value {
                Some(v) if !v.is_finite() => {
                    warn!(
                        field = field.display_name(),
                        %date,
                        "non-finite reading treated as missing"
                    );
                }
                Some(v) if field.is_positive_only() && v < 0.0 => {
                    warn!(
                        field = field.display_name(),
                        %date,
                        value = v,
                        "negative reading treated as missing"
                    );
                }
                _ => {}
            }
            record.set(field, value);
        }
        Ok(record)
    }
}

impl Default for SeriesReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Numeric reading, or `None` for the archive's missing-value markers.
fn parse_reading(raw: &str, field: Field, line: usize) -> Result<Option<f64>> {
    match raw {
        "" | "None" | "M" | "NaN" | "nan" => Ok(None),
        _ => raw.parse::<f64>().map(Some).map_err(|_| {
            FlashError::InvalidFormat(format!(
                "Invalid {} reading '{}' on line {}",
                field.source_column(),
                raw,
                line
            ))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
station,day,max_temp_f,min_temp_f,precip_in,climo_high_f,climo_low_f,climo_precip_in,snow_in,min_feel,max_feel,max_wind_speed_kts,max_wind_gust_kts
CMI,2020-08-13,84,63,0.00,84.1,63.2,0.12,0.0,63,86,11.0,None
CMI,2020-08-14,88,None,0.21,84.0,63.1,0.12,0.0,None,90,9.0,18.0
CMI,2020-08-12,81,61,-0.01,84.2,63.3,0.12,-99,61,82,M,22.0
";

    #[test]
    fn test_read_daily_summary() -> Result<()> {
        let series = SeriesReader::new().read_from(SAMPLE.as_bytes())?;

        // 08-14 has no minimum temperature and is dropped
        assert_eq!(series.len(), 2);
        assert_eq!(series.first_date(), NaiveDate::from_ymd_opt(2020, 8, 12));

        let first = &series.records()[0];
        assert_eq!(first.get(Field::PrecipIn), None);
        assert_eq!(first.get(Field::SnowIn), None);
        assert_eq!(first.get(Field::MaxWindKts), None);
        assert_eq!(first.get(Field::MaxGustKts), Some(22.0));
        assert_eq!(first.get(Field::ClimoMaxTempF), Some(84.2));

        let second = &series.records()[1];
        assert_eq!(second.get(Field::MaxGustKts), None);
        assert_eq!(second.get(Field::PrecipIn), Some(0.0));
        Ok(())
    }

    #[test]
    fn test_keep_incomplete_rows() -> Result<()> {
        let series = SeriesReader::new()
            .keep_incomplete_rows()
            .read_from(SAMPLE.as_bytes())?;
        assert_eq!(series.len(), 3);
        Ok(())
    }

    #[test]
    fn test_infinite_readings_are_missing() -> Result<()> {
        let data = "\
day,min_temp_f,max_temp_f,max_wind_speed_kts
2020-08-13,60,80,inf
2020-08-14,61,-infinity,5
";
        let series = SeriesReader::new().read_from(data.as_bytes())?;

        assert_eq!(series.len(), 2);
        assert_eq!(series.records()[0].get(Field::MaxWindKts), None);
        assert_eq!(series.records()[1].get(Field::MaxTempF), None);
        assert_eq!(series.records()[1].get(Field::MaxWindKts), Some(5.0));
        Ok(())
    }

    #[test]
    fn test_bad_reading_is_an_error() {
        let data = "day,min_temp_f,max_temp_f\n2020-08-14,abc,80\n";
        let err = SeriesReader::new().read_from(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("min_temp_f"));
    }

    #[test]
    fn test_bad_date_is_an_error() {
        let data = "day,min_temp_f\n08/14/2020,60\n";
        assert!(matches!(
            SeriesReader::new().read_from(data.as_bytes()),
            Err(FlashError::InvalidFormat(_))
        ));
    }
}
