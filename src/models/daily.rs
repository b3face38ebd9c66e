use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{FlashError, Result};
use crate::models::Field;

/// One calendar day of observations for one station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub min_temp_f: Option<f64>,
    pub max_temp_f: Option<f64>,
    pub precip_in: Option<f64>,
    pub snow_in: Option<f64>,
    pub min_feel_f: Option<f64>,
    pub max_feel_f: Option<f64>,
    pub max_wind_kts: Option<f64>,
    pub max_gust_kts: Option<f64>,
    pub climo_max_temp_f: Option<f64>,
    pub climo_min_temp_f: Option<f64>,
    pub climo_precip_in: Option<f64>,
}

impl DailyRecord {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            min_temp_f: None,
            max_temp_f: None,
            precip_in: None,
            snow_in: None,
            min_feel_f: None,
            max_feel_f: None,
            max_wind_kts: None,
            max_gust_kts: None,
            climo_max_temp_f: None,
            climo_min_temp_f: None,
            climo_precip_in: None,
        }
    }

    pub fn builder(date: NaiveDate) -> DailyRecordBuilder {
        DailyRecordBuilder::new(date)
    }

    pub fn day_of_year(&self) -> u32 {
        self.date.ordinal()
    }

    /// Reading for `field`; NaN and negative positive-only values read as missing.
    pub fn get(&self, field: Field) -> Option<f64> {
        let value = match field {
            Field::MinTempF => self.min_temp_f,
            Field::MaxTempF => self.max_temp_f,
            Field::PrecipIn => self.precip_in,
            Field::SnowIn => self.snow_in,
            Field::MinFeelF => self.min_feel_f,
            Field::MaxFeelF => self.max_feel_f,
            Field::MaxWindKts => self.max_wind_kts,
            Field::MaxGustKts => self.max_gust_kts,
            Field::ClimoMaxTempF => self.climo_max_temp_f,
            Field::ClimoMinTempF => self.climo_min_temp_f,
            Field::ClimoPrecipIn => self.climo_precip_in,
        };
        sanitize(field, value)
    }

    pub fn require(&self, field: Field) -> Result<f64> {
        self.get(field).ok_or_else(|| FlashError::MissingValue {
            field: field.display_name().to_string(),
            date: self.date,
        })
    }

    pub fn set(&mut self, field: Field, value: Option<f64>) {
        let value = sanitize(field, value);
        let slot = match field {
            Field::MinTempF => &mut self.min_temp_f,
            Field::MaxTempF => &mut self.max_temp_f,
            Field::PrecipIn => &mut self.precip_in,
            Field::SnowIn => &mut self.snow_in,
            Field::MinFeelF => &mut self.min_feel_f,
            Field::MaxFeelF => &mut self.max_feel_f,
            Field::MaxWindKts => &mut self.max_wind_kts,
            Field::MaxGustKts => &mut self.max_gust_kts,
            Field::ClimoMaxTempF => &mut self.climo_max_temp_f,
            Field::ClimoMinTempF => &mut self.climo_min_temp_f,
            Field::ClimoPrecipIn => &mut self.climo_precip_in,
        };
        *slot = value;
    }

    /// First field of `fields` holding the largest reading (ties keep the earlier field).
    pub fn max_of(&self, fields: &[Field]) -> Option<(Field, f64)> {
        fields
            .iter()
            .filter_map(|&f| self.get(f).map(|v| (f, v)))
            .fold(None, |best, (f, v)| match best {
                Some((_, b)) if b >= v => best,
                _ => Some((f, v)),
            })
    }

    /// First field of `fields` holding the smallest reading.
    pub fn min_of(&self, fields: &[Field]) -> Option<(Field, f64)> {
        fields
            .iter()
            .filter_map(|&f| self.get(f).map(|v| (f, v)))
            .fold(None, |best, (f, v)| match best {
                Some((_, b)) if b <= v => best,
                _ => Some((f, v)),
            })
    }
}

fn sanitize(field: Field, value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && !(field.is_positive_only() && *v < 0.0))
}

pub struct DailyRecordBuilder {
    record: DailyRecord,
}

impl DailyRecordBuilder {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            record: DailyRecord::new(date),
        }
    }

    pub fn value(mut self, field: Field, value: f64) -> Self {
        self.record.set(field, Some(value));
        self
    }

    pub fn maybe(mut self, field: Field, value: Option<f64>) -> Self {
        self.record.set(field, value);
        self
    }

    pub fn temps(self, min: f64, max: f64) -> Self {
        self.value(Field::MinTempF, min).value(Field::MaxTempF, max)
    }

    pub fn build(self) -> DailyRecord {
        self.record
    }
}
