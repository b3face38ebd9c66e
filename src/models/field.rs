use serde::{Deserialize, Serialize};
use std::fmt;

/// A named numeric column of a station's daily series, in column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Field {
    MinTempF,
    MaxTempF,
    PrecipIn,
    SnowIn,
    MinFeelF,
    MaxFeelF,
    MaxWindKts,
    MaxGustKts,
    ClimoMaxTempF,
    ClimoMinTempF,
    ClimoPrecipIn,
}

impl Field {
    pub const ALL: [Field; 11] = [
        Field::MinTempF,
        Field::MaxTempF,
        Field::PrecipIn,
        Field::SnowIn,
        Field::MinFeelF,
        Field::MaxFeelF,
        Field::MaxWindKts,
        Field::MaxGustKts,
        Field::ClimoMaxTempF,
        Field::ClimoMinTempF,
        Field::ClimoPrecipIn,
    ];

    /// Observed (non-climatology) fields, the ones that get a histogram panel.
    pub const OBSERVED: [Field; 8] = [
        Field::MinTempF,
        Field::MaxTempF,
        Field::PrecipIn,
        Field::SnowIn,
        Field::MinFeelF,
        Field::MaxFeelF,
        Field::MaxWindKts,
        Field::MaxGustKts,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Field::MinTempF => "Min Temp F",
            Field::MaxTempF => "Max Temp F",
            Field::PrecipIn => "Precip In",
            Field::SnowIn => "Snow In",
            Field::MinFeelF => "Min Feel F",
            Field::MaxFeelF => "Max Feel F",
            Field::MaxWindKts => "Max Wind Kts",
            Field::MaxGustKts => "Max Gust Kts",
            Field::ClimoMaxTempF => "Climo Max Temp F",
            Field::ClimoMinTempF => "Climo Min Temp F",
            Field::ClimoPrecipIn => "Climo Precip In",
        }
    }

    /// Column header in the raw daily summary CSV.
    pub fn source_column(&self) -> &'static str {
        match self {
            Field::MinTempF => "min_temp_f",
            Field::MaxTempF => "max_temp_f",
            Field::PrecipIn => "precip_in",
            Field::SnowIn => "snow_in",
            Field::MinFeelF => "min_feel",
            Field::MaxFeelF => "max_feel",
            Field::MaxWindKts => "max_wind_speed_kts",
            Field::MaxGustKts => "max_wind_gust_kts",
            Field::ClimoMaxTempF => "climo_high_f",
            Field::ClimoMinTempF => "climo_low_f",
            Field::ClimoPrecipIn => "climo_precip_in",
        }
    }

    pub fn is_climatology(&self) -> bool {
        matches!(
            self,
            Field::ClimoMaxTempF | Field::ClimoMinTempF | Field::ClimoPrecipIn
        )
    }

    /// Fields that cannot physically be negative; negative readings are missing.
    pub fn is_positive_only(&self) -> bool {
        matches!(self, Field::PrecipIn | Field::SnowIn)
    }

    /// The climatology column drawn as a reference line on this field's panel.
    pub fn climatology(&self) -> Option<Field> {
        match self {
            Field::MaxTempF => Some(Field::ClimoMaxTempF),
            Field::MinTempF => Some(Field::ClimoMinTempF),
            Field::PrecipIn => Some(Field::ClimoPrecipIn),
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
