use serde::{Deserialize, Serialize};

use crate::models::Field;
use crate::utils::constants::{
    COLOR_DARK_BROWN, COLOR_FRESH_BLUE, COLOR_GREEN_BLUE, COLOR_SEA_BLUE, COLOR_SKY_BLUE,
};
use crate::utils::units::split_units;

/// Which end of the distribution counts as a record for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Extreme {
    /// Highest value is the record (heat, precipitation, wind).
    Max,
    /// Lowest value is the record (cold).
    Min,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub field: Field,
    pub pair: Option<Field>,
    pub extreme: Option<Extreme>,
    /// Display name without its unit token ("Max Wind").
    pub label: String,
    /// Unit suffix as appended to a formatted value ("F", " kts").
    pub unit: String,
}

/// A threshold comparison against a day's group statistic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Threshold {
    Above(f64),
    AtMost(f64),
    Below(f64),
    Equal(f64),
}

impl Threshold {
    pub fn matches(&self, value: f64) -> bool {
        match *self {
            Threshold::Above(t) => value > t,
            Threshold::AtMost(t) => value <= t,
            Threshold::Below(t) => value < t,
            Threshold::Equal(t) => value == t,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Band {
    pub threshold: Threshold,
    pub label: &'static str,
    pub color: &'static str,
}

const fn band(threshold: Threshold, label: &'static str, color: &'static str) -> Band {
    Band {
        threshold,
        label,
        color,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statistic {
    Max,
    Min,
}

/// Ordered bands evaluated against the max or min of a field group; first match wins.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    pub fields: Vec<Field>,
    pub statistic: Statistic,
    pub bands: Vec<Band>,
}

impl RuleSet {
    pub fn classify(&self, value: f64) -> Option<&Band> {
        self.bands.iter().find(|b| b.threshold.matches(value))
    }
}

/// Static field metadata: units, pairing, extreme direction and highlight rules.
#[derive(Debug, Clone)]
pub struct FieldCatalog {
    specs: Vec<FieldSpec>,
    pub heat: RuleSet,
    pub cold: RuleSet,
    pub precipitation: RuleSet,
    pub wind: RuleSet,
}

const TEMPERATURE_GROUP: [Field; 4] = [
    Field::MinTempF,
    Field::MaxTempF,
    Field::MinFeelF,
    Field::MaxFeelF,
];

impl FieldCatalog {
    pub fn standard() -> Self {
        let specs = Field::ALL
            .iter()
            .map(|&field| {
                let (label, unit) = split_units(field.display_name(), false);
                FieldSpec {
                    field,
                    pair: standard_pair(field),
                    extreme: standard_extreme(field),
                    label,
                    unit,
                }
            })
            .collect();

        Self {
            specs,
            heat: RuleSet {
                fields: TEMPERATURE_GROUP.to_vec(),
                statistic: Statistic::Max,
                bands: vec![
                    band(Threshold::Above(100.0), "Scorching", "#984b44"),
                    band(Threshold::Above(90.0), "Hot", "#b05b5a"),
                    band(Threshold::Above(75.0), "Warm", "#c77560"),
                    band(Threshold::Above(60.0), "Comfortable", "#e9cc77"),
                ],
            },
            cold: RuleSet {
                fields: TEMPERATURE_GROUP.to_vec(),
                statistic: Statistic::Min,
                bands: vec![
                    band(Threshold::AtMost(32.0), "Freezing", "#5ca0b4"),
                    band(Threshold::Below(45.0), "Cold", "#83c2d5"),
                    band(Threshold::Below(60.0), "Cool", "#8dbf71"),
                ],
            },
            precipitation: RuleSet {
                fields: vec![Field::PrecipIn],
                statistic: Statistic::Max,
                bands: vec![
                    band(Threshold::Above(1.5), "Significant Precip", COLOR_GREEN_BLUE),
                    band(Threshold::Above(0.5), "Precip", COLOR_SEA_BLUE),
                    band(Threshold::Above(0.01), "Light Precip", COLOR_SKY_BLUE),
                    band(Threshold::Above(0.0), "Trace Precip", COLOR_FRESH_BLUE),
                    band(Threshold::Equal(0.0), "No Precip", COLOR_DARK_BROWN),
                ],
            },
            wind: RuleSet {
                fields: vec![Field::MaxWindKts, Field::MaxGustKts],
                statistic: Statistic::Max,
                bands: vec![
                    band(Threshold::Above(74.0), "Destructive Winds", "#5e1d47"),
                    band(Threshold::Above(56.0), "Violent Winds", "#663c60"),
                    band(Threshold::Above(34.0), "Heavy Winds", "#966289"),
                    band(Threshold::Above(20.0), "Windy", "#e196d1"),
                    band(Threshold::Above(8.0), "Breezy", "#5d5353"),
                    band(Threshold::Above(0.0), "Light Breeze", "#cccccc"),
                    band(Threshold::Equal(0.0), "Calm", "#eeeeee"),
                ],
            },
        }
    }

    pub fn spec(&self, field: Field) -> &FieldSpec {
        // specs is built from Field::ALL, whose order matches the enum discriminants
        &self.specs[field as usize]
    }

    pub fn pair(&self, field: Field) -> Option<Field> {
        self.spec(field).pair
    }

    pub fn extreme(&self, field: Field) -> Option<Extreme> {
        self.spec(field).extreme
    }

    pub fn unit(&self, field: Field) -> &str {
        &self.spec(field).unit
    }

    pub fn label(&self, field: Field) -> &str {
        &self.spec(field).label
    }

    /// Max-extreme fields, in column order.
    pub fn top_fields(&self) -> Vec<Field> {
        self.fields_with(Extreme::Max)
    }

    /// Min-extreme fields, in column order.
    pub fn bottom_fields(&self) -> Vec<Field> {
        self.fields_with(Extreme::Min)
    }

    pub fn ranked_fields(&self) -> Vec<Field> {
        self.specs
            .iter()
            .filter(|s| s.extreme.is_some())
            .map(|s| s.field)
            .collect()
    }

    fn fields_with(&self, extreme: Extreme) -> Vec<Field> {
        self.specs
            .iter()
            .filter(|s| s.extreme == Some(extreme))
            .map(|s| s.field)
            .collect()
    }
}

impl Default for FieldCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn standard_pair(field: Field) -> Option<Field> {
    match field {
        Field::MinTempF => Some(Field::MaxTempF),
        Field::MaxTempF => Some(Field::MinTempF),
        Field::PrecipIn => Some(Field::SnowIn),
        Field::SnowIn => Some(Field::PrecipIn),
        Field::MinFeelF => Some(Field::MaxFeelF),
        Field::MaxFeelF => Some(Field::MinFeelF),
        Field::MaxWindKts => Some(Field::MaxGustKts),
        Field::MaxGustKts => Some(Field::MaxWindKts),
        Field::ClimoMaxTempF | Field::ClimoMinTempF | Field::ClimoPrecipIn => None,
    }
}

fn standard_extreme(field: Field) -> Option<Extreme> {
    match field {
        Field::MaxTempF
        | Field::MaxFeelF
        | Field::PrecipIn
        | Field::SnowIn
        | Field::MaxWindKts
        | Field::MaxGustKts => Some(Extreme::Max),
        Field::MinTempF | Field::MinFeelF => Some(Extreme::Min),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairs_are_symmetric() {
        let catalog = FieldCatalog::standard();
        for field in Field::OBSERVED {
            let pair = catalog.pair(field).unwrap();
            assert_eq!(catalog.pair(pair), Some(field));
        }
        assert_eq!(catalog.pair(Field::ClimoPrecipIn), None);
    }

    #[test]
    fn test_spec_lookup_matches_field() {
        let catalog = FieldCatalog::standard();
        for field in Field::ALL {
            assert_eq!(catalog.spec(field).field, field);
        }
        assert_eq!(catalog.unit(Field::MaxGustKts), " kts");
        assert_eq!(catalog.label(Field::MaxGustKts), "Max Gust");
    }

    #[test]
    fn test_extreme_sets() {
        let catalog = FieldCatalog::standard();
        assert_eq!(
            catalog.bottom_fields(),
            vec![Field::MinTempF, Field::MinFeelF]
        );
        assert_eq!(catalog.top_fields().len(), 6);
        assert_eq!(catalog.ranked_fields().len(), 8);
    }

    #[test]
    fn test_band_order_first_match_wins() {
        let catalog = FieldCatalog::standard();
        assert_eq!(catalog.heat.classify(101.0).map(|b| b.label), Some("Scorching"));
        assert_eq!(catalog.heat.classify(100.0).map(|b| b.label), Some("Hot"));
        assert_eq!(catalog.heat.classify(60.0), None);
        assert_eq!(catalog.cold.classify(32.0).map(|b| b.label), Some("Freezing"));
        assert_eq!(catalog.cold.classify(60.0), None);
        assert_eq!(catalog.wind.classify(0.0).map(|b| b.label), Some("Calm"));
        assert_eq!(
            catalog.precipitation.classify(0.01).map(|b| b.label),
            Some("Trace Precip")
        );
    }
}
