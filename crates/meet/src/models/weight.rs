use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MeetError;

/// Pounds per kilogram. Both conversion directions use this same factor so
/// values stay self-consistent.
pub const LB_PER_KG: f64 = 2.205;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lb,
}

impl WeightUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kg => "KG",
            Self::Lb => "LB",
        }
    }

    pub fn other(&self) -> Self {
        match self {
            Self::Kg => Self::Lb,
            Self::Lb => Self::Kg,
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WeightUnit {
    type Err = MeetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "kg" | "kgs" | "kilo" | "kilos" | "kilograms" => Ok(Self::Kg),
            "lb" | "lbs" | "pound" | "pounds" => Ok(Self::Lb),
            _ => Err(MeetError::invalid_input(format!(
                "Unknown weight unit '{}'. Expected kg or lb",
                s
            ))),
        }
    }
}

/// Converts a raw magnitude between units using [`LB_PER_KG`].
pub fn convert(value: f64, from: WeightUnit, to: WeightUnit) -> f64 {
    match (from, to) {
        (WeightUnit::Kg, WeightUnit::Lb) => value * LB_PER_KG,
        (WeightUnit::Lb, WeightUnit::Kg) => value / LB_PER_KG,
        _ => value,
    }
}

/// A weight held in both kilograms and pounds at once.
///
/// Whichever unit the value is set in is stored verbatim and the other one is
/// derived, so reading back in the unit used for setting never loses
/// precision. No range checks are applied: negative and NaN magnitudes are
/// stored as given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightValue {
    kilograms: f64,
    pounds: f64,
}

impl WeightValue {
    pub fn new(value: f64, unit: WeightUnit) -> Self {
        let mut weight = Self::zero();
        weight.set_weight(value, unit);
        weight
    }

    pub fn zero() -> Self {
        Self {
            kilograms: 0.0,
            pounds: 0.0,
        }
    }

    pub fn kg(value: f64) -> Self {
        Self::new(value, WeightUnit::Kg)
    }

    pub fn lb(value: f64) -> Self {
        Self::new(value, WeightUnit::Lb)
    }

    pub fn set_weight(&mut self, value: f64, unit: WeightUnit) {
        match unit {
            WeightUnit::Kg => {
                self.kilograms = value;
                self.pounds = convert(value, WeightUnit::Kg, WeightUnit::Lb);
            }
            WeightUnit::Lb => {
                self.pounds = value;
                self.kilograms = convert(value, WeightUnit::Lb, WeightUnit::Kg);
            }
        }
    }

    pub fn get_weight(&self, unit: WeightUnit) -> f64 {
        match unit {
            WeightUnit::Kg => self.kilograms,
            WeightUnit::Lb => self.pounds,
        }
    }
}

impl fmt::Display for WeightValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}KGs/ {}LBs",
            format_amount(self.kilograms),
            format_amount(self.pounds)
        )
    }
}

/// Renders a magnitude with at most two decimals, half-even rounding and no
/// trailing zeros (`100`, `220.5`, `1.23`).
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    match Decimal::from_f64_retain(value) {
        Some(d) => d.round_dp(2).normalize().to_string(),
        None => format!("{:.2}", value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_in_kg_derives_pounds() {
        let weight = WeightValue::kg(100.0);
        assert_eq!(weight.get_weight(WeightUnit::Kg), 100.0);
        assert_eq!(weight.get_weight(WeightUnit::Lb), 100.0 * 2.205);
    }

    #[test]
    fn test_set_in_lb_reads_back_unchanged() {
        for value in [0.0, 45.0, 137.3, 602.25, -10.0] {
            let weight = WeightValue::lb(value);
            assert_eq!(weight.get_weight(WeightUnit::Lb), value);
            assert_eq!(weight.get_weight(WeightUnit::Kg), value / 2.205);
        }
    }

    #[test]
    fn test_set_weight_replaces_both_units() {
        let mut weight = WeightValue::kg(50.0);
        weight.set_weight(225.0, WeightUnit::Lb);
        assert_eq!(weight.get_weight(WeightUnit::Lb), 225.0);
        assert_eq!(weight.get_weight(WeightUnit::Kg), 225.0 / 2.205);
    }

    #[test]
    fn test_nan_is_stored_not_rejected() {
        let weight = WeightValue::kg(f64::NAN);
        assert!(weight.get_weight(WeightUnit::Kg).is_nan());
        assert!(weight.get_weight(WeightUnit::Lb).is_nan());
    }

    #[test]
    fn test_display_format() {
        assert_eq!(WeightValue::zero().to_string(), "0KGs/ 0LBs");
        assert_eq!(WeightValue::kg(100.0).to_string(), "100KGs/ 220.5LBs");
        assert_eq!(WeightValue::kg(150.0).to_string(), "150KGs/ 330.75LBs");
        assert_eq!(WeightValue::kg(63.5).to_string(), "63.5KGs/ 140.02LBs");
    }

    #[test]
    fn test_format_amount_rounding() {
        assert_eq!(format_amount(1.234), "1.23");
        assert_eq!(format_amount(1.2), "1.2");
        assert_eq!(format_amount(-2.5), "-2.5");
        assert_eq!(format_amount(f64::INFINITY), "inf");
    }

    #[test]
    fn test_unit_parsing() {
        assert_eq!("kg".parse::<WeightUnit>().unwrap(), WeightUnit::Kg);
        assert_eq!("LBS".parse::<WeightUnit>().unwrap(), WeightUnit::Lb);
        assert!("stone".parse::<WeightUnit>().is_err());
        assert_eq!(WeightUnit::Kg.other(), WeightUnit::Lb);
    }
}
