use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::weight::WeightUnit;
use crate::error::Result;

/// One plate denomination of a set together with its drawing dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateSpec {
    pub weight: f64,
    /// Share of the 433 mm bar sleeve the plate occupies (above 0, up to 100).
    pub width_percent: f64,
    /// Height relative to the tallest plate of the set (0 to 1).
    pub height_factor: f64,
    pub color: String,
}

impl PlateSpec {
    pub fn new(weight: f64, width_percent: f64, height_factor: f64, color: impl Into<String>) -> Self {
        Self {
            weight,
            width_percent,
            height_factor,
            color: color.into(),
        }
    }
}

/// A family of plates, heaviest first, plus the bar they are loaded on.
/// All weights are expressed in `unit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PlateSet {
    pub unit: WeightUnit,

    #[validate(length(min = 1, message = "A plate set needs at least one plate"))]
    #[validate(custom(function = "validate_plates"))]
    pub plates: Vec<PlateSpec>,

    #[validate(range(min = 0.0, message = "Bar weight cannot be negative"))]
    pub bar_weight: f64,
}

impl PlateSet {
    pub fn new(unit: WeightUnit, plates: Vec<PlateSpec>, bar_weight: f64) -> Result<Self> {
        let set = Self {
            unit,
            plates,
            bar_weight,
        };
        set.validate()?;
        Ok(set)
    }

    /// Competition kilogram plates on a 20 kg bar.
    pub fn kilogram() -> Self {
        let weights = [25.0, 20.0, 15.0, 10.0, 5.0, 2.5, 1.25, 0.5, 0.25];
        let colors = [
            "red", "blue", "yellow", "green", "white", "black", "silver", "silver", "silver",
        ];
        let widths = [6.24, 5.20, 4.85, 4.85, 4.97, 3.70, 2.77, 1.85, 1.39];
        let heights = [1.000, 1.000, 0.889, 0.722, 0.507, 0.422, 0.356, 0.298, 0.249];

        let plates = weights
            .iter()
            .zip(widths)
            .zip(heights)
            .zip(colors)
            .map(|(((&w, width), height), color)| PlateSpec::new(w, width, height, color))
            .collect();

        Self {
            unit: WeightUnit::Kg,
            plates,
            bar_weight: 20.0,
        }
    }

    /// Standard pound plates on a 45 lb bar.
    pub fn pound() -> Self {
        let weights = [45.0, 35.0, 25.0, 10.0, 5.0, 2.5];
        let widths = [13.16, 8.08, 8.08, 5.87, 3.67, 2.93];
        let heights = [1.000, 0.806, 0.601, 0.5, 0.439, 0.354];

        let plates = weights
            .iter()
            .zip(widths)
            .zip(heights)
            .map(|((&w, width), height)| PlateSpec::new(w, width, height, "silver"))
            .collect();

        Self {
            unit: WeightUnit::Lb,
            plates,
            bar_weight: 45.0,
        }
    }

    pub fn for_unit(unit: WeightUnit) -> Self {
        match unit {
            WeightUnit::Kg => Self::kilogram(),
            WeightUnit::Lb => Self::pound(),
        }
    }

    pub fn denominations(&self) -> Vec<f64> {
        self.plates.iter().map(|p| p.weight).collect()
    }
}

fn validate_plates(plates: &[PlateSpec]) -> std::result::Result<(), ValidationError> {
    for plate in plates {
        if plate.weight.is_nan() || plate.weight <= 0.0 {
            return Err(ValidationError::new("non_positive_plate"));
        }
        if plate.width_percent <= 0.0 || !(0.0..=100.0).contains(&plate.width_percent) {
            return Err(ValidationError::new("width_percent_out_of_range"));
        }
        if !(0.0..=1.0).contains(&plate.height_factor) {
            return Err(ValidationError::new("height_factor_out_of_range"));
        }
    }

    if plates.windows(2).any(|pair| pair[0].weight <= pair[1].weight) {
        return Err(ValidationError::new("plates_not_descending"));
    }

    Ok(())
}
