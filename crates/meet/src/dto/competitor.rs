use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::{MeetError, Result};
use crate::models::{Competitor, WeightUnit};

/// Registration form as typed at the scoring table. Numbers arrive as text
/// and are only turned into a [`Competitor`] once they parse.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewCompetitorRequest {
    #[validate(length(max = 255, message = "First name must be at most 255 characters"))]
    pub first_name: String,

    #[validate(length(max = 255, message = "Last name must be at most 255 characters"))]
    pub last_name: String,

    #[validate(custom(function = "validate_age"))]
    pub age: String,

    #[validate(length(max = 255))]
    pub hometown: String,

    #[validate(custom(function = "validate_weight"))]
    pub bodyweight: String,

    #[serde(default)]
    pub unit: WeightUnit,
}

impl NewCompetitorRequest {
    pub fn into_competitor(self) -> Result<Competitor> {
        self.validate()
            .map_err(|e| MeetError::invalid_input(e.to_string()))?;

        let age = parse_age(&self.age)?;
        let bodyweight = parse_weight(&self.bodyweight)?;

        Ok(Competitor::new(
            self.first_name,
            self.last_name,
            age,
            self.hometown,
            bodyweight,
            self.unit,
        ))
    }
}

pub fn parse_age(raw: &str) -> Result<i32> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| MeetError::invalid_input(format!("Age '{}' is not a whole number", raw)))
}

/// Accepts anything `f64` parses, NaN included; range checks are left to
/// the caller.
pub fn parse_weight(raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| MeetError::invalid_input(format!("Weight '{}' is not a number", raw)))
}

fn validate_age(age: &str) -> std::result::Result<(), ValidationError> {
    parse_age(age)
        .map(|_| ())
        .map_err(|_| ValidationError::new("invalid_age"))
}

pub(crate) fn validate_weight(weight: &str) -> std::result::Result<(), ValidationError> {
    parse_weight(weight)
        .map(|_| ())
        .map_err(|_| ValidationError::new("invalid_weight"))
}
