use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::weight::{WeightUnit, WeightValue};
use crate::error::MeetError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttemptStatus {
    #[default]
    Empty,
    Good,
    Fail,
    Projection,
}

impl AttemptStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "Empty",
            Self::Good => "Good",
            Self::Fail => "Fail",
            Self::Projection => "Projection",
        }
    }
}

impl fmt::Display for AttemptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AttemptStatus {
    type Err = MeetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "empty" => Ok(Self::Empty),
            "good" => Ok(Self::Good),
            "fail" => Ok(Self::Fail),
            "projection" => Ok(Self::Projection),
            _ => Err(MeetError::invalid_input(format!(
                "Unknown attempt status '{}'. Expected Empty, Good, Fail or Projection",
                s
            ))),
        }
    }
}

/// One judged or projected lift.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Attempt {
    weight: WeightValue,
    status: AttemptStatus,
}

impl Attempt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn weight(&self) -> WeightValue {
        self.weight
    }

    pub fn get_weight(&self, unit: WeightUnit) -> f64 {
        self.weight.get_weight(unit)
    }

    pub fn status(&self) -> AttemptStatus {
        self.status
    }

    pub fn is_good(&self) -> bool {
        self.status == AttemptStatus::Good
    }

    pub fn set_weight(&mut self, value: f64, unit: WeightUnit) {
        self.weight.set_weight(value, unit);
    }

    pub fn set_status(&mut self, status: AttemptStatus) {
        self.status = status;
    }

    pub fn weight_string(&self) -> String {
        self.weight.to_string()
    }
}

impl fmt::Display for Attempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.weight, self.status)
    }
}
