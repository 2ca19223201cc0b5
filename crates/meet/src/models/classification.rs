use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MeetError;

/// Age based competitive category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Division {
    #[serde(rename = "Sub-Junior")]
    SubJunior,
    Junior,
    Open,
    #[serde(rename = "Masters-1")]
    Masters1,
    #[serde(rename = "Masters-2")]
    Masters2,
    #[serde(rename = "Masters-3")]
    Masters3,
    #[serde(rename = "Masters-4")]
    Masters4,
}

impl Division {
    /// Report enumeration order.
    pub const ALL: [Division; 7] = [
        Self::SubJunior,
        Self::Junior,
        Self::Open,
        Self::Masters1,
        Self::Masters2,
        Self::Masters3,
        Self::Masters4,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SubJunior => "Sub-Junior",
            Self::Junior => "Junior",
            Self::Open => "Open",
            Self::Masters1 => "Masters-1",
            Self::Masters2 => "Masters-2",
            Self::Masters3 => "Masters-3",
            Self::Masters4 => "Masters-4",
        }
    }

    pub fn for_age(age: i32) -> Self {
        if age >= 70 {
            Self::Masters4
        } else if age >= 60 {
            Self::Masters3
        } else if age >= 50 {
            Self::Masters2
        } else if age >= 40 {
            Self::Masters1
        } else if age >= 24 {
            Self::Open
        } else if age >= 19 {
            Self::Junior
        } else {
            Self::SubJunior
        }
    }
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Division {
    type Err = MeetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| {
                MeetError::invalid_input(format!(
                    "Unknown division '{}'. Available: {}",
                    s,
                    Self::ALL
                        .iter()
                        .map(|d| d.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            })
    }
}

/// Bodyweight based competitive category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeightClass {
    #[serde(rename = "59kgs/130lbs")]
    Up59,
    #[serde(rename = "66kgs/145lbs")]
    Up66,
    #[serde(rename = "74kgs/163lbs")]
    Up74,
    #[serde(rename = "83kgs/183lbs")]
    Up83,
    #[serde(rename = "93kgs/205lbs")]
    Up93,
    #[serde(rename = "105kgs/231lbs")]
    Up105,
    #[serde(rename = "120kgs/265lbs")]
    Up120,
    #[serde(rename = "120kgs+/265lb+")]
    Over120,
}

impl WeightClass {
    /// Report enumeration order, lightest first.
    pub const ALL: [WeightClass; 8] = [
        Self::Up59,
        Self::Up66,
        Self::Up74,
        Self::Up83,
        Self::Up93,
        Self::Up105,
        Self::Up120,
        Self::Over120,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up59 => "59kgs/130lbs",
            Self::Up66 => "66kgs/145lbs",
            Self::Up74 => "74kgs/163lbs",
            Self::Up83 => "83kgs/183lbs",
            Self::Up93 => "93kgs/205lbs",
            Self::Up105 => "105kgs/231lbs",
            Self::Up120 => "120kgs/265lbs",
            Self::Over120 => "120kgs+/265lb+",
        }
    }

    /// Comparisons are strict, so a bodyweight sitting exactly on a limit
    /// belongs to the lighter class.
    pub fn for_bodyweight_kg(kg: f64) -> Self {
        if kg > 120.0 {
            Self::Over120
        } else if kg > 105.0 {
            Self::Up120
        } else if kg > 93.0 {
            Self::Up105
        } else if kg > 83.0 {
            Self::Up93
        } else if kg > 74.0 {
            Self::Up83
        } else if kg > 66.0 {
            Self::Up74
        } else if kg > 59.0 {
            Self::Up66
        } else {
            Self::Up59
        }
    }
}

impl fmt::Display for WeightClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WeightClass {
    type Err = MeetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|wc| wc.as_str() == s)
            .ok_or_else(|| {
                MeetError::invalid_input(format!(
                    "Unknown weight class '{}'. Available: {}",
                    s,
                    Self::ALL
                        .iter()
                        .map(|wc| wc.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            })
    }
}

/// Roster lookup key, `"<weightClass>-<division>"`.
pub fn classification_key(weight_class: WeightClass, division: Division) -> String {
    format!("{}-{}", weight_class.as_str(), division.as_str())
}
