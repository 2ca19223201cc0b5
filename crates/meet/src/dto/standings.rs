use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::MeetError;
use crate::models::{Competitor, Lift, WeightUnit, WeightValue};

/// What a standings table is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingCriterion {
    #[default]
    Total,
    Squat,
    Bench,
    Deadlift,
}

impl RankingCriterion {
    pub const ALL: [RankingCriterion; 4] = [Self::Total, Self::Squat, Self::Bench, Self::Deadlift];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Total => "Total",
            Self::Squat => "Squat",
            Self::Bench => "Bench Press",
            Self::Deadlift => "Deadlift",
        }
    }

    /// Sort key in kilograms.
    pub fn score(&self, competitor: &Competitor) -> f64 {
        match self {
            Self::Total => competitor.total().get_weight(WeightUnit::Kg),
            Self::Squat => competitor.best_of(Lift::Squat).get_weight(WeightUnit::Kg),
            Self::Bench => competitor.best_of(Lift::Bench).get_weight(WeightUnit::Kg),
            Self::Deadlift => competitor.best_of(Lift::Deadlift).get_weight(WeightUnit::Kg),
        }
    }
}

impl fmt::Display for RankingCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RankingCriterion {
    type Err = MeetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "total" => Ok(Self::Total),
            "squat" => Ok(Self::Squat),
            "bench" | "bench press" => Ok(Self::Bench),
            "deadlift" => Ok(Self::Deadlift),
            _ => Err(MeetError::invalid_input(format!(
                "Unknown ranking criterion '{}'. Available: {}",
                s,
                Self::ALL
                    .iter()
                    .map(|c| c.as_str().to_lowercase())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))),
        }
    }
}

/// One row of a standings table.
#[derive(Debug, Clone, Serialize)]
pub struct StandingEntry {
    pub rank: usize,
    pub competitor_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub squat: WeightValue,
    pub bench: WeightValue,
    pub deadlift: WeightValue,
    pub total: WeightValue,
}

impl StandingEntry {
    pub fn new(rank: usize, competitor: &Competitor) -> Self {
        Self {
            rank,
            competitor_id: competitor.id(),
            first_name: competitor.first_name().to_string(),
            last_name: competitor.last_name().to_string(),
            squat: competitor.best_of(Lift::Squat).weight(),
            bench: competitor.best_of(Lift::Bench).weight(),
            deadlift: competitor.best_of(Lift::Deadlift).weight(),
            total: competitor.total(),
        }
    }
}

impl fmt::Display for StandingEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}: (S){} | (B){} | (D){} | (Total){}",
            self.rank,
            self.first_name,
            self.last_name,
            self.squat,
            self.bench,
            self.deadlift,
            self.total
        )
    }
}
