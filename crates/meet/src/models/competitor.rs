use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;
use uuid::Uuid;

use super::attempt::{Attempt, AttemptStatus};
use super::classification::{Division, WeightClass, classification_key};
use super::weight::{WeightUnit, WeightValue};
use crate::error::{MeetError, Result};

pub const ATTEMPTS_PER_LIFT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lift {
    Squat,
    Bench,
    Deadlift,
}

impl Lift {
    pub const ALL: [Lift; 3] = [Self::Squat, Self::Bench, Self::Deadlift];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Squat => "Squat",
            Self::Bench => "Bench Press",
            Self::Deadlift => "Deadlift",
        }
    }
}

impl fmt::Display for Lift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Lift {
    type Err = MeetError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "squat" | "s" => Ok(Self::Squat),
            "bench" | "bench press" | "b" => Ok(Self::Bench),
            "deadlift" | "d" => Ok(Self::Deadlift),
            _ => Err(MeetError::invalid_input(format!(
                "Unknown lift '{}'. Expected squat, bench or deadlift",
                s
            ))),
        }
    }
}

/// A lifter entered in the meet.
///
/// Division and weight class are decided once when the competitor is created.
/// Changing age or bodyweight afterwards does not move the competitor to
/// another category, which keeps roster group membership stable.
#[derive(Debug, Clone)]
pub struct Competitor {
    id: Uuid,
    first_name: String,
    last_name: String,
    age: i32,
    hometown: String,
    bodyweight: WeightValue,
    division: Division,
    weight_class: WeightClass,
    squat: [Attempt; ATTEMPTS_PER_LIFT],
    bench: [Attempt; ATTEMPTS_PER_LIFT],
    deadlift: [Attempt; ATTEMPTS_PER_LIFT],
    total: WeightValue,
}

impl Competitor {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        age: i32,
        hometown: impl Into<String>,
        bodyweight: f64,
        unit: WeightUnit,
    ) -> Self {
        let bodyweight = WeightValue::new(bodyweight, unit);
        let division = Division::for_age(age);
        let weight_class = WeightClass::for_bodyweight_kg(bodyweight.get_weight(WeightUnit::Kg));

        Self {
            id: Uuid::new_v4(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            age,
            hometown: hometown.into(),
            bodyweight,
            division,
            weight_class,
            squat: [Attempt::new(); ATTEMPTS_PER_LIFT],
            bench: [Attempt::new(); ATTEMPTS_PER_LIFT],
            deadlift: [Attempt::new(); ATTEMPTS_PER_LIFT],
            total: WeightValue::zero(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    pub fn hometown(&self) -> &str {
        &self.hometown
    }

    pub fn bodyweight(&self, unit: WeightUnit) -> f64 {
        self.bodyweight.get_weight(unit)
    }

    pub fn division(&self) -> Division {
        self.division
    }

    pub fn weight_class(&self) -> WeightClass {
        self.weight_class
    }

    pub fn classification_key(&self) -> String {
        classification_key(self.weight_class, self.division)
    }

    pub fn total(&self) -> WeightValue {
        self.total
    }

    pub fn set_first_name(&mut self, first_name: impl Into<String>) {
        self.first_name = first_name.into();
    }

    pub fn set_last_name(&mut self, last_name: impl Into<String>) {
        self.last_name = last_name.into();
    }

    pub fn set_hometown(&mut self, hometown: impl Into<String>) {
        self.hometown = hometown.into();
    }

    /// Does not reclassify.
    pub fn set_age(&mut self, age: i32) {
        self.age = age;
    }

    /// Does not reclassify.
    pub fn set_bodyweight(&mut self, value: f64, unit: WeightUnit) {
        self.bodyweight.set_weight(value, unit);
    }

    pub fn attempts(&self, lift: Lift) -> &[Attempt; ATTEMPTS_PER_LIFT] {
        match lift {
            Lift::Squat => &self.squat,
            Lift::Bench => &self.bench,
            Lift::Deadlift => &self.deadlift,
        }
    }

    /// `attempt` is 1-based.
    pub fn attempt(&self, lift: Lift, attempt: usize) -> Option<&Attempt> {
        attempt
            .checked_sub(1)
            .and_then(|idx| self.attempts(lift).get(idx))
    }

    /// Records a judged or projected attempt (1-based) and recomputes the
    /// total. Fails without touching any state when `attempt` is not 1, 2 or 3.
    pub fn set_attempt(
        &mut self,
        lift: Lift,
        attempt: usize,
        weight: f64,
        status: AttemptStatus,
        unit: WeightUnit,
    ) -> Result<()> {
        if !(1..=ATTEMPTS_PER_LIFT).contains(&attempt) {
            return Err(MeetError::invalid_input(format!(
                "Attempt number must be between 1 and {}, got {}",
                ATTEMPTS_PER_LIFT, attempt
            )));
        }

        let slot = match lift {
            Lift::Squat => &mut self.squat[attempt - 1],
            Lift::Bench => &mut self.bench[attempt - 1],
            Lift::Deadlift => &mut self.deadlift[attempt - 1],
        };
        slot.set_weight(weight, unit);
        slot.set_status(status);

        self.update_total();

        debug!(
            competitor = %self.full_name(),
            lift = %lift,
            attempt,
            status = %status,
            total_kg = self.total.get_weight(WeightUnit::Kg),
            "Attempt recorded"
        );

        Ok(())
    }

    /// Heaviest `Good` attempt, or a zero-weight attempt when none is good.
    /// The earliest attempt wins a tie.
    pub fn best_of(&self, lift: Lift) -> Attempt {
        find_largest(self.attempts(lift))
    }

    pub fn printable_total(&self) -> String {
        self.total.to_string()
    }

    pub fn printable_best(&self, lift: Lift) -> String {
        self.best_of(lift).weight_string()
    }

    pub fn printable_bodyweight(&self) -> String {
        self.bodyweight.to_string()
    }

    pub fn printable_attempt(&self, lift: Lift, attempt: usize) -> Option<String> {
        self.attempt(lift, attempt).map(|a| a.to_string())
    }

    /// Three-line summary of one lift as shown on the judging table.
    pub fn attempt_card(&self, lift: Lift) -> String {
        let [first, second, third] = self.attempts(lift);
        format!("{}:\n1) {}\n2) {}\n3) {}", lift, first, second, third)
    }

    fn update_total(&mut self) {
        let total_kg: f64 = Lift::ALL
            .iter()
            .map(|&lift| self.best_of(lift).get_weight(WeightUnit::Kg))
            .sum();
        self.total.set_weight(total_kg, WeightUnit::Kg);
    }
}

impl fmt::Display for Competitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: (S){} | (B){} | (D){} | (Total){}",
            self.first_name,
            self.last_name,
            self.printable_best(Lift::Squat),
            self.printable_best(Lift::Bench),
            self.printable_best(Lift::Deadlift),
            self.total
        )
    }
}

fn find_largest(attempts: &[Attempt]) -> Attempt {
    let mut best = Attempt::new();
    for attempt in attempts {
        if attempt.get_weight(WeightUnit::Kg) > best.get_weight(WeightUnit::Kg) && attempt.is_good()
        {
            best = *attempt;
        }
    }
    best
}
