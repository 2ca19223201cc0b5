use serde::{Deserialize, Serialize};
use validator::Validate;

use super::competitor::{parse_weight, validate_weight};
use crate::error::{MeetError, Result};
use crate::models::{AttemptStatus, Competitor, Lift, WeightUnit};

/// An attempt entry from the judging table, weight still in text form.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AttemptEntryRequest {
    pub lift: Lift,

    #[validate(range(min = 1, max = 3, message = "Attempt must be 1, 2 or 3"))]
    pub attempt: u8,

    #[validate(custom(function = "validate_weight"))]
    pub weight: String,

    pub status: AttemptStatus,

    #[serde(default)]
    pub unit: WeightUnit,
}

impl AttemptEntryRequest {
    /// Records the attempt on `competitor`. Nothing changes when the entry
    /// does not validate.
    pub fn apply_to(&self, competitor: &mut Competitor) -> Result<()> {
        self.validate()
            .map_err(|e| MeetError::invalid_input(e.to_string()))?;

        let weight = parse_weight(&self.weight)?;
        competitor.set_attempt(
            self.lift,
            usize::from(self.attempt),
            weight,
            self.status,
            self.unit,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn competitor() -> Competitor {
        Competitor::new("Ada", "Bar", 28, "Hill", 61.0, WeightUnit::Kg)
    }

    fn entry(attempt: u8, weight: &str) -> AttemptEntryRequest {
        AttemptEntryRequest {
            lift: Lift::Deadlift,
            attempt,
            weight: weight.to_string(),
            status: AttemptStatus::Good,
            unit: WeightUnit::Lb,
        }
    }

    #[test]
    fn test_apply_records_attempt() {
        let mut c = competitor();
        entry(2, "441").apply_to(&mut c).unwrap();

        let attempt = c.attempt(Lift::Deadlift, 2).unwrap();
        assert_eq!(attempt.get_weight(WeightUnit::Lb), 441.0);
        assert_eq!(c.total().get_weight(WeightUnit::Kg), 441.0 / 2.205);
    }

    #[test]
    fn test_invalid_entry_leaves_competitor_untouched() {
        let mut c = competitor();
        entry(1, "400").apply_to(&mut c).unwrap();

        assert!(matches!(
            entry(1, "heavy").apply_to(&mut c),
            Err(MeetError::InvalidInput(_))
        ));
        assert!(entry(4, "500").apply_to(&mut c).is_err());
        assert!(entry(0, "500").apply_to(&mut c).is_err());

        assert_eq!(
            c.attempt(Lift::Deadlift, 1).unwrap().get_weight(WeightUnit::Lb),
            400.0
        );
    }
}
