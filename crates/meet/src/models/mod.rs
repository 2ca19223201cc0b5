pub mod attempt;
pub mod classification;
pub mod competitor;
pub mod plate_set;
pub mod weight;

pub use attempt::{Attempt, AttemptStatus};
pub use classification::{Division, WeightClass, classification_key};
pub use competitor::{ATTEMPTS_PER_LIFT, Competitor, Lift};
pub use plate_set::{PlateSet, PlateSpec};
pub use weight::{LB_PER_KG, WeightUnit, WeightValue, convert, format_amount};
