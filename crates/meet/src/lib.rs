pub mod dto;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use dto::standings::{RankingCriterion, StandingEntry};
pub use error::{MeetError, PlateLoadError, Result};
pub use models::{
    Attempt, AttemptStatus, Competitor, Division, Lift, PlateSet, PlateSpec, WeightClass,
    WeightUnit, WeightValue,
};
pub use repository::Roster;
pub use services::{LayoutStatus, PlateLayout, PlateLoadSolver};
