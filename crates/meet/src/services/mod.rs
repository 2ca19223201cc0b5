pub mod meet_report;
pub mod plate_loading;
pub mod ranking;

pub use meet_report::{render_full_meet_report, render_meet_report};
pub use plate_loading::{LayoutStatus, LoadedPlate, PlateCount, PlateKind, PlateLayout, PlateLoadSolver, solve};
pub use ranking::{rank, standing_entries, standings};
