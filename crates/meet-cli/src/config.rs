use anyhow::{Context, Result};
use meet::WeightUnit;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub report_dir: PathBuf,
    pub default_unit: WeightUnit,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let default_unit = match std::env::var("MEET_UNIT") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("MEET_UNIT must be kg or lb, got '{}'", raw))?,
            Err(_) => WeightUnit::Kg,
        };

        Ok(Self {
            report_dir: std::env::var("MEET_REPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            default_unit,
        })
    }

    pub fn with_overrides(mut self, report_dir: Option<PathBuf>, unit: Option<WeightUnit>) -> Self {
        if let Some(dir) = report_dir {
            self.report_dir = dir;
        }
        if let Some(unit) = unit {
            self.default_unit = unit;
        }
        self
    }
}
