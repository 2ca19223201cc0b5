use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

/// Stores meet reports as `dd_MM_yyyy.txt` in a directory, falling back to
/// `dd_MM_yyyy(1).txt`, `dd_MM_yyyy(2).txt`, ... so an earlier report is
/// never overwritten.
pub struct ReportWriter {
    directory: PathBuf,
}

impl ReportWriter {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn write_today(&self, report: &str) -> Result<PathBuf> {
        self.write(report, chrono::Local::now().date_naive())
    }

    pub fn write(&self, report: &str, date: NaiveDate) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.directory).with_context(|| {
            format!(
                "Failed to create report directory {}",
                self.directory.display()
            )
        })?;

        let stem = date.format("%d_%m_%Y").to_string();
        let mut extension = 0u32;

        loop {
            let path = self.candidate(&stem, extension);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(report.as_bytes())
                        .with_context(|| format!("Failed to write report to {}", path.display()))?;
                    tracing::info!("Meet report written to {}", path.display());
                    return Ok(path);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    extension += 1;
                }
                Err(e) => {
                    return Err(e)
                        .with_context(|| format!("Failed to create report file {}", path.display()));
                }
            }
        }
    }

    fn candidate(&self, stem: &str, extension: u32) -> PathBuf {
        let name = if extension == 0 {
            format!("{}.txt", stem)
        } else {
            format!("{}({}).txt", stem, extension)
        };
        self.directory.join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_overwrites_existing_reports() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path());
        let date = NaiveDate::from_ymd_opt(2025, 11, 2).unwrap();

        let first = writer.write("first", date).unwrap();
        let second = writer.write("second", date).unwrap();
        let third = writer.write("third", date).unwrap();

        assert_eq!(first.file_name().unwrap(), "02_11_2025.txt");
        assert_eq!(second.file_name().unwrap(), "02_11_2025(1).txt");
        assert_eq!(third.file_name().unwrap(), "02_11_2025(2).txt");
        assert_eq!(std::fs::read_to_string(first).unwrap(), "first");
        assert_eq!(std::fs::read_to_string(third).unwrap(), "third");
    }

    #[test]
    fn test_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("reports").join("meet");
        let writer = ReportWriter::new(&nested);

        let path = writer
            .write("body", NaiveDate::from_ymd_opt(2024, 1, 9).unwrap())
            .unwrap();
        assert_eq!(path, nested.join("09_01_2024.txt"));
    }
}
