//! CSV archiving
//!
//! An `Archiver` appends flat serialisable records to a CSV file, normally
//! inside the session's archive directory. Records carry their own timestamp.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use csv::{Writer, WriterBuilder};
use serde::Serialize;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use thiserror::Error;

// Internal imports
use crate::session::Session;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Appends records to one CSV archive file.
pub struct Archiver {
    path: PathBuf,
    writer: Writer<File>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors that can occur while archiving.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Could not open the archive file {0:?}: {1}")]
    FileError(PathBuf, std::io::Error),

    #[error("Could not write a record to {0:?}: {1}")]
    CsvError(PathBuf, csv::Error),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Archiver {
    /// Open an archive at `path` relative to the session's archive root.
    pub fn from_path<P: AsRef<Path>>(
        session: &Session, path: P
    ) -> Result<Self, ArchiveError> {
        Self::create(session.arch_root.join(path))
    }

    /// Open an archive at an absolute path, creating missing parent
    /// directories.
    ///
    /// An existing file is appended to. The header row is only written when
    /// the file is empty.
    pub fn create<P: Into<PathBuf>>(path: P) -> Result<Self, ArchiveError> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ArchiveError::FileError(path.clone(), e))?;
        }

        let is_empty = fs::metadata(&path).map_or(true, |m| m.len() == 0);

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| ArchiveError::FileError(path.clone(), e))?;

        let writer = WriterBuilder::new()
            .has_headers(is_empty)
            .from_writer(file);

        Ok(Self { path, writer })
    }

    /// Path of the archive file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record and flush it to disk.
    ///
    /// `record` must serialise as a flat struct, CSV has no nesting.
    pub fn serialise<T: Serialize>(&mut self, record: T) -> Result<(), ArchiveError> {
        self.writer.serialize(record)
            .map_err(|e| ArchiveError::CsvError(self.path.clone(), e))?;
        self.writer.flush()
            .map_err(|e| ArchiveError::FileError(self.path.clone(), e))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(Serialize)]
    struct Sample {
        time_s: f64,
        leg: usize,
        z_mm: f64,
    }

    #[test]
    fn test_serialise() {
        let path = std::env::temp_dir()
            .join("hex_sw_archive_test")
            .join("legs.csv");
        fs::remove_file(&path).ok();

        let mut arch = Archiver::create(&path).unwrap();
        arch.serialise(Sample { time_s: 0.0, leg: 1, z_mm: -40.0 }).unwrap();
        arch.serialise(Sample { time_s: 0.5, leg: 2, z_mm: -20.0 }).unwrap();
        assert_eq!(arch.path(), path.as_path());

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["time_s,leg,z_mm", "0.0,1,-40.0", "0.5,2,-20.0"]);

        fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_reopen_appends_without_header() {
        let path = std::env::temp_dir()
            .join("hex_sw_archive_reopen_test")
            .join("legs.csv");
        fs::remove_file(&path).ok();

        Archiver::create(&path).unwrap()
            .serialise(Sample { time_s: 0.0, leg: 1, z_mm: -40.0 }).unwrap();
        Archiver::create(&path).unwrap()
            .serialise(Sample { time_s: 1.0, leg: 3, z_mm: -30.0 }).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["time_s,leg,z_mm", "0.0,1,-40.0", "1.0,3,-30.0"]);

        fs::remove_dir_all(path.parent().unwrap()).ok();
    }
}
