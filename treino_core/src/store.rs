//! Persistence for the workout log.
//!
//! The log is a flat CSV file with one column schema per deployment
//! variant. Saves rewrite the whole file through a temp-file-and-rename
//! so a failed write never clobbers the previous copy; reads take a
//! shared lock, writes an exclusive one.

use crate::{Error, Intensity, Quality, Result, Variant, WorkoutRecord};
use chrono::NaiveDate;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Date column format; locale-stable and unambiguous
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Storage collaborator for a workout log.
///
/// `load` returns the full record sequence in file order; `save`
/// rewrites the whole sequence (overwrite semantics, not append).
pub trait LogStore {
    fn load(&self) -> Result<Vec<WorkoutRecord>>;
    fn save(&self, records: &[WorkoutRecord]) -> Result<()>;
}

/// CSV-file-backed store with per-variant column schemas
pub struct CsvStore {
    path: PathBuf,
    variant: Variant,
}

// ============================================================================
// Row formats
// ============================================================================

/// Row shape shared by the basic and simple variants
#[derive(Debug, Serialize, Deserialize)]
struct BasicRow {
    #[serde(rename = "Data")]
    date: String,
    #[serde(rename = "Qualidade")]
    quality: String,
    #[serde(rename = "Tipo de Treino")]
    workout_type: String,
    #[serde(rename = "Exercícios")]
    exercises: String,
}

/// Row shape of the advanced variant
#[derive(Debug, Serialize, Deserialize)]
struct AdvancedRow {
    #[serde(rename = "Data")]
    date: String,
    #[serde(rename = "Qualidade")]
    quality: String,
    #[serde(rename = "Tipo de Treino")]
    workout_type: String,
    #[serde(rename = "Duracao")]
    duration_minutes: Option<u32>,
    #[serde(rename = "Intensidade")]
    intensity: Option<String>,
    #[serde(rename = "Freq_Cardiaca")]
    heart_rate_bpm: Option<u16>,
    #[serde(rename = "Notas")]
    notes: Option<String>,
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| Error::Parse(format!("invalid date {:?}: {}", s, e)))
}

fn parse_quality(s: &str) -> Result<Quality> {
    Quality::from_label(s).ok_or_else(|| Error::Parse(format!("unknown quality label {:?}", s)))
}

impl From<&WorkoutRecord> for BasicRow {
    fn from(record: &WorkoutRecord) -> Self {
        BasicRow {
            date: record.date.format(DATE_FORMAT).to_string(),
            quality: record.quality.label().to_string(),
            workout_type: record.workout_type.clone(),
            exercises: record.notes.clone().unwrap_or_default(),
        }
    }
}

impl TryFrom<BasicRow> for WorkoutRecord {
    type Error = Error;

    fn try_from(row: BasicRow) -> Result<Self> {
        Ok(WorkoutRecord {
            date: parse_date(&row.date)?,
            quality: parse_quality(&row.quality)?,
            workout_type: row.workout_type,
            notes: Some(row.exercises).filter(|s| !s.is_empty()),
            duration_minutes: None,
            intensity: None,
            heart_rate_bpm: None,
        })
    }
}

impl From<&WorkoutRecord> for AdvancedRow {
    fn from(record: &WorkoutRecord) -> Self {
        AdvancedRow {
            date: record.date.format(DATE_FORMAT).to_string(),
            quality: record.quality.label().to_string(),
            workout_type: record.workout_type.clone(),
            duration_minutes: record.duration_minutes,
            intensity: record.intensity.map(|i| i.label().to_string()),
            heart_rate_bpm: record.heart_rate_bpm,
            notes: record.notes.clone(),
        }
    }
}

impl TryFrom<AdvancedRow> for WorkoutRecord {
    type Error = Error;

    fn try_from(row: AdvancedRow) -> Result<Self> {
        let intensity = row
            .intensity
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| {
                Intensity::from_label(s)
                    .ok_or_else(|| Error::Parse(format!("unknown intensity label {:?}", s)))
            })
            .transpose()?;

        Ok(WorkoutRecord {
            date: parse_date(&row.date)?,
            quality: parse_quality(&row.quality)?,
            workout_type: row.workout_type,
            notes: row.notes.filter(|s| !s.is_empty()),
            duration_minutes: row.duration_minutes,
            intensity,
            heart_rate_bpm: row.heart_rate_bpm,
        })
    }
}

// ============================================================================
// CsvStore
// ============================================================================

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>, variant: Variant) -> Self {
        Self {
            path: path.into(),
            variant,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_records<R: Read>(&self, reader: R) -> Result<Vec<WorkoutRecord>> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let mut records = Vec::new();
        match self.variant {
            Variant::Advanced => {
                for row in csv_reader.deserialize::<AdvancedRow>() {
                    records.push(row?.try_into()?);
                }
            }
            Variant::Basic | Variant::Simple => {
                for row in csv_reader.deserialize::<BasicRow>() {
                    records.push(row?.try_into()?);
                }
            }
        }
        Ok(records)
    }

    fn write_records<W: Write>(&self, writer: W, records: &[WorkoutRecord]) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        if records.is_empty() {
            // Keep the file shape fixed even with nothing logged yet
            csv_writer.write_record(self.variant.headers())?;
        } else {
            match self.variant {
                Variant::Advanced => {
                    for record in records {
                        csv_writer.serialize(AdvancedRow::from(record))?;
                    }
                }
                Variant::Basic | Variant::Simple => {
                    for record in records {
                        csv_writer.serialize(BasicRow::from(record))?;
                    }
                }
            }
        }

        csv_writer.flush()?;
        Ok(())
    }
}

impl LogStore for CsvStore {
    /// Load the persisted log, or an empty sequence if none exists yet.
    ///
    /// Malformed rows (bad date, unknown label, wrong shape) fail the
    /// whole load; partial recovery of a corrupted store is not
    /// attempted.
    fn load(&self) -> Result<Vec<WorkoutRecord>> {
        if !self.path.exists() {
            tracing::info!("No log file at {:?}, starting empty", self.path);
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        file.lock_shared()?;
        let result = self.read_records(&file);
        file.unlock()?;

        if let Ok(ref records) = result {
            tracing::debug!("Loaded {} records from {:?}", records.len(), self.path);
        }
        result
    }

    /// Rewrite the full log atomically.
    ///
    /// Writes to a temp file in the target directory, syncs it, then
    /// renames over the old file, so the previous copy survives any
    /// mid-write failure.
    fn save(&self, records: &[WorkoutRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let temp = NamedTempFile::new_in(self.path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "log path missing parent")
        })?)?;

        temp.as_file().lock_exclusive()?;
        self.write_records(BufWriter::new(temp.as_file()), records)?;
        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved {} records to {:?}", records.len(), self.path);
        Ok(())
    }
}
