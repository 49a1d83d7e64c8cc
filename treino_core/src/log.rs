//! The workout log: validated append over an injected store.
//!
//! The log owns the in-memory record sequence for the lifetime of a
//! session. Records enter only through `validate` + `append`; they are
//! never edited or removed afterwards.

use crate::store::LogStore;
use crate::{RawEntry, Result, ValidationError, Variant, WorkoutRecord};

/// Accepted duration range in minutes (advanced variant)
const DURATION_MIN: u32 = 1;
const DURATION_MAX: u32 = 600;

/// Accepted heart rate range in bpm (advanced variant)
const HEART_RATE_MIN: u16 = 30;
const HEART_RATE_MAX: u16 = 220;

/// An athlete's workout log, loaded once per session.
pub struct WorkoutLog<S: LogStore> {
    variant: Variant,
    store: S,
    records: Vec<WorkoutRecord>,
}

impl<S: LogStore> WorkoutLog<S> {
    /// Open the log, reading any previously persisted records.
    pub fn open(variant: Variant, store: S) -> Result<Self> {
        let records = store.load()?;
        tracing::info!("Opened {:?} workout log with {} records", variant, records.len());
        Ok(Self {
            variant,
            store,
            records,
        })
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Records in insertion order
    pub fn records(&self) -> &[WorkoutRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Check a candidate entry and turn it into a storable record.
    ///
    /// Checks run in a fixed order and stop at the first failure:
    /// 1. workout type must not be blank
    /// 2. duration within 1..=600 minutes (advanced, when present)
    /// 3. heart rate within 30..=220 bpm (advanced, when present)
    /// 4. exercises text must not be blank (basic/simple)
    ///
    /// Pure check, no I/O. Text fields are trimmed before storage, and
    /// fields outside the variant's schema are dropped.
    pub fn validate(
        &self,
        entry: &RawEntry,
    ) -> std::result::Result<WorkoutRecord, ValidationError> {
        let workout_type = entry.workout_type.trim();
        if workout_type.is_empty() {
            return Err(ValidationError::EmptyRequiredField("Tipo de Treino"));
        }

        if self.variant.has_vitals() {
            if let Some(minutes) = entry.duration_minutes {
                if !(DURATION_MIN..=DURATION_MAX).contains(&minutes) {
                    return Err(ValidationError::InvalidRange {
                        field: "Duracao",
                        min: DURATION_MIN as i64,
                        max: DURATION_MAX as i64,
                    });
                }
            }
            if let Some(bpm) = entry.heart_rate_bpm {
                if !(HEART_RATE_MIN..=HEART_RATE_MAX).contains(&bpm) {
                    return Err(ValidationError::InvalidRange {
                        field: "Freq_Cardiaca",
                        min: HEART_RATE_MIN as i64,
                        max: HEART_RATE_MAX as i64,
                    });
                }
            }
        }

        let notes = entry.notes.trim();
        if self.variant.requires_notes() && notes.is_empty() {
            return Err(ValidationError::EmptyRequiredField("Exercícios"));
        }

        Ok(WorkoutRecord {
            date: entry.date,
            quality: entry.quality,
            workout_type: workout_type.to_string(),
            notes: Some(notes.to_string()).filter(|s| !s.is_empty()),
            duration_minutes: entry.duration_minutes.filter(|_| self.variant.has_vitals()),
            intensity: entry.intensity.filter(|_| self.variant.has_vitals()),
            heart_rate_bpm: entry.heart_rate_bpm.filter(|_| self.variant.has_vitals()),
        })
    }

    /// Append a validated record and persist the full sequence.
    ///
    /// On a persistence failure the in-memory append is rolled back, so
    /// memory and disk never diverge.
    pub fn append(&mut self, record: WorkoutRecord) -> Result<()> {
        self.records.push(record);

        if let Err(e) = self.store.save(&self.records) {
            self.records.pop();
            tracing::warn!("Failed to persist workout log, entry discarded: {}", e);
            return Err(e);
        }

        tracing::debug!("Appended workout record ({} total)", self.records.len());
        Ok(())
    }

    /// Per-workout-type aggregate view of the current records
    pub fn aggregate_by_type(&self) -> std::collections::HashMap<String, crate::GroupStats> {
        crate::stats::aggregate_by_type(&self.records)
    }

    /// Quality-over-time view of the current records
    pub fn chronological_series(&self) -> Vec<crate::SeriesPoint> {
        crate::stats::chronological_series(&self.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, Intensity, Quality};
    use chrono::NaiveDate;

    /// In-memory store; `fail_saves` simulates a broken disk
    struct MemStore {
        fail_saves: bool,
    }

    impl LogStore for MemStore {
        fn load(&self) -> Result<Vec<WorkoutRecord>> {
            Ok(Vec::new())
        }

        fn save(&self, _records: &[WorkoutRecord]) -> Result<()> {
            if self.fail_saves {
                Err(Error::Other("disk full".into()))
            } else {
                Ok(())
            }
        }
    }

    fn open(variant: Variant) -> WorkoutLog<MemStore> {
        WorkoutLog::open(variant, MemStore { fail_saves: false }).unwrap()
    }

    fn entry() -> RawEntry {
        RawEntry {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            quality: Quality::Good,
            workout_type: "Cardio".into(),
            notes: "Corrida 5km".into(),
            duration_minutes: None,
            intensity: None,
            heart_rate_bpm: None,
        }
    }

    #[test]
    fn test_blank_workout_type_rejected() {
        let log = open(Variant::Basic);
        let candidate = RawEntry {
            workout_type: "   ".into(),
            ..entry()
        };

        assert_eq!(
            log.validate(&candidate),
            Err(ValidationError::EmptyRequiredField("Tipo de Treino"))
        );
    }

    #[test]
    fn test_workout_type_trimmed_before_storage() {
        let log = open(Variant::Basic);
        let candidate = RawEntry {
            workout_type: " Cardio ".into(),
            ..entry()
        };

        let record = log.validate(&candidate).unwrap();
        assert_eq!(record.workout_type, "Cardio");
    }

    #[test]
    fn test_duration_bounds() {
        let log = open(Variant::Advanced);

        for (minutes, ok) in [(0, false), (1, true), (600, true), (601, false)] {
            let candidate = RawEntry {
                duration_minutes: Some(minutes),
                ..entry()
            };
            let result = log.validate(&candidate);
            if ok {
                assert!(result.is_ok(), "duration {} should pass", minutes);
            } else {
                assert_eq!(
                    result,
                    Err(ValidationError::InvalidRange {
                        field: "Duracao",
                        min: 1,
                        max: 600,
                    }),
                    "duration {} should fail",
                    minutes
                );
            }
        }
    }

    #[test]
    fn test_heart_rate_bounds() {
        let log = open(Variant::Advanced);

        for (bpm, ok) in [(29, false), (30, true), (220, true), (221, false)] {
            let candidate = RawEntry {
                heart_rate_bpm: Some(bpm),
                ..entry()
            };
            let result = log.validate(&candidate);
            if ok {
                assert!(result.is_ok(), "heart rate {} should pass", bpm);
            } else {
                assert_eq!(
                    result,
                    Err(ValidationError::InvalidRange {
                        field: "Freq_Cardiaca",
                        min: 30,
                        max: 220,
                    }),
                    "heart rate {} should fail",
                    bpm
                );
            }
        }
    }

    #[test]
    fn test_blank_exercises_rejected_in_basic_and_simple() {
        for variant in [Variant::Basic, Variant::Simple] {
            let log = open(variant);
            let candidate = RawEntry {
                notes: " \n ".into(),
                ..entry()
            };
            assert_eq!(
                log.validate(&candidate),
                Err(ValidationError::EmptyRequiredField("Exercícios"))
            );
        }
    }

    #[test]
    fn test_blank_notes_allowed_in_advanced() {
        let log = open(Variant::Advanced);
        let candidate = RawEntry {
            notes: String::new(),
            ..entry()
        };

        let record = log.validate(&candidate).unwrap();
        assert_eq!(record.notes, None);
    }

    #[test]
    fn test_check_order_type_before_range() {
        // First failing check wins: blank type reported even with a bad duration
        let log = open(Variant::Advanced);
        let candidate = RawEntry {
            workout_type: String::new(),
            duration_minutes: Some(0),
            ..entry()
        };

        assert_eq!(
            log.validate(&candidate),
            Err(ValidationError::EmptyRequiredField("Tipo de Treino"))
        );
    }

    #[test]
    fn test_vitals_dropped_outside_advanced_variant() {
        let log = open(Variant::Basic);
        let candidate = RawEntry {
            duration_minutes: Some(45),
            intensity: Some(Intensity::High),
            heart_rate_bpm: Some(150),
            ..entry()
        };

        let record = log.validate(&candidate).unwrap();
        assert_eq!(record.duration_minutes, None);
        assert_eq!(record.intensity, None);
        assert_eq!(record.heart_rate_bpm, None);
    }

    #[test]
    fn test_append_grows_by_one() {
        let mut log = open(Variant::Basic);
        assert!(log.is_empty());

        let record = log.validate(&entry()).unwrap();
        log.append(record).unwrap();
        assert_eq!(log.len(), 1);

        let record = log.validate(&entry()).unwrap();
        log.append(record).unwrap();
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_failed_validation_never_changes_length() {
        let log = open(Variant::Basic);
        let candidate = RawEntry {
            workout_type: String::new(),
            ..entry()
        };

        assert!(log.validate(&candidate).is_err());
        assert_eq!(log.len(), 0);
    }

    #[test]
    fn test_append_rolled_back_on_save_failure() {
        let mut log = WorkoutLog::open(Variant::Basic, MemStore { fail_saves: true }).unwrap();
        let record = log.validate(&entry()).unwrap();

        assert!(log.append(record).is_err());
        assert!(log.is_empty());
    }
}
