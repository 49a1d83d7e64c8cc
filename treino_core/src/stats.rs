//! Aggregate views over the record sequence.
//!
//! These are the queries behind the summary charts: counts and means
//! per workout type, and the quality score as a time series. All are
//! pure functions over a borrowed slice; the stored order is never
//! mutated.

use crate::{GroupStats, SeriesPoint, WorkoutRecord};
use std::collections::HashMap;

#[derive(Default)]
struct GroupAcc {
    count: usize,
    quality_sum: u64,
    duration_sum: u64,
    duration_count: usize,
    heart_rate_sum: u64,
    heart_rate_count: usize,
}

impl GroupAcc {
    fn add(&mut self, record: &WorkoutRecord) {
        self.count += 1;
        self.quality_sum += u64::from(record.quality.score());
        if let Some(minutes) = record.duration_minutes {
            self.duration_sum += u64::from(minutes);
            self.duration_count += 1;
        }
        if let Some(bpm) = record.heart_rate_bpm {
            self.heart_rate_sum += u64::from(bpm);
            self.heart_rate_count += 1;
        }
    }

    fn finish(self) -> GroupStats {
        GroupStats {
            count: self.count,
            mean_quality_score: self.quality_sum as f64 / self.count as f64,
            mean_duration_minutes: mean(self.duration_sum, self.duration_count),
            mean_heart_rate_bpm: mean(self.heart_rate_sum, self.heart_rate_count),
        }
    }
}

fn mean(sum: u64, count: usize) -> Option<f64> {
    if count == 0 {
        None
    } else {
        Some(sum as f64 / count as f64)
    }
}

/// Group records by workout type (exact, case-sensitive match).
///
/// Output ordering is unspecified; display order is a presentation
/// concern.
pub fn aggregate_by_type(records: &[WorkoutRecord]) -> HashMap<String, GroupStats> {
    let mut groups: HashMap<String, GroupAcc> = HashMap::new();

    for record in records {
        groups
            .entry(record.workout_type.clone())
            .or_default()
            .add(record);
    }

    groups.into_iter().map(|(k, acc)| (k, acc.finish())).collect()
}

/// Quality scores sorted ascending by date.
///
/// The sort is stable, so same-date records keep their insertion order.
pub fn chronological_series(records: &[WorkoutRecord]) -> Vec<SeriesPoint> {
    let mut points: Vec<SeriesPoint> = records
        .iter()
        .map(|r| SeriesPoint {
            date: r.date,
            quality_score: r.quality.score(),
        })
        .collect();

    points.sort_by_key(|p| p.date);
    points
}
