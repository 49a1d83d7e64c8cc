//! Core domain types for the workout log.
//!
//! This module defines the fundamental types used throughout the system:
//! - Workout records and raw (unvalidated) entries
//! - Ordinal scales (quality, intensity) with their fixed score tables
//! - Deployment variants and their column schemas
//! - Aggregate view outputs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// Ordinal Scales
// ============================================================================

/// Perceived quality of a session, on the fixed four-step scale.
///
/// Scores are always derived from the label, never stored, so the
/// label and its numeric code cannot diverge.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Quality {
    Poor,
    Medium,
    Good,
    Excellent,
}

impl Quality {
    pub const ALL: [Quality; 4] = [
        Quality::Poor,
        Quality::Medium,
        Quality::Good,
        Quality::Excellent,
    ];

    /// Numeric code used for charting and aggregation (1 = Poor .. 4 = Excellent)
    pub fn score(self) -> u8 {
        match self {
            Quality::Poor => 1,
            Quality::Medium => 2,
            Quality::Good => 3,
            Quality::Excellent => 4,
        }
    }

    /// Canonical label as persisted in the log file
    pub fn label(self) -> &'static str {
        match self {
            Quality::Poor => "Ruim",
            Quality::Medium => "Médio",
            Quality::Good => "Bom",
            Quality::Excellent => "Excelente",
        }
    }

    /// Parse the exact canonical label (used when reading the store)
    pub fn from_label(s: &str) -> Option<Self> {
        Quality::ALL.iter().copied().find(|q| q.label() == s)
    }

    /// Parse lenient user input (case- and accent-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "ruim" => Some(Quality::Poor),
            "medio" | "médio" => Some(Quality::Medium),
            "bom" => Some(Quality::Good),
            "excelente" => Some(Quality::Excellent),
            _ => None,
        }
    }
}

/// Session intensity, recorded only by the advanced deployment variant.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    Low,
    Medium,
    High,
}

impl Intensity {
    pub const ALL: [Intensity; 3] = [Intensity::Low, Intensity::Medium, Intensity::High];

    /// Numeric code (1 = Low .. 3 = High)
    pub fn score(self) -> u8 {
        match self {
            Intensity::Low => 1,
            Intensity::Medium => 2,
            Intensity::High => 3,
        }
    }

    /// Canonical label as persisted in the log file
    pub fn label(self) -> &'static str {
        match self {
            Intensity::Low => "Baixa",
            Intensity::Medium => "Média",
            Intensity::High => "Alta",
        }
    }

    /// Parse the exact canonical label (used when reading the store)
    pub fn from_label(s: &str) -> Option<Self> {
        Intensity::ALL.iter().copied().find(|i| i.label() == s)
    }

    /// Parse lenient user input (case- and accent-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "baixa" => Some(Intensity::Low),
            "media" | "média" => Some(Intensity::Medium),
            "alta" => Some(Intensity::High),
            _ => None,
        }
    }
}

// ============================================================================
// Deployment Variants
// ============================================================================

/// Which of the three deployments a log belongs to.
///
/// The variants share one record type; they differ only in which
/// optional fields are present and which text field is mandatory.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    Basic,
    Advanced,
    Simple,
}

impl Default for Variant {
    fn default() -> Self {
        Variant::Basic
    }
}

impl Variant {
    /// Column headers of the persisted file for this variant
    pub fn headers(self) -> &'static [&'static str] {
        match self {
            Variant::Basic | Variant::Simple => {
                &["Data", "Qualidade", "Tipo de Treino", "Exercícios"]
            }
            Variant::Advanced => &[
                "Data",
                "Qualidade",
                "Tipo de Treino",
                "Duracao",
                "Intensidade",
                "Freq_Cardiaca",
                "Notas",
            ],
        }
    }

    /// Whether this variant records duration, intensity and heart rate
    pub fn has_vitals(self) -> bool {
        matches!(self, Variant::Advanced)
    }

    /// Whether the free-text field is mandatory for this variant
    pub fn requires_notes(self) -> bool {
        matches!(self, Variant::Basic | Variant::Simple)
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "basic" => Some(Variant::Basic),
            "advanced" => Some(Variant::Advanced),
            "simple" => Some(Variant::Simple),
            _ => None,
        }
    }
}

// ============================================================================
// Records
// ============================================================================

/// One logged workout session.
///
/// Created only through validation; never mutated afterwards. Fields
/// outside the deployment variant's schema are always `None`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkoutRecord {
    pub date: NaiveDate,
    pub quality: Quality,
    pub workout_type: String,
    /// Exercises performed (basic/simple) or free notes (advanced)
    pub notes: Option<String>,
    pub duration_minutes: Option<u32>,
    pub intensity: Option<Intensity>,
    pub heart_rate_bpm: Option<u16>,
}

impl WorkoutRecord {
    pub fn quality_score(&self) -> u8 {
        self.quality.score()
    }

    pub fn intensity_score(&self) -> Option<u8> {
        self.intensity.map(Intensity::score)
    }
}

/// Candidate entry from the presentation layer, not yet validated.
///
/// The form widgets hand over typed ordinals (they are selection
/// inputs), so an unknown quality or intensity label cannot occur here.
#[derive(Clone, Debug)]
pub struct RawEntry {
    pub date: NaiveDate,
    pub quality: Quality,
    pub workout_type: String,
    pub notes: String,
    pub duration_minutes: Option<u32>,
    pub intensity: Option<Intensity>,
    pub heart_rate_bpm: Option<u16>,
}

// ============================================================================
// Aggregate Views
// ============================================================================

/// Per-workout-type aggregate statistics.
///
/// Means are computed over present values only; a group with no values
/// for a metric reports `None` rather than zero.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupStats {
    pub count: usize,
    pub mean_quality_score: f64,
    pub mean_duration_minutes: Option<f64>,
    pub mean_heart_rate_bpm: Option<f64>,
}

/// One point of the quality-over-time series.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub quality_score: u8,
}
