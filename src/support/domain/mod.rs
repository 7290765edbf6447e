//! Immutable value entities for the learning-support domain.
//!
//! Each entity validates its field constraints exclusively at construction
//! time: `create` (fresh, derives defaults) and `restore` (from storage) both
//! funnel through the same validator, and every transition method rebuilds a
//! new instance through that path. There is no route to an invalid instance.

mod catalog;
mod difficulty;
mod intervention;
mod student;
mod team;

pub use catalog::{CatalogEntry, CatalogEntryRecord};
pub use difficulty::{Difficulty, DifficultyChanges, DifficultyRecord};
pub use intervention::{Intervention, InterventionRecord};
pub use student::{Assessment, Student, StudentRecord};
pub use team::{Team, TeamError, TeamMember, TeamRecord};

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for students.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StudentId(pub String);

/// Identifier wrapper for diagnosed learning difficulties.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DifficultyId(pub String);

/// Identifier wrapper for reusable catalog intervention templates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogEntryId(pub String);

/// Identifier wrapper for applied interventions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InterventionId(pub String);

/// Identifier wrapper for assessments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssessmentId(pub String);

/// Identifier wrapper for support teams.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamId(pub String);

/// Identifier wrapper for staff members referenced by students and teams.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StaffId(pub String);

/// Identifier wrapper for directory users checked by the authorization predicate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Identifier wrapper for institutions scoping authorization checks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstitutionId(pub String);

/// Shared closed status enum. Each entity validates the subset that is
/// meaningful for it; `Completed` is valid only for interventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    Active,
    Completed,
    Canceled,
}

impl RecordStatus {
    pub const fn label(self) -> &'static str {
        match self {
            RecordStatus::Active => "active",
            RecordStatus::Completed => "completed",
            RecordStatus::Canceled => "canceled",
        }
    }
}

/// Severity tier of a diagnosed difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    pub const fn label(self) -> &'static str {
        match self {
            Severity::Mild => "mild",
            Severity::Moderate => "moderate",
            Severity::Severe => "severe",
        }
    }
}

/// Classification of a learning difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyKind {
    Reading,
    Writing,
    Math,
    Attention,
    Behavioral,
    Emotional,
    Social,
    Neuromotor,
    Primary,
    Secondary,
    Other,
}

impl DifficultyKind {
    pub const fn label(self) -> &'static str {
        match self {
            DifficultyKind::Reading => "reading",
            DifficultyKind::Writing => "writing",
            DifficultyKind::Math => "math",
            DifficultyKind::Attention => "attention",
            DifficultyKind::Behavioral => "behavioral",
            DifficultyKind::Emotional => "emotional",
            DifficultyKind::Social => "social",
            DifficultyKind::Neuromotor => "neuromotor",
            DifficultyKind::Primary => "primary",
            DifficultyKind::Secondary => "secondary",
            DifficultyKind::Other => "other",
        }
    }
}

/// Classification of an intervention or catalog template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterventionKind {
    Pedagogical,
    Behavioral,
    Psychological,
    Social,
    Multidisciplinary,
    Other,
}

impl InterventionKind {
    pub const fn label(self) -> &'static str {
        match self {
            InterventionKind::Pedagogical => "pedagogical",
            InterventionKind::Behavioral => "behavioral",
            InterventionKind::Psychological => "psychological",
            InterventionKind::Social => "social",
            InterventionKind::Multidisciplinary => "multidisciplinary",
            InterventionKind::Other => "other",
        }
    }
}

/// Role a staff member carries inside a team or an institution membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    Coordinator,
    Teacher,
    Psychologist,
    SocialWorker,
    SpeechTherapist,
    OccupationalTherapist,
    Other,
}

impl StaffRole {
    pub const fn label(self) -> &'static str {
        match self {
            StaffRole::Coordinator => "coordinator",
            StaffRole::Teacher => "teacher",
            StaffRole::Psychologist => "psychologist",
            StaffRole::SocialWorker => "social_worker",
            StaffRole::SpeechTherapist => "speech_therapist",
            StaffRole::OccupationalTherapist => "occupational_therapist",
            StaffRole::Other => "other",
        }
    }
}

/// Raised when an entity invariant is violated during construction or a
/// transition. Construction fails atomically; no partially-built entity
/// escapes.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    #[error("{field} must not be in the future")]
    DateInFuture { field: &'static str },
    #[error("birth date is more than 100 years in the past")]
    BirthDateTooOld,
    #[error("end date {end} precedes start date {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
    #[error("progress must be within 0..=100, got {0}")]
    ProgressOutOfRange(u8),
    #[error("score must be within 0.0..=10.0, got {0}")]
    ScoreOutOfRange(f64),
    #[error("suggested duration must be a positive number of days")]
    NonPositiveDuration,
    #[error("status '{status}' is not valid for a {entity}")]
    StatusNotAllowed {
        entity: &'static str,
        status: &'static str,
    },
}

pub(crate) fn require_min_len(
    field: &'static str,
    value: &str,
    min: usize,
) -> Result<(), ValidationError> {
    if value.trim().chars().count() < min {
        return Err(ValidationError::TooShort { field, min });
    }
    Ok(())
}

pub(crate) fn require_non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(())
}

pub(crate) fn require_not_future(
    field: &'static str,
    date: NaiveDate,
) -> Result<(), ValidationError> {
    if date > Local::now().date_naive() {
        return Err(ValidationError::DateInFuture { field });
    }
    Ok(())
}

pub(crate) fn require_status(
    entity: &'static str,
    allowed: &[RecordStatus],
    status: RecordStatus,
) -> Result<(), ValidationError> {
    if !allowed.contains(&status) {
        return Err(ValidationError::StatusNotAllowed {
            entity,
            status: status.label(),
        });
    }
    Ok(())
}
