use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    require_min_len, require_non_empty, require_status, DifficultyId, DifficultyKind, RecordStatus,
    Severity, ValidationError,
};

const VALID_STATUSES: [RecordStatus; 2] = [RecordStatus::Active, RecordStatus::Canceled];

/// A diagnosed learning difficulty. Shared reference data: students hold
/// difficulties by association, not ownership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    id: DifficultyId,
    name: String,
    description: String,
    symptoms: String,
    kind: DifficultyKind,
    severity: Severity,
    status: RecordStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Full field set for restoring a difficulty from storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyRecord {
    pub id: DifficultyId,
    pub name: String,
    pub description: String,
    pub symptoms: String,
    pub kind: DifficultyKind,
    pub severity: Severity,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial field set accepted by [`Difficulty::update`]; unset fields keep
/// their current value.
#[derive(Debug, Clone, Default)]
pub struct DifficultyChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub symptoms: Option<String>,
    pub kind: Option<DifficultyKind>,
    pub severity: Option<Severity>,
}

impl Difficulty {
    pub fn create(
        id: DifficultyId,
        name: impl Into<String>,
        description: impl Into<String>,
        symptoms: impl Into<String>,
        kind: DifficultyKind,
        severity: Severity,
    ) -> Result<Self, ValidationError> {
        let now = Utc::now();
        Self::restore(DifficultyRecord {
            id,
            name: name.into(),
            description: description.into(),
            symptoms: symptoms.into(),
            kind,
            severity,
            status: RecordStatus::Active,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn restore(record: DifficultyRecord) -> Result<Self, ValidationError> {
        require_min_len("difficulty name", &record.name, 3)?;
        require_min_len("difficulty description", &record.description, 10)?;
        require_non_empty("difficulty symptoms", &record.symptoms)?;
        require_status("difficulty", &VALID_STATUSES, record.status)?;

        Ok(Self {
            id: record.id,
            name: record.name,
            description: record.description,
            symptoms: record.symptoms,
            kind: record.kind,
            severity: record.severity,
            status: record.status,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }

    pub fn update(&self, changes: DifficultyChanges) -> Result<Self, ValidationError> {
        let mut record = self.to_record();
        if let Some(name) = changes.name {
            record.name = name;
        }
        if let Some(description) = changes.description {
            record.description = description;
        }
        if let Some(symptoms) = changes.symptoms {
            record.symptoms = symptoms;
        }
        if let Some(kind) = changes.kind {
            record.kind = kind;
        }
        if let Some(severity) = changes.severity {
            record.severity = severity;
        }
        record.updated_at = Utc::now();
        Self::restore(record)
    }

    pub fn deactivate(&self) -> Result<Self, ValidationError> {
        let mut record = self.to_record();
        record.status = RecordStatus::Canceled;
        record.updated_at = Utc::now();
        Self::restore(record)
    }

    pub fn to_record(&self) -> DifficultyRecord {
        DifficultyRecord {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            symptoms: self.symptoms.clone(),
            kind: self.kind,
            severity: self.severity,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn id(&self) -> &DifficultyId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn symptoms(&self) -> &str {
        &self.symptoms
    }

    pub fn kind(&self) -> DifficultyKind {
        self.kind
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn status(&self) -> RecordStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == RecordStatus::Active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
