use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{
    require_min_len, require_status, CatalogEntryId, DifficultyKind, Intervention, InterventionId,
    InterventionKind, RecordStatus, StudentId, ValidationError,
};

const VALID_STATUSES: [RecordStatus; 2] = [RecordStatus::Active, RecordStatus::Canceled];

/// A reusable intervention template in the shared catalog, not yet tied to
/// any student. An entry with an empty target-kind list is generic and
/// matches every difficulty kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    id: CatalogEntryId,
    title: String,
    description: String,
    kind: InterventionKind,
    status: RecordStatus,
    suggested_duration_days: Option<u32>,
    target_kinds: Vec<DifficultyKind>,
    target_audiences: Vec<String>,
    resources: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Full field set for restoring a catalog entry from storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntryRecord {
    pub id: CatalogEntryId,
    pub title: String,
    pub description: String,
    pub kind: InterventionKind,
    pub status: RecordStatus,
    pub suggested_duration_days: Option<u32>,
    pub target_kinds: Vec<DifficultyKind>,
    pub target_audiences: Vec<String>,
    pub resources: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CatalogEntry {
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        id: CatalogEntryId,
        title: impl Into<String>,
        description: impl Into<String>,
        kind: InterventionKind,
        suggested_duration_days: Option<u32>,
        target_kinds: Vec<DifficultyKind>,
        target_audiences: Vec<String>,
        resources: Vec<String>,
    ) -> Result<Self, ValidationError> {
        let now = Utc::now();
        Self::restore(CatalogEntryRecord {
            id,
            title: title.into(),
            description: description.into(),
            kind,
            status: RecordStatus::Active,
            suggested_duration_days,
            target_kinds,
            target_audiences,
            resources,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn restore(record: CatalogEntryRecord) -> Result<Self, ValidationError> {
        require_min_len("catalog entry title", &record.title, 3)?;
        require_min_len("catalog entry description", &record.description, 10)?;
        require_status("catalog entry", &VALID_STATUSES, record.status)?;
        if record.suggested_duration_days == Some(0) {
            return Err(ValidationError::NonPositiveDuration);
        }

        Ok(Self {
            id: record.id,
            title: record.title,
            description: record.description,
            kind: record.kind,
            status: record.status,
            suggested_duration_days: record.suggested_duration_days,
            target_kinds: record.target_kinds,
            target_audiences: record.target_audiences,
            resources: record.resources,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }

    pub fn deactivate(&self) -> Result<Self, ValidationError> {
        let mut record = self.to_record();
        record.status = RecordStatus::Canceled;
        record.updated_at = Utc::now();
        Self::restore(record)
    }

    /// Whether this template addresses any of the given difficulty kinds.
    /// An undeclared (empty) target list is treated as generic.
    pub fn matches_kinds(&self, kinds: &[DifficultyKind]) -> bool {
        self.target_kinds.is_empty() || self.target_kinds.iter().any(|kind| kinds.contains(kind))
    }

    /// Instantiates a concrete intervention for a student, carrying the
    /// template's title, description, and kind plus a back-reference to the
    /// entry.
    pub fn instantiate_for(
        &self,
        intervention_id: InterventionId,
        student_id: StudentId,
        start_date: NaiveDate,
    ) -> Result<Intervention, ValidationError> {
        Intervention::create(
            intervention_id,
            self.title.clone(),
            self.description.clone(),
            self.kind,
            student_id,
            Some(self.id.clone()),
            start_date,
            None,
        )
    }

    pub fn to_record(&self) -> CatalogEntryRecord {
        CatalogEntryRecord {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            kind: self.kind,
            status: self.status,
            suggested_duration_days: self.suggested_duration_days,
            target_kinds: self.target_kinds.clone(),
            target_audiences: self.target_audiences.clone(),
            resources: self.resources.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn id(&self) -> &CatalogEntryId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> InterventionKind {
        self.kind
    }

    pub fn status(&self) -> RecordStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == RecordStatus::Active
    }

    pub fn suggested_duration_days(&self) -> Option<u32> {
        self.suggested_duration_days
    }

    pub fn target_kinds(&self) -> &[DifficultyKind] {
        &self.target_kinds
    }

    pub fn target_audiences(&self) -> &[String] {
        &self.target_audiences
    }

    pub fn resources(&self) -> &[String] {
        &self.resources
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
