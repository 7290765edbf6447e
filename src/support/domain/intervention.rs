use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{
    require_min_len, require_not_future, require_status, CatalogEntryId, InterventionId,
    InterventionKind, RecordStatus, StudentId, ValidationError,
};

const VALID_STATUSES: [RecordStatus; 3] = [
    RecordStatus::Active,
    RecordStatus::Completed,
    RecordStatus::Canceled,
];

/// A concrete, time-bounded application of support to one student,
/// optionally derived from a catalog entry (back-reference, not ownership).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intervention {
    id: InterventionId,
    title: String,
    description: String,
    kind: InterventionKind,
    status: RecordStatus,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    student_id: StudentId,
    catalog_entry_id: Option<CatalogEntryId>,
    notes: Option<String>,
    progress: u8,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Full field set for restoring an intervention from storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterventionRecord {
    pub id: InterventionId,
    pub title: String,
    pub description: String,
    pub kind: InterventionKind,
    pub status: RecordStatus,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub student_id: StudentId,
    pub catalog_entry_id: Option<CatalogEntryId>,
    pub notes: Option<String>,
    pub progress: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Intervention {
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        id: InterventionId,
        title: impl Into<String>,
        description: impl Into<String>,
        kind: InterventionKind,
        student_id: StudentId,
        catalog_entry_id: Option<CatalogEntryId>,
        start_date: NaiveDate,
        notes: Option<String>,
    ) -> Result<Self, ValidationError> {
        let now = Utc::now();
        Self::restore(InterventionRecord {
            id,
            title: title.into(),
            description: description.into(),
            kind,
            status: RecordStatus::Active,
            start_date,
            end_date: None,
            student_id,
            catalog_entry_id,
            notes,
            progress: 0,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn restore(record: InterventionRecord) -> Result<Self, ValidationError> {
        require_min_len("intervention title", &record.title, 3)?;
        require_min_len("intervention description", &record.description, 10)?;
        require_status("intervention", &VALID_STATUSES, record.status)?;
        require_not_future("intervention start date", record.start_date)?;
        if let Some(end) = record.end_date {
            if end < record.start_date {
                return Err(ValidationError::EndBeforeStart {
                    start: record.start_date,
                    end,
                });
            }
        }
        if record.progress > 100 {
            return Err(ValidationError::ProgressOutOfRange(record.progress));
        }

        Ok(Self {
            id: record.id,
            title: record.title,
            description: record.description,
            kind: record.kind,
            status: record.status,
            start_date: record.start_date,
            end_date: record.end_date,
            student_id: record.student_id,
            catalog_entry_id: record.catalog_entry_id,
            notes: record.notes,
            progress: record.progress,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }

    pub fn update_progress(&self, progress: u8) -> Result<Self, ValidationError> {
        let mut record = self.to_record();
        record.progress = progress;
        record.updated_at = Utc::now();
        Self::restore(record)
    }

    /// Marks the intervention finished: full progress, completed status, and
    /// an end date of today when none was recorded.
    pub fn complete(&self) -> Result<Self, ValidationError> {
        let mut record = self.to_record();
        record.status = RecordStatus::Completed;
        record.progress = 100;
        if record.end_date.is_none() {
            record.end_date = Some(Local::now().date_naive());
        }
        record.updated_at = Utc::now();
        Self::restore(record)
    }

    /// Cancels the intervention, closing it with an end date of today when
    /// none was recorded. Progress is left where it was.
    pub fn cancel(&self) -> Result<Self, ValidationError> {
        let mut record = self.to_record();
        record.status = RecordStatus::Canceled;
        if record.end_date.is_none() {
            record.end_date = Some(Local::now().date_naive());
        }
        record.updated_at = Utc::now();
        Self::restore(record)
    }

    pub fn to_record(&self) -> InterventionRecord {
        InterventionRecord {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            kind: self.kind,
            status: self.status,
            start_date: self.start_date,
            end_date: self.end_date,
            student_id: self.student_id.clone(),
            catalog_entry_id: self.catalog_entry_id.clone(),
            notes: self.notes.clone(),
            progress: self.progress,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn id(&self) -> &InterventionId {
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

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn student_id(&self) -> &StudentId {
        &self.student_id
    }

    pub fn catalog_entry_id(&self) -> Option<&CatalogEntryId> {
        self.catalog_entry_id.as_ref()
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    /// Actively running: status active and no end date recorded.
    pub fn is_active(&self) -> bool {
        self.status == RecordStatus::Active && self.end_date.is_none()
    }

    pub fn is_completed(&self) -> bool {
        self.status == RecordStatus::Completed
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
