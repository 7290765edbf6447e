use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{
    require_min_len, require_non_empty, require_not_future, require_status, AssessmentId,
    Difficulty, DifficultyId, RecordStatus, StaffId, StudentId, ValidationError,
};

const VALID_STATUSES: [RecordStatus; 2] = [RecordStatus::Active, RecordStatus::Canceled];
const MAX_AGE_YEARS: u32 = 100;

/// A single scored evaluation of a student on a given date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    id: AssessmentId,
    date: NaiveDate,
    kind: String,
    score: f64,
    notes: Option<String>,
}

impl Assessment {
    pub fn new(
        id: AssessmentId,
        date: NaiveDate,
        kind: impl Into<String>,
        score: f64,
        notes: Option<String>,
    ) -> Result<Self, ValidationError> {
        let kind = kind.into();
        require_not_future("assessment date", date)?;
        require_non_empty("assessment kind", &kind)?;
        if !(0.0..=10.0).contains(&score) {
            return Err(ValidationError::ScoreOutOfRange(score));
        }

        Ok(Self {
            id,
            date,
            kind,
            score,
            notes,
        })
    }

    pub fn id(&self) -> &AssessmentId {
        &self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}

/// A tracked student with associated difficulties and assessment history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    id: StudentId,
    name: String,
    grade: String,
    birth_date: NaiveDate,
    status: RecordStatus,
    staff_id: StaffId,
    difficulties: Vec<Difficulty>,
    assessments: Vec<Assessment>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Full field set for restoring a student from storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: StudentId,
    pub name: String,
    pub grade: String,
    pub birth_date: NaiveDate,
    pub status: RecordStatus,
    pub staff_id: StaffId,
    pub difficulties: Vec<Difficulty>,
    pub assessments: Vec<Assessment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Student {
    pub fn create(
        id: StudentId,
        name: impl Into<String>,
        grade: impl Into<String>,
        birth_date: NaiveDate,
        staff_id: StaffId,
    ) -> Result<Self, ValidationError> {
        let now = Utc::now();
        Self::restore(StudentRecord {
            id,
            name: name.into(),
            grade: grade.into(),
            birth_date,
            status: RecordStatus::Active,
            staff_id,
            difficulties: Vec::new(),
            assessments: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn restore(record: StudentRecord) -> Result<Self, ValidationError> {
        require_min_len("student name", &record.name, 3)?;
        require_non_empty("student grade", &record.grade)?;
        require_not_future("student birth date", record.birth_date)?;
        let today = Local::now().date_naive();
        if today
            .years_since(record.birth_date)
            .is_some_and(|age| age > MAX_AGE_YEARS)
        {
            return Err(ValidationError::BirthDateTooOld);
        }
        require_status("student", &VALID_STATUSES, record.status)?;

        // Difficulties associate by identity; later duplicates are dropped.
        let mut difficulties: Vec<Difficulty> = Vec::with_capacity(record.difficulties.len());
        for difficulty in record.difficulties {
            if !difficulties.iter().any(|known| known.id() == difficulty.id()) {
                difficulties.push(difficulty);
            }
        }

        Ok(Self {
            id: record.id,
            name: record.name,
            grade: record.grade,
            birth_date: record.birth_date,
            status: record.status,
            staff_id: record.staff_id,
            difficulties,
            assessments: record.assessments,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }

    /// Associates a difficulty. Adding one already present is a no-op that
    /// returns the student unchanged.
    pub fn add_difficulty(&self, difficulty: Difficulty) -> Result<Self, ValidationError> {
        if self
            .difficulties
            .iter()
            .any(|known| known.id() == difficulty.id())
        {
            return Ok(self.clone());
        }
        let mut record = self.to_record();
        record.difficulties.push(difficulty);
        record.updated_at = Utc::now();
        Self::restore(record)
    }

    pub fn remove_difficulty(&self, difficulty_id: &DifficultyId) -> Result<Self, ValidationError> {
        let mut record = self.to_record();
        record
            .difficulties
            .retain(|difficulty| difficulty.id() != difficulty_id);
        record.updated_at = Utc::now();
        Self::restore(record)
    }

    /// Appends an assessment; history is append-only.
    pub fn add_assessment(&self, assessment: Assessment) -> Result<Self, ValidationError> {
        let mut record = self.to_record();
        record.assessments.push(assessment);
        record.updated_at = Utc::now();
        Self::restore(record)
    }

    pub fn to_record(&self) -> StudentRecord {
        StudentRecord {
            id: self.id.clone(),
            name: self.name.clone(),
            grade: self.grade.clone(),
            birth_date: self.birth_date,
            status: self.status,
            staff_id: self.staff_id.clone(),
            difficulties: self.difficulties.clone(),
            assessments: self.assessments.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn id(&self) -> &StudentId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn grade(&self) -> &str {
        &self.grade
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    pub fn status(&self) -> RecordStatus {
        self.status
    }

    pub fn staff_id(&self) -> &StaffId {
        &self.staff_id
    }

    pub fn difficulties(&self) -> &[Difficulty] {
        &self.difficulties
    }

    pub fn assessments(&self) -> &[Assessment] {
        &self.assessments
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
