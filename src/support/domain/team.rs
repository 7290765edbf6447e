use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    require_min_len, require_status, RecordStatus, StaffId, StaffRole, StudentId, TeamId,
    ValidationError,
};

const VALID_STATUSES: [RecordStatus; 2] = [RecordStatus::Active, RecordStatus::Canceled];

/// A staff member's seat on a team, with the role they carry there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub staff_id: StaffId,
    pub role: StaffRole,
}

/// Error raised by team construction and transitions. Duplicate membership
/// and duplicate student links are conflicts, never silent deduplication.
#[derive(Debug, thiserror::Error)]
pub enum TeamError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("user {0} is already a member of this team")]
    MemberAlreadyPresent(String),
    #[error("student {0} is already linked to this team")]
    StudentAlreadyLinked(String),
}

/// A multidisciplinary support team coordinating students' care.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    id: TeamId,
    name: String,
    description: Option<String>,
    status: RecordStatus,
    members: Vec<TeamMember>,
    linked_students: Vec<StudentId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Full field set for restoring a team from storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub id: TeamId,
    pub name: String,
    pub description: Option<String>,
    pub status: RecordStatus,
    pub members: Vec<TeamMember>,
    pub linked_students: Vec<StudentId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Team {
    pub fn create(
        id: TeamId,
        name: impl Into<String>,
        description: Option<String>,
    ) -> Result<Self, TeamError> {
        let now = Utc::now();
        Self::restore(TeamRecord {
            id,
            name: name.into(),
            description,
            status: RecordStatus::Active,
            members: Vec::new(),
            linked_students: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn restore(record: TeamRecord) -> Result<Self, TeamError> {
        require_min_len("team name", &record.name, 3)?;
        require_status("team", &VALID_STATUSES, record.status)?;

        for (index, member) in record.members.iter().enumerate() {
            if record.members[..index]
                .iter()
                .any(|known| known.staff_id == member.staff_id)
            {
                return Err(TeamError::MemberAlreadyPresent(member.staff_id.0.clone()));
            }
        }
        for (index, student_id) in record.linked_students.iter().enumerate() {
            if record.linked_students[..index].contains(student_id) {
                return Err(TeamError::StudentAlreadyLinked(student_id.0.clone()));
            }
        }

        Ok(Self {
            id: record.id,
            name: record.name,
            description: record.description,
            status: record.status,
            members: record.members,
            linked_students: record.linked_students,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }

    pub fn add_member(&self, member: TeamMember) -> Result<Self, TeamError> {
        if self
            .members
            .iter()
            .any(|known| known.staff_id == member.staff_id)
        {
            return Err(TeamError::MemberAlreadyPresent(member.staff_id.0.clone()));
        }
        let mut record = self.to_record();
        record.members.push(member);
        record.updated_at = Utc::now();
        Self::restore(record)
    }

    pub fn link_student(&self, student_id: StudentId) -> Result<Self, TeamError> {
        if self.linked_students.contains(&student_id) {
            return Err(TeamError::StudentAlreadyLinked(student_id.0.clone()));
        }
        let mut record = self.to_record();
        record.linked_students.push(student_id);
        record.updated_at = Utc::now();
        Self::restore(record)
    }

    pub fn deactivate(&self) -> Result<Self, TeamError> {
        let mut record = self.to_record();
        record.status = RecordStatus::Canceled;
        record.updated_at = Utc::now();
        Self::restore(record)
    }

    pub fn to_record(&self) -> TeamRecord {
        TeamRecord {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            status: self.status,
            members: self.members.clone(),
            linked_students: self.linked_students.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn id(&self) -> &TeamId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn status(&self) -> RecordStatus {
        self.status
    }

    pub fn members(&self) -> &[TeamMember] {
        &self.members
    }

    pub fn linked_students(&self) -> &[StudentId] {
        &self.linked_students
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
