use serde::{Deserialize, Serialize};

use super::domain::{
    CatalogEntry, Difficulty, DifficultyId, InstitutionId, Intervention, StaffRole, Student,
    StudentId, UserId,
};

/// Error enumeration for collaborator failures. Engines propagate these
/// untouched; translation to a caller-facing response happens at the edge.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Storage abstraction for students and their related records, so the
/// engines can be exercised in isolation.
pub trait StudentRepository: Send + Sync {
    fn find_student(&self, id: &StudentId) -> Result<Option<Student>, RepositoryError>;
    fn difficulties_for(&self, id: &StudentId) -> Result<Vec<Difficulty>, RepositoryError>;
    fn interventions_for(&self, id: &StudentId) -> Result<Vec<Intervention>, RepositoryError>;
}

/// Capability contract the recommendation engine consumes: targeted entries
/// for one difficulty, or the full active catalog for the fallback pass.
pub trait CatalogLookup: Send + Sync {
    fn entries_for_difficulty(
        &self,
        difficulty_id: &DifficultyId,
    ) -> Result<Vec<CatalogEntry>, RepositoryError>;
    fn active_entries(&self) -> Result<Vec<CatalogEntry>, RepositoryError>;
}

/// A directory user as seen by the authorization predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub global_role: StaffRole,
    pub administrator: bool,
}

/// A user's association with one institution, with an optional role specific
/// to that scope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InstitutionMembership {
    pub active: bool,
    pub role: Option<StaffRole>,
}

/// Directory contract backing [`crate::support::is_authorized`].
pub trait UserDirectory: Send + Sync {
    fn find_user(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;
    fn membership(
        &self,
        user_id: &UserId,
        institution_id: &InstitutionId,
    ) -> Result<Option<InstitutionMembership>, RepositoryError>;
}
