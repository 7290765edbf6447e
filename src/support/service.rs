use std::sync::Arc;

use super::analytics::{self, AnalysisError, ProgressSummary};
use super::domain::{CatalogEntry, StudentId};
use super::recommendation::{self, RecommendationError};
use super::repository::{CatalogLookup, RepositoryError, StudentRepository};

/// Facade hydrating a student and their related records through the
/// repository collaborators, then invoking the pure engines. Absence of the
/// student is checked here and signalled before any engine runs.
pub struct SupportService<S, C> {
    students: Arc<S>,
    catalog: Arc<C>,
}

impl<S, C> SupportService<S, C>
where
    S: StudentRepository + 'static,
    C: CatalogLookup + 'static,
{
    pub fn new(students: Arc<S>, catalog: Arc<C>) -> Self {
        Self { students, catalog }
    }

    /// Candidate catalog entries for the student, severity-prioritized.
    pub fn recommendations(
        &self,
        student_id: &StudentId,
    ) -> Result<Vec<CatalogEntry>, SupportServiceError> {
        let student = self
            .students
            .find_student(student_id)?
            .ok_or(RepositoryError::NotFound)?;
        let difficulties = self.students.difficulties_for(student_id)?;
        let interventions = self.students.interventions_for(student_id)?;

        let candidates = recommendation::recommend(
            &student,
            &difficulties,
            &interventions,
            self.catalog.as_ref(),
        )?;
        Ok(candidates)
    }

    /// Aggregate progress view over the student's interventions and
    /// assessment history.
    pub fn progress(&self, student_id: &StudentId) -> Result<ProgressSummary, SupportServiceError> {
        let student = self
            .students
            .find_student(student_id)?
            .ok_or(RepositoryError::NotFound)?;
        let interventions = self.students.interventions_for(student_id)?;

        let summary = analytics::analyze(&student, &interventions)?;
        Ok(summary)
    }
}

/// Error raised by the support service.
#[derive(Debug, thiserror::Error)]
pub enum SupportServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Recommendation(#[from] RecommendationError),
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}
