//! Learning-support decision core: validated domain entities, the
//! recommendation and progress-analytics engines, and the capability
//! contracts they consume. Everything here is synchronous, side-effect-free
//! computation over already-hydrated data; transport and persistence live in
//! the application shell.

pub mod analytics;
pub mod authorization;
pub mod catalog_import;
pub mod domain;
pub mod recommendation;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use analytics::{analyze, AnalysisError, ProgressSummary, StatusCounts, Trend};
pub use authorization::{is_authorized, AuthorizationError};
pub use catalog_import::{CatalogCsvImporter, CatalogImportError};
pub use domain::{
    Assessment, AssessmentId, CatalogEntry, CatalogEntryId, CatalogEntryRecord, Difficulty,
    DifficultyChanges, DifficultyId, DifficultyKind, DifficultyRecord, InstitutionId, Intervention,
    InterventionId, InterventionKind, InterventionRecord, RecordStatus, Severity, StaffId,
    StaffRole, Student, StudentId, StudentRecord, Team, TeamError, TeamId, TeamMember, TeamRecord,
    UserId, ValidationError,
};
pub use recommendation::{recommend, RecommendationError};
pub use repository::{
    CatalogLookup, InstitutionMembership, RepositoryError, StudentRepository, User, UserDirectory,
};
pub use router::support_router;
pub use service::{SupportService, SupportServiceError};
