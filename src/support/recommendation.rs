//! Candidate-intervention recommendation over a student's diagnosed
//! difficulties and intervention history.

use std::collections::HashSet;

use super::domain::{
    CatalogEntry, CatalogEntryId, Difficulty, DifficultyKind, Intervention, InterventionKind,
    Severity, Student,
};
use super::repository::{CatalogLookup, RepositoryError};

/// Error raised by [`recommend`].
#[derive(Debug, thiserror::Error)]
pub enum RecommendationError {
    #[error("student {0} has no diagnosed difficulties to recommend against")]
    NoDifficulties(String),
    #[error(transparent)]
    Lookup(#[from] RepositoryError),
}

/// Produces a deduplicated, severity-prioritized list of catalog entries a
/// student has not yet received.
///
/// A targeted pass collects active entries addressing each difficulty; when
/// that yields nothing, a broader pass keeps any active entry that is
/// generic (no declared targets) or whose target kinds intersect the
/// student's difficulty kinds. Entries already applied to the student, in
/// any status, are never recommended again. An empty catalog produces an
/// empty list, which is a valid outcome; an empty difficulty list is a
/// precondition failure.
pub fn recommend(
    student: &Student,
    difficulties: &[Difficulty],
    applied_interventions: &[Intervention],
    catalog: &dyn CatalogLookup,
) -> Result<Vec<CatalogEntry>, RecommendationError> {
    if difficulties.is_empty() {
        return Err(RecommendationError::NoDifficulties(student.id().0.clone()));
    }

    let applied_ids: HashSet<&CatalogEntryId> = applied_interventions
        .iter()
        .filter_map(Intervention::catalog_entry_id)
        .collect();

    let mut seen: HashSet<CatalogEntryId> = HashSet::new();
    let mut candidates: Vec<CatalogEntry> = Vec::new();

    for difficulty in difficulties {
        for entry in catalog.entries_for_difficulty(difficulty.id())? {
            if !entry.is_active() || applied_ids.contains(entry.id()) {
                continue;
            }
            if seen.insert(entry.id().clone()) {
                candidates.push(entry);
            }
        }
    }

    if candidates.is_empty() {
        let mut kinds: Vec<DifficultyKind> = Vec::new();
        for difficulty in difficulties {
            if !kinds.contains(&difficulty.kind()) {
                kinds.push(difficulty.kind());
            }
        }

        for entry in catalog.active_entries()? {
            if !entry.is_active() || applied_ids.contains(entry.id()) {
                continue;
            }
            if entry.matches_kinds(&kinds) && seen.insert(entry.id().clone()) {
                candidates.push(entry);
            }
        }
    }

    let has_severe = difficulties
        .iter()
        .any(|difficulty| difficulty.severity() == Severity::Severe);
    if has_severe {
        // Stable partition: multidisciplinary entries first, relative order
        // preserved on both sides.
        let (multidisciplinary, rest): (Vec<_>, Vec<_>) = candidates
            .into_iter()
            .partition(|entry| entry.kind() == InterventionKind::Multidisciplinary);
        candidates = multidisciplinary.into_iter().chain(rest).collect();
    }

    Ok(candidates)
}
