use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{Duration, Local};

use crate::support::domain::{
    Assessment, AssessmentId, CatalogEntry, CatalogEntryId, Difficulty, DifficultyId,
    DifficultyKind, InstitutionId, Intervention, InterventionId, InterventionKind, Severity,
    StaffId, Student, StudentId, UserId,
};
use crate::support::repository::{
    CatalogLookup, InstitutionMembership, RepositoryError, StudentRepository, User, UserDirectory,
};

pub(super) fn difficulty(id: &str, kind: DifficultyKind, severity: Severity) -> Difficulty {
    Difficulty::create(
        DifficultyId(id.to_string()),
        format!("Difficulty {id}"),
        "A persistent learning difficulty used in tests",
        "Observed in classroom work",
        kind,
        severity,
    )
    .expect("difficulty builds")
}

pub(super) fn entry(id: &str, kind: InterventionKind, targets: &[DifficultyKind]) -> CatalogEntry {
    CatalogEntry::create(
        CatalogEntryId(id.to_string()),
        format!("Entry {id}"),
        "A reusable intervention template used in tests",
        kind,
        Some(30),
        targets.to_vec(),
        Vec::new(),
        Vec::new(),
    )
    .expect("catalog entry builds")
}

pub(super) fn student(id: &str) -> Student {
    let today = Local::now().date_naive();
    Student::create(
        StudentId(id.to_string()),
        "Jordan Reyes",
        "4th grade",
        today - Duration::weeks(52 * 9),
        StaffId("staff-001".to_string()),
    )
    .expect("student builds")
}

/// Student carrying the given assessment scores, dated oldest first.
pub(super) fn student_with_scores(id: &str, scores: &[f64]) -> Student {
    let today = Local::now().date_naive();
    let mut student = student(id);
    for (index, score) in scores.iter().enumerate() {
        let date = today - Duration::days((scores.len() - index) as i64 * 7);
        let assessment = Assessment::new(
            AssessmentId(format!("{id}-ass-{index}")),
            date,
            "periodic review",
            *score,
            None,
        )
        .expect("assessment builds");
        student = student.add_assessment(assessment).expect("assessment added");
    }
    student
}

pub(super) fn intervention(id: &str, student_id: &str) -> Intervention {
    Intervention::create(
        InterventionId(id.to_string()),
        format!("Intervention {id}"),
        "A support intervention used in tests",
        InterventionKind::Pedagogical,
        StudentId(student_id.to_string()),
        None,
        Local::now().date_naive() - Duration::days(30),
        None,
    )
    .expect("intervention builds")
}

/// Intervention instantiated from a catalog entry, linking back to it.
pub(super) fn applied_intervention(id: &str, student_id: &str, entry_id: &str) -> Intervention {
    Intervention::create(
        InterventionId(id.to_string()),
        format!("Intervention {id}"),
        "A support intervention used in tests",
        InterventionKind::Pedagogical,
        StudentId(student_id.to_string()),
        Some(CatalogEntryId(entry_id.to_string())),
        Local::now().date_naive() - Duration::days(30),
        None,
    )
    .expect("intervention builds")
}

#[derive(Default, Clone)]
pub(super) struct MemoryStudents {
    students: Arc<Mutex<HashMap<StudentId, Student>>>,
    difficulties: Arc<Mutex<HashMap<StudentId, Vec<Difficulty>>>>,
    interventions: Arc<Mutex<HashMap<StudentId, Vec<Intervention>>>>,
}

impl MemoryStudents {
    pub(super) fn with_student(self, student: Student) -> Self {
        self.students
            .lock()
            .expect("student mutex poisoned")
            .insert(student.id().clone(), student);
        self
    }

    pub(super) fn with_difficulties(self, id: &str, records: Vec<Difficulty>) -> Self {
        self.difficulties
            .lock()
            .expect("difficulty mutex poisoned")
            .insert(StudentId(id.to_string()), records);
        self
    }

    pub(super) fn with_interventions(self, id: &str, records: Vec<Intervention>) -> Self {
        self.interventions
            .lock()
            .expect("intervention mutex poisoned")
            .insert(StudentId(id.to_string()), records);
        self
    }
}

impl StudentRepository for MemoryStudents {
    fn find_student(&self, id: &StudentId) -> Result<Option<Student>, RepositoryError> {
        let guard = self.students.lock().expect("student mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn difficulties_for(&self, id: &StudentId) -> Result<Vec<Difficulty>, RepositoryError> {
        let guard = self.difficulties.lock().expect("difficulty mutex poisoned");
        Ok(guard.get(id).cloned().unwrap_or_default())
    }

    fn interventions_for(&self, id: &StudentId) -> Result<Vec<Intervention>, RepositoryError> {
        let guard = self
            .interventions
            .lock()
            .expect("intervention mutex poisoned");
        Ok(guard.get(id).cloned().unwrap_or_default())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryCatalog {
    targeted: Arc<Mutex<HashMap<DifficultyId, Vec<CatalogEntry>>>>,
    entries: Arc<Mutex<Vec<CatalogEntry>>>,
}

impl MemoryCatalog {
    pub(super) fn with_targeted(self, difficulty_id: &str, entries: Vec<CatalogEntry>) -> Self {
        self.targeted
            .lock()
            .expect("catalog mutex poisoned")
            .insert(DifficultyId(difficulty_id.to_string()), entries);
        self
    }

    pub(super) fn with_entries(self, entries: Vec<CatalogEntry>) -> Self {
        self.entries
            .lock()
            .expect("catalog mutex poisoned")
            .extend(entries);
        self
    }
}

impl CatalogLookup for MemoryCatalog {
    fn entries_for_difficulty(
        &self,
        difficulty_id: &DifficultyId,
    ) -> Result<Vec<CatalogEntry>, RepositoryError> {
        let guard = self.targeted.lock().expect("catalog mutex poisoned");
        Ok(guard.get(difficulty_id).cloned().unwrap_or_default())
    }

    fn active_entries(&self) -> Result<Vec<CatalogEntry>, RepositoryError> {
        let guard = self.entries.lock().expect("catalog mutex poisoned");
        Ok(guard.clone())
    }
}

pub(super) struct UnavailableCatalog;

impl CatalogLookup for UnavailableCatalog {
    fn entries_for_difficulty(
        &self,
        _difficulty_id: &DifficultyId,
    ) -> Result<Vec<CatalogEntry>, RepositoryError> {
        Err(RepositoryError::Unavailable("catalog offline".to_string()))
    }

    fn active_entries(&self) -> Result<Vec<CatalogEntry>, RepositoryError> {
        Err(RepositoryError::Unavailable("catalog offline".to_string()))
    }
}

/// Directory double counting membership lookups so tests can assert the
/// administrator short-circuit.
#[derive(Default)]
pub(super) struct MemoryDirectory {
    users: Mutex<HashMap<UserId, User>>,
    memberships: Mutex<HashMap<(String, String), InstitutionMembership>>,
    membership_calls: AtomicUsize,
}

impl MemoryDirectory {
    pub(super) fn with_user(self, user: User) -> Self {
        self.users
            .lock()
            .expect("user mutex poisoned")
            .insert(user.id.clone(), user);
        self
    }

    pub(super) fn with_membership(
        self,
        user_id: &str,
        institution_id: &str,
        membership: InstitutionMembership,
    ) -> Self {
        self.memberships
            .lock()
            .expect("membership mutex poisoned")
            .insert((user_id.to_string(), institution_id.to_string()), membership);
        self
    }

    pub(super) fn membership_calls(&self) -> usize {
        self.membership_calls.load(Ordering::Relaxed)
    }
}

impl UserDirectory for MemoryDirectory {
    fn find_user(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let guard = self.users.lock().expect("user mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn membership(
        &self,
        user_id: &UserId,
        institution_id: &InstitutionId,
    ) -> Result<Option<InstitutionMembership>, RepositoryError> {
        self.membership_calls.fetch_add(1, Ordering::Relaxed);
        let guard = self.memberships.lock().expect("membership mutex poisoned");
        Ok(guard
            .get(&(user_id.0.clone(), institution_id.0.clone()))
            .copied())
    }
}

pub(super) struct UnavailableDirectory;

impl UserDirectory for UnavailableDirectory {
    fn find_user(&self, _id: &UserId) -> Result<Option<User>, RepositoryError> {
        Err(RepositoryError::Unavailable("directory offline".to_string()))
    }

    fn membership(
        &self,
        _user_id: &UserId,
        _institution_id: &InstitutionId,
    ) -> Result<Option<InstitutionMembership>, RepositoryError> {
        Err(RepositoryError::Unavailable("directory offline".to_string()))
    }
}
