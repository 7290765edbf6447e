use chrono::{Duration, Local};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use student_support::error::AppError;
use student_support::support::{
    Assessment, AssessmentId, CatalogCsvImporter, CatalogEntry, CatalogEntryId, CatalogLookup,
    Difficulty, DifficultyId, DifficultyKind, InstitutionId, InstitutionMembership, Intervention,
    InterventionId, InterventionKind, RepositoryError, Severity, StaffId, StaffRole, Student,
    StudentId, StudentRepository, User, UserDirectory, UserId,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryStudentRepository {
    students: Arc<Mutex<HashMap<StudentId, Student>>>,
    difficulties: Arc<Mutex<HashMap<StudentId, Vec<Difficulty>>>>,
    interventions: Arc<Mutex<HashMap<StudentId, Vec<Intervention>>>>,
}

impl InMemoryStudentRepository {
    pub(crate) fn put_student(&self, student: Student) {
        let mut guard = self.students.lock().expect("student mutex poisoned");
        guard.insert(student.id().clone(), student);
    }

    pub(crate) fn put_difficulties(&self, student_id: StudentId, records: Vec<Difficulty>) {
        let mut guard = self.difficulties.lock().expect("difficulty mutex poisoned");
        guard.insert(student_id, records);
    }

    pub(crate) fn put_interventions(&self, student_id: StudentId, records: Vec<Intervention>) {
        let mut guard = self
            .interventions
            .lock()
            .expect("intervention mutex poisoned");
        guard.insert(student_id, records);
    }
}

impl StudentRepository for InMemoryStudentRepository {
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

/// In-memory catalog. Targeted lookup resolves a difficulty id to its kind
/// and returns entries explicitly declaring that kind; generic entries only
/// surface through `active_entries`.
#[derive(Default, Clone)]
pub(crate) struct InMemoryCatalog {
    entries: Arc<Mutex<Vec<CatalogEntry>>>,
    difficulty_kinds: Arc<Mutex<HashMap<DifficultyId, DifficultyKind>>>,
}

impl InMemoryCatalog {
    pub(crate) fn add_entries(&self, new_entries: Vec<CatalogEntry>) {
        let mut guard = self.entries.lock().expect("catalog mutex poisoned");
        guard.extend(new_entries);
    }

    pub(crate) fn register_difficulty(&self, difficulty: &Difficulty) {
        let mut guard = self
            .difficulty_kinds
            .lock()
            .expect("difficulty kind mutex poisoned");
        guard.insert(difficulty.id().clone(), difficulty.kind());
    }
}

impl CatalogLookup for InMemoryCatalog {
    fn entries_for_difficulty(
        &self,
        difficulty_id: &DifficultyId,
    ) -> Result<Vec<CatalogEntry>, RepositoryError> {
        let kinds = self
            .difficulty_kinds
            .lock()
            .expect("difficulty kind mutex poisoned");
        let Some(kind) = kinds.get(difficulty_id).copied() else {
            return Ok(Vec::new());
        };

        let entries = self.entries.lock().expect("catalog mutex poisoned");
        Ok(entries
            .iter()
            .filter(|entry| entry.target_kinds().contains(&kind))
            .cloned()
            .collect())
    }

    fn active_entries(&self) -> Result<Vec<CatalogEntry>, RepositoryError> {
        let entries = self.entries.lock().expect("catalog mutex poisoned");
        Ok(entries
            .iter()
            .filter(|entry| entry.is_active())
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryDirectory {
    users: Arc<Mutex<HashMap<UserId, User>>>,
    memberships: Arc<Mutex<HashMap<(String, String), InstitutionMembership>>>,
}

impl InMemoryDirectory {
    pub(crate) fn put_user(&self, user: User) {
        let mut guard = self.users.lock().expect("user mutex poisoned");
        guard.insert(user.id.clone(), user);
    }

    pub(crate) fn put_membership(
        &self,
        user_id: &UserId,
        institution_id: &InstitutionId,
        membership: InstitutionMembership,
    ) {
        let mut guard = self.memberships.lock().expect("membership mutex poisoned");
        guard.insert(
            (user_id.0.clone(), institution_id.0.clone()),
            membership,
        );
    }
}

impl UserDirectory for InMemoryDirectory {
    fn find_user(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let guard = self.users.lock().expect("user mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn membership(
        &self,
        user_id: &UserId,
        institution_id: &InstitutionId,
    ) -> Result<Option<InstitutionMembership>, RepositoryError> {
        let guard = self.memberships.lock().expect("membership mutex poisoned");
        Ok(guard
            .get(&(user_id.0.clone(), institution_id.0.clone()))
            .copied())
    }
}

pub(crate) struct SeededData {
    pub(crate) student_id: StudentId,
    pub(crate) coordinator_id: UserId,
    pub(crate) teacher_id: UserId,
    pub(crate) institution_id: InstitutionId,
}

/// Seeds one student with a severe reading difficulty, a moderate attention
/// difficulty, an intervention history, assessments, a default catalog
/// (unless a CSV export was supplied), and a small user directory.
pub(crate) fn seed_demo_data(
    students: &InMemoryStudentRepository,
    catalog: &InMemoryCatalog,
    directory: &InMemoryDirectory,
    catalog_csv: Option<std::path::PathBuf>,
) -> Result<SeededData, AppError> {
    let today = Local::now().date_naive();

    let reading = Difficulty::create(
        DifficultyId("dif-001".to_string()),
        "Dyslexia",
        "Persistent difficulty decoding written words",
        "Slow, effortful reading; frequent letter transposition",
        DifficultyKind::Reading,
        Severity::Severe,
    )?;
    let attention = Difficulty::create(
        DifficultyId("dif-002".to_string()),
        "Attention deficit",
        "Difficulty sustaining attention on classroom tasks",
        "Loses track of multi-step instructions",
        DifficultyKind::Attention,
        Severity::Moderate,
    )?;

    let mut student = Student::create(
        StudentId("stu-001".to_string()),
        "Alex Morgan",
        "5th grade",
        today - Duration::weeks(52 * 10),
        StaffId("staff-010".to_string()),
    )?;
    student = student.add_difficulty(reading.clone())?;
    student = student.add_difficulty(attention.clone())?;

    let assessment_dates = [
        (today - Duration::days(120), 5.0),
        (today - Duration::days(90), 5.5),
        (today - Duration::days(45), 6.5),
        (today - Duration::days(10), 7.0),
    ];
    for (index, (date, score)) in assessment_dates.into_iter().enumerate() {
        let assessment = Assessment::new(
            AssessmentId(format!("ass-{:03}", index + 1)),
            date,
            "reading fluency",
            score,
            None,
        )?;
        student = student.add_assessment(assessment)?;
    }

    let applied = Intervention::create(
        InterventionId("int-001".to_string()),
        "Guided reading circle",
        "Small-group guided reading sessions",
        InterventionKind::Pedagogical,
        student.id().clone(),
        Some(CatalogEntryId("cat-001".to_string())),
        today - Duration::days(120),
        None,
    )?
    .update_progress(80)?
    .complete()?;
    let running = Intervention::create(
        InterventionId("int-002".to_string()),
        "Daily focus journal",
        "Structured journal building attention stamina",
        InterventionKind::Behavioral,
        student.id().clone(),
        None,
        today - Duration::days(30),
        Some("Reviewed weekly with homeroom teacher".to_string()),
    )?
    .update_progress(40)?;

    students.put_student(student.clone());
    students.put_difficulties(
        student.id().clone(),
        vec![reading.clone(), attention.clone()],
    );
    students.put_interventions(student.id().clone(), vec![applied, running]);

    catalog.register_difficulty(&reading);
    catalog.register_difficulty(&attention);
    let entries = match catalog_csv {
        Some(path) => CatalogCsvImporter::from_path(path)?,
        None => default_catalog()?,
    };
    catalog.add_entries(entries);

    let institution_id = InstitutionId("inst-001".to_string());
    let coordinator_id = UserId("user-lucia".to_string());
    let teacher_id = UserId("user-tomas".to_string());

    directory.put_user(User {
        id: coordinator_id.clone(),
        global_role: StaffRole::Coordinator,
        administrator: true,
    });
    directory.put_user(User {
        id: teacher_id.clone(),
        global_role: StaffRole::Teacher,
        administrator: false,
    });
    directory.put_membership(
        &teacher_id,
        &institution_id,
        InstitutionMembership {
            active: true,
            role: Some(StaffRole::Teacher),
        },
    );

    Ok(SeededData {
        student_id: student.id().clone(),
        coordinator_id,
        teacher_id,
        institution_id,
    })
}

fn default_catalog() -> Result<Vec<CatalogEntry>, AppError> {
    let entries = vec![
        CatalogEntry::create(
            CatalogEntryId("cat-001".to_string()),
            "Guided reading circle",
            "Small-group guided reading sessions",
            InterventionKind::Pedagogical,
            Some(60),
            vec![DifficultyKind::Reading],
            vec!["elementary".to_string()],
            vec!["decodable readers".to_string()],
        )?,
        CatalogEntry::create(
            CatalogEntryId("cat-002".to_string()),
            "Multidisciplinary case review",
            "Joint review of the student's plan across specialties",
            InterventionKind::Multidisciplinary,
            Some(30),
            Vec::new(),
            vec!["all grades".to_string()],
            Vec::new(),
        )?,
        CatalogEntry::create(
            CatalogEntryId("cat-003".to_string()),
            "Attention skills coaching",
            "One-on-one coaching on attention strategies",
            InterventionKind::Psychological,
            Some(45),
            vec![DifficultyKind::Attention],
            vec!["elementary".to_string(), "middle school".to_string()],
            vec!["timer".to_string(), "task cards".to_string()],
        )?,
        CatalogEntry::create(
            CatalogEntryId("cat-004".to_string()),
            "Peer mediation program",
            "Facilitated peer conflict-resolution sessions",
            InterventionKind::Social,
            None,
            vec![DifficultyKind::Behavioral, DifficultyKind::Social],
            vec!["middle school".to_string()],
            Vec::new(),
        )?,
    ];

    Ok(entries)
}
