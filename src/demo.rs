use crate::infra::{
    seed_demo_data, InMemoryCatalog, InMemoryDirectory, InMemoryStudentRepository, SeededData,
};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use student_support::error::AppError;
use student_support::support::{
    is_authorized, InstitutionId, StaffId, StaffRole, Student, StudentRepository, SupportService,
    Team, TeamError, TeamId, TeamMember, UserId,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Optional catalog CSV export to seed the intervention catalog.
    #[arg(long)]
    pub(crate) catalog_csv: Option<PathBuf>,
    /// Skip the team coordination portion of the demo.
    #[arg(long)]
    pub(crate) skip_team: bool,
    /// Skip the authorization portion of the demo.
    #[arg(long)]
    pub(crate) skip_authorization: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        catalog_csv,
        skip_team,
        skip_authorization,
    } = args;

    let students = InMemoryStudentRepository::default();
    let catalog = InMemoryCatalog::default();
    let directory = InMemoryDirectory::default();
    let seeded = seed_demo_data(&students, &catalog, &directory, catalog_csv)?;

    println!("Learning support demo");

    let Some(student) = students.find_student(&seeded.student_id).ok().flatten() else {
        return Ok(());
    };
    render_student(&student);

    let service = SupportService::new(Arc::new(students), Arc::new(catalog));
    render_recommendations(&service, &seeded);
    render_progress(&service, &seeded);

    if !skip_team {
        render_team_demo(&seeded);
    }
    if !skip_authorization {
        render_authorization_demo(&directory, &seeded);
    }

    Ok(())
}

fn render_student(student: &Student) {
    println!("\nStudent {} ({})", student.name(), student.grade());
    println!("Diagnosed difficulties:");
    for difficulty in student.difficulties() {
        println!(
            "  - {} | kind {} | severity {}",
            difficulty.name(),
            difficulty.kind().label(),
            difficulty.severity().label()
        );
    }
    println!("Assessments on file: {}", student.assessments().len());
}

fn render_recommendations(
    service: &SupportService<InMemoryStudentRepository, InMemoryCatalog>,
    seeded: &SeededData,
) {
    println!("\nRecommended catalog entries:");
    match service.recommendations(&seeded.student_id) {
        Ok(entries) if entries.is_empty() => {
            println!("  (no unapplied entries match the current difficulties)");
        }
        Ok(entries) => {
            for entry in &entries {
                let duration = entry
                    .suggested_duration_days()
                    .map(|days| format!("{days} days"))
                    .unwrap_or_else(|| "open-ended".to_string());
                println!(
                    "  - [{}] {} | kind {} | {}",
                    entry.id().0,
                    entry.title(),
                    entry.kind().label(),
                    duration
                );
            }
        }
        Err(err) => println!("  recommendation failed: {err}"),
    }
}

fn render_progress(
    service: &SupportService<InMemoryStudentRepository, InMemoryCatalog>,
    seeded: &SeededData,
) {
    println!("\nProgress summary:");
    match service.progress(&seeded.student_id) {
        Ok(summary) => {
            println!(
                "  interventions: {} active | {} completed | {} canceled",
                summary.status_counts.active,
                summary.status_counts.completed,
                summary.status_counts.canceled
            );
            println!("  overall progress: {:.1}%", summary.overall_progress);
            println!("  assessment average: {:.2}", summary.assessment_average);
            println!("  trend: {}", summary.trend.label());
        }
        Err(err) => println!("  analysis failed: {err}"),
    }
}

fn render_team_demo(seeded: &SeededData) {
    println!("\nTeam coordination:");
    let outcome = Team::create(
        TeamId("team-001".to_string()),
        "Grade 5 support team",
        Some("Coordinates plans for fifth-grade students".to_string()),
    )
    .and_then(|team| {
        team.add_member(TeamMember {
            staff_id: StaffId("staff-010".to_string()),
            role: StaffRole::Teacher,
        })
    })
    .and_then(|team| team.link_student(seeded.student_id.clone()));

    let team = match outcome {
        Ok(team) => team,
        Err(err) => {
            println!("  team setup failed: {err}");
            return;
        }
    };
    println!(
        "  {} now has {} member(s) and {} linked student(s)",
        team.name(),
        team.members().len(),
        team.linked_students().len()
    );

    // Adding the same staff member twice is rejected.
    match team.add_member(TeamMember {
        staff_id: StaffId("staff-010".to_string()),
        role: StaffRole::Psychologist,
    }) {
        Ok(_) => println!("  duplicate member unexpectedly accepted"),
        Err(TeamError::MemberAlreadyPresent(staff)) => {
            println!("  duplicate member rejected: {staff} already on the roster");
        }
        Err(err) => println!("  team error: {err}"),
    }
}

fn render_authorization_demo(directory: &InMemoryDirectory, seeded: &SeededData) {
    println!("\nAuthorization checks:");
    let coordinator_roles = [StaffRole::Coordinator];

    report_authorization(
        "coordinator (administrator), no scope",
        is_authorized(&seeded.coordinator_id, &coordinator_roles, None, directory),
    );
    report_authorization(
        "teacher, scoped to their institution",
        is_authorized(
            &seeded.teacher_id,
            &[StaffRole::Teacher],
            Some(&seeded.institution_id),
            directory,
        ),
    );
    report_authorization(
        "teacher, scoped to a foreign institution",
        is_authorized(
            &seeded.teacher_id,
            &[StaffRole::Teacher],
            Some(&InstitutionId("inst-999".to_string())),
            directory,
        ),
    );
    report_authorization(
        "unknown user",
        is_authorized(
            &UserId("user-ghost".to_string()),
            &coordinator_roles,
            None,
            directory,
        ),
    );
}

fn report_authorization(
    label: &str,
    outcome: Result<bool, student_support::support::AuthorizationError>,
) {
    match outcome {
        Ok(true) => println!("  - {label}: allowed"),
        Ok(false) => println!("  - {label}: denied (role not in the allowed set)"),
        Err(err) => println!("  - {label}: denied ({err})"),
    }
}
