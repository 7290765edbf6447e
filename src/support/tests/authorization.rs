use super::common::{MemoryDirectory, UnavailableDirectory};
use crate::support::authorization::{is_authorized, AuthorizationError};
use crate::support::domain::{InstitutionId, StaffRole, UserId};
use crate::support::repository::{InstitutionMembership, User};

fn user(id: &str, role: StaffRole, administrator: bool) -> User {
    User {
        id: UserId(id.to_string()),
        global_role: role,
        administrator,
    }
}

fn membership(active: bool, role: Option<StaffRole>) -> InstitutionMembership {
    InstitutionMembership { active, role }
}

#[test]
fn administrators_are_authorized_without_a_membership_lookup() {
    let directory =
        MemoryDirectory::default().with_user(user("user-1", StaffRole::Other, true));

    let allowed = is_authorized(
        &UserId("user-1".to_string()),
        &[StaffRole::Coordinator],
        Some(&InstitutionId("inst-1".to_string())),
        &directory,
    )
    .expect("check succeeds");

    assert!(allowed);
    assert_eq!(directory.membership_calls(), 0);
}

#[test]
fn an_unknown_user_is_an_error_not_a_denial() {
    let directory = MemoryDirectory::default();

    let result = is_authorized(
        &UserId("user-ghost".to_string()),
        &[StaffRole::Teacher],
        None,
        &directory,
    );

    assert!(
        matches!(result, Err(AuthorizationError::UnknownUser(ref id)) if id == "user-ghost")
    );
}

#[test]
fn without_a_scope_the_global_role_decides() {
    let directory =
        MemoryDirectory::default().with_user(user("user-1", StaffRole::Teacher, false));

    let allowed = is_authorized(
        &UserId("user-1".to_string()),
        &[StaffRole::Teacher, StaffRole::Coordinator],
        None,
        &directory,
    )
    .expect("check succeeds");
    let denied = is_authorized(
        &UserId("user-1".to_string()),
        &[StaffRole::Psychologist],
        None,
        &directory,
    )
    .expect("check succeeds");

    assert!(allowed);
    assert!(!denied);
}

#[test]
fn a_scoped_role_overrides_the_global_role() {
    // Globally a teacher, but a coordinator inside this institution.
    let directory = MemoryDirectory::default()
        .with_user(user("user-1", StaffRole::Teacher, false))
        .with_membership(
            "user-1",
            "inst-1",
            membership(true, Some(StaffRole::Coordinator)),
        );

    let allowed = is_authorized(
        &UserId("user-1".to_string()),
        &[StaffRole::Coordinator],
        Some(&InstitutionId("inst-1".to_string())),
        &directory,
    )
    .expect("check succeeds");

    assert!(allowed);
}

#[test]
fn a_membership_without_a_role_falls_back_to_the_global_role() {
    let directory = MemoryDirectory::default()
        .with_user(user("user-1", StaffRole::Teacher, false))
        .with_membership("user-1", "inst-1", membership(true, None));

    let allowed = is_authorized(
        &UserId("user-1".to_string()),
        &[StaffRole::Teacher],
        Some(&InstitutionId("inst-1".to_string())),
        &directory,
    )
    .expect("check succeeds");

    assert!(allowed);
}

#[test]
fn an_inactive_membership_is_forbidden() {
    let directory = MemoryDirectory::default()
        .with_user(user("user-1", StaffRole::Teacher, false))
        .with_membership(
            "user-1",
            "inst-1",
            membership(false, Some(StaffRole::Teacher)),
        );

    let result = is_authorized(
        &UserId("user-1".to_string()),
        &[StaffRole::Teacher],
        Some(&InstitutionId("inst-1".to_string())),
        &directory,
    );

    assert!(matches!(result, Err(AuthorizationError::Forbidden { .. })));
}

#[test]
fn a_missing_membership_is_forbidden() {
    let directory =
        MemoryDirectory::default().with_user(user("user-1", StaffRole::Teacher, false));

    let result = is_authorized(
        &UserId("user-1".to_string()),
        &[StaffRole::Teacher],
        Some(&InstitutionId("inst-1".to_string())),
        &directory,
    );

    assert!(matches!(
        result,
        Err(AuthorizationError::Forbidden { ref user, ref institution })
            if user == "user-1" && institution == "inst-1"
    ));
}

#[test]
fn directory_failures_propagate() {
    let result = is_authorized(
        &UserId("user-1".to_string()),
        &[StaffRole::Teacher],
        None,
        &UnavailableDirectory,
    );

    assert!(matches!(result, Err(AuthorizationError::Directory(_))));
}
