//! Role and institution-scope authorization predicate.

use super::domain::{InstitutionId, StaffRole, UserId};
use super::repository::{RepositoryError, UserDirectory};

/// Error raised by [`is_authorized`]. A missing user and a missing or
/// inactive institution membership are hard errors, not a `false` answer.
#[derive(Debug, thiserror::Error)]
pub enum AuthorizationError {
    #[error("user {0} not found")]
    UnknownUser(String),
    #[error("user {user} has no active membership in institution {institution}")]
    Forbidden { user: String, institution: String },
    #[error(transparent)]
    Directory(#[from] RepositoryError),
}

/// Decides whether a user may act in one of the allowed roles, optionally
/// scoped to an institution.
///
/// Administrators are authorized unconditionally and their memberships are
/// never queried. Without an institution scope the check reduces to the
/// user's global role. With a scope, the user needs an active membership
/// there; a membership carrying no scoped role falls back to the global
/// role.
pub fn is_authorized(
    user_id: &UserId,
    allowed_roles: &[StaffRole],
    institution: Option<&InstitutionId>,
    directory: &dyn UserDirectory,
) -> Result<bool, AuthorizationError> {
    let user = directory
        .find_user(user_id)?
        .ok_or_else(|| AuthorizationError::UnknownUser(user_id.0.clone()))?;

    if user.administrator {
        return Ok(true);
    }

    let Some(institution) = institution else {
        return Ok(allowed_roles.contains(&user.global_role));
    };

    match directory.membership(user_id, institution)? {
        Some(membership) if membership.active => {
            let effective_role = membership.role.unwrap_or(user.global_role);
            Ok(allowed_roles.contains(&effective_role))
        }
        _ => Err(AuthorizationError::Forbidden {
            user: user_id.0.clone(),
            institution: institution.0.clone(),
        }),
    }
}
