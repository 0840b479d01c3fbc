use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::credential::models::User;
use crate::domain::errors::ErrorKind;
use crate::domain::permission::models::Permission;
use crate::inbound::http::middleware::AuthenticatedSubject;
use crate::inbound::http::router::AppState;

/// Profile of the caller, with the permissions granted to them.
pub async fn get_authenticated_user(
    State(state): State<AppState>,
    Extension(subject): Extension<AuthenticatedSubject>,
) -> Result<ApiSuccess<AuthenticatedUserData>, ApiError> {
    let user = match state.authentication.find_subject(subject.user_id).await? {
        Some(user) if user.active => user,
        _ => {
            tracing::warn!(user_id = %subject.user_id, "Token subject missing or inactive");
            return Err(ErrorKind::Unauthorized.into());
        }
    };

    let permissions = state.authorization.permissions_of(user.id).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        AuthenticatedUserData::new(&user, permissions),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedUserData {
    pub id: i64,
    pub email: String,
    pub permissions: Vec<PermissionData>,
}

impl AuthenticatedUserData {
    fn new(user: &User, permissions: Vec<Permission>) -> Self {
        Self {
            id: user.id.as_i64(),
            email: user.email.clone(),
            permissions: permissions.into_iter().map(PermissionData::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionData {
    pub code: String,
    pub name: String,
}

impl From<Permission> for PermissionData {
    fn from(permission: Permission) -> Self {
        Self {
            code: permission.code.to_string(),
            name: permission.name,
        }
    }
}
