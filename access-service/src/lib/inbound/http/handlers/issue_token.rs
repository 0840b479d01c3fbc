use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn issue_token(
    State(state): State<AppState>,
    Json(body): Json<IssueTokenRequestBody>,
) -> Result<ApiSuccess<IssueTokenResponseData>, ApiError> {
    let token = state
        .authentication
        .issue_token(&body.email, &body.password, Utc::now())
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        IssueTokenResponseData {
            expires_at: token.expires_at(),
            token: token.into_string(),
        },
    ))
}

/// Missing fields deserialize as empty and fail validation.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct IssueTokenRequestBody {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueTokenResponseData {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}
