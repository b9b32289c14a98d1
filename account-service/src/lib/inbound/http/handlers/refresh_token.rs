use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::RequiredFields;
use crate::inbound::http::router::AppState;

/// Reissues a token for any registered email.
///
/// No prior token or password is checked.
pub async fn refresh_token(
    State(state): State<AppState>,
    payload: Result<Json<RefreshTokenRequest>, JsonRejection>,
) -> Result<ApiSuccess<RefreshTokenResponseData>, ApiError> {
    let Json(body) = payload?;

    let mut fields = RequiredFields::new();
    let email = fields.take("email", body.email);
    fields.check()?;

    state
        .account_service
        .refresh_token(&email)
        .await
        .map_err(ApiError::from)
        .map(|session| {
            ApiSuccess::new(
                StatusCode::OK,
                "Token refreshed successfully",
                RefreshTokenResponseData {
                    token: session.token.access_token,
                },
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RefreshTokenRequest {
    email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshTokenResponseData {
    pub token: String,
}
