use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::ProfileData;
use crate::inbound::http::middleware::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

pub async fn get_current_user(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedAccount>,
) -> Result<ApiSuccess<ProfileData>, ApiError> {
    state
        .account_service
        .get_account(&caller.email)
        .await
        .map_err(ApiError::from)
        .map(|ref account| {
            ApiSuccess::new(
                StatusCode::OK,
                "Current user retrieved successfully",
                account.into(),
            )
        })
}
