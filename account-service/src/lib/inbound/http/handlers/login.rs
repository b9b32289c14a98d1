use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::RequiredFields;
use crate::account::errors::AccountError;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::Session;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let Json(body) = payload?;

    state
        .account_service
        .login(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref session| ApiSuccess::new(StatusCode::OK, "Login successful", session.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: Option<String>,
    password: Option<String>,
}

impl LoginRequest {
    fn try_into_command(self) -> Result<LoginCommand, AccountError> {
        let mut fields = RequiredFields::new();
        let email = fields.take("email", self.email);
        let password = fields.take("password", self.password);
        fields.check()?;

        Ok(LoginCommand { email, password })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponseData {
    pub token: String,
    pub user_name: String,
    pub email: String,
}

impl From<&Session> for LoginResponseData {
    fn from(session: &Session) -> Self {
        Self {
            token: session.token.access_token.clone(),
            user_name: session.account.user_name.as_str().to_string(),
            email: session.account.email.as_str().to_string(),
        }
    }
}
