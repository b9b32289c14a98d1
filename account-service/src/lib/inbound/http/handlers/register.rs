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
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::models::Session;
use crate::domain::account::models::UserName;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    let Json(body) = payload?;

    state
        .account_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref session| {
            ApiSuccess::new(
                StatusCode::CREATED,
                "User registered successfully",
                session.into(),
            )
        })
}

/// HTTP request body for registering an account (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    email: Option<String>,
    user_name: Option<String>,
    password: Option<String>,
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, AccountError> {
        let mut fields = RequiredFields::new();
        let email = fields.take("email", self.email);
        let user_name = fields.take("userName", self.user_name);
        let password = fields.take("password", self.password);
        fields.check()?;

        Ok(RegisterCommand::new(
            EmailAddress::new(email)?,
            UserName::new(user_name)?,
            password,
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponseData {
    pub user_name: String,
    pub email: String,
    pub token: String,
}

impl From<&Session> for RegisterResponseData {
    fn from(session: &Session) -> Self {
        Self {
            user_name: session.account.user_name.as_str().to_string(),
            email: session.account.email.as_str().to_string(),
            token: session.token.access_token.clone(),
        }
    }
}
