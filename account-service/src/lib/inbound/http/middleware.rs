use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::middleware::Next;
use axum::response::Response;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

const ACCESS_TOKEN_REQUIRED: &str = "Access token is required";
const INVALID_TOKEN: &str = "Invalid or expired token";

/// Extension type to store the authenticated caller in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedAccount {
    pub email: String,
}

/// Middleware that validates bearer tokens and adds the caller to request extensions.
///
/// A request without a token is rejected with 401; a token that fails
/// verification for any reason is rejected with 403.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_header(&req)?;

    let claims = state.authenticator.validate_token(token).map_err(|e| {
        tracing::warn!(error = %e, "JWT validation failed");
        ApiError::Forbidden(INVALID_TOKEN.to_string())
    })?;

    let email = claims.email().ok_or_else(|| {
        tracing::warn!("Token carries no email claim");
        ApiError::Forbidden(INVALID_TOKEN.to_string())
    })?;

    req.extensions_mut().insert(AuthenticatedAccount { email });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, ApiError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized(ACCESS_TOKEN_REQUIRED.to_string()))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid Authorization header".to_string()))?;

    parse_bearer(auth_str).ok_or_else(|| ApiError::Unauthorized(ACCESS_TOKEN_REQUIRED.to_string()))
}

fn parse_bearer(value: &str) -> Option<&str> {
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    if scheme.eq_ignore_ascii_case("Bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}
