//! Admin login/logout endpoints.
//!
//! Checks the configured admin credentials and issues the session cookie the
//! guarded routes require. The rest of the JSON API is public.

use axum::{
    http::{header, StatusCode},
    response::{AppendHeaders, IntoResponse},
    routing::post,
    Router,
};
use axum::extract::State;
use axum_helpers::{
    errors::responses::{BadRequestValidationResponse, UnauthorizedResponse},
    AppError, SessionAuth, ValidatedJson,
};
use serde::Deserialize;
use utoipa::{OpenApi, ToSchema};
use validator::Validate;

use crate::config::AdminCredentials;

/// OpenAPI documentation for the auth endpoints
#[derive(OpenApi)]
#[openapi(
    paths(login, logout),
    components(
        schemas(LoginRequest),
        responses(UnauthorizedResponse, BadRequestValidationResponse)
    ),
    tags(
        (name = "Auth", description = "Admin session endpoints")
    )
)]
pub struct AuthApiDoc;

#[derive(Clone)]
pub struct AuthState {
    pub credentials: AdminCredentials,
    pub session: SessionAuth,
}

/// Admin login payload
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

pub fn router(state: AuthState) -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .with_state(state)
}

/// Log in as the administrative user
#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 204, description = "Session cookie issued"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse)
    )
)]
pub(crate) async fn login(
    State(state): State<AuthState>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    if input.username != state.credentials.login || input.password != state.credentials.password {
        tracing::info!(username = %input.username, "Rejected admin login attempt");
        return Err(AppError::Unauthorized(
            "Invalid login or password".to_string(),
        ));
    }

    let cookie = state.session.session_cookie(&input.username).map_err(|e| {
        AppError::InternalServerError(format!("Failed to issue session cookie: {}", e))
    })?;

    tracing::info!(username = %input.username, "Admin logged in");
    Ok((
        StatusCode::NO_CONTENT,
        AppendHeaders([(header::SET_COOKIE, cookie)]),
    ))
}

/// Log out and clear the session cookie
#[utoipa::path(
    post,
    path = "/logout",
    tag = "Auth",
    responses(
        (status = 204, description = "Session cookie cleared")
    )
)]
pub(crate) async fn logout() -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        AppendHeaders([(header::SET_COOKIE, SessionAuth::clear_cookie())]),
    )
}
