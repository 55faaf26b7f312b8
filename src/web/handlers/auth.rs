//! Signup, login and who-am-I handlers.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::web::dto::{AuthRequest, JsonBody, MeResponse};
use crate::web::error::ApiError;
use crate::web::middleware::AuthenticatedIdentity;

use super::AppState;

/// POST /signup - Register a new user.
pub async fn signup(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<AuthRequest>,
) -> Result<StatusCode, ApiError> {
    state.auth.signup(&req.username, &req.password).await?;
    Ok(StatusCode::CREATED)
}

/// POST /login - Check credentials and set the session cookie.
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    JsonBody(req): JsonBody<AuthRequest>,
) -> Result<(CookieJar, StatusCode), ApiError> {
    let session = state.auth.login(&req.username, &req.password).await?;

    let cookie = Cookie::build((
        state.session.cookie_name.clone(),
        session.id().as_str().to_string(),
    ))
    .path("/")
    .http_only(true)
    .same_site(SameSite::Lax)
    .secure(state.session.secure_cookie);

    Ok((jar.add(cookie), StatusCode::OK))
}

/// GET /me - Username of the logged-in user.
pub async fn me(identity: AuthenticatedIdentity) -> Json<MeResponse> {
    Json(MeResponse {
        username: identity.username().to_string(),
    })
}
