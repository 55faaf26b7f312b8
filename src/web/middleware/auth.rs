//! Session gate for protected routes.
//!
//! [`require_session`] resolves the session cookie against the session store
//! and attaches an [`AuthenticatedIdentity`] to the request. The identity has
//! no public constructor, so a handler that takes one can only run behind the
//! gate.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::{self, Next},
    response::Response,
    Router,
};
use axum_extra::extract::CookieJar;

use crate::auth::SessionId;
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// The user a request was authenticated as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    username: String,
}

impl AuthenticatedIdentity {
    /// Username of the logged-in user.
    pub fn username(&self) -> &str {
        &self.username
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedIdentity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedIdentity>()
            .cloned()
            .ok_or_else(|| {
                tracing::error!(
                    path = %parts.uri.path(),
                    "AuthenticatedIdentity requested on a route without the session gate"
                );
                ApiError::internal("An internal error occurred")
            })
    }
}

/// Middleware that rejects requests without a valid session cookie.
///
/// Missing cookie or unknown session: 401. Session store failure: 500.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(cookie) = jar.get(&state.session.cookie_name) else {
        tracing::debug!(path = %request.uri().path(), "No session cookie");
        return Err(ApiError::unauthorized("please login"));
    };

    let id = SessionId::from_token(cookie.value());
    let session = state.auth.sessions().load(&id).await?.ok_or_else(|| {
        tracing::debug!(session = ?id, "Unknown session");
        ApiError::unauthorized("please login")
    })?;

    request.extensions_mut().insert(AuthenticatedIdentity {
        username: session.username().to_string(),
    });

    Ok(next.run(request).await)
}

/// Put every route of `router` behind [`require_session`].
///
/// Applied with `route_layer`, so unknown paths still answer 404.
pub fn protect(router: Router<Arc<AppState>>, state: Arc<AppState>) -> Router<Arc<AppState>> {
    router.route_layer(middleware::from_fn_with_state(state, require_session))
}
