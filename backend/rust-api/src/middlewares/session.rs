use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Arc;

use crate::services::AppState;

pub const SESSION_COOKIE_NAME: &str = "sid";

/// Session bound to the current request, inserted as a request extension
#[derive(Clone, Debug)]
pub struct SessionContext {
    pub id: String,
}

/// Resolves the `sid` cookie to a server-side session (opening one when
/// needed) and refreshes the cookie so its Max-Age follows the sliding TTL.
pub async fn session_middleware(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let cookie_id = jar
        .get(SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string());

    let handle = state.sessions.resolve(cookie_id.as_deref()).await;
    if handle.is_new && cookie_id.is_some() {
        tracing::debug!("Stale session cookie replaced");
    }

    request.extensions_mut().insert(SessionContext {
        id: handle.id.clone(),
    });

    let response = next.run(request).await;

    let ttl_seconds = i64::try_from(state.sessions.ttl().as_secs()).unwrap_or(i64::MAX);
    let cookie = Cookie::build((SESSION_COOKIE_NAME, handle.id))
        .path("/")
        .http_only(true)
        .secure(state.config.session.cookie_secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(ttl_seconds))
        .build();

    (jar.add(cookie), response).into_response()
}
