use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;

use crate::auth::session::{validate_session_token, SESSION_COOKIE};
use crate::state::AppState;

pub const ADMIN_PREFIX: &str = "/admin";
pub const LOGIN_PATH: &str = "/admin/login";
pub const DASHBOARD_PATH: &str = "/admin";

/// The three possible outcomes of the admin gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    ToLogin,
    ToDashboard,
}

/// Decide what to do with a request, given its path and whether the client
/// holds a valid session. Total over both inputs, no side effects.
///
/// - Admin paths (other than the login page) require a valid session.
/// - The login page bounces already-authenticated clients to the dashboard.
/// - Everything else passes through untouched.
pub fn evaluate(path: &str, session_valid: bool) -> GateDecision {
    let is_protected = path.starts_with(ADMIN_PREFIX) && !path.starts_with(LOGIN_PATH);

    if is_protected && !session_valid {
        return GateDecision::ToLogin;
    }

    if path == LOGIN_PATH && session_valid {
        return GateDecision::ToDashboard;
    }

    GateDecision::Allow
}

/// Axum middleware applying the gate to every request.
///
/// A cookie that is missing, expired, or fails signature validation all
/// count as "no session".
pub async fn session_gate(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let session_valid = jar
        .get(SESSION_COOKIE)
        .map(|cookie| {
            validate_session_token(cookie.value(), &state.config.session_secret).is_ok()
        })
        .unwrap_or(false);

    match evaluate(request.uri().path(), session_valid) {
        GateDecision::Allow => next.run(request).await,
        GateDecision::ToLogin => Redirect::temporary(LOGIN_PATH).into_response(),
        GateDecision::ToDashboard => Redirect::temporary(DASHBOARD_PATH).into_response(),
    }
}
