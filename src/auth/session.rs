use axum::extract::State;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::{AppConfig, AppState};

/// Name of the cookie carrying the signed admin session token.
pub const SESSION_COOKIE: &str = "admin-auth";

/// Claims embedded in the session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// The authenticated admin username.
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response body.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
}

/// Current-session response body.
#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub username: String,
    pub expires_at: DateTime<Utc>,
}

/// Validate a submitted credential pair against the configured admin pair.
pub fn check_credentials(
    config: &AppConfig,
    username: &str,
    password: &str,
) -> Result<(), AppError> {
    if username == config.admin_username && password == config.admin_password {
        Ok(())
    } else {
        Err(AppError::Auth("Invalid username or password".into()))
    }
}

/// Sign a time-bounded session token for the given username.
pub fn issue_session_token(
    username: &str,
    secret: &str,
    ttl_secs: i64,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let claims = SessionClaims {
        sub: username.to_string(),
        iat: now,
        exp: now + ttl_secs,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to sign session token: {}", e)))
}

/// Verify a session token's signature and expiry, returning its claims.
pub fn validate_session_token(token: &str, secret: &str) -> Result<SessionClaims, AppError> {
    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::Auth(format!("Invalid session: {}", e)))
}

/// `POST /api/auth/login` — validate credentials and start a session.
///
/// On success, sets the `admin-auth` cookie with a signed, expiring token.
pub async fn login_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    axum::Json(req): axum::Json<LoginRequest>,
) -> Result<(CookieJar, axum::Json<LoginResponse>), AppError> {
    check_credentials(&state.config, &req.username, &req.password)?;

    let token = issue_session_token(
        &req.username,
        &state.config.session_secret,
        state.config.session_ttl_secs,
    )?;

    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(state.config.session_ttl_secs))
        .build();

    let jar = jar.add(cookie);

    tracing::info!(username = %req.username, "admin login");

    Ok((
        jar,
        axum::Json(LoginResponse {
            message: "Login successful".to_string(),
        }),
    ))
}

/// `GET /api/auth/me` — returns the current session, if any.
pub async fn me_handler(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<axum::Json<SessionInfo>, AppError> {
    let cookie = jar
        .get(SESSION_COOKIE)
        .ok_or_else(|| AppError::Auth("Not logged in".into()))?;

    let claims = validate_session_token(cookie.value(), &state.config.session_secret)?;

    let expires_at = Utc
        .timestamp_opt(claims.exp, 0)
        .single()
        .ok_or_else(|| AppError::Auth("Invalid session expiry".into()))?;

    Ok(axum::Json(SessionInfo {
        username: claims.sub,
        expires_at,
    }))
}

/// `POST /api/auth/logout` — clears the session cookie.
pub async fn logout_handler(jar: CookieJar) -> CookieJar {
    let cookie = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .removal()
        .build();

    jar.remove(cookie)
}
