//! Credential HTTP handlers.
//!
//! Endpoints:
//! - POST /login    - Sign in with form `email` + `password`
//! - POST /register - Create an account and sign in
//! - POST /logout   - Revoke the current session
//!
//! All three answer 200 with `{"status": "..."}`; the outcome lives in the
//! status string, not the HTTP code.

use axum::Form;
use axum::Json;
use axum::extract::State;
use axum::http::HeaderValue;
use axum::http::header::SET_COOKIE;
use axum::response::{IntoResponse, Response};
use parley_types::auth::IssuedSession;
use parley_types::config::SessionConfig;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::http::extractors::session::{SESSION_COOKIE, SessionToken};
use crate::state::AppState;

/// Form body for login and register. Fields are optional so a missing
/// field is reported as `invalid_data` instead of an extractor rejection.
#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
struct StatusBody<S> {
    status: S,
}

/// POST /login - Sign in.
pub async fn login(State(state): State<AppState>, Form(form): Form<CredentialsForm>) -> Response {
    let outcome = state
        .auth_service
        .login(form.email.as_deref(), form.password.as_deref())
        .await;

    respond(outcome.status, outcome.session, &state.config.session)
}

/// POST /register - Create an account, then sign in.
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<CredentialsForm>,
) -> Response {
    let outcome = state
        .auth_service
        .register(form.email.as_deref(), form.password.as_deref())
        .await;

    respond(outcome.status, outcome.session, &state.config.session)
}

/// POST /logout - Revoke the request's session token and clear the cookie.
pub async fn logout(State(state): State<AppState>, SessionToken(token): SessionToken) -> Response {
    if let Some(token) = token {
        state.auth_service.logout(&token).await;
    }

    let mut response = Json(StatusBody { status: "success" }).into_response();
    response.headers_mut().insert(
        SET_COOKIE,
        HeaderValue::from_static("parley_session=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0"),
    );
    response
}

fn respond<S: Serialize>(status: S, session: Option<IssuedSession>, config: &SessionConfig) -> Response {
    let mut response = Json(StatusBody { status }).into_response();

    if let Some(session) = session {
        let cookie = session_cookie(session.token.expose_secret(), config);
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().insert(SET_COOKIE, value);
            }
            Err(e) => tracing::error!(error = %e, "Session token is not a valid header value"),
        }
    }

    response
}

/// `Set-Cookie` value carrying a session token.
pub fn session_cookie(token: &str, config: &SessionConfig) -> String {
    let max_age = config.ttl_hours.saturating_mul(3600);
    let mut cookie =
        format!("{SESSION_COOKIE}={token}; HttpOnly; SameSite=Lax; Path=/; Max-Age={max_age}");
    if config.cookie_secure {
        cookie.push_str("; Secure");
    }
    cookie
}
