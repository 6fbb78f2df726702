//! Session extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use oshub_core::types::DbId;

use crate::error::AppError;
use crate::state::AppState;

/// The signed-in user behind a request.
///
/// Carries the GitHub token so pull requests are opened on the user's
/// behalf. Never serialize this.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: DbId,
    pub login: String,
    pub name: Option<String>,
    pub github_token: String,
}

/// Optional session: `Some` for a valid session, `None` otherwise.
///
/// The token is read from the session cookie first, then from an
/// `Authorization: Bearer <token>` header. A missing, invalid or expired
/// token yields `None` rather than a rejection, so handlers decide how an
/// anonymous visitor is treated.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<CurrentUser>);

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = session_token(&parts.headers, &state.config.session_cookie) else {
            return Ok(MaybeUser(None));
        };

        let user = state.sessions.resolve(&token).await?;
        Ok(MaybeUser(user))
    }
}

/// Extract the session token from the request headers.
pub fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|header| cookie_value(header, cookie_name))
        .or_else(|| {
            headers
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.strip_prefix("Bearer "))
                .map(|t| t.trim().to_string())
        })
        .filter(|t| !t.is_empty())
}

/// Find `name` in a `Cookie` header value (`a=1; b=2`).
fn cookie_value(header: &str, name: &str) -> Option<String> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then(|| value.trim_matches('"').to_string())
    })
}
