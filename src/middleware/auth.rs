//! Basic authentication extractor
//!
//! `AuthUser` decodes the `Authorization: Basic <base64(name:secret)>`
//! header, resolves the user through [`AuthService`] and hands the verified
//! user to the handler as an ordinary parameter.
//!
//! [`AuthService`]: crate::service::AuthService

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use metrics::counter;

use crate::domain::User;
use crate::error::AppError;
use crate::service::Credentials;
use crate::state::HasServices;

pub const MISSING_CREDENTIALS_MESSAGE: &str = "Access denied: missing or malformed credentials";

/// Authenticated user resolved from Basic credentials
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl AuthUser {
    pub fn id(&self) -> i64 {
        self.0.id
    }
}

/// Decode Basic credentials from request headers
///
/// Returns `None` for a missing header, another scheme, bad base64, non
/// UTF-8 content or a payload without a `:` separator.
pub fn parse_basic_credentials(headers: &HeaderMap) -> Option<Credentials> {
    let header = headers.get(AUTHORIZATION)?.to_str().ok()?.trim();
    let (scheme, encoded) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = BASE64.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (name, secret) = decoded.split_once(':')?;
    Some(Credentials::new(name, secret))
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: HasServices,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Some(credentials) = parse_basic_credentials(&parts.headers) else {
            counter!("course_api_auth_attempts_total", "result" => "missing_credentials")
                .increment(1);
            tracing::warn!("Authentication failed: missing or malformed credentials");
            return Err(AppError::Unauthenticated(
                MISSING_CREDENTIALS_MESSAGE.to_string(),
            ));
        };

        let user = state.auth_service().authenticate(&credentials).await?;
        tracing::Span::current().record("user_id", user.id);
        Ok(AuthUser(user))
    }
}
