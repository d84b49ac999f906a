//! Admin token extraction.
//!
//! Privileged routes extract [`AdminToken`] instead of the raw session; a
//! request without a stored token is rejected with 401 before the handler
//! runs. The token is forwarded to the remote service, which is the actual
//! authority - this extractor implements no verification of its own.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tower_sessions::Session;

use crate::error::AppError;
use crate::models::session_keys;

/// The remote service bearer token held by the current admin session.
#[derive(Debug, Clone)]
pub struct AdminToken(pub String);

impl AdminToken {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AdminToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, message)| AppError::Internal(message.to_string()))?;

        session
            .get::<String>(session_keys::ADMIN_TOKEN)
            .await
            .ok()
            .flatten()
            .map(Self)
            .ok_or_else(|| AppError::Unauthorized("Inicia sesión para continuar".to_string()))
    }
}
