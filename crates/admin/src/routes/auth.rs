//! Admin auth glue.
//!
//! Credentials go straight to the remote service; on success the issued
//! bearer token is kept in the session. No verification happens here.

use axum::{Json, extract::State};
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::api::LoginRequest;
use crate::error::Result;
use crate::models::session_keys;
use crate::state::AppState;

/// Login acknowledgement.
#[derive(Debug, Serialize)]
pub struct LoginAck {
    pub success: bool,
}

/// Forward admin credentials and store the issued token.
#[instrument(skip(state, session, credentials), fields(username = %credentials.username))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(credentials): Json<LoginRequest>,
) -> Result<Json<LoginAck>> {
    let response = state.api().login(&credentials).await?;

    if let Err(e) = session
        .insert(session_keys::ADMIN_TOKEN, &response.access_token)
        .await
    {
        tracing::error!("Failed to persist admin token: {e}");
    }

    tracing::info!("Admin session opened");
    Ok(Json(LoginAck { success: true }))
}

/// Drop the stored token.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Json<LoginAck> {
    if let Err(e) = session.remove::<String>(session_keys::ADMIN_TOKEN).await {
        tracing::error!("Failed to delete admin token: {e}");
    }
    Json(LoginAck { success: true })
}
