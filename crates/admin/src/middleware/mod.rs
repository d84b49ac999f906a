//! Admin middleware.

pub mod auth;
pub mod session;

pub use auth::AdminToken;
pub use session::create_session_layer;
