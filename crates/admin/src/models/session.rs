//! Session-related types.
//!
//! The admin session holds exactly one value: the opaque bearer token the
//! remote service issued at login. Verifying it is the remote service's
//! job - the admin only stores and forwards it.

/// Session keys.
pub mod session_keys {
    /// Key for the remote service's admin bearer token.
    pub const ADMIN_TOKEN: &str = "admin_token";
}
