//! Storefront models.

pub mod session;

pub use session::{CheckoutData, session_keys};
