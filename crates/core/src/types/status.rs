//! Payment status attached to an order by the order service.

use serde::{Deserialize, Serialize};

/// Payment status of an order.
///
/// The order service reports the status as a plain string. Values it has
/// never declared (and records predating the status column) must count as
/// pending, so unknown strings deserialize to [`PaymentStatus::Pendiente`]
/// instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    EnRevision,
    Pagado,
    Rechazado,
    #[default]
    #[serde(other)]
    Pendiente,
}

impl PaymentStatus {
    /// Whether a payment proof for this order can still be verified.
    #[must_use]
    pub const fn is_verifiable(self) -> bool {
        matches!(self, Self::Pendiente | Self::EnRevision)
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pendiente => write!(f, "pendiente"),
            Self::EnRevision => write!(f, "en_revision"),
            Self::Pagado => write!(f, "pagado"),
            Self::Rechazado => write!(f, "rechazado"),
        }
    }
}
