//! Payment-status projection over an order listing.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::{Order, PaymentStatus};

/// Aggregate view of an order listing for the back-office dashboard.
///
/// A pure fold, recomputed on every fetch. Records without a recognized
/// status count as pending - nothing is dropped. `totalVentas` sums the
/// totals of paid records only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrderStats {
    pub total: usize,
    pub pendientes: usize,
    #[serde(rename = "enRevision")]
    pub en_revision: usize,
    pub pagados: usize,
    pub rechazados: usize,
    #[serde(rename = "totalVentas")]
    pub total_ventas: Decimal,
}

impl OrderStats {
    /// Project the stats from an order listing.
    #[must_use]
    pub fn project(orders: &[Order]) -> Self {
        orders.iter().fold(Self::default(), |mut stats, order| {
            stats.total += 1;
            match order.pago_estado {
                PaymentStatus::Pendiente => stats.pendientes += 1,
                PaymentStatus::EnRevision => stats.en_revision += 1,
                PaymentStatus::Pagado => {
                    stats.pagados += 1;
                    stats.total_ventas += order.total;
                }
                PaymentStatus::Rechazado => stats.rechazados += 1,
            }
            stats
        })
    }
}
