//! Voucher models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Price;
#[cfg(feature = "utoipa")]
use crate::utoipa::ToSchema;

/// Discount voucher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct Voucher {
    /// Unique voucher ID
    pub id: Uuid,
    /// Code typed in by customers
    pub code: String,
    /// Discount amount
    pub discount: Price,
    /// Remaining redemptions
    pub limit: i64,
}

impl Voucher {
    /// Create a new voucher
    pub fn new(code: String, discount: Price, limit: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            code,
            discount,
            limit,
        }
    }

    /// Consume one redemption. The counter is not floored at zero.
    pub fn redeem(&mut self) {
        self.limit -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::dec;

    #[test]
    fn redeem_decrements_by_one() {
        let mut voucher = Voucher::new("FREESHIP".to_string(), dec!(30000), 1);
        voucher.redeem();
        assert_eq!(voucher.limit, 0);
        voucher.redeem();
        assert_eq!(voucher.limit, -1);
    }
}
