//! Decimal type utilities for monetary amounts

use rust_decimal::Decimal;
pub use rust_decimal_macros::dec;

/// Price type with high precision
pub type Price = Decimal;

/// Precision helpers for common operations
pub mod precision {
    use super::*;

    /// Default price precision (VND and USD prices never need more than 2 places)
    pub const PRICE_PRECISION: u32 = 2;

    /// Round price to standard precision
    pub fn round_price(price: Price) -> Price {
        price.round_dp(PRICE_PRECISION)
    }
}
