use serde::{Deserialize, Serialize};

/// Lower bound for a voucher discount, exclusive.
pub const MIN_DISCOUNT: f64 = 1.0;
/// Upper bound for a voucher discount, exclusive.
pub const MAX_DISCOUNT: f64 = 100.0;
/// Orders below this amount never consume a voucher.
pub const MIN_ORDER_AMOUNT: f64 = 100.0;

pub type VoucherId = u64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voucher {
    pub id: VoucherId,
    pub code: String,
    pub discount: f64,
    pub used: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDiscount {
    pub amount: f64,
    pub discount: f64,
    pub final_amount: f64,
    pub applied: bool,
}

impl OrderDiscount {
    /// Result for an order the voucher was not applied to. Still carries the
    /// voucher's nominal discount.
    pub fn not_applied(amount: f64, discount: f64) -> Self {
        Self {
            amount,
            discount,
            final_amount: amount,
            applied: false,
        }
    }

    pub fn applied(amount: f64, discount: f64) -> Self {
        Self {
            amount,
            discount,
            final_amount: amount - amount * (discount / 100.0),
            applied: true,
        }
    }
}

pub fn is_valid_discount(discount: f64) -> bool {
    discount > MIN_DISCOUNT && discount < MAX_DISCOUNT
}
