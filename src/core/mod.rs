pub mod voucher_service;

pub use crate::domain::model::{
    is_valid_discount, OrderDiscount, Voucher, VoucherId, MAX_DISCOUNT, MIN_DISCOUNT,
    MIN_ORDER_AMOUNT,
};
pub use crate::domain::ports::{StoreConfigProvider, VoucherStore};
pub use crate::utils::error::Result;
