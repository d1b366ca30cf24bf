use crate::domain::model::{Voucher, VoucherId};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Persistence contract consumed by the voucher service.
///
/// A lookup miss is `Ok(None)`. `Err` is reserved for infrastructure failures.
#[async_trait]
pub trait VoucherStore: Send + Sync {
    async fn get_voucher_by_code(&self, code: &str) -> Result<Option<Voucher>>;

    /// Persists a new voucher with `used = false`. Callers check uniqueness.
    async fn create_voucher(&self, code: &str, discount: f64) -> Result<()>;

    async fn use_voucher(&self, id: VoucherId) -> Result<()>;
}

pub trait StoreConfigProvider: Send + Sync {
    fn store_backend(&self) -> &str;
    fn store_path(&self) -> &str;
}
