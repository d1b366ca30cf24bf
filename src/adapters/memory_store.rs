use crate::core::{Voucher, VoucherId, VoucherStore};
use crate::utils::error::{Result, VoucherError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct Inner {
    vouchers: HashMap<String, Voucher>,
    next_id: VoucherId,
}

/// Process-local store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryVoucherStore {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryVoucherStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with existing records. Ids are kept as given.
    pub fn with_vouchers(vouchers: impl IntoIterator<Item = Voucher>) -> Self {
        let mut inner = Inner::default();
        for voucher in vouchers {
            inner.next_id = inner.next_id.max(voucher.id);
            inner.vouchers.insert(voucher.code.clone(), voucher);
        }
        Self {
            inner: Arc::new(Mutex::new(inner)),
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.vouchers.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl VoucherStore for InMemoryVoucherStore {
    async fn get_voucher_by_code(&self, code: &str) -> Result<Option<Voucher>> {
        Ok(self.inner.lock().await.vouchers.get(code).cloned())
    }

    async fn create_voucher(&self, code: &str, discount: f64) -> Result<()> {
        let mut inner = self.inner.lock().await;
        if inner.vouchers.contains_key(code) {
            return Err(VoucherError::already_exists());
        }
        inner.next_id += 1;
        let voucher = Voucher {
            id: inner.next_id,
            code: code.to_string(),
            discount,
            used: false,
        };
        inner.vouchers.insert(voucher.code.clone(), voucher);
        Ok(())
    }

    async fn use_voucher(&self, id: VoucherId) -> Result<()> {
        let mut inner = self.inner.lock().await;
        let voucher = inner
            .vouchers
            .values_mut()
            .find(|v| v.id == id)
            .ok_or(VoucherError::NotFound { id })?;
        if voucher.used {
            return Err(VoucherError::AlreadyUsed { id });
        }
        voucher.used = true;
        Ok(())
    }
}
