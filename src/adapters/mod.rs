// Adapters layer: concrete voucher stores.

pub mod file_store;
pub mod memory_store;

pub use file_store::JsonFileVoucherStore;
pub use memory_store::InMemoryVoucherStore;

use crate::core::{StoreConfigProvider, Voucher, VoucherId, VoucherStore};
use crate::utils::error::{Result, VoucherError};
use async_trait::async_trait;

/// Store selected at runtime from configuration.
#[derive(Debug, Clone)]
pub enum ConfiguredStore {
    Memory(InMemoryVoucherStore),
    File(JsonFileVoucherStore),
}

impl ConfiguredStore {
    pub fn from_config<C: StoreConfigProvider>(config: &C) -> Result<Self> {
        match config.store_backend() {
            "memory" => Ok(ConfiguredStore::Memory(InMemoryVoucherStore::new())),
            "file" => Ok(ConfiguredStore::File(JsonFileVoucherStore::new(
                config.store_path(),
            ))),
            other => Err(VoucherError::InvalidConfigValueError {
                field: "store.backend".to_string(),
                value: other.to_string(),
                reason: "Supported backends: file, memory".to_string(),
            }),
        }
    }
}

#[async_trait]
impl VoucherStore for ConfiguredStore {
    async fn get_voucher_by_code(&self, code: &str) -> Result<Option<Voucher>> {
        match self {
            ConfiguredStore::Memory(store) => store.get_voucher_by_code(code).await,
            ConfiguredStore::File(store) => store.get_voucher_by_code(code).await,
        }
    }

    async fn create_voucher(&self, code: &str, discount: f64) -> Result<()> {
        match self {
            ConfiguredStore::Memory(store) => store.create_voucher(code, discount).await,
            ConfiguredStore::File(store) => store.create_voucher(code, discount).await,
        }
    }

    async fn use_voucher(&self, id: VoucherId) -> Result<()> {
        match self {
            ConfiguredStore::Memory(store) => store.use_voucher(id).await,
            ConfiguredStore::File(store) => store.use_voucher(id).await,
        }
    }
}
