use crate::core::{Voucher, VoucherId, VoucherStore};
use crate::utils::error::{Result, VoucherError};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Keeps every voucher in one JSON array on disk.
///
/// Each mutation is a full read-modify-write under `lock`, so a single
/// process never interleaves two writers. Code uniqueness and the single-use
/// flag are checked under the same lock.
#[derive(Debug, Clone)]
pub struct JsonFileVoucherStore {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl JsonFileVoucherStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load_all(&self) -> Result<Vec<Voucher>> {
        match tokio::fs::read(&self.path).await {
            Ok(data) => {
                tracing::debug!("Read {} bytes from {}", data.len(), self.path.display());
                if data.iter().all(u8::is_ascii_whitespace) {
                    return Ok(Vec::new());
                }
                Ok(serde_json::from_slice(&data)?)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(VoucherError::IoError(e)),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "vouchers.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Writes a sibling temp file and renames it over the store, so a crash
    /// mid-write never leaves a truncated store behind.
    async fn save_all(&self, vouchers: &[Voucher]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_vec_pretty(vouchers)?;
        let temp_path = self.temp_path();
        tracing::debug!("Writing {} vouchers to {}", vouchers.len(), self.path.display());
        tokio::fs::write(&temp_path, json).await?;
        tokio::fs::rename(&temp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl VoucherStore for JsonFileVoucherStore {
    async fn get_voucher_by_code(&self, code: &str) -> Result<Option<Voucher>> {
        let _guard = self.lock.lock().await;
        let vouchers = self.load_all().await?;
        Ok(vouchers.into_iter().find(|v| v.code == code))
    }

    async fn create_voucher(&self, code: &str, discount: f64) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut vouchers = self.load_all().await?;
        if vouchers.iter().any(|v| v.code == code) {
            return Err(VoucherError::already_exists());
        }
        let id = vouchers.iter().map(|v| v.id).max().unwrap_or(0) + 1;
        vouchers.push(Voucher {
            id,
            code: code.to_string(),
            discount,
            used: false,
        });
        self.save_all(&vouchers).await
    }

    async fn use_voucher(&self, id: VoucherId) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut vouchers = self.load_all().await?;
        let voucher = vouchers
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or(VoucherError::NotFound { id })?;
        if voucher.used {
            return Err(VoucherError::AlreadyUsed { id });
        }
        voucher.used = true;
        self.save_all(&vouchers).await
    }
}
