use crate::adapters::{ConfiguredStore, JsonFileVoucherStore};
use crate::config::{AppConfig, Command};
use crate::core::voucher_service::VoucherService;
use crate::core::{StoreConfigProvider, VoucherStore};
use crate::utils::error::{ErrorKind, Result, VoucherError};
use std::io::Write;

/// Opens the store for a CLI run. Only the file backend persists between
/// processes, so `memory` is rejected here.
pub fn open_cli_store(config: &AppConfig) -> Result<ConfiguredStore> {
    match config.store_backend() {
        "file" => Ok(ConfiguredStore::File(JsonFileVoucherStore::new(
            config.store_path(),
        ))),
        other => Err(VoucherError::InvalidConfigValueError {
            field: "store.backend".to_string(),
            value: other.to_string(),
            reason: "voucher-cli requires the file backend".to_string(),
        }),
    }
}

/// Runs one subcommand, writing its JSON result to `out`.
pub async fn run<S: VoucherStore, W: Write>(
    service: &VoucherService<S>,
    command: Command,
    out: &mut W,
) -> Result<()> {
    match command {
        Command::Create { code, discount } => {
            service.create_voucher(&code, discount).await?;
            let body = serde_json::json!({ "created": true, "code": code });
            writeln!(out, "{}", serde_json::to_string_pretty(&body)?)?;
        }
        Command::Apply { code, amount } => {
            let order = service.apply_voucher(&code, amount).await?;
            writeln!(out, "{}", serde_json::to_string_pretty(&order)?)?;
        }
        Command::Show { code } => match service.store().get_voucher_by_code(&code).await? {
            Some(voucher) => writeln!(out, "{}", serde_json::to_string_pretty(&voucher)?)?,
            None => writeln!(out, "No voucher with code '{}'", code)?,
        },
    }
    Ok(())
}

/// Writes the failure body for policy errors, or a readable message otherwise.
pub fn report<W: Write>(e: &VoucherError, err: &mut W) -> Result<()> {
    match e.failure() {
        Some(failure) => {
            tracing::debug!("Request rejected ({:?}): {}", e.kind(), e);
            writeln!(err, "{}", serde_json::to_string_pretty(&failure)?)?;
        }
        None => {
            tracing::error!("Voucher operation failed: {} (kind: {:?})", e, e.kind());
            writeln!(err, "❌ {}", e.user_friendly_message())?;
        }
    }
    Ok(())
}

pub fn exit_code(e: &VoucherError) -> i32 {
    match e.kind() {
        ErrorKind::Conflict => 1,
        ErrorKind::BadRequest => 2,
        ErrorKind::Storage | ErrorKind::Config => 3,
    }
}
