pub mod adapters;
#[cfg(feature = "cli")]
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::{ConfiguredStore, InMemoryVoucherStore, JsonFileVoucherStore};
pub use config::AppConfig;
pub use crate::core::voucher_service::VoucherService;
pub use domain::model::{OrderDiscount, Voucher};
pub use domain::ports::VoucherStore;
pub use utils::error::{ErrorKind, Failure, FailureType, Result, VoucherError};
