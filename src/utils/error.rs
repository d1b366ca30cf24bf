use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const VOUCHER_ALREADY_EXISTS: &str = "Voucher already exist.";
pub const INVALID_DISCOUNT_VALUE: &str = "Invalid discount value.";
pub const VOUCHER_DOES_NOT_EXIST: &str = "Voucher does not exist.";

#[derive(Error, Debug)]
pub enum VoucherError {
    #[error("{message}")]
    Conflict { message: String },

    #[error("{message}")]
    BadRequest { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Voucher {id} not found in store")]
    NotFound { id: u64 },

    #[error("Voucher {id} was already used")]
    AlreadyUsed { id: u64 },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },
}

pub type Result<T> = std::result::Result<T, VoucherError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Conflict,
    BadRequest,
    Storage,
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureType {
    Conflict,
    BadRequest,
}

/// Body reported to callers when a voucher operation is rejected by policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    #[serde(rename = "type")]
    pub r#type: FailureType,
    pub message: String,
}

impl VoucherError {
    pub fn already_exists() -> Self {
        VoucherError::Conflict {
            message: VOUCHER_ALREADY_EXISTS.to_string(),
        }
    }

    pub fn invalid_discount() -> Self {
        VoucherError::BadRequest {
            message: INVALID_DISCOUNT_VALUE.to_string(),
        }
    }

    pub fn does_not_exist() -> Self {
        VoucherError::Conflict {
            message: VOUCHER_DOES_NOT_EXIST.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            VoucherError::Conflict { .. } => ErrorKind::Conflict,
            VoucherError::BadRequest { .. } => ErrorKind::BadRequest,
            VoucherError::IoError(_)
            | VoucherError::SerializationError(_)
            | VoucherError::NotFound { .. }
            | VoucherError::AlreadyUsed { .. } => ErrorKind::Storage,
            VoucherError::ConfigError { .. }
            | VoucherError::InvalidConfigValueError { .. }
            | VoucherError::MissingConfigError { .. } => ErrorKind::Config,
        }
    }

    /// Only policy violations have a failure body; infrastructure errors return `None`.
    pub fn failure(&self) -> Option<Failure> {
        match self {
            VoucherError::Conflict { message } => Some(Failure {
                r#type: FailureType::Conflict,
                message: message.clone(),
            }),
            VoucherError::BadRequest { message } => Some(Failure {
                r#type: FailureType::BadRequest,
                message: message.clone(),
            }),
            _ => None,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.kind() {
            ErrorKind::Conflict | ErrorKind::BadRequest => self.to_string(),
            ErrorKind::Storage => format!("Voucher store is unavailable: {}", self),
            ErrorKind::Config => format!("Invalid configuration: {}", self),
        }
    }
}
