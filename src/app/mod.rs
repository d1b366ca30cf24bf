// Application layer: wiring used by the voucher-cli binary.

pub mod commands;

pub use commands::{exit_code, open_cli_store, report, run};
