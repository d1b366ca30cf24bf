use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "voucher-cli")]
#[command(about = "Create discount vouchers and apply them to orders")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "voucher.toml")]
    pub config: String,

    /// Override the voucher store file from config
    #[arg(long)]
    pub store: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create a new voucher
    Create {
        #[arg(long)]
        code: String,
        /// Discount percentage, exclusive range (1, 100)
        #[arg(long, allow_negative_numbers = true)]
        discount: f64,
    },
    /// Apply a voucher to an order amount
    Apply {
        #[arg(long)]
        code: String,
        #[arg(long, allow_negative_numbers = true)]
        amount: f64,
    },
    /// Show a stored voucher without changing it
    Show {
        #[arg(long)]
        code: String,
    },
}
