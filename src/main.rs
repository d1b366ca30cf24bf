use clap::Parser;
use voucher_discount::app::{exit_code, open_cli_store, report, run};
use voucher_discount::utils::{logger, validation::Validate};
use voucher_discount::{AppConfig, CliConfig, VoucherService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let loaded = match AppConfig::load(&cli.config) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", cli.config, e);
            std::process::exit(exit_code(&e));
        }
    };
    let from_file = loaded.is_some();
    let mut config = loaded.unwrap_or_default();

    if let Some(store) = &cli.store {
        config.store.path = store.clone();
        config.store.backend = "file".to_string();
    }

    if config.json_logs() {
        logger::init_json_logger(cli.verbose, config.log_level());
    } else {
        logger::init_cli_logger(cli.verbose, config.log_level());
    }

    if !from_file {
        tracing::debug!("No config at {}, using defaults", cli.config);
    }
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(exit_code(&e));
    }

    let store = match open_cli_store(&config) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(exit_code(&e));
        }
    };
    let service = VoucherService::new(store);

    if let Err(e) = run(&service, cli.command, &mut std::io::stdout()).await {
        report(&e, &mut std::io::stderr())?;
        std::process::exit(exit_code(&e));
    }

    Ok(())
}
