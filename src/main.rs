use anyhow::Context;
use clap::Parser;
use delivery_filter::config::toml_config::FileConfig;
use delivery_filter::core::table::render_orders_table;
use delivery_filter::core::ConfigProvider;
use delivery_filter::utils::error::ErrorSeverity;
use delivery_filter::utils::logger::{self, LogSink, TracingSink};
use delivery_filter::utils::validation::Validate;
use delivery_filter::{CliConfig, FileOrderRepository, FilterEngine, LocalStorage, OrderService};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = CliConfig::parse();

    if let Some(path) = config.config.clone() {
        let merged = FileConfig::from_file(&path).and_then(|file| config.clone().with_file_config(&file));
        config = match merged {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 {}", e.recovery_suggestion());
                std::process::exit(1);
            }
        };
    }

    let log_path = config.log_path();
    logger::init_cli_logger(config.verbose, &log_path).context("failed to initialise logging")?;

    tracing::info!("Starting delivery-filter");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if !config.has_data_file() {
        println!("Data file not found");
        return Ok(());
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    println!("Parameters received:");
    println!("City district: {}", config.city_district().unwrap_or_default());
    println!("Data file: {}", config.data_path());
    println!("Period selection output: {}", config.output_path());
    println!("Log file: {}\n", log_path.display());

    let sink: Arc<dyn LogSink> = Arc::new(TracingSink);
    let repository =
        FileOrderRepository::new(LocalStorage::default(), config.data_path(), sink.clone());
    let service = OrderService::new(repository, sink);
    let engine = FilterEngine::new(service, config);

    match engine.run().await {
        Ok(report) => {
            print!("{}", render_orders_table(&report.range_orders));
            println!(
                "\n{} orders within the period saved to: {}",
                report.period_orders.len(),
                report.output_path
            );
        }
        Err(e) => {
            tracing::error!(
                "❌ Filtering failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
