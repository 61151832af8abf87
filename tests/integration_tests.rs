use anyhow::Result;
use clap::Parser;
use delivery_filter::utils::logger::{LogLevel, LogSink, MemorySink};
use delivery_filter::{
    CliConfig, FileOrderRepository, FilterEngine, FilterError, LocalStorage, OrderService,
};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

const SAMPLE: &str = "Order1,12.5,DistrictA,2023-10-10 15:30:00\n\
Order2,10.0,DistrictB,2023-10-10 15:40:00\n\
Order3,8.0,districta,2023-10-10 15:50:00\n\
Order4,3.5,DistrictA,2023-10-10 16:10:00\n\
bad line\n\
Order5,1.0,DistrictA,2023-10-12 09:00:00\n";

fn engine(
    config: CliConfig,
    sink: &MemorySink,
) -> FilterEngine<FileOrderRepository<LocalStorage>, CliConfig> {
    let log: Arc<dyn LogSink> = Arc::new(sink.clone());
    let repository =
        FileOrderRepository::new(LocalStorage::default(), config.data_path(), log.clone());
    FilterEngine::new(OrderService::new(repository, log), config)
}

fn write_source(dir: &Path) -> String {
    let path = dir.join("orders.csv");
    std::fs::write(&path, SAMPLE).unwrap();
    path.to_str().unwrap().to_string()
}

#[tokio::test]
async fn test_end_to_end_filter_run() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output = temp_dir.path().join("DeliveryOrder.csv");
    let config = parse_config(&[
        "--data-path",
        &write_source(temp_dir.path()),
        "--city-district",
        "DistrictA",
        "--first-delivery-date-time-start",
        "2023-10-10",
        "--first-delivery-date-time-end",
        "2023-10-11",
        "--delivery-order",
        output.to_str().unwrap(),
    ])?;
    let sink = MemorySink::new();

    let report = engine(config, &sink).run().await?;

    let range: Vec<&str> = report
        .range_orders
        .iter()
        .map(|o| o.order_number.as_str())
        .collect();
    assert_eq!(range, vec!["Order1", "Order3", "Order4"]);

    let period: Vec<&str> = report
        .period_orders
        .iter()
        .map(|o| o.order_number.as_str())
        .collect();
    assert_eq!(period, vec!["Order1", "Order3"]);

    let saved = std::fs::read_to_string(&output)?;
    assert_eq!(
        saved,
        "Order1,12.5,DistrictA,2023-10-10 15:30:00\nOrder3,8,districta,2023-10-10 15:50:00\n"
    );

    assert_eq!(sink.count(LogLevel::Info), 3);
    assert_eq!(sink.count(LogLevel::Warning), 0);
    Ok(())
}

#[tokio::test]
async fn test_run_without_filters_passes_everything_through() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output = temp_dir.path().join("out.csv");
    let config = parse_config(&[
        "--data-path",
        &write_source(temp_dir.path()),
        "--delivery-order",
        output.to_str().unwrap(),
    ])?;
    let sink = MemorySink::new();

    let report = engine(config, &sink).run().await?;

    assert_eq!(report.range_orders.len(), 5);
    assert!(report.period_orders.is_empty());
    assert_eq!(std::fs::read_to_string(&output)?, "");
    assert_eq!(sink.count(LogLevel::Warning), 1);
    Ok(())
}

#[tokio::test]
async fn test_run_with_missing_source_fails_with_not_found() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output = temp_dir.path().join("out.csv");
    let missing = temp_dir.path().join("missing.csv");
    let config = parse_config(&[
        "--data-path",
        missing.to_str().unwrap(),
        "--delivery-order",
        output.to_str().unwrap(),
    ])?;
    let sink = MemorySink::new();

    let result = engine(config, &sink).run().await;

    assert!(matches!(result, Err(FilterError::NotFound { .. })));
    assert_eq!(sink.count(LogLevel::Error), 1);
    assert!(!output.exists());
    Ok(())
}

#[tokio::test]
async fn test_period_minutes_option_widens_window() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output = temp_dir.path().join("out.csv");
    let config = parse_config(&[
        "--data-path",
        &write_source(temp_dir.path()),
        "--city-district",
        "districta",
        "--period-minutes",
        "40",
        "--delivery-order",
        output.to_str().unwrap(),
    ])?;
    let sink = MemorySink::new();

    let report = engine(config, &sink).run().await?;

    // "DistrictA" and "districta" rows form separate windows.
    let period: Vec<&str> = report
        .period_orders
        .iter()
        .map(|o| o.order_number.as_str())
        .collect();
    assert_eq!(period, vec!["Order1", "Order4", "Order3"]);
    Ok(())
}

fn parse_config(args: &[&str]) -> Result<CliConfig> {
    let argv = std::iter::once("delivery-filter").chain(args.iter().copied());
    Ok(CliConfig::try_parse_from(argv)?)
}
