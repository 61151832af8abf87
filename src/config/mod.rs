pub mod cli;
pub mod toml_config;

use crate::domain::model::TIMESTAMP_FORMAT;
use chrono::{NaiveDate, NaiveDateTime};

pub const DEFAULT_OUTPUT_FILE: &str = "DeliveryOrder.csv";
pub const DEFAULT_PERIOD_MINUTES: i64 = 30;
pub const MAX_PERIOD_MINUTES: i64 = 60 * 24 * 366;

/// Accepts `yyyy-MM-dd HH:mm:ss`, `yyyy-MM-ddTHH:mm:ss` or a bare date (midnight).
pub fn parse_timestamp_arg(raw: &str) -> std::result::Result<NaiveDateTime, String> {
    let trimmed = raw.trim();
    NaiveDateTime::parse_from_str(trimmed, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .map(|date| date.and_time(chrono::NaiveTime::MIN))
        })
        .map_err(|err| {
            format!(
                "failed to parse '{}' as 'YYYY-MM-DD HH:MM:SS' or 'YYYY-MM-DD' ({})",
                raw, err
            )
        })
}

#[cfg(feature = "cli")]
pub use cli_config::CliConfig;

#[cfg(feature = "cli")]
mod cli_config {
    use super::toml_config::FileConfig;
    use super::{parse_timestamp_arg, DEFAULT_OUTPUT_FILE, DEFAULT_PERIOD_MINUTES, MAX_PERIOD_MINUTES};
    use crate::core::ConfigProvider;
    use crate::utils::error::Result;
    use crate::utils::logger::resolve_log_path;
    use crate::utils::validation::{validate_path, validate_range, validate_required_field, Validate};
    use chrono::{NaiveDateTime, TimeDelta};
    use clap::Parser;
    use serde::{Deserialize, Serialize};
    use std::path::{Path, PathBuf};

    #[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
    #[command(name = "delivery-filter")]
    #[command(about = "Filter delivery orders by district and delivery time")]
    pub struct CliConfig {
        /// File with source orders
        #[arg(long, visible_alias = "dataPath")]
        pub data_path: Option<String>,

        /// Delivery district
        #[arg(long, visible_alias = "cityDistrict")]
        pub city_district: Option<String>,

        /// Directory for Logs.txt
        #[arg(long, visible_alias = "deliveryLog")]
        pub delivery_log: Option<String>,

        /// Delivery time range start (inclusive)
        #[arg(long, visible_alias = "firstDeliveryDateTimeStart", value_parser = parse_timestamp_arg)]
        pub first_delivery_date_time_start: Option<NaiveDateTime>,

        /// Delivery time range end (inclusive)
        #[arg(long, visible_alias = "firstDeliveryDateTimeEnd", value_parser = parse_timestamp_arg)]
        pub first_delivery_date_time_end: Option<NaiveDateTime>,

        /// Output file for the period selection
        #[arg(long, visible_alias = "deliveryOrder")]
        pub delivery_order: Option<String>,

        /// Window after the district's first order, in minutes
        #[arg(long)]
        pub period_minutes: Option<i64>,

        /// Optional TOML configuration file
        #[arg(short, long)]
        pub config: Option<String>,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    impl CliConfig {
        /// Fills every option not given on the command line from `file`.
        pub fn with_file_config(mut self, file: &FileConfig) -> Result<Self> {
            if self.data_path.is_none() {
                self.data_path = file.source.path.clone();
            }
            if self.city_district.is_none() {
                self.city_district = file.filter.district.clone();
            }
            if self.first_delivery_date_time_start.is_none() {
                self.first_delivery_date_time_start = file.delivery_start()?;
            }
            if self.first_delivery_date_time_end.is_none() {
                self.first_delivery_date_time_end = file.delivery_end()?;
            }
            if self.period_minutes.is_none() {
                self.period_minutes = file.filter.period_minutes;
            }
            if self.delivery_order.is_none() {
                self.delivery_order = file.output.path.clone();
            }
            if self.delivery_log.is_none() {
                self.delivery_log = file.logging.directory.clone();
            }
            self.verbose |= file.logging.verbose.unwrap_or(false);
            Ok(self)
        }

        pub fn data_path(&self) -> &str {
            self.data_path.as_deref().unwrap_or_default()
        }

        /// False when no data path is configured or nothing exists there.
        pub fn has_data_file(&self) -> bool {
            !self.data_path().is_empty() && Path::new(self.data_path()).exists()
        }

        pub fn period_minutes(&self) -> i64 {
            self.period_minutes.unwrap_or(DEFAULT_PERIOD_MINUTES)
        }

        pub fn log_path(&self) -> PathBuf {
            resolve_log_path(self.delivery_log.as_deref())
        }
    }

    impl ConfigProvider for CliConfig {
        fn city_district(&self) -> Option<&str> {
            self.city_district.as_deref()
        }

        fn delivery_start(&self) -> Option<NaiveDateTime> {
            self.first_delivery_date_time_start
        }

        fn delivery_end(&self) -> Option<NaiveDateTime> {
            self.first_delivery_date_time_end
        }

        fn period(&self) -> TimeDelta {
            TimeDelta::try_minutes(self.period_minutes())
                .unwrap_or_else(|| TimeDelta::minutes(DEFAULT_PERIOD_MINUTES))
        }

        fn output_path(&self) -> &str {
            self.delivery_order.as_deref().unwrap_or(DEFAULT_OUTPUT_FILE)
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            let data_path = validate_required_field("data_path", &self.data_path)?;
            validate_path("data_path", data_path)?;

            if let Some(output) = &self.delivery_order {
                validate_path("delivery_order", output)?;
            }

            validate_range("period_minutes", self.period_minutes(), 0, MAX_PERIOD_MINUTES)?;
            Ok(())
        }
    }

}
