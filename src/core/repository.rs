use crate::core::filter;
use crate::core::parser::{parse_fields, FIELD_DELIMITER};
use crate::core::serializer::serialize_orders;
use crate::domain::model::{Order, PeriodQuery, RangeQuery};
use crate::domain::ports::{OrderRepository, Storage};
use crate::utils::error::{FilterError, Result};
use crate::utils::logger::LogSink;
use async_trait::async_trait;
use std::sync::Arc;

/// Order store over a delimited text source. Every query reloads the source.
pub struct FileOrderRepository<S: Storage> {
    storage: S,
    source_path: String,
    log: Arc<dyn LogSink>,
}

impl<S: Storage> FileOrderRepository<S> {
    pub fn new(storage: S, source_path: impl Into<String>, log: Arc<dyn LogSink>) -> Self {
        Self {
            storage,
            source_path: source_path.into(),
            log,
        }
    }

    fn read_orders(&self, data: &[u8]) -> Result<Vec<Order>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .delimiter(FIELD_DELIMITER)
            .from_reader(data);

        let mut orders = Vec::new();
        let mut skipped = 0usize;
        for record in reader.byte_records() {
            let record = record?;
            let owned: Vec<_> = record.iter().map(String::from_utf8_lossy).collect();
            let fields: Vec<&str> = owned.iter().map(|field| field.as_ref()).collect();

            match parse_fields(&fields) {
                Some(order) => orders.push(order),
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            tracing::debug!("Skipped {} lines with fewer than 4 fields", skipped);
        }
        Ok(orders)
    }

    fn log_load_failure(&self, err: &FilterError) {
        match err {
            FilterError::NotFound { path } => {
                self.log.error("Order source file not found", Some(path));
            }
            other => {
                let detail = other.to_string();
                self.log
                    .error("Failed to read orders from source", Some(&detail));
            }
        }
    }
}

#[async_trait]
impl<S: Storage> OrderRepository for FileOrderRepository<S> {
    fn load_all(&self) -> Result<Vec<Order>> {
        let data = self
            .storage
            .read_file(&self.source_path)
            .inspect_err(|err| self.log_load_failure(err))?;

        let orders = self
            .read_orders(&data)
            .inspect_err(|err| self.log_load_failure(err))?;

        tracing::debug!("Loaded {} orders from {}", orders.len(), self.source_path);
        Ok(orders)
    }

    fn filter_by_district_and_range(&self, query: &RangeQuery) -> Result<Vec<Order>> {
        let orders = self.load_all()?;

        if query.is_unfiltered() {
            self.log
                .warning("No filter parameters supplied, returning all orders");
            return Ok(orders);
        }

        Ok(filter::filter_by_range(&orders, query))
    }

    fn filter_by_period(&self, query: &PeriodQuery) -> Result<Vec<Order>> {
        let orders = self.load_all()?;
        Ok(filter::filter_by_period(&orders, query))
    }

    async fn save_all(&self, orders: &[Order], destination: &str) -> Result<()> {
        let body = serialize_orders(orders);
        tracing::debug!("Writing {} orders ({} bytes) to {}", orders.len(), body.len(), destination);
        self.storage.write_file(destination, body.as_bytes()).await
    }
}
