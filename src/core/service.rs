use crate::domain::model::{Order, PeriodQuery, RangeQuery};
use crate::domain::ports::OrderRepository;
use crate::utils::error::{FilterError, Result};
use crate::utils::logger::LogSink;
use std::sync::Arc;

/// Query facade over an [`OrderRepository`] that reports outcome counts.
pub struct OrderService<R: OrderRepository> {
    repository: R,
    log: Arc<dyn LogSink>,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repository: R, log: Arc<dyn LogSink>) -> Self {
        Self { repository, log }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn get_orders(&self, query: &RangeQuery) -> Result<Vec<Order>> {
        let orders = self.repository.filter_by_district_and_range(query)?;
        self.log_found(orders.len());
        Ok(orders)
    }

    pub fn get_orders_by_period_limit(&self, query: &PeriodQuery) -> Result<Vec<Order>> {
        let orders = self.repository.filter_by_period(query)?;
        self.log_found(orders.len());
        Ok(orders)
    }

    pub async fn save_filtered_orders(&self, orders: &[Order], destination: &str) -> Result<()> {
        match self.repository.save_all(orders, destination).await {
            Ok(()) => {
                self.log.info("Orders saved successfully");
                Ok(())
            }
            Err(err @ FilterError::AccessDenied { .. }) => {
                let detail = err.to_string();
                self.log
                    .error("Access denied while saving orders", Some(&detail));
                Err(err)
            }
            Err(err) => {
                let detail = err.to_string();
                self.log
                    .critical("Critical failure while saving orders", Some(&detail));
                Err(err)
            }
        }
    }

    fn log_found(&self, count: usize) {
        self.log
            .info(&format!("Filtering complete. Found {} orders.", count));
    }
}
