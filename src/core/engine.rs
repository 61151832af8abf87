use crate::core::service::OrderService;
use crate::domain::model::{Order, PeriodQuery, RangeQuery};
use crate::domain::ports::{ConfigProvider, OrderRepository};
use crate::utils::error::Result;

#[derive(Debug, Clone)]
pub struct FilterReport {
    /// District/date-range selection, shown to the user but not persisted.
    pub range_orders: Vec<Order>,
    /// Period selection written to `output_path`.
    pub period_orders: Vec<Order>,
    pub output_path: String,
}

pub struct FilterEngine<R: OrderRepository, C: ConfigProvider> {
    service: OrderService<R>,
    config: C,
}

impl<R: OrderRepository, C: ConfigProvider> FilterEngine<R, C> {
    pub fn new(service: OrderService<R>, config: C) -> Self {
        Self { service, config }
    }

    /// Range query, then period query, then persist the period result.
    pub async fn run(&self) -> Result<FilterReport> {
        let district = self.config.city_district().unwrap_or_default();
        let start = self.config.delivery_start();
        let end = self.config.delivery_end();

        tracing::info!(
            "Filtering orders for district '{}' from {:?} to {:?}",
            district,
            start,
            end
        );
        let range_query = RangeQuery::new(Some(district.to_string()), start, end);
        let range_orders = self.service.get_orders(&range_query)?;

        let period = self.config.period();
        tracing::info!(
            "Filtering orders for district '{}' within {} minutes of the first order",
            district,
            period.num_minutes()
        );
        let period_query = PeriodQuery::new(district, period);
        let period_orders = self.service.get_orders_by_period_limit(&period_query)?;

        let output_path = self.config.output_path().to_string();
        self.service
            .save_filtered_orders(&period_orders, &output_path)
            .await?;
        tracing::info!("Filtered orders written to {}", output_path);

        Ok(FilterReport {
            range_orders,
            period_orders,
            output_path,
        })
    }
}
