use crate::domain::model::{Order, PeriodQuery, RangeQuery};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{NaiveDateTime, TimeDelta};

/// Record source and sink. Reads are blocking, writes are awaitable.
pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn city_district(&self) -> Option<&str>;
    fn delivery_start(&self) -> Option<NaiveDateTime>;
    fn delivery_end(&self) -> Option<NaiveDateTime>;
    fn period(&self) -> TimeDelta;
    fn output_path(&self) -> &str;
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Fresh snapshot of every parsable record, in source order.
    fn load_all(&self) -> Result<Vec<Order>>;
    fn filter_by_district_and_range(&self, query: &RangeQuery) -> Result<Vec<Order>>;
    fn filter_by_period(&self, query: &PeriodQuery) -> Result<Vec<Order>>;
    /// Replaces `destination` with one line per order.
    async fn save_all(&self, orders: &[Order], destination: &str) -> Result<()>;
}
