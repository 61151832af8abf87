pub mod engine;
pub mod filter;
pub mod parser;
pub mod repository;
pub mod serializer;
pub mod service;
pub mod table;

pub use crate::domain::model::{Order, PeriodQuery, RangeQuery};
pub use crate::domain::ports::{ConfigProvider, OrderRepository, Storage};
pub use crate::utils::error::Result;
