pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::cli::LocalStorage;
pub use crate::core::{
    engine::{FilterEngine, FilterReport},
    repository::FileOrderRepository,
    service::OrderService,
};
pub use crate::domain::model::{Order, PeriodQuery, RangeQuery};
pub use crate::utils::error::{FilterError, Result};
