pub mod api;
pub mod config;
pub mod models;
pub mod pagination;
pub mod query;
pub mod view;

#[cfg(test)]
pub mod tests;

pub use api::{FetchError, FetchResponse, TransactionFetcher, TransactionSource};
pub use config::{Config, ConfigError};
pub use models::{PaginationSummary, TransactionRecord, TransactionsPage};
pub use pagination::{page_count, PageItem, PageStrip};
pub use query::{build_query, FilterCriteria, SearchBy};
pub use view::{Renderer, ResultViewController, TransactionBrowser, ViewState};
