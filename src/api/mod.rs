pub mod client;
pub mod error;

pub use client::{FetchResponse, TransactionFetcher, TransactionSource};
pub use error::FetchError;
