//! Filter criteria and the query string sent to `/v1/transactions`.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Which field `searchText` is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchBy {
    #[default]
    Unset,
    Address,
    Hash,
    BlockNumber,
}

impl SearchBy {
    /// Code the API expects in the `searchBy` parameter. Empty for `Unset`.
    pub fn code(&self) -> &'static str {
        match self {
            SearchBy::Unset => "",
            SearchBy::Address => "1",
            SearchBy::Hash => "2",
            SearchBy::BlockNumber => "3",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SearchBy::Unset => "Any",
            SearchBy::Address => "From / To address",
            SearchBy::Hash => "Transaction hash",
            SearchBy::BlockNumber => "Block Number",
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unknown search field: {0}. Use address, hash or block")]
pub struct UnknownSearchBy(pub String);

impl FromStr for SearchBy {
    type Err = UnknownSearchBy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "-" | "any" | "none" => Ok(SearchBy::Unset),
            "1" | "address" | "addr" => Ok(SearchBy::Address),
            "2" | "hash" | "tx" => Ok(SearchBy::Hash),
            "3" | "block" | "blocknumber" | "block_number" => Ok(SearchBy::BlockNumber),
            other => Err(UnknownSearchBy(other.to_string())),
        }
    }
}

impl fmt::Display for SearchBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SearchBy::Unset => "any",
            SearchBy::Address => "address",
            SearchBy::Hash => "hash",
            SearchBy::BlockNumber => "block",
        };
        write!(f, "{}", name)
    }
}

/// Filter record built on each submit or page change.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    pub page: Option<u64>,
    pub search_by: SearchBy,
    pub search_text: String,
}

impl FilterCriteria {
    pub fn new(page: u64, search_by: SearchBy, search_text: impl Into<String>) -> Self {
        Self {
            page: Some(page),
            search_by,
            search_text: search_text.into(),
        }
    }

    /// `(key, value)` pairs that survive the empty-field filter, in wire order.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(3);

        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if self.search_by != SearchBy::Unset {
            params.push(("searchBy", self.search_by.code().to_string()));
        }
        let text = self.search_text.trim();
        if !text.is_empty() {
            params.push(("searchText", text.to_string()));
        }

        params
    }
}

/// Build the query string (without the leading `?`). Empty when no field is set.
pub fn build_query(criteria: &FilterCriteria) -> String {
    criteria
        .params()
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}
