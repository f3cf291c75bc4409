//! Transaction rows and pagination totals as returned by the listing API,
//! plus the error body shape used on failures.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "blockNumberNormalized")]
    pub block_number: u64,
    pub hash: String,
    pub from: String,
    #[serde(default)]
    pub to: Option<String>,
    pub confirmations: u64,
    #[serde(rename = "timeStampNormalized", deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "valueNormalized")]
    pub value: Decimal,
    #[serde(rename = "totalTransactionFee")]
    pub fee: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationSummary {
    pub total_documents: u64,
    pub per_page: u64,
}

impl PaginationSummary {
    pub fn page_count(&self) -> u64 {
        crate::pagination::page_count(self.total_documents, self.per_page)
    }
}

/// Body of a 2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionsPage {
    pub transactions: Vec<TransactionRecord>,
    pub pagination: PaginationSummary,
}

/// Body of an error response. Servers are not consistent about including `message`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

// The API has shipped both ISO strings and epoch milliseconds for this field.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Millis(i64),
    Text(String),
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match RawTimestamp::deserialize(deserializer)? {
        RawTimestamp::Millis(ms) => Utc
            .timestamp_millis_opt(ms)
            .single()
            .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {}", ms))),
        RawTimestamp::Text(text) => DateTime::parse_from_rfc3339(&text)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| D::Error::custom(format!("invalid timestamp {:?}: {}", text, e))),
    }
}
