//! Shared fixtures for the crate tests: sample rows and a local stand-in for
//! the listing API.

pub mod browser_tests;

use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
use reqwest::Url;
use serde_json::{json, Value};
use std::collections::HashMap;

pub const PER_PAGE: u64 = 10;
pub const TOTAL: u64 = 25;

/// JSON for one transaction row in the API's field naming.
pub fn transaction_json(index: u64) -> Value {
    json!({
        "_id": format!("id-{}", index),
        "blockNumberNormalized": 18_000_000 + index,
        "hash": format!("0xhash{:04}", index),
        "from": format!("0xfrom{:04}", index),
        "to": format!("0xto{:04}", index),
        "confirmations": index,
        "timeStampNormalized": "2023-09-01T10:00:00.000Z",
        "valueNormalized": format!("{}.5", index),
        "totalTransactionFee": "0.00042"
    })
}

pub fn page_body(indices: impl IntoIterator<Item = u64>, total: u64) -> Value {
    json!({
        "transactions": indices.into_iter().map(transaction_json).collect::<Vec<_>>(),
        "pagination": { "totalDocuments": total, "perPage": PER_PAGE }
    })
}

// Serves TOTAL rows, PER_PAGE at a time. Hash search filters by exact hash;
// the texts "missing" and "boom" trigger 404 and 503 responses.
async fn list_transactions(Query(params): Query<HashMap<String, String>>) -> (StatusCode, Json<Value>) {
    let page = match params.get("page").map(|p| p.parse::<u64>()) {
        None => 1,
        Some(Ok(page)) if page >= 1 => page,
        Some(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": "page must be a positive integer" })),
            )
        }
    };

    match params.get("searchText").map(String::as_str) {
        Some("missing") => {
            return (StatusCode::NOT_FOUND, Json(json!({ "message": "not found" })));
        }
        Some("boom") => return (StatusCode::SERVICE_UNAVAILABLE, Json(json!({}))),
        _ => {}
    }

    let matches: Vec<u64> = (1..=TOTAL)
        .filter(|&i| match (params.get("searchBy").map(String::as_str), params.get("searchText")) {
            (Some("2"), Some(text)) => transaction_json(i)["hash"] == text.as_str(),
            _ => true,
        })
        .collect();

    let start = ((page - 1) * PER_PAGE) as usize;
    let rows: Vec<u64> = matches.iter().copied().skip(start).take(PER_PAGE as usize).collect();

    (StatusCode::OK, Json(page_body(rows, matches.len() as u64)))
}

pub fn mock_router() -> Router {
    Router::new().route("/v1/transactions", get(list_transactions))
}

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn_server(router: Router) -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    Url::parse(&format!("http://{}", addr)).unwrap()
}
