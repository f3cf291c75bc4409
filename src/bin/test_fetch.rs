use chain_tx_viewer::{
    build_query, config::Config, view::controller::interpret, FilterCriteria, PageStrip, SearchBy,
    TransactionFetcher, TransactionSource,
};
use tracing::{error, info, Level};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("Starting live fetch checks...");

    let config = Config::from_env()?;
    let fetcher = TransactionFetcher::new(&config)?;
    info!("Endpoint: {}", fetcher.endpoint());

    // 1. Unfiltered request
    let response = fetcher.fetch("").await?;
    info!("Unfiltered request returned status {}", response.status);
    let first_page = match interpret(Ok(response)) {
        Ok(page) => page,
        Err(message) => {
            error!("Unfiltered request failed: {}", message);
            return Err(message.into());
        }
    };
    info!(
        "✅ Page 1 has {} transactions, {} in total",
        first_page.transactions.len(),
        first_page.pagination.total_documents
    );

    let strip = PageStrip::compute(
        first_page.pagination.total_documents,
        first_page.pagination.per_page,
        1,
        !first_page.transactions.is_empty(),
    );
    info!("✅ {} pages available", strip.total_pages);

    // 2. Second page, if there is one
    if strip.has_next {
        let query = build_query(&FilterCriteria::new(2, SearchBy::Unset, ""));
        let response = fetcher.fetch(&query).await?;
        assert!(response.is_success(), "page 2 returned status {}", response.status);
        info!("✅ Page 2 fetched");
    }

    // 3. Search by the hash of the first row
    if let Some(tx) = first_page.transactions.first() {
        let query = build_query(&FilterCriteria::new(1, SearchBy::Hash, tx.hash.clone()));
        let response = fetcher.fetch(&query).await?;
        match interpret(Ok(response)) {
            Ok(page) => {
                assert!(
                    page.transactions.iter().any(|found| found.hash == tx.hash),
                    "hash search did not return the transaction"
                );
                info!("✅ Hash search found {}", tx.hash);
            }
            Err(message) => error!("Hash search failed: {}", message),
        }
    }

    info!("All live fetch checks completed");
    Ok(())
}
