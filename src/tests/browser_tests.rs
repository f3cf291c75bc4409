#[cfg(test)]
mod tests {
    use crate::{
        api::{FetchError, FetchResponse, TransactionFetcher, TransactionSource},
        config::Config,
        query::SearchBy,
        tests::{mock_router, page_body, spawn_server, TOTAL},
        view::{
            ApplyOutcome, NavigationError, Phase, Renderer, ResultViewController,
            TransactionBrowser,
        },
    };
    use async_trait::async_trait;
    use std::{sync::Arc, time::Duration};
    use tokio::sync::Mutex;

    /// Answers every query with a page whose first row encodes the requested
    /// page, after a per-query delay. Records the queries it saw.
    struct ScriptedSource {
        delays: Vec<(&'static str, Duration)>,
        seen: Mutex<Vec<String>>,
    }

    impl ScriptedSource {
        fn new(delays: Vec<(&'static str, Duration)>) -> Self {
            Self {
                delays,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TransactionSource for ScriptedSource {
        async fn fetch(&self, query: &str) -> Result<FetchResponse, FetchError> {
            self.seen.lock().await.push(query.to_string());

            let delay = self
                .delays
                .iter()
                .find(|(pattern, _)| query.contains(pattern))
                .map(|(_, delay)| *delay)
                .unwrap_or_default();
            tokio::time::sleep(delay).await;

            let page: u64 = query
                .split('&')
                .find_map(|pair| pair.strip_prefix("page="))
                .and_then(|p| p.parse().ok())
                .unwrap_or(1);
            let first = (page - 1) * 10 + 1;
            Ok(FetchResponse {
                status: 200,
                body: page_body(first..first + 10, 95),
            })
        }
    }

    #[tokio::test]
    async fn test_latest_request_wins_when_older_resolves_last() {
        let source = Arc::new(ScriptedSource::new(vec![
            ("page=2", Duration::from_millis(300)),
            ("page=3", Duration::from_millis(10)),
        ]));
        let mut browser = TransactionBrowser::new(source.clone(), ResultViewController::new());

        browser.mount();
        browser.settle().await;

        browser.select_page(2);
        browser.select_page(3);
        assert_eq!(browser.in_flight(), 2);

        // page 3 lands first, page 2 afterwards and is dropped
        assert_eq!(browser.settle_next().await, Some(ApplyOutcome::Applied(Phase::Success)));
        assert_eq!(browser.settle_next().await, Some(ApplyOutcome::Stale));
        assert_eq!(browser.settle_next().await, None);

        let state = browser.controller().state();
        assert_eq!(state.transactions[0].hash, "0xhash0021");
        assert_eq!(browser.controller().current_page(), 3);
        assert!(!state.loading);

        assert_eq!(source.seen.lock().await.len(), 3);
    }

    /// Source whose fetch task dies before producing a response.
    struct PanickingSource;

    #[async_trait]
    impl TransactionSource for PanickingSource {
        async fn fetch(&self, _query: &str) -> Result<FetchResponse, FetchError> {
            panic!("source crashed");
        }
    }

    #[tokio::test]
    async fn test_panicking_source_becomes_error_alert() {
        let mut browser =
            TransactionBrowser::new(Arc::new(PanickingSource), ResultViewController::new());

        browser.mount();
        tokio::time::timeout(Duration::from_secs(2), browser.settle())
            .await
            .expect("settle should not hang when a fetch task panics");

        assert_eq!(browser.in_flight(), 0);
        let state = browser.controller().state();
        assert!(!state.loading);
        assert_eq!(state.phase, Phase::Error);
        assert!(state.alert.show);
        assert!(state.alert.message.starts_with("Request task failed"));

        // Nothing was ever loaded, so paging has nowhere to go
        assert_eq!(browser.next_page(), Err(NavigationError::NothingLoaded));
        assert_eq!(browser.previous_page(), Err(NavigationError::NothingLoaded));
    }

    #[tokio::test]
    async fn test_next_and_previous() {
        let source = Arc::new(ScriptedSource::new(Vec::new()));
        let mut browser = TransactionBrowser::new(source, ResultViewController::new());

        // Nothing loaded yet, so there is nowhere to go
        assert_eq!(browser.next_page(), Err(NavigationError::NothingLoaded));

        browser.mount();
        browser.settle().await;
        assert_eq!(browser.previous_page(), Err(NavigationError::AtFirstPage));

        assert!(browser.next_page().is_ok());
        browser.settle().await;
        assert_eq!(browser.controller().current_page(), 2);

        assert!(browser.previous_page().is_ok());
        browser.settle().await;
        assert_eq!(browser.controller().current_page(), 1);

        browser.select_page(10);
        browser.settle().await;
        assert_eq!(browser.next_page(), Err(NavigationError::AtLastPage));
    }

    #[tokio::test]
    async fn test_against_local_api() {
        let base = spawn_server(mock_router()).await;
        let fetcher = TransactionFetcher::new(&Config::for_base_url(base)).unwrap();
        let mut browser = TransactionBrowser::new(Arc::new(fetcher), ResultViewController::new());
        let renderer = Renderer::new("https://etherscan.io/tx/", false);

        // Initial load
        browser.mount();
        browser.settle().await;
        let controller = browser.controller();
        assert_eq!(controller.state().phase, Phase::Success);
        assert_eq!(controller.state().transactions.len(), 10);
        assert_eq!(controller.state().pagination.unwrap().total_documents, TOTAL);
        let strip = controller.page_strip().unwrap();
        assert_eq!(strip.total_pages, 3);
        let rendered = renderer.render(controller.state(), Some(&strip));
        assert!(rendered.contains("0xhash0001"));
        assert!(rendered.ends_with("[1] 2 3 ›\n"));

        // Search narrows to one row on page 1
        browser.select_page(3);
        browser.settle().await;
        browser.submit_filter(SearchBy::Hash, "0xhash0007");
        browser.settle().await;
        let controller = browser.controller();
        assert_eq!(controller.current_page(), 1);
        assert_eq!(controller.state().transactions.len(), 1);
        assert_eq!(controller.state().transactions[0].hash, "0xhash0007");

        // A failing search leaves that row on screen with an alert
        browser.submit_filter(SearchBy::Hash, "missing");
        browser.settle().await;
        let controller = browser.controller();
        let rendered = renderer.render(controller.state(), controller.page_strip().as_ref());
        assert!(rendered.starts_with("[danger] not found\n"));
        assert!(rendered.contains("0xhash0007"));

        // Server errors outside 400-500 still surface
        browser.submit_filter(SearchBy::Unset, "boom");
        browser.settle().await;
        assert_eq!(
            browser.controller().state().alert.message,
            "unexpected response status 503"
        );

        // Clearing the filter recovers
        browser.submit_filter(SearchBy::Unset, "");
        browser.settle().await;
        let state = browser.controller().state();
        assert_eq!(state.phase, Phase::Success);
        assert!(!state.alert.show);
        assert_eq!(state.transactions.len(), 10);
    }
}
