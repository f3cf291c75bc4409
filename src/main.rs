// Load configuration
// Set up logging (stderr, so stdout only carries the rendered view)
// Fetch the first page
// Read commands until quit or end of input

use chain_tx_viewer::{
    config::Config,
    query::SearchBy,
    view::{command::HELP, Command, Renderer, ResultViewController, TransactionBrowser},
    TransactionFetcher,
};
use clap::Parser;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "chain-tx-viewer")]
#[command(version)]
#[command(about = "Browse a transaction-listing API page by page", long_about = None)]
struct Args {
    /// Field to search: address, hash or block
    #[arg(long, default_value = "any")]
    search_by: SearchBy,

    /// Text to search for
    #[arg(long, default_value = "")]
    search_text: String,

    /// Page to start on
    #[arg(long, default_value_t = 1)]
    page: u64,

    /// Render the first page and exit
    #[arg(long)]
    once: bool,

    /// Emit terminal hyperlinks for transaction hashes
    #[arg(long)]
    hyperlinks: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let config = Config::from_env()?;
    info!("Configuration loaded: {:?}", config);

    let fetcher = TransactionFetcher::new(&config)?;
    let renderer = Renderer::new(config.explorer_tx_url.clone(), args.hyperlinks);
    let controller = ResultViewController::with_filter(args.page, args.search_by, args.search_text);
    let mut browser = TransactionBrowser::new(Arc::new(fetcher), controller);

    browser.mount();
    browser.settle().await;
    print_view(&browser, &renderer);

    if args.once {
        return Ok(());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };

        match command {
            Command::Search { search_by, text } => {
                browser.submit_filter(search_by, text);
            }
            Command::Clear => {
                browser.submit_filter(SearchBy::Unset, "");
            }
            Command::Page(page) => {
                browser.select_page(page);
            }
            Command::Next => {
                if let Err(e) = browser.next_page() {
                    eprintln!("{}", e);
                    continue;
                }
            }
            Command::Previous => {
                if let Err(e) = browser.previous_page() {
                    eprintln!("{}", e);
                    continue;
                }
            }
            Command::Dismiss => browser.dismiss_alert(),
            Command::Help => {
                println!("{}", HELP);
                continue;
            }
            Command::Quit => break,
        }

        browser.settle().await;
        print_view(&browser, &renderer);
    }

    if browser.in_flight() > 0 {
        error!("Exiting with {} requests still in flight", browser.in_flight());
    }
    info!("Viewer closed");
    Ok(())
}

fn print_view(browser: &TransactionBrowser, renderer: &Renderer) {
    let controller = browser.controller();
    let (search_by, search_text) = controller.filter();
    if search_by != SearchBy::Unset || !search_text.is_empty() {
        println!("Filter: {} = {:?}", search_by.label(), search_text);
    }
    let strip = controller.page_strip();
    print!("{}", renderer.render(controller.state(), strip.as_ref()));
}
