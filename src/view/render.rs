//! Terminal rendering of the view state.

use crate::models::TransactionRecord;
use crate::pagination::{PageItem, PageStrip};
use crate::view::controller::ViewState;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

pub const HASH_DISPLAY_LEN: usize = 13;

const HEADERS: [&str; 8] = [
    "Block Number",
    "Transaction ID",
    "Sender address",
    "Recipient's address",
    "Block confirmations",
    "Date",
    "Value",
    "Transaction fee",
];

/// Cut `text` to `max` characters, marking the cut with `...`.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let head: String = text.chars().take(max).collect();
    format!("{}...", head)
}

/// Plain decimal notation, never exponent form.
pub fn format_amount(value: &Decimal) -> String {
    value.normalize().to_string()
}

/// e.g. `Fri Sep 01 2023`. Always UTC, so output does not depend on the host timezone.
pub fn format_date(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%a %b %d %Y").to_string()
}

struct Cell {
    text: String,
    link: Option<String>,
}

impl Cell {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: None,
        }
    }
}

/// Column-aligned text table.
struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
    col_widths: Vec<usize>,
}

impl Table {
    fn new(headers: &[&str]) -> Self {
        Table {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
            col_widths: headers.iter().map(|h| h.chars().count()).collect(),
        }
    }

    fn add_row(&mut self, row: Vec<Cell>) {
        for (width, cell) in self.col_widths.iter_mut().zip(&row) {
            *width = (*width).max(cell.text.chars().count());
        }
        self.rows.push(row);
    }

    fn render(&self, hyperlinks: bool) -> String {
        let mut output = String::new();

        let header: Vec<Cell> = self.headers.iter().map(Cell::plain).collect();
        output.push_str(&self.render_row(&header, false));
        output.push('\n');
        output.push_str(&self.render_separator());
        output.push('\n');

        for row in &self.rows {
            output.push_str(&self.render_row(row, hyperlinks));
            output.push('\n');
        }

        output
    }

    fn render_row(&self, row: &[Cell], hyperlinks: bool) -> String {
        let cells: Vec<String> = row
            .iter()
            .zip(&self.col_widths)
            .map(|(cell, &width)| {
                let padding = " ".repeat(width.saturating_sub(cell.text.chars().count()));
                match (&cell.link, hyperlinks) {
                    // OSC 8 terminal hyperlink; padding stays outside the link.
                    (Some(link), true) => {
                        format!("\x1b]8;;{}\x1b\\{}\x1b]8;;\x1b\\{}", link, cell.text, padding)
                    }
                    _ => format!("{}{}", cell.text, padding),
                }
            })
            .collect();
        cells.join(" | ").trim_end().to_string()
    }

    fn render_separator(&self) -> String {
        self.col_widths
            .iter()
            .map(|&width| "-".repeat(width))
            .collect::<Vec<_>>()
            .join("-+-")
    }
}

pub struct Renderer {
    explorer_tx_url: String,
    hyperlinks: bool,
}

impl Renderer {
    pub fn new(explorer_tx_url: impl Into<String>, hyperlinks: bool) -> Self {
        Self {
            explorer_tx_url: explorer_tx_url.into(),
            hyperlinks,
        }
    }

    pub fn transaction_link(&self, hash: &str) -> String {
        format!("{}{}", self.explorer_tx_url, hash)
    }

    pub fn render(&self, state: &ViewState, strip: Option<&PageStrip>) -> String {
        let mut output = String::new();

        if state.alert.show {
            output.push_str(&format!("[{}] {}\n", state.alert.variant, state.alert.message));
        }

        if state.loading {
            output.push_str("Loading ...\n");
            return output;
        }

        if state.transactions.is_empty() {
            output.push_str("Data not found\n");
            return output;
        }

        output.push_str(&self.render_table(&state.transactions));
        if let Some(strip) = strip {
            let line = render_strip(strip);
            if !line.is_empty() {
                output.push('\n');
                output.push_str(&line);
                output.push('\n');
            }
        }

        output
    }

    pub fn render_table(&self, transactions: &[TransactionRecord]) -> String {
        let mut table = Table::new(&HEADERS);

        for tx in transactions {
            table.add_row(vec![
                Cell::plain(tx.block_number.to_string()),
                Cell {
                    text: truncate(&tx.hash, HASH_DISPLAY_LEN),
                    link: Some(self.transaction_link(&tx.hash)),
                },
                Cell::plain(truncate(&tx.from, HASH_DISPLAY_LEN)),
                Cell::plain(truncate(tx.to.as_deref().unwrap_or(""), HASH_DISPLAY_LEN)),
                Cell::plain(tx.confirmations.to_string()),
                Cell::plain(format_date(&tx.timestamp)),
                Cell::plain(format_amount(&tx.value)),
                Cell::plain(format_amount(&tx.fee)),
            ]);
        }

        table.render(self.hyperlinks)
    }
}

/// One-line page strip, e.g. `‹ [1] 2 3 4 5 … 10 ›`. Empty when hidden.
pub fn render_strip(strip: &PageStrip) -> String {
    if !strip.visible {
        return String::new();
    }

    let mut parts = Vec::with_capacity(strip.items.len() + 2);
    if strip.has_previous {
        parts.push("‹".to_string());
    }
    for item in &strip.items {
        parts.push(match item {
            PageItem::Page { number, active: true } => format!("[{}]", number),
            PageItem::Page { number, active: false } => number.to_string(),
            PageItem::Ellipsis => "…".to_string(),
        });
    }
    if strip.has_next {
        parts.push("›".to_string());
    }

    parts.join(" ")
}
