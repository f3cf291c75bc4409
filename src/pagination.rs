//! Page count and the page-number strip shown under the transaction table.

/// Pages shown around the current page before collapsing into ellipses.
pub const DEFAULT_WINDOW: u64 = 5;

/// Number of pages needed for `total_items`. A zero page size yields no pages.
pub fn page_count(total_items: u64, per_page: u64) -> u64 {
    if per_page == 0 {
        return 0;
    }
    total_items.div_ceil(per_page)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page { number: u64, active: bool },
    Ellipsis,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageStrip {
    pub total_pages: u64,
    pub current_page: u64,
    pub items: Vec<PageItem>,
    pub has_previous: bool,
    pub has_next: bool,
    pub visible: bool,
}

impl PageStrip {
    pub fn compute(total_items: u64, per_page: u64, current_page: u64, always_shown: bool) -> Self {
        Self::compute_with_window(total_items, per_page, current_page, always_shown, DEFAULT_WINDOW)
    }

    pub fn compute_with_window(
        total_items: u64,
        per_page: u64,
        current_page: u64,
        always_shown: bool,
        window: u64,
    ) -> Self {
        let total_pages = page_count(total_items, per_page);
        let visible = total_pages > 0 && (total_pages > 1 || always_shown);

        let items = if total_pages == 0 {
            Vec::new()
        } else {
            layout(total_pages, current_page, window.max(1))
        };

        Self {
            total_pages,
            current_page,
            items,
            has_previous: current_page > 1 && total_pages > 0,
            has_next: current_page < total_pages,
            visible,
        }
    }

    pub fn pages(&self) -> impl Iterator<Item = u64> + '_ {
        self.items.iter().filter_map(|item| match item {
            PageItem::Page { number, .. } => Some(*number),
            PageItem::Ellipsis => None,
        })
    }
}

fn layout(total_pages: u64, current_page: u64, window: u64) -> Vec<PageItem> {
    let page = |number: u64| PageItem::Page {
        number,
        active: number == current_page,
    };

    // First and last are always shown, so short ranges are listed in full.
    if total_pages <= window + 2 {
        return (1..=total_pages).map(page).collect();
    }

    let half = window / 2;
    let start = current_page
        .saturating_sub(half)
        .clamp(1, total_pages - window + 1);
    let end = start + window - 1;

    let mut items = Vec::with_capacity(window as usize + 4);

    if start > 1 {
        items.push(page(1));
        match start {
            2 => {}
            3 => items.push(page(2)),
            _ => items.push(PageItem::Ellipsis),
        }
    }

    items.extend((start..=end).map(page));

    if end < total_pages {
        match total_pages - end {
            1 => {}
            2 => items.push(page(total_pages - 1)),
            _ => items.push(PageItem::Ellipsis),
        }
        items.push(page(total_pages));
    }

    items
}
