use regex::{Regex, RegexBuilder};
use serde::Serialize;

/// One page of a client-side filtered collection.
///
/// `count` is the filtered total before slicing.
#[derive(Debug, Clone, Serialize)]
pub struct Listing<T> {
    pub count: usize,
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
}

impl<T> Listing<T> {
    pub fn empty(page: usize, page_size: usize) -> Self {
        Self {
            count: 0,
            items: Vec::new(),
            page: page.max(1),
            page_size,
        }
    }

    fn offset(&self) -> usize {
        self.page_size.saturating_mul(self.page.saturating_sub(1))
    }

    pub fn has_prev(&self) -> bool {
        self.offset() > 0
    }

    pub fn has_next(&self) -> bool {
        self.offset().saturating_add(self.page_size) < self.count
    }

    pub fn total_pages(&self) -> usize {
        if self.page_size == 0 {
            return 0;
        }
        self.count.div_ceil(self.page_size)
    }
}

/// Slices page `page` (1-based; 0 is read as 1) out of `items`.
pub fn paginate<T>(items: Vec<T>, page: usize, page_size: usize) -> Listing<T> {
    let page = page.max(1);
    let count = items.len();
    let start = page_size.saturating_mul(page - 1).min(count);
    let end = start.saturating_add(page_size).min(count);
    let items = items.into_iter().skip(start).take(end - start).collect();

    Listing {
        count,
        items,
        page,
        page_size,
    }
}

/// Case-insensitive match of a user query against item text.
#[derive(Debug, Clone)]
pub struct TextFilter {
    pattern: Regex,
}

impl TextFilter {
    /// `None` for a blank query. A query that is not a valid regex matches literally.
    pub fn new(query: &str) -> Option<Self> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        let pattern = RegexBuilder::new(query)
            .case_insensitive(true)
            .build()
            .or_else(|_| {
                tracing::debug!("query '{}' is not a valid regex; matching literally", query);
                RegexBuilder::new(&regex::escape(query))
                    .case_insensitive(true)
                    .build()
            })
            .ok()?;
        Some(Self { pattern })
    }

    pub fn matches(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

/// Filters by `query` when given, then paginates.
pub fn filter_and_paginate<T, F>(items: Vec<T>, query: Option<&str>, page: usize, page_size: usize, text: F) -> Listing<T>
where
    F: Fn(&T) -> String,
{
    let filtered = match query.and_then(TextFilter::new) {
        Some(filter) => items.into_iter().filter(|item| filter.matches(&text(item))).collect(),
        None => items,
    };
    paginate(filtered, page, page_size)
}
