use async_trait::async_trait;
use crate::{Article, Result};

/// Search term used when the caller does not supply one.
pub const DEFAULT_SEARCH_TERM: &str = "India";

/// Page size used when the caller supplies none, or a non-positive one.
pub const DEFAULT_PAGE_SIZE: i32 = 20;

/// Arguments of a headline lookup, exactly as the caller supplied them.
///
/// Absent or out-of-range values are never an error; the accessors apply
/// the defaults:
///
/// * `country` is carried along but not used by any source.
/// * [`search_term`](Self::search_term) falls back to [`DEFAULT_SEARCH_TERM`]
///   when `q` is absent or empty.
/// * [`effective_page_size`](Self::effective_page_size) falls back to
///   [`DEFAULT_PAGE_SIZE`] when `page_size` is absent or `<= 0`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadlineQuery {
    pub country: Option<String>,
    pub q: Option<String>,
    pub page_size: Option<i32>,
}

impl HeadlineQuery {
    pub fn new(country: Option<String>, q: Option<String>, page_size: Option<i32>) -> Self {
        Self { country, q, page_size }
    }

    pub fn search_term(&self) -> &str {
        match self.q.as_deref() {
            Some(q) if !q.is_empty() => q,
            _ => DEFAULT_SEARCH_TERM,
        }
    }

    pub fn effective_page_size(&self) -> i32 {
        match self.page_size {
            Some(size) if size > 0 => size,
            _ => DEFAULT_PAGE_SIZE,
        }
    }
}

#[async_trait]
pub trait HeadlineSource: Send + Sync {
    /// Fetch the articles matching `query`, in upstream order
    async fn top_headlines(&self, query: &HeadlineQuery) -> Result<Vec<Article>>;
}
