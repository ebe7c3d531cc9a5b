pub mod error;
pub mod source;

use serde::{Deserialize, Serialize};

pub use error::{Error, Result};
pub use source::{HeadlineQuery, HeadlineSource, DEFAULT_PAGE_SIZE, DEFAULT_SEARCH_TERM};

/// A news article as exposed to query clients.
///
/// Every field defaults to the empty string when the upstream record lacks it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Article {
    /// Display name of the publishing source
    pub source: String,
    pub author: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub url_to_image: String,
    pub published_at: String,
    pub content: String,
}

pub mod prelude {
    pub use crate::{Article, Error, HeadlineQuery, HeadlineSource, Result};
}
