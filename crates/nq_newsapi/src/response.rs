use nq_core::Article;
use serde::Deserialize;

/// Envelope returned by the `/v2/everything` endpoint.
///
/// NewsAPI sends `null` for plenty of article fields, and error replies
/// carry `code`/`message` instead of `articles`, so everything is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct EverythingResponse {
    pub status: Option<String>,
    pub total_results: Option<u64>,
    pub code: Option<String>,
    pub message: Option<String>,
    pub articles: Option<Vec<RawArticle>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct RawArticle {
    pub source: Option<RawSource>,
    pub author: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub url_to_image: Option<String>,
    pub published_at: Option<String>,
    pub content: Option<String>,
}

/// `source.id` is ignored; only the display name is projected.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawSource {
    pub name: Option<String>,
}

impl EverythingResponse {
    pub fn is_ok(&self) -> bool {
        self.status.as_deref() == Some("ok")
    }

    pub fn into_articles(self) -> Vec<Article> {
        let articles = self.articles.unwrap_or_default();
        let mut out = Vec::with_capacity(articles.len());
        out.extend(articles.into_iter().map(Article::from));
        out
    }
}

impl From<RawArticle> for Article {
    fn from(raw: RawArticle) -> Self {
        Article {
            source: raw.source.and_then(|s| s.name).unwrap_or_default(),
            author: raw.author.unwrap_or_default(),
            title: raw.title.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            url: raw.url.unwrap_or_default(),
            url_to_image: raw.url_to_image.unwrap_or_default(),
            published_at: raw.published_at.unwrap_or_default(),
            content: raw.content.unwrap_or_default(),
        }
    }
}
