use std::sync::Arc;

use async_graphql::{EmptyMutation, EmptySubscription, Object, Schema};
use nq_core::{Article, HeadlineQuery, HeadlineSource};

/// Message reported for any data source failure.
pub const UPSTREAM_FAILURE: &str = "failed to fetch headlines";

pub type HeadlineSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

/// Build the schema once; the result is immutable and cheap to clone.
pub fn build_schema(source: Arc<dyn HeadlineSource>) -> HeadlineSchema {
    Schema::build(QueryRoot { source }, EmptyMutation, EmptySubscription).finish()
}

pub struct QueryRoot {
    source: Arc<dyn HeadlineSource>,
}

#[Object(name = "Query")]
impl QueryRoot {
    /// Articles matching `q` (default "India"), at most `pageSize` (default 20).
    ///
    /// `country` is accepted for compatibility and currently has no effect.
    async fn top_headlines(
        &self,
        country: Option<String>,
        q: Option<String>,
        page_size: Option<i32>,
    ) -> async_graphql::Result<Option<Vec<Option<ArticleNode>>>> {
        let query = HeadlineQuery::new(country, q, page_size);
        match self.source.top_headlines(&query).await {
            // Items are nullable in the schema (`[Article]`), never null in practice.
            Ok(articles) => Ok(Some(articles.into_iter().map(|a| Some(ArticleNode(a))).collect())),
            Err(err) => {
                tracing::warn!("Headline lookup failed: {}", err);
                Err(async_graphql::Error::new(UPSTREAM_FAILURE))
            }
        }
    }
}

/// GraphQL view of an [`Article`]. Every field is nullable in the schema
/// but always resolves, possibly to an empty string.
pub struct ArticleNode(pub Article);

#[Object(name = "Article")]
impl ArticleNode {
    async fn source(&self) -> Option<&str> {
        Some(&self.0.source)
    }

    async fn author(&self) -> Option<&str> {
        Some(&self.0.author)
    }

    async fn title(&self) -> Option<&str> {
        Some(&self.0.title)
    }

    async fn description(&self) -> Option<&str> {
        Some(&self.0.description)
    }

    async fn url(&self) -> Option<&str> {
        Some(&self.0.url)
    }

    async fn url_to_image(&self) -> Option<&str> {
        Some(&self.0.url_to_image)
    }

    async fn published_at(&self) -> Option<&str> {
        Some(&self.0.published_at)
    }

    async fn content(&self) -> Option<&str> {
        Some(&self.0.content)
    }
}
