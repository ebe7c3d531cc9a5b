use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use nq_core::prelude::*;
use reqwest::Client;
use url::Url;

use crate::response::EverythingResponse;

pub const DEFAULT_BASE_URL: &str = "https://newsapi.org";

/// Upper bound for one upstream call, connect to last body byte.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const EVERYTHING_PATH: &str = "v2/everything";
const API_KEY_HEADER: &str = "X-Api-Key";

/// NewsAPI backed [`HeadlineSource`].
///
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Clone)]
pub struct NewsApiClient {
    client: Client,
    api_key: String,
    endpoint: Url,
}

impl fmt::Debug for NewsApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsApiClient")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint.as_str())
            .finish()
    }
}

impl NewsApiClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let base = Url::parse(DEFAULT_BASE_URL).map_err(|e| Error::Config(e.to_string()))?;
        Self::with_base_url(api_key, &base)
    }

    /// Point the client at another NewsAPI compatible host.
    ///
    /// The endpoint path is resolved relative to `base_url`, so a base of
    /// `http://mirror/news/` targets `http://mirror/news/v2/everything`.
    pub fn with_base_url(api_key: impl Into<String>, base_url: &Url) -> Result<Self> {
        let endpoint = base_url
            .join(EVERYTHING_PATH)
            .map_err(|e| Error::Config(format!("invalid NewsAPI base URL {}: {}", base_url, e)))?;
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl HeadlineSource for NewsApiClient {
    async fn top_headlines(&self, query: &HeadlineQuery) -> Result<Vec<Article>> {
        // `country` is accepted by the schema but the search endpoint has no use for it.
        let page_size = query.effective_page_size().to_string();
        let request = self
            .client
            .get(self.endpoint.clone())
            .query(&[("q", query.search_term()), ("pageSize", page_size.as_str())])
            .header(API_KEY_HEADER, self.api_key.as_str())
            .build()
            .map_err(|e| Error::RequestBuild(e.to_string()))?;

        tracing::debug!("GET {} q={:?} pageSize={}", self.endpoint, query.search_term(), page_size);

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        let body = response.json::<EverythingResponse>().await.map_err(|e| {
            if e.is_decode() {
                Error::Decode(e.to_string())
            } else {
                Error::Transport(e.to_string())
            }
        })?;

        if !body.is_ok() {
            tracing::warn!(
                "NewsAPI replied with status {:?} (code: {:?}, message: {:?})",
                body.status,
                body.code,
                body.message
            );
        }
        tracing::debug!("NewsAPI reports {:?} total results", body.total_results);

        Ok(body.into_articles())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::{header, HeaderMap, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone)]
    struct Seen {
        params: HashMap<String, String>,
        api_key: Option<String>,
    }

    const THREE_ARTICLES: &str = r#"{
        "status": "ok",
        "totalResults": 3,
        "articles": [
            {"source": {"id": "one", "name": "First"}, "title": "a"},
            {"source": {"id": null, "name": "Second"}, "title": "b", "author": null},
            {"source": {"id": "three", "name": "Third"}, "title": "c"}
        ]
    }"#;

    async fn spawn_upstream(status: StatusCode, body: &'static str) -> (Url, Arc<Mutex<Vec<Seen>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = seen.clone();
        let app = Router::new().route(
            "/v2/everything",
            get(move |Query(params): Query<HashMap<String, String>>, headers: HeaderMap| {
                let recorder = recorder.clone();
                async move {
                    let api_key = headers
                        .get("x-api-key")
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string);
                    recorder.lock().unwrap().push(Seen { params, api_key });
                    (status, [(header::CONTENT_TYPE, "application/json")], body)
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (Url::parse(&format!("http://{}", addr)).unwrap(), seen)
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let client = NewsApiClient::new("super-secret").unwrap();
        let debug = format!("{:?}", client);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
        assert_eq!(client.endpoint().as_str(), "https://newsapi.org/v2/everything");
    }

    #[test]
    fn test_base_url_with_path_prefix() {
        let base = Url::parse("http://mirror.test/news/").unwrap();
        let client = NewsApiClient::with_base_url("k", &base).unwrap();
        assert_eq!(client.endpoint().as_str(), "http://mirror.test/news/v2/everything");
    }

    #[test]
    fn test_rejects_cannot_be_a_base_url() {
        let base = Url::parse("mailto:news@example.test").unwrap();
        let result = NewsApiClient::with_base_url("k", &base);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_defaults_are_sent_upstream() {
        let (base, seen) = spawn_upstream(StatusCode::OK, THREE_ARTICLES).await;
        let client = NewsApiClient::with_base_url("test-key", &base).unwrap();

        client.top_headlines(&HeadlineQuery::default()).await.unwrap();
        client
            .top_headlines(&HeadlineQuery::new(None, Some(String::new()), Some(-3)))
            .await
            .unwrap();

        let seen = seen.lock().unwrap().clone();
        assert_eq!(seen.len(), 2);
        for call in seen {
            assert_eq!(call.params.get("q").map(String::as_str), Some("India"));
            assert_eq!(call.params.get("pageSize").map(String::as_str), Some("20"));
            assert_eq!(call.api_key.as_deref(), Some("test-key"));
        }
    }

    #[tokio::test]
    async fn test_arguments_are_forwarded_except_country() {
        let (base, seen) = spawn_upstream(StatusCode::OK, THREE_ARTICLES).await;
        let client = NewsApiClient::with_base_url("test-key", &base).unwrap();

        let query = HeadlineQuery::new(Some("us".to_string()), Some("rust lang".to_string()), Some(5));
        client.top_headlines(&query).await.unwrap();

        let seen = seen.lock().unwrap().clone();
        assert_eq!(seen[0].params.get("q").map(String::as_str), Some("rust lang"));
        assert_eq!(seen[0].params.get("pageSize").map(String::as_str), Some("5"));
        assert!(!seen[0].params.contains_key("country"));
    }

    #[tokio::test]
    async fn test_articles_keep_upstream_order() {
        let (base, _) = spawn_upstream(StatusCode::OK, THREE_ARTICLES).await;
        let client = NewsApiClient::with_base_url("test-key", &base).unwrap();

        let articles = client.top_headlines(&HeadlineQuery::default()).await.unwrap();
        let titles: Vec<_> = articles.iter().map(|a| a.title.as_str()).collect();
        let sources: Vec<_> = articles.iter().map(|a| a.source.as_str()).collect();
        assert_eq!(titles, ["a", "b", "c"]);
        assert_eq!(sources, ["First", "Second", "Third"]);
        assert_eq!(articles[1].author, "");
    }

    #[tokio::test]
    async fn test_error_status_is_not_an_error() {
        let body = r#"{"status":"error","code":"apiKeyInvalid","message":"Your API key is invalid."}"#;
        let (base, _) = spawn_upstream(StatusCode::UNAUTHORIZED, body).await;
        let client = NewsApiClient::with_base_url("wrong-key", &base).unwrap();

        let articles = client.top_headlines(&HeadlineQuery::default()).await.unwrap();
        assert!(articles.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_body_is_decode_error() {
        let (base, _) = spawn_upstream(StatusCode::OK, "<html>not json</html>").await;
        let client = NewsApiClient::with_base_url("test-key", &base).unwrap();

        let err = client.top_headlines(&HeadlineQuery::default()).await.unwrap_err();
        assert!(matches!(err, Error::Decode(_)), "unexpected error: {:?}", err);
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let base = Url::parse(&format!("http://{}", addr)).unwrap();
        let client = NewsApiClient::with_base_url("test-key", &base).unwrap();

        let err = client.top_headlines(&HeadlineQuery::default()).await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)), "unexpected error: {:?}", err);
    }

    #[tokio::test]
    async fn test_invalid_api_key_is_request_build_error() {
        let (base, seen) = spawn_upstream(StatusCode::OK, THREE_ARTICLES).await;
        let client = NewsApiClient::with_base_url("bad\nkey", &base).unwrap();

        let err = client.top_headlines(&HeadlineQuery::default()).await.unwrap_err();
        assert!(matches!(err, Error::RequestBuild(_)), "unexpected error: {:?}", err);
        assert!(!err.to_string().contains("bad\nkey"));
        assert!(seen.lock().unwrap().is_empty());
    }
}
