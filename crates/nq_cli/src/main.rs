use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::builder::NonEmptyStringValueParser;
use clap::Parser;
use nq_core::HeadlineSource;
use nq_newsapi::NewsApiClient;
use nq_web::{create_app, AppState};
use tracing::{info, Level};
use url::Url;

#[derive(Parser, Debug)]
#[command(author, version, about = "GraphQL gateway in front of NewsAPI", long_about = None)]
pub struct Cli {
    /// NewsAPI key, sent upstream as `X-Api-Key`
    #[arg(long, env = "NEWSAPI_KEY", hide_env_values = true, value_parser = NonEmptyStringValueParser::new())]
    newsapi_key: String,
    /// Port to listen on (all interfaces)
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,
    /// Base URL of the NewsAPI compatible upstream
    #[arg(long, env = "NEWSAPI_URL", default_value = nq_newsapi::DEFAULT_BASE_URL)]
    newsapi_url: Url,
    /// Directory served for paths other than /query
    #[arg(long, env = "STATIC_DIR", default_value = ".")]
    static_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();
    let cli = Cli::parse();

    let client = NewsApiClient::with_base_url(cli.newsapi_key, &cli.newsapi_url)
        .context("failed to create NewsAPI client")?;
    let source: Arc<dyn HeadlineSource> = Arc::new(client);
    let app = create_app(AppState::new(source, cli.static_dir)).await;

    let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!("listening on :{}", cli.port);
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
