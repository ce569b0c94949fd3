use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rss2org::config::Config;
use rss2org::context::Context;
use rss2org::fetcher::HttpFeedSource;
use rss2org::pipeline;
use rss2org::summarizer::OpenAiSummarizer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Pick up OPENAI_API_KEY from a .env file if there is one
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rss2org=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config_path =
        std::env::var("RSS2ORG_CONFIG").unwrap_or_else(|_| "feeds.toml".to_string());
    let mut config = Config::load_or_default(&config_path)?;
    if let Ok(dir) = std::env::var("RSS2ORG_OUTPUT_DIR") {
        config.output_dir = dir;
    }
    info!(
        "Loaded {} sections, {} feeds",
        config.sections.len(),
        config.sections.iter().map(|s| s.feeds.len()).sum::<usize>()
    );

    // Fails here, before any network traffic, without an API key
    let ctx = Context::from_env(config)?;

    let source = HttpFeedSource::new(&ctx);
    let summarizer = OpenAiSummarizer::new(&ctx);
    let today = chrono::Local::now().date_naive();

    pipeline::run(&ctx, &source, &summarizer, today).await?;

    Ok(())
}
