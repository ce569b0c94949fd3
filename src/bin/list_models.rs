//! Print every model identifier the completion service offers, one per line.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rss2org::config::Config;
use rss2org::context::Context;
use rss2org::openai::ChatClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rss2org=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config_path =
        std::env::var("RSS2ORG_CONFIG").unwrap_or_else(|_| "feeds.toml".to_string());
    let config = Config::load_or_default(&config_path)?;
    let ctx = Context::from_env(config)?;

    for id in ChatClient::new(&ctx).list_models().await? {
        println!("{}", id);
    }

    Ok(())
}
