use tracing_subscriber::EnvFilter;

use carrus::config::Config;
use carrus::engine::Engine;
use carrus::server::serve;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("carrus=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env().unwrap();
    tracing::info!(?config, "configuration loaded");

    let engine = Engine::from_config(&config).await.unwrap();

    serve(engine, config.bind_address).await.unwrap();
}
