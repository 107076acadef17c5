mod alert;
mod api;
mod cascade;
mod config;
mod error;
mod extract;
mod fetcher;
mod notifier;
mod schedule;

use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::api::routes::{router, ApiState};
use crate::config::Config;
use crate::error::Result;
use crate::fetcher::ResultsClient;
use crate::notifier::Notifier;
use crate::schedule::home_now;

#[tokio::main]
async fn main() {
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_level))
        .init();

    if let Err(e) = run(cfg).await {
        error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

async fn run(cfg: Config) -> Result<()> {
    let results = ResultsClient::new(&cfg)?;
    let notifier = Notifier::new(&cfg)?;

    if !notifier.is_configured() {
        warn!("TELEGRAM_TOKEN or CHAT_ID not set: alerts will be computed but not sent");
    }
    if cfg.test_key.is_none() {
        info!("TEST_KEY not set: test_telegram and bypass are disabled");
    }
    info!(
        env = %cfg.env_tag,
        threshold = cfg.jackpot_threshold,
        results_url = %cfg.results_url,
        "toto-watch starting"
    );

    let bind_addr = format!("0.0.0.0:{}", cfg.api_port);
    let state = ApiState {
        cfg: Arc::new(cfg),
        results,
        notifier,
        clock: home_now,
    };
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("HTTP API listening on {bind_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
