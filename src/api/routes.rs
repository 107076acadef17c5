use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::alert::AlertDecision;
use crate::cascade::is_next_draw_cascade;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::extract::DrawSnapshot;
use crate::fetcher::ResultsClient;
use crate::notifier::Notifier;
use crate::schedule::is_draw_day_and_time;

/// Source of "now" in home time for the schedule gate.
pub type Clock = fn() -> DateTime<FixedOffset>;

#[derive(Clone)]
pub struct ApiState {
    pub cfg: Arc<Config>,
    pub results: ResultsClient,
    pub notifier: Notifier,
    pub clock: Clock,
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/api/check", get(check))
        .route("/health", get(health))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Query params / responses
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct CheckQuery {
    /// `dry=1` computes everything but never sends the alert.
    pub dry: Option<String>,
    /// Presence (with a valid key) sends a fixed test message and returns.
    pub test_telegram: Option<String>,
    pub key: Option<String>,
    /// `bypass=1` (with a valid key) skips the schedule gate.
    pub bypass: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub latest_draw_no: Option<u64>,
    pub next_jackpot: Option<u64>,
    pub cascade_next_draw: bool,
    pub threshold: u64,
    pub env: String,
    pub alerted: bool,
    pub dry: bool,
    pub telegram_token_set: bool,
    pub chat_id_set: bool,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CheckResponse {
    TestTelegram { test_telegram: bool },
    Skipped { skipped: bool },
    Report(CheckReport),
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn health(State(state): State<ApiState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok", "env": state.cfg.env_tag }))
}

pub async fn check(
    State(state): State<ApiState>,
    Query(params): Query<CheckQuery>,
) -> std::result::Result<Json<CheckResponse>, AppError> {
    match run_check(&state, &params).await {
        Ok(resp) => Ok(Json(resp)),
        Err(e) => {
            error!("check failed: {e}");
            Err(e)
        }
    }
}

async fn run_check(state: &ApiState, params: &CheckQuery) -> Result<CheckResponse> {
    let cfg = &state.cfg;
    let key_ok = cfg.key_is_valid(params.key.as_deref());

    if params.test_telegram.is_some() && key_ok {
        let text = format!("✅ TOTO watch test message (env: {})", cfg.env_tag);
        let sent = state.notifier.send_telegram(&text).await;
        info!(sent, "test message requested");
        return Ok(CheckResponse::TestTelegram { test_telegram: true });
    }

    let page = state.results.fetch_page(None).await?;
    let snapshot = DrawSnapshot::from_page(&page);

    let cascade_next = match snapshot.latest_draw_no {
        Some(draw_no) => is_next_draw_cascade(&state.results, draw_no)
            .await
            .unwrap_or_else(|e| {
                warn!(draw_no, "cascade check failed, assuming no cascade: {e}");
                false
            }),
        None => {
            warn!("no draw number found on results page");
            false
        }
    };

    let bypass = key_ok && params.bypass.as_deref() == Some("1");
    if !bypass && !is_draw_day_and_time((state.clock)(), cascade_next) {
        info!(cascade_next, "outside draw window, skipping");
        return Ok(CheckResponse::Skipped { skipped: true });
    }

    let dry = params.dry.as_deref() == Some("1");
    let decision = AlertDecision::evaluate(
        snapshot.next_jackpot_amount,
        cfg.jackpot_threshold,
        cascade_next,
    );

    let mut alerted = false;
    if decision.should_alert() {
        if dry {
            info!(?decision, "dry run, alert not sent");
        } else {
            let text = decision.compose_message(&snapshot, cfg.jackpot_threshold);
            alerted = state.notifier.send_telegram(&text).await;
        }
    }

    Ok(CheckResponse::Report(CheckReport {
        latest_draw_no: snapshot.latest_draw_no,
        next_jackpot: snapshot.next_jackpot_amount,
        cascade_next_draw: cascade_next,
        threshold: cfg.jackpot_threshold,
        env: cfg.env_tag.clone(),
        alerted,
        dry,
        telegram_token_set: cfg.telegram_token.is_some(),
        chat_id_set: cfg.chat_id.is_some(),
    }))
}
