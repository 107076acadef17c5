use std::time::Duration;

use base64::{engine::general_purpose, Engine as _};
use tracing::debug;

use crate::config::{Config, FETCH_TIMEOUT_SECS, USER_AGENT};
use crate::error::{AppError, Result};

/// The results site addresses past draws by `?sppl=base64("DrawNumber=<n>")`.
pub fn encode_draw_param(draw_no: u64) -> String {
    general_purpose::STANDARD.encode(format!("DrawNumber={draw_no}"))
}

/// GETs results pages. One client is built at startup and reused per request.
#[derive(Debug, Clone)]
pub struct ResultsClient {
    http: reqwest::Client,
    results_url: String,
}

impl ResultsClient {
    pub fn new(cfg: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            http,
            results_url: cfg.results_url.clone(),
        })
    }

    /// URL of the latest results page, or of a specific draw's page.
    pub fn draw_url(&self, draw_no: Option<u64>) -> String {
        match draw_no {
            None => self.results_url.clone(),
            Some(n) => format!("{}?sppl={}", self.results_url, encode_draw_param(n)),
        }
    }

    /// Fetch raw page markup. Non-2xx, timeouts and connection failures are
    /// all `AppError::Fetch`. No retry.
    pub async fn fetch_page(&self, draw_no: Option<u64>) -> Result<String> {
        let url = self.draw_url(draw_no);
        debug!(url = %url, draw_no = ?draw_no, "fetching results page");

        let fetch_err = |source: reqwest::Error| AppError::Fetch {
            url: url.clone(),
            source,
        };

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(fetch_err)?
            .error_for_status()
            .map_err(fetch_err)?;
        resp.text().await.map_err(fetch_err)
    }
}
