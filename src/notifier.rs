use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::{Config, NOTIFY_TIMEOUT_SECS};
use crate::error::{AppError, Result};

/// Best-effort Telegram delivery. Failures are logged, never returned.
#[derive(Debug, Clone)]
pub struct Notifier {
    http: reqwest::Client,
    api_url: String,
    token: Option<String>,
    chat_id: Option<String>,
}

impl Notifier {
    pub fn new(cfg: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(NOTIFY_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            http,
            api_url: cfg.telegram_api_url.trim_end_matches('/').to_string(),
            token: cfg.telegram_token.clone(),
            chat_id: cfg.chat_id.clone(),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.token.is_some() && self.chat_id.is_some()
    }

    /// Returns whether Telegram accepted the message. Without a token and
    /// chat id this is a silent no-op.
    pub async fn send_telegram(&self, text: &str) -> bool {
        let (Some(token), Some(chat_id)) = (self.token.as_deref(), self.chat_id.as_deref()) else {
            debug!("Telegram not configured, skipping send");
            return false;
        };

        match self.post_message(token, chat_id, text).await {
            Ok(()) => {
                info!(chars = text.len(), "Telegram message sent");
                true
            }
            Err(e) => {
                warn!("{e}");
                false
            }
        }
    }

    async fn post_message(&self, token: &str, chat_id: &str, text: &str) -> Result<()> {
        let url = format!("{}/bot{}/sendMessage", self.api_url, token);
        let body = serde_json::json!({
            "chat_id": chat_id,
            "text": text,
            "parse_mode": "HTML",
            "disable_web_page_preview": true,
        });

        let resp = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Notify(e.without_url().to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let detail = resp.text().await.unwrap_or_default();
            return Err(AppError::Notify(format!("{status} {detail}")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn notifier_for(server: &MockServer) -> Notifier {
        let cfg = Config::for_tests("http://unused", &server.uri());
        Notifier::new(&cfg).unwrap()
    }

    #[tokio::test]
    async fn posts_html_message_to_send_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bottest-token/sendMessage"))
            .and(body_json(serde_json::json!({
                "chat_id": "42",
                "text": "<b>hi</b>",
                "parse_mode": "HTML",
                "disable_web_page_preview": true,
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        assert!(notifier_for(&server).send_telegram("<b>hi</b>").await);
    }

    #[tokio::test]
    async fn unconfigured_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut cfg = Config::for_tests("http://unused", &server.uri());
        cfg.chat_id = None;
        let notifier = Notifier::new(&cfg).unwrap();

        assert!(!notifier.is_configured());
        assert!(!notifier.send_telegram("ignored").await);
        assert!(server.received_requests().await.unwrap_or_default().is_empty());
    }

    #[tokio::test]
    async fn rejected_message_reports_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string("chat not found"))
            .expect(1)
            .mount(&server)
            .await;

        assert!(!notifier_for(&server).send_telegram("hello").await);
    }
}
