use crate::error::{AppError, Result};

pub const RESULTS_URL: &str =
    "https://www.singaporepools.com.sg/en/product/sr/Pages/toto_results.aspx";
pub const TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Identifies the bot to the results site.
pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; TotoBot/1.0)";

/// Timeout for a single results page GET (seconds).
pub const FETCH_TIMEOUT_SECS: u64 = 15;

/// Timeout for the Telegram sendMessage POST (seconds).
pub const NOTIFY_TIMEOUT_SECS: u64 = 10;

pub const DEFAULT_JACKPOT_THRESHOLD: u64 = 10_000_000;

/// Draws are published in Singapore time, which has no DST.
pub const HOME_UTC_OFFSET_SECS: i32 = 8 * 3600;

/// Local (hour, minute) after which a draw's results count as final.
pub mod draw_cutoffs {
    pub const NORMAL: (u32, u32) = (18, 40);
    pub const FIRST_WEDNESDAY: (u32, u32) = (19, 40);
    pub const CASCADE_FRIDAY: (u32, u32) = (21, 30);
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Bot token (TELEGRAM_TOKEN). None when unset or empty.
    pub telegram_token: Option<String>,
    /// Target chat (CHAT_ID). None when unset or empty.
    pub chat_id: Option<String>,
    /// Alert when the next jackpot estimate is strictly above this (JACKPOT_THRESHOLD)
    pub jackpot_threshold: u64,
    /// Shared secret for the test/bypass query parameters (TEST_KEY)
    pub test_key: Option<String>,
    /// Deployment tag echoed in responses (APP_ENV)
    pub env_tag: String,
    pub results_url: String,
    pub telegram_api_url: String,
    pub log_level: String,
    pub api_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            telegram_token: non_empty_var("TELEGRAM_TOKEN"),
            chat_id: non_empty_var("CHAT_ID"),
            jackpot_threshold: match non_empty_var("JACKPOT_THRESHOLD") {
                Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                    AppError::Config("JACKPOT_THRESHOLD must be a non-negative integer".to_string())
                })?,
                None => DEFAULT_JACKPOT_THRESHOLD,
            },
            test_key: non_empty_var("TEST_KEY"),
            env_tag: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            results_url: std::env::var("RESULTS_URL").unwrap_or_else(|_| RESULTS_URL.to_string()),
            telegram_api_url: std::env::var("TELEGRAM_API_URL")
                .unwrap_or_else(|_| TELEGRAM_API_URL.to_string()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            api_port: std::env::var("API_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse::<u16>()
                .map_err(|_| AppError::Config("API_PORT must be a valid port number".to_string()))?,
        })
    }

    /// True only when TEST_KEY is configured and `key` matches it exactly.
    pub fn key_is_valid(&self, key: Option<&str>) -> bool {
        match (self.test_key.as_deref(), key) {
            (Some(expected), Some(given)) => expected == given,
            _ => false,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
impl Config {
    /// Config pointing both outbound URLs at test servers.
    pub fn for_tests(results_url: &str, telegram_api_url: &str) -> Self {
        Self {
            telegram_token: Some("test-token".to_string()),
            chat_id: Some("42".to_string()),
            jackpot_threshold: DEFAULT_JACKPOT_THRESHOLD,
            test_key: Some("s3cret".to_string()),
            env_tag: "test".to_string(),
            results_url: results_url.to_string(),
            telegram_api_url: telegram_api_url.to_string(),
            log_level: "debug".to_string(),
            api_port: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_requires_configured_secret() {
        let mut cfg = Config::for_tests("http://x", "http://y");
        assert!(cfg.key_is_valid(Some("s3cret")));
        assert!(!cfg.key_is_valid(Some("wrong")));
        assert!(!cfg.key_is_valid(None));

        cfg.test_key = None;
        assert!(!cfg.key_is_valid(Some("")));
        assert!(!cfg.key_is_valid(Some("s3cret")));
    }
}
