//! Pulls draw fields out of results page markup.
//!
//! Plain pattern matches, no HTML parsing. A markup change on the site makes
//! these return `None`/`false` rather than an error.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static DRAW_NO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Draw No\.\s*(\d+)").expect("valid draw number regex"));

static NEXT_JACKPOT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Next Jackpot\.?\s*\$([\d,]+)").expect("valid next jackpot regex")
});

const NO_TOP_TIER_WINNER: &str = "group 1 has no winner";

/// First "Draw No. <digits>" on the page.
pub fn parse_latest_draw_no(text: &str) -> Option<u64> {
    DRAW_NO_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// "Next Jackpot $1,234,567" with separators stripped.
pub fn parse_next_jackpot_amount(text: &str) -> Option<u64> {
    let raw = NEXT_JACKPOT_RE.captures(text)?.get(1)?.as_str();
    raw.replace(',', "").parse().ok()
}

pub fn had_no_top_tier_winner(text: &str) -> bool {
    text.to_lowercase().contains(NO_TOP_TIER_WINNER)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DrawSnapshot {
    pub latest_draw_no: Option<u64>,
    pub next_jackpot_amount: Option<u64>,
    pub had_no_top_tier_winner: bool,
}

impl DrawSnapshot {
    pub fn from_page(text: &str) -> Self {
        Self {
            latest_draw_no: parse_latest_draw_no(text),
            next_jackpot_amount: parse_next_jackpot_amount(text),
            had_no_top_tier_winner: had_no_top_tier_winner(text),
        }
    }
}
