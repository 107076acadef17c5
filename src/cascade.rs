use tracing::{debug, info};

use crate::error::Result;
use crate::extract::had_no_top_tier_winner;
use crate::fetcher::ResultsClient;

/// The three draws that decide whether the next one cascades:
/// `[n, n-1, n-2]`. None when `n-2` would not be a real draw.
pub fn cascade_window(latest_draw_no: u64) -> Option<[u64; 3]> {
    let oldest = latest_draw_no.checked_sub(2).filter(|n| *n >= 1)?;
    Some([latest_draw_no, oldest + 1, oldest])
}

/// True when the latest draw and the two before it all had no Group 1 winner.
///
/// Pages are fetched newest first, one at a time, stopping at the first draw
/// that had a winner. Any fetch failure is returned to the caller.
pub async fn is_next_draw_cascade(client: &ResultsClient, latest_draw_no: u64) -> Result<bool> {
    let Some(window) = cascade_window(latest_draw_no) else {
        debug!(draw_no = latest_draw_no, "too few draws for a cascade");
        return Ok(false);
    };

    for draw_no in window {
        let page = client.fetch_page(Some(draw_no)).await?;
        if !had_no_top_tier_winner(&page) {
            info!(draw_no, "Group 1 won, next draw is not a cascade");
            return Ok(false);
        }
        debug!(draw_no, "no Group 1 winner");
    }

    info!(latest_draw_no, "three straight draws without Group 1 winner, next draw cascades");
    Ok(true)
}
