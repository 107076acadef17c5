use serde::Serialize;

use crate::extract::DrawSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlertDecision {
    pub jackpot_exceeds_threshold: bool,
    pub cascade_predicted: bool,
}

impl AlertDecision {
    pub fn evaluate(next_jackpot: Option<u64>, threshold: u64, cascade_predicted: bool) -> Self {
        Self {
            jackpot_exceeds_threshold: next_jackpot.is_some_and(|amt| amt > threshold),
            cascade_predicted,
        }
    }

    pub fn should_alert(&self) -> bool {
        self.jackpot_exceeds_threshold || self.cascade_predicted
    }

    /// HTML message with one line per triggered condition, then the draw checked.
    pub fn compose_message(&self, snapshot: &DrawSnapshot, threshold: u64) -> String {
        let mut lines = Vec::with_capacity(3);
        if self.jackpot_exceeds_threshold {
            if let Some(amt) = snapshot.next_jackpot_amount {
                lines.push(format!(
                    "💰 <b>TOTO jackpot above S${}</b>, est. <b>S${}</b>",
                    format_amount(threshold),
                    format_amount(amt),
                ));
            }
        }
        if self.cascade_predicted {
            lines.push(
                "⚠️ <b>Next draw is a Cascade Draw</b> (after 3 consecutive no-winner draws)."
                    .to_string(),
            );
        }
        if let Some(draw_no) = snapshot.latest_draw_no {
            lines.push(format!("(Latest draw checked: #{draw_no})"));
        }
        lines.join("\n")
    }
}

/// 12345678 -> "12,345,678"
pub fn format_amount(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
