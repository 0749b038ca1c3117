//! Report rendering for the console and messaging sinks.
//!
//! Pure string building; delivery happens in the poller.

use super::summary::PortfolioSummary;
use crate::domain::ValuedPosition;

/// A rendered poll-cycle report: a plain-text console mirror and a
/// Markdown-formatted message body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub console_text: String,
    pub message_text: String,
}

/// Render valued positions and their summary into both report forms.
///
/// Display signs come from each position's after-fee profit flag, so a
/// position whose raw PnL is positive but whose after-fee PnL is negative
/// reads as a loss everywhere. Summary lines always carry an explicit sign,
/// `+` for values >= 0.
pub fn format(
    valued: &[ValuedPosition],
    summary: Option<&PortfolioSummary>,
    timestamp: &str,
    wallet: &str,
) -> Report {
    if valued.is_empty() {
        let line = format!("No open positions found for {}", wallet);
        return Report {
            message_text: format!("📊 *PnL Report*\n\n{}", line),
            console_text: line,
        };
    }

    let mut console = format!(
        "📊 PnL Update - {} - {} position(s)\n{}\n",
        timestamp,
        valued.len(),
        "=".repeat(80)
    );
    let mut message = format!(
        "📊 *PnL Report* - {}\n*{} position(s)*\n\n",
        timestamp,
        valued.len()
    );

    for v in valued {
        let sign = if v.is_profit() { "+" } else { "-" };
        let trend = if v.is_profit() { "📈" } else { "📉" };
        let pnl_abs = v.pnl_after_fees.abs();
        let pct_abs = v.pnl_after_fees_percent.abs();

        console.push_str(&format!(
            "🎯 {} {} | ${:.2} | PnL: {}${:.2} ({}{:.2}%) {}\n",
            v.side, v.display_name, v.current_price_usd, sign, pnl_abs, sign, pct_abs, trend
        ));

        message.push_str(&format!("🎯 *{} {}*\n", v.side, v.display_name));
        message.push_str(&format!("💰 Current: ${:.2}\n", v.current_price_usd));
        message.push_str(&format!("📊 Entry: ${:.2}\n", v.entry_price_usd));
        message.push_str(&format!("💵 Size: ${:.2}\n", v.size_usd));
        message.push_str(&format!("🔒 Collateral: ${:.2}\n", v.collateral_usd));
        message.push_str(&format!(
            "💼 PnL: {}${:.2} ({}{:.2}%) {}\n\n",
            sign, pnl_abs, sign, pct_abs, trend
        ));
    }

    if let Some(summary) = summary {
        let total_sign = if summary.total_pnl_after_fees.is_negative() {
            "-"
        } else {
            "+"
        };
        let avg_sign = if summary.avg_pnl_after_fees_percent.is_negative() {
            "-"
        } else {
            "+"
        };
        let total_abs = summary.total_pnl_after_fees.abs();
        let avg_abs = summary.avg_pnl_after_fees_percent.abs();

        console.push_str(&format!(
            "📈 Total PnL: {}${:.2} | Avg %: {}{:.2}%\n",
            total_sign, total_abs, avg_sign, avg_abs
        ));
        message.push_str(&format!("📈 *Total PnL: {}${:.2}*\n", total_sign, total_abs));
        message.push_str(&format!("📊 *Avg %: {}{:.2}%*", avg_sign, avg_abs));
    }

    Report {
        console_text: console,
        message_text: message,
    }
}
