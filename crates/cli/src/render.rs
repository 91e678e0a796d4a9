use goldluck_core::domain::instrument::Instrument;
use goldluck_core::domain::recommendation::Verdict;
use goldluck_core::pipeline::{AdvisoryReport, RecommendationOutcome};
use std::fmt::Write;

pub fn render_report(report: &AdvisoryReport) -> String {
    let mut out = String::new();

    for warning in report.warnings() {
        let _ = writeln!(out, "warning: {warning}");
    }

    for instrument in Instrument::ALL {
        let landed = report.prices.landed.get(instrument);
        let signal = report.trends.signals.get(instrument);
        let _ = writeln!(
            out,
            "{:<14} {} {:>12}   {} (RSI {:.0})",
            format!("{} ({})", instrument, instrument.unit_label()),
            currency_symbol(&landed.currency),
            group_thousands(landed.value),
            signal.direction,
            signal.rsi
        );
    }
    let _ = writeln!(out, "premium: {:.1}%", report.premium_percent);
    out.push('\n');

    match &report.recommendation {
        RecommendationOutcome::Ready(set) => {
            let _ = writeln!(out, "AI prediction ({})", set.model);
            for instrument in Instrument::ALL {
                let rec = set.get(instrument);
                let _ = writeln!(
                    out,
                    "  {:<6} {} {}",
                    instrument.name().to_uppercase(),
                    verdict_badge(rec.verdict),
                    rec.verdict
                );
                let _ = writeln!(out, "         {}", rec.reason);
            }
        }
        RecommendationOutcome::Failed { error, raw_output } => {
            let _ = writeln!(out, "AI connection failed. Please try again.");
            let _ = writeln!(out, "  debug: {error}");
            if let Some(raw) = raw_output {
                let _ = writeln!(out, "  raw output: {raw}");
            }
        }
    }
    out
}

pub fn render_fetch_failure(err: &anyhow::Error) -> String {
    format!("Could not fetch prices: {err:#}")
}

fn verdict_badge(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Buy => "[+]",
        Verdict::Sell => "[-]",
        Verdict::Wait => "[=]",
    }
}

fn currency_symbol(code: &str) -> &str {
    match code {
        "INR" => "₹",
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        other => other,
    }
}

/// Rounds to a whole number and inserts `,` every three digits.
fn group_thousands(value: f64) -> String {
    let rounded = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(rounded.len() + rounded.len() / 3);
    for (i, ch) in rounded.chars().enumerate() {
        if i != 0 && (rounded.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0.0 && rounded != "0" {
        grouped.insert(0, '-');
    }
    grouped
}
