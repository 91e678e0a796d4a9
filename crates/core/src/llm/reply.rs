//! Interpretation of the model's four-line keyed reply.
//!
//! Two stages: `scan_reply` extracts whatever keyed fields are present,
//! `fill_defaults` turns that into a complete recommendation per metal.

use crate::domain::instrument::{Instrument, PerMetal};
use crate::domain::recommendation::{Recommendation, Verdict, DEFAULT_REASON, DEFAULT_VERDICT};

pub fn verdict_key(instrument: Instrument) -> String {
    format!("{} Rec:", instrument.name())
}

pub fn reason_key(instrument: Instrument) -> String {
    format!("{} Reason:", instrument.name())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplyFields {
    pub verdict: Option<Verdict>,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedReply {
    pub gold: ReplyFields,
    pub silver: ReplyFields,
}

impl ParsedReply {
    pub fn fields(&self, instrument: Instrument) -> &ReplyFields {
        match instrument {
            Instrument::Gold => &self.gold,
            Instrument::Silver => &self.silver,
        }
    }

    fn fields_mut(&mut self, instrument: Instrument) -> &mut ReplyFields {
        match instrument {
            Instrument::Gold => &mut self.gold,
            Instrument::Silver => &mut self.silver,
        }
    }
}

/// Scans line by line. A line counts when it contains a key; its value is
/// everything after the first colon. Later lines overwrite earlier ones.
pub fn scan_reply(text: &str) -> ParsedReply {
    let keys: Vec<_> = Instrument::ALL
        .iter()
        .map(|i| (*i, verdict_key(*i), reason_key(*i)))
        .collect();

    let mut out = ParsedReply::default();
    for line in text.lines() {
        for (instrument, verdict_label, reason_label) in &keys {
            if line.contains(verdict_label.as_str()) {
                if let Some(verdict) = value_after_colon(line)
                    .map(|v| v.to_uppercase())
                    .and_then(|v| Verdict::from_reply_text(&v))
                {
                    out.fields_mut(*instrument).verdict = Some(verdict);
                }
            }
            if line.contains(reason_label.as_str()) {
                if let Some(reason) = value_after_colon(line) {
                    out.fields_mut(*instrument).reason = Some(reason);
                }
            }
        }
    }
    out
}

/// Missing fields become WAIT / "Market Uncertain".
pub fn fill_defaults(parsed: &ParsedReply) -> PerMetal<Recommendation> {
    PerMetal::from_fn(|instrument| {
        let fields = parsed.fields(instrument);
        Recommendation {
            instrument,
            verdict: fields.verdict.unwrap_or(DEFAULT_VERDICT),
            reason: fields
                .reason
                .clone()
                .unwrap_or_else(|| DEFAULT_REASON.to_string()),
            defaulted: fields.verdict.is_none() || fields.reason.is_none(),
        }
    })
}

fn value_after_colon(line: &str) -> Option<String> {
    let (_, value) = line.split_once(':')?;
    // Models often bold the key ("**Gold Rec:** BUY").
    let value = value.trim_matches(|c: char| c.is_whitespace() || c == '*');
    (!value.is_empty()).then(|| value.to_string())
}
