use chrono::{DateTime, Local};
use serde::Serialize;
use serde_json::Value;

use crate::domain::entities::status_report::{Metrics, PositionView, StatusReport};

const RECEIVED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Result of decoding the request body.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    Parsed(StatusReport),
    Failed { reason: String, detail: String },
}

impl ParseOutcome {
    pub fn is_parsed(&self) -> bool {
        matches!(self, ParseOutcome::Parsed(_))
    }

    pub fn report(&self) -> Option<&StatusReport> {
        match self {
            ParseOutcome::Parsed(report) => Some(report),
            ParseOutcome::Failed { .. } => None,
        }
    }
}

/// Fields copied out of the report at ingestion time for the history listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Headline {
    pub account: Option<Value>,
    pub server: Option<Value>,
    pub balance: Option<Value>,
    pub equity: Option<Value>,
    pub floating_pnl: Option<Value>,
}

impl Headline {
    pub fn from_outcome(outcome: &ParseOutcome) -> Self {
        match outcome.report() {
            Some(report) => Self {
                account: report.account().cloned(),
                server: report.server().cloned(),
                balance: report.balance().cloned(),
                equity: report.equity().cloned(),
                floating_pnl: report.floating_pnl().cloned(),
            },
            None => Self::default(),
        }
    }
}

/// Request line and headers of the exchange that produced a record.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RequestMeta {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
}

/// One status report exchange. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestionRecord {
    pub received_at: DateTime<Local>,
    pub source_address: String,
    pub request: RequestMeta,
    /// Body exactly as received, kept whatever the parse outcome.
    pub raw_body: String,
    pub outcome: ParseOutcome,
    pub trailing_data: Option<String>,
    pub headline: Headline,
}

impl IngestionRecord {
    pub fn new(
        source_address: String,
        request: RequestMeta,
        raw_body: String,
        outcome: ParseOutcome,
        trailing_data: Option<String>,
    ) -> Self {
        let headline = Headline::from_outcome(&outcome);
        Self {
            received_at: Local::now(),
            source_address,
            request,
            raw_body,
            outcome,
            trailing_data,
            headline,
        }
    }

    pub fn received_at_display(&self) -> String {
        self.received_at.format(RECEIVED_AT_FORMAT).to_string()
    }

    /// Row for the history listing.
    pub fn summary(&self) -> RecordSummary {
        let (parse_status, parse_error) = match &self.outcome {
            ParseOutcome::Parsed(_) => ("parsed", None),
            ParseOutcome::Failed { reason, .. } => ("failed", Some(reason.clone())),
        };
        RecordSummary {
            received_at: self.received_at_display(),
            source_address: self.source_address.clone(),
            headline: self.headline.clone(),
            parse_status,
            parse_error,
            trailing_data: self.trailing_data.clone(),
        }
    }

    /// Flattened view of this record for the detail panel.
    pub fn details(&self, body_preview_chars: usize) -> RecordDetails {
        let body_preview = preview(&self.raw_body, body_preview_chars);
        let body = match &self.outcome {
            ParseOutcome::Failed { reason, detail } => DetailBody::Failed {
                error: format!("JSON parse failed: {}", reason),
                full_error: detail.clone(),
            },
            ParseOutcome::Parsed(report) => DetailBody::Parsed(Box::new(ReportDetails {
                account: report.account().cloned(),
                server: report.server().cloned(),
                ts: report.ts().cloned(),
                balance: report.balance().cloned(),
                equity: report.equity().cloned(),
                margin: report.margin().cloned(),
                free_margin: report.free_margin().cloned(),
                margin_level: report.margin_level().cloned(),
                floating_pnl: report.floating_pnl().cloned(),
                day_start_equity: report.day_start_equity().cloned(),
                daily_pnl: report.daily_pnl().cloned(),
                daily_return: report.daily_return().cloned(),
                metrics: report.metrics(),
                positions: report.positions(),
            })),
        };

        RecordDetails {
            received_at: self.received_at_display(),
            source_address: self.source_address.clone(),
            body_preview,
            trailing_data: self.trailing_data.clone(),
            body,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSummary {
    pub received_at: String,
    pub source_address: String,
    #[serde(flatten)]
    pub headline: Headline,
    pub parse_status: &'static str,
    pub parse_error: Option<String>,
    pub trailing_data: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordDetails {
    pub received_at: String,
    pub source_address: String,
    pub body_preview: String,
    pub trailing_data: Option<String>,
    #[serde(flatten)]
    pub body: DetailBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DetailBody {
    Failed {
        error: String,
        #[serde(rename = "fullError")]
        full_error: String,
    },
    Parsed(Box<ReportDetails>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportDetails {
    pub account: Option<Value>,
    pub server: Option<Value>,
    pub ts: Option<Value>,
    pub balance: Option<Value>,
    pub equity: Option<Value>,
    pub margin: Option<Value>,
    pub free_margin: Option<Value>,
    pub margin_level: Option<Value>,
    pub floating_pnl: Option<Value>,
    pub day_start_equity: Option<Value>,
    pub daily_pnl: Option<Value>,
    pub daily_return: Option<Value>,
    #[serde(flatten)]
    pub metrics: Metrics,
    pub positions: Vec<PositionView>,
}

/// First `max_chars` characters, with `...` appended when cut.
fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parsed_record() -> IngestionRecord {
        let report = StatusReport::new(json!({
            "account": 42,
            "server": "Demo",
            "balance": 1000,
            "equity": 1010,
            "floating_pnl": 10,
            "metrics": {"poll_latency_ms": 12},
            "positions": []
        }));
        IngestionRecord::new(
            "10.0.0.1".to_string(),
            RequestMeta::default(),
            "{\"account\":42}".to_string(),
            ParseOutcome::Parsed(report),
            None,
        )
    }

    fn failed_record(body: &str) -> IngestionRecord {
        IngestionRecord::new(
            "10.0.0.2".to_string(),
            RequestMeta::default(),
            body.to_string(),
            ParseOutcome::Failed {
                reason: "expected value at line 1 column 1".to_string(),
                detail: "Syntax error at line 1, column 1".to_string(),
            },
            None,
        )
    }

    #[test]
    fn test_headline_copied_from_report() {
        let record = parsed_record();
        assert_eq!(record.headline.account, Some(json!(42)));
        assert_eq!(record.headline.server, Some(json!("Demo")));
        assert_eq!(record.headline.floating_pnl, Some(json!(10)));
    }

    #[test]
    fn test_headline_empty_when_failed() {
        let record = failed_record("not json");
        assert_eq!(record.headline, Headline::default());
        assert_eq!(record.raw_body, "not json");
        assert!(!record.outcome.is_parsed());
    }

    #[test]
    fn test_summary_status() {
        let summary = parsed_record().summary();
        assert_eq!(summary.parse_status, "parsed");
        assert!(summary.parse_error.is_none());

        let summary = failed_record("x").summary();
        assert_eq!(summary.parse_status, "failed");
        assert!(summary.parse_error.unwrap().starts_with("expected value"));
    }

    #[test]
    fn test_details_failed_carries_error() {
        let details = failed_record("garbage").details(500);
        match details.body {
            DetailBody::Failed { error, full_error } => {
                assert!(error.starts_with("JSON parse failed: "));
                assert!(!full_error.is_empty());
            }
            DetailBody::Parsed(_) => panic!("expected failed details"),
        }
        assert_eq!(details.body_preview, "garbage");
    }

    #[test]
    fn test_details_parsed_serializes_flat() {
        let details = parsed_record().details(500);
        let value = serde_json::to_value(&details).unwrap();
        assert_eq!(value["account"], json!(42));
        assert_eq!(value["poll_latency_ms"], json!(12));
        assert_eq!(value["last_error"], Value::Null);
        assert_eq!(value["positions"], json!([]));
        assert_eq!(value["sourceAddress"], json!("10.0.0.1"));
        assert_eq!(value["bodyPreview"], json!("{\"account\":42}"));
        assert!(value.get("receivedAt").is_some());
        assert!(value.get("source_address").is_none());
    }

    #[test]
    fn test_envelope_keys_are_camel_case_report_keys_are_not() {
        let value = serde_json::to_value(failed_record("x").details(500)).unwrap();
        assert!(value["error"].as_str().unwrap().starts_with("JSON parse failed: "));
        assert!(value.get("fullError").is_some());
        assert!(value.get("full_error").is_none());

        let value = serde_json::to_value(parsed_record().summary()).unwrap();
        assert_eq!(value["parseStatus"], "parsed");
        assert_eq!(value["parseError"], Value::Null);
        assert_eq!(value["trailingData"], Value::Null);
        assert_eq!(value["sourceAddress"], "10.0.0.1");
        assert_eq!(value["floating_pnl"], json!(10));
        assert!(value.get("parse_status").is_none());
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        assert_eq!(preview("abcdef", 3), "abc...");
        assert_eq!(preview("abc", 3), "abc");
        assert_eq!(preview("héllo", 2), "hé...");
        assert_eq!(preview("", 5), "");
    }

    #[test]
    fn test_received_at_display_format() {
        let shown = parsed_record().received_at_display();
        assert_eq!(shown.len(), 19);
        assert_eq!(&shown[4..5], "-");
        assert_eq!(&shown[13..14], ":");
    }
}
