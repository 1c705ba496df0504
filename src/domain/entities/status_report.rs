use chrono::{Local, TimeZone};
use serde::Serialize;
use serde_json::Value;

/// Placeholder shown for any report field the terminal did not send.
pub const NOT_AVAILABLE: &str = "N/A";

/// The terminal's status document, kept as the decoded JSON value.
///
/// Nothing about its shape is enforced. Every accessor returns `None` for a
/// missing key, a JSON `null`, or a document that is not an object at all.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StatusReport(Value);

impl StatusReport {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Top-level field lookup.
    pub fn field(&self, key: &str) -> Option<&Value> {
        non_null(self.0.get(key))
    }

    pub fn account(&self) -> Option<&Value> {
        self.field("account")
    }

    pub fn server(&self) -> Option<&Value> {
        self.field("server")
    }

    pub fn ts(&self) -> Option<&Value> {
        self.field("ts")
    }

    pub fn balance(&self) -> Option<&Value> {
        self.field("balance")
    }

    pub fn equity(&self) -> Option<&Value> {
        self.field("equity")
    }

    pub fn margin(&self) -> Option<&Value> {
        self.field("margin")
    }

    pub fn free_margin(&self) -> Option<&Value> {
        self.field("free_margin")
    }

    pub fn margin_level(&self) -> Option<&Value> {
        self.field("margin_level")
    }

    pub fn floating_pnl(&self) -> Option<&Value> {
        self.field("floating_pnl")
    }

    pub fn day_start_equity(&self) -> Option<&Value> {
        self.field("day_start_equity")
    }

    pub fn daily_pnl(&self) -> Option<&Value> {
        self.field("daily_pnl")
    }

    pub fn daily_return(&self) -> Option<&Value> {
        self.field("daily_return")
    }

    pub fn metrics(&self) -> Metrics {
        Metrics::from_value(self.field("metrics"))
    }

    /// Open positions in the order the terminal listed them.
    pub fn positions(&self) -> Vec<PositionView> {
        match self.field("positions") {
            Some(Value::Array(items)) => items.iter().map(PositionView::from_value).collect(),
            _ => Vec::new(),
        }
    }
}

/// Terminal-side health counters nested under `metrics`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Metrics {
    pub poll_latency_ms: Option<Value>,
    pub last_http_code: Option<Value>,
    pub last_error: Option<Value>,
}

impl Metrics {
    fn from_value(value: Option<&Value>) -> Self {
        let get = |key: &str| non_null(value.and_then(|v| v.get(key))).cloned();
        Self {
            poll_latency_ms: get("poll_latency_ms"),
            last_http_code: get("last_http_code"),
            last_error: get("last_error"),
        }
    }
}

/// One open position as reported by the terminal.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PositionView {
    pub ticket: Option<Value>,
    pub symbol: Option<Value>,
    #[serde(rename = "type")]
    pub kind: Option<Value>,
    pub lots: Option<Value>,
    pub open_price: Option<Value>,
    pub sl: Option<Value>,
    pub tp: Option<Value>,
    pub open_time: Option<Value>,
    pub profit: Option<Value>,
    /// `open_time` rendered as local `YYYY-MM-DD HH:MM:SS`, or `N/A`.
    #[serde(rename = "openTimeStr")]
    pub open_time_str: String,
}

impl PositionView {
    pub fn from_value(value: &Value) -> Self {
        let get = |key: &str| non_null(value.get(key)).cloned();
        let open_time = get("open_time");
        let open_time_str = format_open_time(open_time.as_ref());
        Self {
            ticket: get("ticket"),
            symbol: get("symbol"),
            kind: get("type"),
            lots: get("lots"),
            open_price: get("open_price"),
            sl: get("sl"),
            tp: get("tp"),
            open_time,
            profit: get("profit"),
            open_time_str,
        }
    }
}

/// Render a unix-seconds timestamp in server local time.
///
/// Non-numeric or absent input yields `N/A`; a number chrono cannot place on
/// the calendar falls back to its JSON text.
pub fn format_open_time(open_time: Option<&Value>) -> String {
    let Some(Value::Number(number)) = open_time else {
        return NOT_AVAILABLE.to_string();
    };

    let seconds = match number.as_i64() {
        Some(secs) => Some(secs),
        None => number
            .as_f64()
            .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
            .map(|f| f.trunc() as i64),
    };

    seconds
        .and_then(|secs| Local.timestamp_opt(secs, 0).single())
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| number.to_string())
}

fn non_null(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}
