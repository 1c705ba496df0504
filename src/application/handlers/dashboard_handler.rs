use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::application::services::bridge_service::BridgeService;
use crate::domain::entities::command::{Command, Direction};
use crate::domain::entities::ingestion_record::{RecordDetails, RecordSummary};
use crate::domain::services::wire_protocol::encode_command;

/// History listing, newest first
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub capacity: usize,
    pub records: Vec<RecordSummary>,
}

/// One pending command as shown to the operator
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandView {
    pub position: usize,
    pub id: u64,
    pub symbol: String,
    pub direction: Direction,
    pub volume: f64,
    pub sl: Option<f64>,
    pub tp: Option<f64>,
    pub created_at: String,
    pub wire_line: String,
}

impl CommandView {
    fn new(position: usize, command: &Command) -> Self {
        Self {
            position,
            id: command.id,
            symbol: command.symbol.clone(),
            direction: command.direction,
            volume: command.volume.value(),
            sl: command.sl.map(|level| level.value()),
            tp: command.tp.map(|level| level.value()),
            created_at: command.created_at_display(),
            wire_line: encode_command(command),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub history_len: usize,
    pub pending_commands: usize,
}

pub async fn index() -> &'static str {
    "Terminal bridge is running"
}

pub async fn get_history(State(service): State<Arc<BridgeService>>) -> Json<HistoryResponse> {
    let records = service
        .history
        .snapshot()
        .iter()
        .map(|record| record.summary())
        .collect();
    Json(HistoryResponse {
        capacity: service.history.capacity(),
        records,
    })
}

pub async fn get_latest(
    State(service): State<Arc<BridgeService>>,
) -> Json<Option<RecordDetails>> {
    Json(service.latest_details())
}

pub async fn get_commands(State(service): State<Arc<BridgeService>>) -> Json<Vec<CommandView>> {
    let commands = service.outbox.snapshot();
    Json(
        commands
            .iter()
            .enumerate()
            .map(|(position, command)| CommandView::new(position, command))
            .collect(),
    )
}

pub async fn health_check(State(service): State<Arc<BridgeService>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "running",
        history_len: service.history.len(),
        pending_commands: service.outbox.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::command::{CommandRequest, CommandSpec};

    #[test]
    fn test_command_view() {
        let request = CommandRequest::new("EURUSD", "SELL", "0.2").with_tp("1.05");
        let command = Command::new(4, CommandSpec::try_from(&request).unwrap());
        let view = CommandView::new(1, &command);
        assert_eq!(view.position, 1);
        assert_eq!(view.id, 4);
        assert_eq!(view.sl, None);
        assert_eq!(view.tp, Some(1.05));
        assert_eq!(view.wire_line, "SELL,EURUSD,0.2,0,1.05");

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["direction"], "SELL");
        assert_eq!(json["wireLine"], "SELL,EURUSD,0.2,0,1.05");
        assert!(json["createdAt"].is_string());
        assert!(json.get("wire_line").is_none());
    }

    #[test]
    fn test_health_response_keys() {
        let health = HealthResponse {
            status: "running",
            history_len: 3,
            pending_commands: 1,
        };
        let json = serde_json::to_value(&health).unwrap();
        assert_eq!(json["historyLen"], 3);
        assert_eq!(json["pendingCommands"], 1);
        assert!(json.get("pending_commands").is_none());
    }
}
