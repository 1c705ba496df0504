//! Operator form routes. Fire-and-forget: every request ends in a redirect to
//! the dashboard, and invalid input is dropped without a structured error.

use axum::{
    extract::{Path, State},
    response::Redirect,
    Form,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::application::services::bridge_service::BridgeService;
use crate::domain::entities::command::CommandRequest;

const DASHBOARD_PATH: &str = "/";

/// Fields of the "queue command" form.
#[derive(Debug, Default, Deserialize)]
pub struct CommandForm {
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub direction: String,
    #[serde(default)]
    pub volume: String,
    pub sl: Option<String>,
    pub tp: Option<String>,
}

impl From<CommandForm> for CommandRequest {
    fn from(form: CommandForm) -> Self {
        CommandRequest {
            symbol: form.symbol,
            direction: form.direction,
            volume: form.volume,
            sl: form.sl,
            tp: form.tp,
        }
    }
}

pub async fn enqueue_command(
    State(service): State<Arc<BridgeService>>,
    form: Option<Form<CommandForm>>,
) -> Redirect {
    match form {
        Some(Form(form)) => {
            // Rejections are logged by the service
            let _ = service.enqueue_command(&CommandRequest::from(form));
        }
        None => tracing::warn!("Unreadable command form, nothing queued"),
    }
    Redirect::to(DASHBOARD_PATH)
}

pub async fn delete_command(
    State(service): State<Arc<BridgeService>>,
    Path(index): Path<usize>,
) -> Redirect {
    service.delete_command(index);
    Redirect::to(DASHBOARD_PATH)
}

pub async fn clear_commands(State(service): State<Arc<BridgeService>>) -> Redirect {
    service.clear_commands();
    Redirect::to(DASHBOARD_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_into_request() {
        let form = CommandForm {
            symbol: "eurusd".to_string(),
            direction: "buy".to_string(),
            volume: "0.1".to_string(),
            sl: Some(String::new()),
            tp: Some("1.2".to_string()),
        };
        let request = CommandRequest::from(form);
        assert_eq!(
            request,
            CommandRequest::new("eurusd", "buy", "0.1")
                .with_sl("")
                .with_tp("1.2")
        );
    }

    #[test]
    fn test_form_defaults_are_empty() {
        let request = CommandRequest::from(CommandForm::default());
        assert!(request.symbol.is_empty());
        assert!(request.sl.is_none());
    }
}
