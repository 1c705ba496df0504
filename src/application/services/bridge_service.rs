//! Terminal exchange and operator queue operations over the two shared stores.

use std::sync::Arc;
use tracing::{info, warn};

use crate::config::BridgeConfig;
use crate::domain::entities::command::{Command, CommandRequest};
use crate::domain::entities::ingestion_record::{
    IngestionRecord, ParseOutcome, RecordDetails, RequestMeta,
};
use crate::domain::entities::status_report::StatusReport;
use crate::domain::errors::{SplitError, ValidationError};
use crate::domain::services::command_outbox::CommandOutbox;
use crate::domain::services::document_splitter::split_first_document;
use crate::domain::services::history_ring::HistoryRing;
use crate::domain::services::wire_protocol::encode_batch;

/// What the terminal sent, as seen after the body was read.
#[derive(Debug, Clone)]
pub struct InboundReport {
    pub source_address: String,
    pub request: RequestMeta,
    pub body: Result<String, String>,
}

/// Reply to one terminal poll.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestReply {
    pub delivered: Vec<Command>,
    pub body: String,
}

pub struct BridgeService {
    pub history: Arc<HistoryRing>,
    pub outbox: Arc<CommandOutbox>,
    pub config: BridgeConfig,
}

impl BridgeService {
    pub fn new(config: BridgeConfig) -> Self {
        let history = Arc::new(HistoryRing::new(config.history_capacity));
        let outbox = Arc::new(CommandOutbox::new());
        Self::with_stores(config, history, outbox)
    }

    pub fn with_stores(
        config: BridgeConfig,
        history: Arc<HistoryRing>,
        outbox: Arc<CommandOutbox>,
    ) -> Self {
        Self {
            history,
            outbox,
            config,
        }
    }

    /// Record a status report and hand back every pending command.
    ///
    /// Never fails: a bad body becomes a `Failed` outcome on the record. The
    /// returned commands are removed from the outbox whether or not the reply
    /// reaches the terminal.
    pub fn ingest(&self, inbound: InboundReport) -> IngestReply {
        let (raw_body, split) = match inbound.body {
            Ok(body) => {
                let split = split_first_document(&body);
                (body, split)
            }
            Err(cause) => (String::new(), Err(SplitError::BodyUnreadable(cause))),
        };

        let (outcome, trailing_data) = match split {
            Ok(doc) => {
                let trailing = doc.trailing_preview(self.config.trailing_preview_bytes);
                if let Some(rest) = &trailing {
                    info!(
                        "Trailing data after status report from {}: {}",
                        inbound.source_address, rest
                    );
                }
                (ParseOutcome::Parsed(StatusReport::new(doc.value)), trailing)
            }
            Err(e) => {
                warn!(
                    "Status report from {} not parsed: {} (body: {})",
                    inbound.source_address,
                    e.reason(),
                    preview_chars(&raw_body, self.config.body_preview_chars)
                );
                (
                    ParseOutcome::Failed {
                        reason: e.reason(),
                        detail: e.detail(),
                    },
                    None,
                )
            }
        };

        let record = IngestionRecord::new(
            inbound.source_address,
            inbound.request,
            raw_body,
            outcome,
            trailing_data,
        );
        self.history.append(record);

        let delivered = self.outbox.drain_all();
        if !delivered.is_empty() {
            let ids: Vec<u64> = delivered.iter().map(|c| c.id).collect();
            info!("Delivering {} command(s) to terminal: {:?}", delivered.len(), ids);
        }
        let body = encode_batch(&delivered);

        IngestReply { delivered, body }
    }

    pub fn enqueue_command(&self, request: &CommandRequest) -> Result<u64, ValidationError> {
        match self.outbox.enqueue(request) {
            Ok(id) => {
                info!(
                    "Queued command #{}: {} {} {}",
                    id,
                    request.direction.trim().to_uppercase(),
                    request.symbol.trim().to_uppercase(),
                    request.volume.trim()
                );
                Ok(id)
            }
            Err(e) => {
                warn!("Dropped operator command: {}", e);
                Err(e)
            }
        }
    }

    pub fn delete_command(&self, position: usize) -> bool {
        match self.outbox.delete_at(position) {
            Some(command) => {
                info!("Removed command #{} at position {}", command.id, position);
                true
            }
            None => {
                warn!("No command at position {}, nothing removed", position);
                false
            }
        }
    }

    pub fn clear_commands(&self) -> usize {
        let removed = self.outbox.clear();
        info!("Cleared {} pending command(s)", removed);
        removed
    }

    pub fn latest_details(&self) -> Option<RecordDetails> {
        self.history
            .latest()
            .map(|record| record.details(self.config.body_preview_chars))
    }
}

fn preview_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => &text[..cut],
        None => text,
    }
}
