pub mod command_outbox;
pub mod document_splitter;
pub mod history_ring;
pub mod wire_protocol;
