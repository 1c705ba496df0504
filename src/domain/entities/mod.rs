pub mod command;
pub mod ingestion_record;
pub mod status_report;
