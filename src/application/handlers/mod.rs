pub mod admin_handler;
pub mod dashboard_handler;
pub mod ingestion_handler;
