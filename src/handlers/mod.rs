pub mod ingest;
pub mod views;
