// Résumé and save-location state: in-memory profile with JSON persistence,
// upload decoding, and the HTTP handlers that mutate it.

pub mod handlers;
pub mod ingest;
pub mod store;
