// Adapters layer: concrete implementations for external systems (http transport, import files).

pub mod http;
pub mod import;
