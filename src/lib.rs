pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{AreaCommand, CliConfig};

pub use crate::adapters::http::HttpTransport;
pub use crate::config::ClientConfig;
pub use crate::core::area_api::AreaApi;
pub use crate::domain::ports::{ApiRequest, HttpMethod, Transport};
pub use crate::utils::error::{AreaClientError, Result};
