use crate::config::ClientConfig;
use crate::utils::error::{AreaClientError, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "area-client")]
#[command(about = "Command line client for the area (region) REST API")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// API base URL, e.g. http://127.0.0.1:8888/api
    #[arg(long, env = "AREA_API_BASE_URL", global = true)]
    pub base_url: Option<String>,

    #[arg(long, env = "AREA_API_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    #[arg(long, env = "AREA_API_USER_ID", global = true)]
    pub user_id: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: AreaCommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum AreaCommand {
    /// Create an area
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        code: i64,
        #[arg(long, default_value_t = 0)]
        parent: i64,
        #[arg(long, default_value = "")]
        pinyin: String,
    },
    /// Delete an area by database id and area code
    Delete {
        #[arg(long)]
        id: u64,
        #[arg(long)]
        code: i64,
    },
    /// Delete several areas by database id
    DeleteMany {
        #[arg(required = true, value_delimiter = ',')]
        ids: Vec<u64>,
    },
    /// Update an area
    Update {
        #[arg(long)]
        id: u64,
        #[arg(long)]
        code: i64,
        #[arg(long)]
        name: String,
        #[arg(long, default_value_t = 0)]
        parent: i64,
        #[arg(long, default_value = "")]
        pinyin: String,
        #[arg(long)]
        level: i32,
    },
    /// List areas page by page
    List {
        #[arg(long, default_value_t = 1)]
        page: i64,
        #[arg(long, default_value_t = 10)]
        page_size: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        code: Option<i64>,
        #[arg(long)]
        parent: Option<i64>,
        #[arg(long)]
        level: Option<i32>,
        #[arg(long)]
        order_key: Option<String>,
        #[arg(long)]
        desc: bool,
    },
    /// Get an area by database id
    Get { id: u64 },
    /// Get an area by area code
    GetByAreaId { area_id: i64 },
    /// Fetch the area tree
    Tree {
        #[arg(long)]
        parent_id: Option<i64>,
        #[arg(long)]
        level: Option<i32>,
        /// Filter by area status
        #[arg(long)]
        status: Option<bool>,
    },
    /// List the direct children of an area
    Children { parent_id: i64 },
    /// Import areas from a .json or .csv file
    Import {
        file: PathBuf,
        #[arg(long, help = "Clear existing areas before importing")]
        clear: bool,
    },
}

impl CliConfig {
    /// 讀取設定檔 (若有)，再以命令列參數覆蓋
    pub fn resolve_client_config(&self) -> Result<ClientConfig> {
        let mut config = match (&self.config, &self.base_url) {
            (Some(path), _) => ClientConfig::from_file(path)?,
            (None, Some(base_url)) => ClientConfig::new(base_url.clone()),
            (None, None) => {
                return Err(AreaClientError::MissingConfigError {
                    field: "server.base_url (use --config or --base-url)".to_string(),
                })
            }
        };

        if let Some(base_url) = &self.base_url {
            config.server.base_url = base_url.clone();
        }
        if let Some(timeout) = self.timeout {
            config.server.timeout_seconds = Some(timeout);
        }
        if let Some(token) = &self.token {
            config = config.with_token(token.clone());
        }
        if let Some(user_id) = &self.user_id {
            config = config.with_user_id(user_id.clone());
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliConfig {
        CliConfig::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_parse_delete_many_ids() {
        let cli = parse(&["area-client", "--base-url", "http://localhost:8888", "delete-many", "1,2,3"]);
        match cli.command {
            AreaCommand::DeleteMany { ids } => assert_eq!(ids, vec![1, 2, 3]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_tree_filters() {
        let cli = parse(&[
            "area-client",
            "--base-url",
            "http://localhost:8888",
            "tree",
            "--parent-id",
            "11",
            "--status",
            "true",
        ]);
        match cli.command {
            AreaCommand::Tree {
                parent_id,
                level,
                status,
            } => {
                assert_eq!(parent_id, Some(11));
                assert_eq!(level, None);
                assert_eq!(status, Some(true));
            }
            other => panic!("unexpected command: {other:?}"),
        }

        let cli = parse(&["area-client", "--base-url", "http://localhost:8888", "tree"]);
        assert!(matches!(
            cli.command,
            AreaCommand::Tree { status: None, .. }
        ));
    }

    #[test]
    fn test_flags_override_base_url() {
        let cli = parse(&[
            "area-client",
            "tree",
            "--base-url",
            "http://localhost:9999/api",
            "--token",
            "cli-token",
            "--timeout",
            "5",
        ]);

        let config = cli.resolve_client_config().unwrap();
        assert_eq!(config.base_url(), "http://localhost:9999/api");
        assert_eq!(config.token(), Some("cli-token"));
        assert_eq!(config.timeout_seconds(), 5);
    }

    #[test]
    fn test_missing_base_url_is_reported() {
        let cli = CliConfig {
            config: None,
            base_url: None,
            token: None,
            user_id: None,
            timeout: None,
            verbose: false,
            json_logs: false,
            command: AreaCommand::Children { parent_id: 11 },
        };

        assert!(matches!(
            cli.resolve_client_config(),
            Err(AreaClientError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_update_requires_level() {
        let result = CliConfig::try_parse_from([
            "area-client",
            "update",
            "--id",
            "1",
            "--code",
            "11",
            "--name",
            "北京",
        ]);
        assert!(result.is_err());
    }
}
