use anyhow::Context;
use area_client::adapters::import::read_import_file;
use area_client::core::{Area, AreaSearch, AreaTreeFilter, IdRequest, IdsRequest};
use area_client::utils::error::ErrorSeverity;
use area_client::utils::{logger, validation::Validate};
use area_client::{AreaApi, AreaClientError, AreaCommand, CliConfig, HttpTransport, Transport};
use clap::Parser;
use serde_json::{json, Value};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.resolve_client_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    let level = config.logging.as_ref().and_then(|l| l.level.as_deref());
    if cli.json_logs || config.json_logs() {
        logger::init_json_logger(cli.verbose, level);
    } else {
        logger::init_cli_logger(cli.verbose, level);
    }

    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let transport = HttpTransport::new(&config).context("failed to build HTTP client")?;
    tracing::info!("🌐 Using area API at {}", transport.base_url());
    let api = AreaApi::new(transport);

    match run(&api, cli.command).await {
        Ok(output) => {
            let rendered =
                serde_json::to_string_pretty(&output).context("failed to render response")?;
            println!("{}", rendered);
        }
        Err(e) => {
            tracing::error!(
                "❌ Request failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 2,
                ErrorSeverity::Medium => 3,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 4,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run<T: Transport>(api: &AreaApi<T>, command: AreaCommand) -> Result<Value, AreaClientError> {
    let output = match command {
        AreaCommand::Create {
            name,
            code,
            parent,
            pinyin,
        } => {
            let area = Area {
                code,
                name,
                parent_code: parent,
                pinyin,
                ..Default::default()
            };
            api.create_area(&area).await?;
            json!({ "message": "created", "area": area })
        }
        AreaCommand::Delete { id, code } => {
            let area = Area {
                id,
                code,
                ..Default::default()
            };
            api.delete_area(&area).await?;
            json!({ "message": "deleted", "id": id })
        }
        AreaCommand::DeleteMany { ids } => {
            let request = IdsRequest { ids };
            api.delete_areas_by_ids(&request).await?;
            json!({ "message": "deleted", "ids": request.ids })
        }
        AreaCommand::Update {
            id,
            code,
            name,
            parent,
            pinyin,
            level,
        } => {
            let area = Area {
                id,
                code,
                name,
                parent_code: parent,
                pinyin,
                level,
                ..Default::default()
            };
            api.update_area(&area).await?;
            json!({ "message": "updated", "area": area })
        }
        AreaCommand::List {
            page,
            page_size,
            name,
            code,
            parent,
            level,
            order_key,
            desc,
        } => {
            let search = AreaSearch {
                name,
                code,
                parent_code: parent,
                level,
                order_key,
                desc,
                ..AreaSearch::page(page, page_size)
            };
            let result = api.get_area_list(&search).await?;
            tracing::info!("📋 {} of {} areas", result.list.len(), result.total);
            serde_json::to_value(result)?
        }
        AreaCommand::Get { id } => serde_json::to_value(api.get_area_by_id(&IdRequest { id }).await?)?,
        AreaCommand::GetByAreaId { area_id } => {
            serde_json::to_value(api.get_area_by_area_id(area_id).await?)?
        }
        AreaCommand::Tree {
            parent_id,
            level,
            status,
        } => {
            let filter = AreaTreeFilter {
                parent_id,
                level,
                status,
            };
            let result = if filter == AreaTreeFilter::default() {
                api.get_area_tree(None).await?
            } else {
                api.get_area_tree(Some(&filter)).await?
            };
            tracing::info!("🌳 Tree contains {} areas", result.node_count());
            serde_json::to_value(result)?
        }
        AreaCommand::Children { parent_id } => {
            let result = api.get_areas_by_parent_id(parent_id).await?;
            tracing::info!("📋 {} children under {}", result.areas.len(), parent_id);
            serde_json::to_value(result)?
        }
        AreaCommand::Import { file, clear } => {
            let request = read_import_file(&file, clear)?;
            let result = api.import_area_data(&request).await?;
            tracing::info!(
                "📥 Import finished: {} succeeded, {} failed",
                result.success,
                result.failed
            );
            serde_json::to_value(result)?
        }
    };

    Ok(output)
}
