use clap::Parser;
use met_dimensions::config::{CliConfig, Command};
use met_dimensions::dimension::{self, evaluate, BoundarySpec};
use met_dimensions::utils::error::{EtlError, ErrorSeverity};
use met_dimensions::utils::{logger, validation::Validate};
use met_dimensions::{
    CsvObjectStore, EtlEngine, ImportConfig, ImportPipeline, LocalStorage, ObjectQueryService,
};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 匯入設定先解析，才能套用 [monitoring] log_level
    let import_config = match &config.command {
        Command::Import(args) => Some(args.resolve(config.store.as_deref())),
        _ => None,
    };
    let configured_level = import_config
        .as_ref()
        .and_then(|c| c.as_ref().ok())
        .and_then(ImportConfig::log_level);

    // 初始化日誌
    let level = config.log_level(configured_level);
    if config.json_logs {
        logger::init_json_logger(level);
    } else {
        logger::init_cli_logger(level);
    }
    tracing::debug!("CLI config: {:?}", config);

    let result = match &config.command {
        Command::Import(args) => {
            let resolved =
                import_config.unwrap_or_else(|| args.resolve(config.store.as_deref()));
            run_import(&config, resolved).await
        }
        Command::Parse { text } => run_parse(text),
        Command::Fits { id, boundary } => run_fits(&config, *id, &boundary.to_boundary()).await,
        Command::List { boundary } => run_list(&config, &boundary.to_boundary()).await,
    };

    if let Err(e) = result {
        // 記錄詳細錯誤信息
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run_import(
    config: &CliConfig,
    import_config: Result<ImportConfig, EtlError>,
) -> Result<(), EtlError> {
    let import_config = import_config?;
    import_config.validate()?;

    let monitor_enabled = config.monitor || import_config.monitoring_enabled();
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }
    tracing::info!(
        "📁 Importing {} into {}",
        import_config.import.source_path,
        import_config.store.path
    );

    let store = CsvObjectStore::new(LocalStorage::new(import_config.store.path.clone()));
    let pipeline = ImportPipeline::new(LocalStorage::new("."), store, import_config);
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    let output_path = engine.run().await?;
    println!("✅ Import completed, objects stored in: {}", output_path);
    Ok(())
}

fn run_parse(text: &str) -> Result<(), EtlError> {
    let parsed = dimension::parse(text);
    let output = json!({
        "raw": text,
        "normalized": dimension::normalize(text),
        "dimension": parsed,
        "fitsDefaultBoundary": parsed.map(|m| evaluate(&m, &BoundarySpec::default()).all()),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn open_service(
    config: &CliConfig,
) -> Result<ObjectQueryService<CsvObjectStore<LocalStorage>>, EtlError> {
    let store = CsvObjectStore::open(LocalStorage::new(config.store_path())).await?;
    Ok(ObjectQueryService::new(store))
}

async fn run_fits(config: &CliConfig, id: u64, boundary: &BoundarySpec) -> Result<(), EtlError> {
    let service = open_service(config).await?;
    let result = service.does_it_fit(id, boundary).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

async fn run_list(config: &CliConfig, boundary: &BoundarySpec) -> Result<(), EtlError> {
    let service = open_service(config).await?;
    let results = service.list_fitting(boundary).await?;
    tracing::info!("{} fitting objects", results.len());
    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}
