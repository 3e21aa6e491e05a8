use clap::Parser;
use dash_shape::config::toml_config::ShapeConfig;
use dash_shape::core::pipeline::{render, select};
use dash_shape::core::{ConfigProvider, Pipeline};
use dash_shape::utils::{logger, validation::Validate};
use dash_shape::{CliConfig, LocalStorage, ShapeEngine, ShapeError, ShapePipeline};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliConfig::parse();

    // 初始化日誌
    if args.json_logs {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting dash-shape");
    if args.verbose {
        tracing::debug!("CLI args: {:?}", args);
    }

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => exit_with(e),
    };

    tracing::info!("✅ Configuration loaded and validated successfully");

    if args.dry_run {
        display_config_summary(&config);
        return Ok(());
    }

    let outcome = if config.reads_stdin() {
        shape_stdin(config).await
    } else {
        shape_file(config).await
    };

    if let Err(e) = outcome {
        exit_with(e);
    }

    Ok(())
}

fn load_config(args: &CliConfig) -> dash_shape::Result<ShapeConfig> {
    let mut config = match &args.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            ShapeConfig::from_file(path)?
        }
        None => ShapeConfig::default(),
    };

    args.apply_to(&mut config);
    config.resolve_input(&std::env::current_dir()?);
    config.validate()?;
    Ok(config)
}

async fn shape_file(config: ShapeConfig) -> dash_shape::Result<()> {
    let storage = LocalStorage::new(config.output_path().to_string());
    let engine = ShapeEngine::new(ShapePipeline::new(storage, config));

    let report = engine.run().await?;
    println!("✅ Wrote {} entries to {}", report.entries, report.output_path);
    for diagnostic in &report.diagnostics {
        eprintln!("⚠️ {}", diagnostic);
    }
    Ok(())
}

/// stdin → stdout，不經過 storage 寫檔
async fn shape_stdin(config: ShapeConfig) -> dash_shape::Result<()> {
    let mut raw = Vec::new();
    tokio::io::stdin().read_to_end(&mut raw).await?;
    let document: serde_json::Value = serde_json::from_slice(&raw)?;
    let payload = select(document, config.pointer());

    let format = config.output_format();
    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = ShapePipeline::new(storage, config);
    let result = pipeline.transform(payload).await?;

    let data = render(&result.entries, format)?;
    let mut stdout = tokio::io::stdout();
    stdout.write_all(&data).await?;
    stdout.flush().await?;
    Ok(())
}

fn display_config_summary(config: &ShapeConfig) {
    let options = config.entry_options();
    tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");
    tracing::info!("  Input: {}", config.input_path());
    tracing::info!("  Pointer: {}", config.pointer().unwrap_or("(whole document)"));
    tracing::info!(
        "  Fields: {} / {} (humanize keys: {})",
        options.fields.key,
        options.fields.value,
        options.humanize_keys
    );
    tracing::info!("  Output: {}/{} as {}", config.output_path(), config.output_file(), config.output_format());
}

fn exit_with(e: ShapeError) -> ! {
    tracing::error!("❌ dash-shape failed: {} (Category: {:?})", e, e.category());
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e);
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}
