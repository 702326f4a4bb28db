use anyhow::Context;
use clap::Parser;
use ldl_calc::utils::{logger, validation::Validate};
use ldl_calc::{BatchEngine, BatchSettings, CsvPipeline, LocalStorage, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-batch")]
#[command(about = "Batch LDL evaluation driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "ldl-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Dry run - show what would be processed without executing
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 載入 TOML 配置
    let config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load config file '{}'", args.config))?;

    logger::init(args.verbose, config.logging.json, config.logging.level.as_deref());
    tracing::info!("🚀 Starting TOML-based batch evaluation");
    tracing::info!("📁 Configuration loaded from: {}", args.config);

    // 驗證配置
    config.validate().context("Configuration validation failed")?;
    let settings = config
        .batch_settings()
        .context("The [batch] section needs an input_path")?;

    display_settings_summary(&settings);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");
        return Ok(());
    }

    let pipeline = CsvPipeline::new(LocalStorage::new("."), settings);
    let report = BatchEngine::new(pipeline)
        .run()
        .context("Batch evaluation failed")?;

    println!(
        "✅ Evaluated {} readings ({} skipped)",
        report.summary.rows, report.summary.skipped
    );
    println!("📁 Output saved to: {}", report.output_path);
    Ok(())
}

fn display_settings_summary(settings: &BatchSettings) {
    println!("📋 Batch settings:");
    println!("   input:          {}", settings.input_path);
    println!("   output:         {}", settings.output_path);
    println!("   output format:  {:?}", settings.output_format);
    println!("   input mode:     {:?}", settings.mode);
    println!("   invalid rows:   {:?}", settings.on_invalid_row);
}
