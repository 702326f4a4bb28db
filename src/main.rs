use clap::Parser;
use ldl_calc::config::{BatchArgs, CalcArgs, Command, FormArgs};
use ldl_calc::utils::{format, logger, validation::Validate};
use ldl_calc::{
    BatchEngine, CliConfig, CsvPipeline, FormSession, LdlEngine, LdlError, LocalStorage,
    RawReading, TomlConfig,
};

fn main() {
    let cli = CliConfig::parse();

    // 載入配置
    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    // 初始化日誌
    logger::init(
        cli.verbose,
        cli.log_json || config.logging.json,
        config.logging.level.as_deref(),
    );
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(cli.command, config) {
        tracing::error!(
            "❌ ldl-calc failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }
}

fn load_config(cli: &CliConfig) -> Result<TomlConfig, LdlError> {
    let config = match &cli.config {
        Some(path) => TomlConfig::from_file(path)?,
        None => TomlConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn run(command: Command, config: TomlConfig) -> Result<(), LdlError> {
    match command {
        Command::Calc(args) => run_calc(args, &config),
        Command::Batch(args) => run_batch(args, config),
        Command::Form(args) => run_form(args, &config),
        Command::Bands => {
            print!("{}", format::render_band_table());
            Ok(())
        }
    }
}

fn run_calc(args: CalcArgs, config: &TomlConfig) -> Result<(), LdlError> {
    let engine = LdlEngine::new(config.input_mode(args.mode.selected()));
    let raw = RawReading::new(args.total, args.hdl, args.trig);
    let result = engine.evaluate(&raw)?;

    let output_format = args.format.unwrap_or(config.output.format);
    println!(
        "{}",
        format::render(&result, output_format, &config.display_options())?
    );
    Ok(())
}

fn run_batch(args: BatchArgs, mut config: TomlConfig) -> Result<(), LdlError> {
    // 應用命令列覆蓋設定
    config.apply_batch_overrides(args.into_overrides());
    config.validate()?;

    let settings = config.batch_settings()?;
    tracing::info!(
        "📁 Batch input: {} -> {} ({:?}, {:?} mode)",
        settings.input_path,
        settings.output_path,
        settings.output_format,
        settings.mode
    );

    let pipeline = CsvPipeline::new(LocalStorage::new("."), settings);
    let report = BatchEngine::new(pipeline).run()?;

    println!("✅ Evaluated {} readings", report.summary.rows);
    println!(
        "   classified: {}, unclassified: {}, skipped: {}",
        report.summary.classified, report.summary.unclassified, report.summary.skipped
    );
    for (band, count) in &report.summary.bands {
        println!("   {:<16} {}", band.label(), count);
    }
    println!("📁 Output saved to: {}", report.output_path);
    Ok(())
}

fn run_form(args: FormArgs, config: &TomlConfig) -> Result<(), LdlError> {
    let mut session = FormSession::new(config.input_mode(args.mode.selected()));
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    ldl_calc::app::form::run_interactive(
        &mut session,
        stdin.lock(),
        stdout.lock(),
        &config.display_options(),
    )
}
