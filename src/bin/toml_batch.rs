use clap::Parser;
use mrz_synth::core::sampler::{find_country, COUNTRY_FORMATS, DEFAULT_NUMBER_FORMAT};
use mrz_synth::core::ConfigProvider;
use mrz_synth::utils::error::ErrorSeverity;
use mrz_synth::utils::{logger, validation::Validate};
use mrz_synth::{BatchEngine, LocalStorage, PassportPipeline, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-batch")]
#[command(about = "Passport ground truth generator with TOML configuration support")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "mrz-synth.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override generator.count from config
    #[arg(long)]
    count: Option<usize>,

    /// Dry run - show what would be generated without writing files
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-based passport batch");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 應用命令列覆蓋設定
    if let Some(count) = args.count {
        config.generator.count = count;
        tracing::info!("🔧 Count overridden to: {}", count);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No files will be written");
        perform_dry_run(&config);
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = match PassportPipeline::new(storage, config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };
    let engine = BatchEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run() {
        Ok(output_path) => {
            tracing::info!("✅ Passport batch completed successfully!");
            println!("✅ Passport batch completed successfully!");
            println!("📁 Ground truth saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Passport batch failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Batch: {}", config.batch.name);
    if let Some(description) = &config.batch.description {
        println!("  Description: {}", description);
    }
    println!("  Records: {}", config.count());
    println!("  Output: {}", config.output_path());
    println!("  Formats: {}", config.output_formats().join(", "));
    println!("  Overflow policy: {}", config.overflow_policy());

    if let Some(seed) = config.seed() {
        println!("  Seed: {}", seed);
    }

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(config: &TomlConfig) {
    println!("🔍 Dry Run Analysis:");
    println!();

    println!("🌍 Issuing countries:");
    if config.countries().is_empty() {
        for country in COUNTRY_FORMATS {
            println!("  {} ({}) -> {}", country.code, country.name, country.number_format);
        }
    } else {
        for code in config.countries() {
            let format = find_country(code)
                .map(|c| c.number_format)
                .unwrap_or(DEFAULT_NUMBER_FORMAT);
            println!("  {} -> {}", code, format);
        }
    }

    println!();
    println!("📅 Dates:");
    match config.as_of() {
        Some(date) => println!("  Reference date: {}", date),
        None => println!("  Reference date: today"),
    }

    println!();
    println!("💾 Output files:");
    println!("  {}/{}", config.output_path(), config.json_filename());
    if config.output_formats().iter().any(|f| f == "csv") {
        println!("  {}/{}", config.output_path(), config.csv_filename());
    }

    println!();
    println!("✅ Dry run analysis complete. Use --verbose for more details during actual run.");
}
