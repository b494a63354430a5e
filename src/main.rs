//! LaunchStats - launch statistics dashboard
//!
//! A CLI tool that fetches launch records from a SpaceX-compatible API
//! and reports success rates, recent activity, launches per year and
//! the busiest launch sites.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (fetch failure, bad config, write failure, etc.)

use anyhow::{Context, Result};
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use launchstats::cli::{Args, OutputFormat};
use launchstats::config::{Config, CONFIG_FILE_NAME};
use launchstats::dashboard::LaunchDashboard;
use launchstats::models::{Report, ReportMetadata};
use launchstats::report;
use launchstats::source::{FileLaunchSource, HttpLaunchSource, LaunchDataSource};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("LaunchStats v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run(args).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Run failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .launchstats.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    println!("   Edit it to customize the API URL, windows and report sections.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
///
/// `RUST_LOG` takes precedence over the verbosity flags when set.
fn init_logging(args: &Args) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level().to_string()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Fetch, aggregate and write the report.
async fn run(args: Args) -> Result<()> {
    let start_time = Instant::now();

    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);
    config.validate().context("Invalid configuration")?;

    let now = args.now.unwrap_or_else(Utc::now);
    let source = build_source(&args, &config)?;

    // Step 1: Fetch launches
    let mut dashboard = LaunchDashboard::new(config.report.summary_options());
    let spinner = (!args.quiet && !args.stdout).then(|| loading_spinner(source.description()));

    let fetched = dashboard.load(source.as_ref()).await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let launches_fetched = fetched
        .with_context(|| format!("Failed to load launches from {}", source.description()))?;

    // Step 2: Aggregate
    let summary = dashboard
        .summary(now)
        .context("Dashboard has no launch data after a successful load")?;

    if summary.total == 0 {
        warn!("Source returned an empty launch list");
    }

    let metadata = ReportMetadata {
        source: source.description().to_string(),
        generated_at: now,
        launches_fetched,
        duration_seconds: start_time.elapsed().as_secs_f64(),
    };
    let report = Report::new(metadata, summary);

    // Step 3: Render and write
    let output = match args.format {
        OutputFormat::Json => report::generate_json_report(&report)?,
        OutputFormat::Markdown => report::generate_markdown_report(&report, &config.report),
    };

    if args.stdout {
        println!("{}", output);
        return Ok(());
    }

    let output_path = std::path::PathBuf::from(&config.general.output);
    std::fs::write(&output_path, &output)
        .with_context(|| format!("Failed to write report to {}", output_path.display()))?;

    if !args.quiet {
        print_summary(&report);
        println!(
            "\n✅ Report saved to: {}",
            output_path.display()
        );
    }

    Ok(())
}

/// Print a short console summary of the report.
fn print_summary(report: &Report) {
    let summary = &report.summary;

    println!("\n📊 Launch Summary:");
    println!("   Total launches: {}", summary.total);
    println!(
        "   - 🟢 Success: {} | 🔴 Failed: {} | 🟠 Unknown: {}",
        summary.successful, summary.failed, summary.unknown
    );
    println!("   Success rate: {:.1}%", summary.success_rate);
    for window in &summary.recent {
        println!("   {}: {}", window.label(), window.count);
    }
    if let Some(site) = summary.top_sites.first() {
        println!(
            "   Busiest site: {} ({} launches)",
            site.site_name, site.launch_count
        );
    }
    println!("   Duration: {:.1}s", report.metadata.duration_seconds);
}

/// Spinner shown while the dashboard is loading.
fn loading_spinner(description: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(format!("Fetching launches from {}", description));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Pick the launch source: a local file if given, the HTTP API otherwise.
fn build_source(args: &Args, config: &Config) -> Result<Box<dyn LaunchDataSource>> {
    if let Some(ref input) = args.input {
        info!("Using local launch file: {}", input.display());
        return Ok(Box::new(FileLaunchSource::new(input.clone())));
    }

    let timeout = Duration::from_secs(config.source.timeout_seconds);
    let source = HttpLaunchSource::new(config.source.api_url.clone(), timeout)
        .context("Failed to create HTTP client")?;

    Ok(Box::new(source))
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", CONFIG_FILE_NAME);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
