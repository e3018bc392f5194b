//! CLI entrypoint for Investment Council
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use council_application::{
    CouncilDataSource, CouncilLogger, CouncilProgress, CouncilRequest, NoProgress,
    RunCouncilUseCase,
};
use council_domain::{ConfigIssue, Severity};
use council_infrastructure::{
    ConfigLoader, FileConfig, InMemoryDataSource, JsonDocumentStore, JsonlCouncilLogger,
    build_reasoning_service, command_registry,
};
use council_presentation::{
    Cli, ConsoleFormatter, OutputFormat, ProgressReporter, SimpleProgress,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the tracing subscriber.
///
/// `RUST_LOG` wins over the `-v` count. The returned guard must live until
/// exit so the file writer can drain.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    });

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (file_layer, guard) = match log_file {
        Some(path) => {
            // rolling::never panics on an unwritable file; check first
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot write log file {}", path.display()))?;

            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .ok_or_else(|| anyhow!("log file path has no file name: {}", path.display()))?;

            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}

/// Print every issue; fail if any is an error
fn report_issues(issues: &[ConfigIssue]) -> Result<()> {
    for issue in issues {
        match issue.severity {
            Severity::Warning => warn!("config: {}", issue.message),
            Severity::Error => eprintln!("config {}", issue),
        }
    }
    if ConfigIssue::has_errors(issues) {
        bail!("configuration has errors; fix them and try again");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    info!("Starting Investment Council");

    // === Configuration ===
    let config: FileConfig = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("failed to load configuration: {}", e))?
    };
    report_issues(&config.validate())?;

    let (mut params, _) = config.council_params();
    if let Some(max) = cli.max_iterations {
        params = params.with_max_iterations(max);
    }
    if let Some(strategy) = cli.strategy {
        params = params.with_strategy(strategy.into());
    }
    if cli.sequential {
        params = params.with_parallel_agents(false);
    }
    if cli.max_iterations.is_some() {
        report_issues(&params.validate())?;
    }

    // === Dependency Injection ===
    let reasoning = build_reasoning_service(&config.reasoning)
        .context("reasoning engine setup failed")?;

    let data_path = cli.data.clone().or_else(|| config.data.documents_path());
    let data_source: Arc<dyn CouncilDataSource> = match data_path {
        Some(path) => Arc::new(JsonDocumentStore::open(&path).await?),
        None => {
            info!("No document file configured, using built-in sample records");
            Arc::new(InMemoryDataSource::sample())
        }
    };

    let (specs, _) = config.agents.parse_commands();
    let registry = command_registry(&specs);
    if registry.is_empty() {
        bail!(
            "no agents configured; add [agents.commands.<slot>] entries to council.toml \
             (slots: risk_qualification, devils_advocate, personal_suitability, \
             market_analysis, feasibility_analysis)"
        );
    }

    let mut use_case = RunCouncilUseCase::new(registry, params).with_data_source(data_source);
    if let Some(service) = reasoning {
        use_case = use_case.with_reasoning_service(service);
    }
    if let Some(path) = config.logging.audit_log_path() {
        match JsonlCouncilLogger::new(&path) {
            Some(logger) => {
                info!("Audit log: {} (run {})", path.display(), logger.run_id());
                let logger: Arc<dyn CouncilLogger> = Arc::new(logger);
                use_case = use_case.with_logger(logger);
            }
            None => warn!("Audit log disabled: cannot open {}", path.display()),
        }
    }

    // === Run ===
    let (Some(user_id), Some(asset_id), Some(amount), Some(share)) = (
        cli.user_id.clone(),
        cli.asset_id.clone(),
        cli.amount,
        cli.portfolio_share,
    ) else {
        bail!("user id, asset id, amount and portfolio share are required");
    };
    let request = CouncilRequest::new(user_id, asset_id, amount, share);

    // Plain-text progress whenever console logging is on
    let progress: Box<dyn CouncilProgress> = if cli.quiet || cli.output == OutputFormat::Json {
        Box::new(NoProgress)
    } else if cli.verbose > 0 {
        Box::new(SimpleProgress)
    } else {
        Box::new(ProgressReporter::new())
    };
    let output = use_case
        .execute_with_progress(request, progress.as_ref())
        .await?;

    let rendered = match cli.output {
        OutputFormat::Full => ConsoleFormatter::format(&output.recommendation),
        OutputFormat::Summary => ConsoleFormatter::format_summary(&output.recommendation),
        OutputFormat::Json => ConsoleFormatter::format_json(&output.recommendation),
    };
    println!("{}", rendered);

    Ok(())
}
