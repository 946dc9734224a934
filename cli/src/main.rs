//! CLI entrypoint for concord
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use concord_application::{
    OrchestrateInput, OrchestrateUseCase, ProgressNotifier, SearchCapability,
};
use concord_domain::{Jurisdiction, Question};
use concord_infrastructure::{
    ConfigLoader, DuckDuckGoSearch, FileConfig, ProviderRegistry, build_client,
};
use concord_presentation::{
    Cli, ConsoleFormatter, OutputFormatter, ProgressReporter, SimpleProgress,
};
use std::io::IsTerminal;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = init_logging(&cli)?;

    info!("Starting concord");

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    if !config.output.color || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let issues = config.validate();
    if !issues.is_empty() {
        for issue in &issues {
            warn!(code = ?issue.code, "{}", issue.message);
        }
        if !cli.quiet || issues.iter().any(|i| i.is_error()) {
            eprintln!("{}", ConsoleFormatter::format_config_issues(&issues));
        }
        if issues.iter().any(|i| i.is_error()) {
            bail!("Invalid configuration");
        }
    }

    if cli.list_jurisdictions {
        print!("{}", ConsoleFormatter::format_jurisdictions(&config.trusted_domains()));
        return Ok(());
    }

    let question = match cli.question.as_deref() {
        Some(q) => Question::new(q)?,
        None => bail!("Question is required. Run with --help for usage."),
    };

    let jurisdiction = resolve_jurisdiction(cli.jurisdiction.as_deref(), &config);

    // === Dependency Injection ===
    let client = build_client().context("Failed to create HTTP client")?;
    let adapters = ProviderRegistry::from_config(&config.providers, &client);
    let search: Option<Arc<dyn SearchCapability>> = config.retrieval.enabled.then(|| {
        Arc::new(DuckDuckGoSearch::new(
            client.clone(),
            config.retrieval.search_base_url.clone(),
            config.retrieval.timeout(),
        )) as Arc<dyn SearchCapability>
    });

    let cancellation = CancellationToken::new();
    spawn_ctrl_c_handler(cancellation.clone());

    let use_case = OrchestrateUseCase::new(adapters, search, config.to_orchestration_config())
        .with_cancellation(cancellation);

    let mut input = OrchestrateInput::new(question.content(), jurisdiction);
    if let Some(context) = &cli.context {
        input = input.with_system_context(context.clone());
    }

    // Execute with or without progress reporting
    let result = if cli.quiet {
        use_case.execute(input).await
    } else {
        let progress: Box<dyn ProgressNotifier> = if std::io::stderr().is_terminal() {
            Box::new(ProgressReporter::new())
        } else {
            Box::new(SimpleProgress)
        };
        use_case.execute_with_progress(input, progress.as_ref()).await
    };

    // Output results
    let format = cli.output_format(config.output.format);
    println!("{}", ConsoleFormatter.render(format, question.content(), &result));

    Ok(())
}

/// Stderr logging filtered by `-v` count (or `RUST_LOG`), plus an
/// optional log file.
fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (file_layer, guard) = match &cli.log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}

/// CLI flag first, then the configured default. Invalid tags fall back
/// with a warning instead of failing the request.
fn resolve_jurisdiction(tag: Option<&str>, config: &FileConfig) -> Jurisdiction {
    match tag {
        None => config.default_jurisdiction(),
        Some(tag) => Jurisdiction::new(tag).unwrap_or_else(|e| {
            let fallback = config.default_jurisdiction();
            warn!("{}; using {}", e, fallback);
            fallback
        }),
    }
}

fn spawn_ctrl_c_handler(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\nInterrupted, finishing with the answers received so far...");
            token.cancel();
        }
    });
}
