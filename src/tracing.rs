use crate::config::settings::{AppConfig, LoggingConfig, SentryConfig};
use anyhow::Result;
use std::io;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Guards that must stay alive for the lifetime of the process
pub struct TracingGuard {
    _file_guard: Option<WorkerGuard>,
    _sentry_guard: Option<sentry::ClientInitGuard>,
}

/// Initialize tracing and Sentry from configuration
pub fn init_tracing(config: &AppConfig) -> Result<TracingGuard> {
    let logging_config = &config.logging;

    let sentry_guard = init_sentry(&config.sentry)?;

    let env_filter = create_env_filter(logging_config)?;

    let file_guard = match logging_config.target.to_lowercase().as_str() {
        "stderr" => {
            init_subscriber(logging_config, env_filter, fmt::layer().with_writer(io::stderr));
            None
        }
        "file" => {
            // Validated at load time: file target implies a file path
            let path = logging_config.file_path.as_deref().unwrap_or("marketplace-api.log");
            let appender = tracing_appender::rolling::daily(".", path);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            init_subscriber(logging_config, env_filter, fmt::layer().with_writer(writer));
            Some(guard)
        }
        _ => {
            init_subscriber(logging_config, env_filter, fmt::layer().with_writer(io::stdout));
            None
        }
    };

    tracing::info!(
        "Tracing initialized with level: {}, format: {}, target: {}, sentry_enabled: {}",
        logging_config.level,
        logging_config.format,
        logging_config.target,
        config.sentry.is_enabled()
    );

    Ok(TracingGuard {
        _file_guard: file_guard,
        _sentry_guard: sentry_guard,
    })
}

fn init_subscriber<W>(
    logging_config: &LoggingConfig,
    env_filter: EnvFilter,
    layer: fmt::Layer<
        tracing_subscriber::layer::Layered<EnvFilter, tracing_subscriber::Registry>,
        fmt::format::DefaultFields,
        fmt::format::Format,
        W,
    >,
) where
    W: for<'writer> fmt::MakeWriter<'writer> + Send + Sync + 'static,
{
    match logging_config.format.to_lowercase().as_str() {
        "json" => tracing_subscriber::registry()
            .with(env_filter)
            .with(layer.json())
            .with(sentry_tracing::layer())
            .init(),
        "compact" => tracing_subscriber::registry()
            .with(env_filter)
            .with(layer.compact())
            .with(sentry_tracing::layer())
            .init(),
        _ => tracing_subscriber::registry()
            .with(env_filter)
            .with(layer)
            .with(sentry_tracing::layer())
            .init(),
    }
}

fn create_env_filter(logging_config: &LoggingConfig) -> Result<EnvFilter> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging_config.level));
    Ok(filter)
}

/// Initialize Sentry SDK when a DSN is configured
fn init_sentry(config: &SentryConfig) -> Result<Option<sentry::ClientInitGuard>> {
    if !config.is_enabled() {
        tracing::debug!("Sentry is disabled (no DSN provided)");
        return Ok(None);
    }

    let guard = sentry::init(sentry::ClientOptions {
        dsn: Some(config.dsn.parse()?),
        environment: Some(config.environment.clone().into()),
        traces_sample_rate: config.traces_sample_rate,
        debug: config.debug,
        ..Default::default()
    });

    sentry::configure_scope(|scope| {
        scope.set_tag("service", "marketplace-api");
        scope.set_tag("version", env!("CARGO_PKG_VERSION"));
    });

    tracing::info!(
        "Sentry initialized for environment: {}, traces_sample_rate: {}",
        config.environment,
        config.traces_sample_rate
    );

    Ok(Some(guard))
}
