//! Logging setup for the `slidecast` binary.
//!
//! Without the `observability` feature spans are formatted to stderr. With it,
//! spans are also exported through OpenTelemetry's stdout exporter.

use tracing_subscriber::EnvFilter;

/// Filter from `RUST_LOG`, falling back to `info` (or `debug` when verbose).
pub fn env_filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize console logging.
///
/// # Errors
///
/// Returns error if a global subscriber is already installed.
#[cfg(not(feature = "observability"))]
pub fn init_telemetry(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()?;

    Ok(())
}

/// Initialize OpenTelemetry with stdout exporter alongside console logging.
///
/// # Errors
///
/// Returns error if subscriber initialization fails.
#[cfg(feature = "observability")]
pub fn init_telemetry(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    use opentelemetry::trace::TracerProvider as _;
    use opentelemetry_sdk::{
        Resource,
        trace::{RandomIdGenerator, Sampler, TracerProvider},
    };
    use opentelemetry_stdout::SpanExporter;
    use tracing_subscriber::{Layer, layer::SubscriberExt, util::SubscriberInitExt};

    let provider = TracerProvider::builder()
        .with_simple_exporter(SpanExporter::default())
        .with_id_generator(RandomIdGenerator::default())
        .with_sampler(Sampler::AlwaysOn)
        .with_resource(Resource::default())
        .build();
    let tracer = provider.tracer("slidecast");
    opentelemetry::global::set_tracer_provider(provider);

    let telemetry_layer = tracing_opentelemetry::layer()
        .with_tracer(tracer)
        .with_filter(env_filter(verbose));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(env_filter(verbose));

    tracing_subscriber::registry()
        .with(telemetry_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Flush pending spans before exit.
pub fn shutdown_telemetry() {
    #[cfg(feature = "observability")]
    opentelemetry::global::shutdown_tracer_provider();
}
