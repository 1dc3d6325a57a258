use opentelemetry_otlp::WithExportConfig;
use tracing::{Subscriber, subscriber::set_global_default};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt};

use opentelemetry::KeyValue;
use opentelemetry_otlp::SpanExporter;
use opentelemetry_sdk::{Resource, runtime, trace as sdktrace};

use opentelemetry_semantic_conventions::resource::SERVICE_NAME;

/// Where spans go besides the bunyan sink.
pub struct OtlpExport<'a> {
    pub endpoint: &'a str,
    pub environment: &'a str,
}

pub fn get_subscriber<Sink>(
    name: String,
    env_filter: String,
    otlp: Option<OtlpExport<'_>>,
    sink: Sink,
) -> anyhow::Result<impl Subscriber + Send + Sync>
where
    Sink: for<'a> tracing_subscriber::fmt::MakeWriter<'a> + Sync + Send + 'static,
{
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter));

    let telemetry_layer = otlp
        .map(|export| build_tracer(&name, &export))
        .transpose()?
        .map(|tracer| tracing_opentelemetry::layer().with_tracer(tracer));

    Ok(Registry::default()
        .with(env_filter)
        .with(telemetry_layer)
        .with(JsonStorageLayer)
        .with(BunyanFormattingLayer::new(name, sink)))
}

fn build_tracer(name: &str, export: &OtlpExport<'_>) -> anyhow::Result<sdktrace::Tracer> {
    let exporter = SpanExporter::builder()
        .with_tonic()
        .with_endpoint(export.endpoint)
        .build()?;

    let resource = Resource::new(vec![
        KeyValue::new(SERVICE_NAME, name.to_string()),
        KeyValue::new("environment", export.environment.to_string()),
    ]);

    let tracer_provider = sdktrace::TracerProvider::builder()
        .with_batch_exporter(exporter, runtime::Tokio)
        .with_resource(resource)
        .build();

    let tracer = opentelemetry::trace::TracerProvider::tracer(&tracer_provider, "roster-tracer");
    // Registered globally so `shutdown_telemetry` can flush it.
    opentelemetry::global::set_tracer_provider(tracer_provider);
    Ok(tracer)
}

pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync) -> anyhow::Result<()> {
    LogTracer::init()?;
    set_global_default(subscriber)?;
    Ok(())
}

pub fn shutdown_telemetry() {
    opentelemetry::global::shutdown_tracer_provider();
}
