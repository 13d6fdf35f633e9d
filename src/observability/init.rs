//! Subscriber setup.

use super::exporter::file_tracer_provider;
use super::sink::RotatingSink;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service and scope name stamped on every exported span.
pub const SERVICE_NAME: &str = "campaign-feed";

/// Trace file name inside the data directory.
pub const TRACE_FILE: &str = "campaign-feed-otlp.json";

/// Installs the global subscriber exporting to the rotating trace file.
///
/// The filter comes from `trace_level` in the plugin config, defaulting to
/// `info`. Observability is optional: if the data directory cannot be created
/// the plugin runs without tracing. Only the first call has any effect.
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");

    let data_dir = crate::infrastructure::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![KeyValue::new("service.name", SERVICE_NAME)]);
    let sink = RotatingSink::new(data_dir.join(TRACE_FILE));
    let provider = file_tracer_provider(sink, resource, SERVICE_NAME);

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME)));

    let _ = subscriber.try_init();
}
