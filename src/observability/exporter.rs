//! OpenTelemetry span exporter that appends to the rotating trace file.

use super::otlp::OtlpEncoder;
use super::sink::RotatingSink;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;

/// Writes each exported batch as one OTLP JSON line.
#[derive(Debug)]
struct FileSpanExporter {
    sink: RotatingSink,
    encoder: OtlpEncoder,
    is_shutdown: bool,
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = if self.is_shutdown {
            Err(TraceError::from("trace exporter is shut down"))
        } else {
            let line = self.encoder.encode_batch(&batch).to_string();
            self.sink
                .write_line(&line)
                .map_err(|e| TraceError::from(e.to_string()))
        };

        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown = true;
    }

    fn set_resource(&mut self, _resource: &Resource) {}
}

/// Builds a provider that exports every finished span synchronously to `sink`.
///
/// The plugin runs single-threaded inside WASI, so the simple (non-batched)
/// processor is used; there is no background runtime to drive a batch one.
pub fn file_tracer_provider(sink: RotatingSink, resource: Resource, scope: &'static str) -> TracerProvider {
    let exporter = FileSpanExporter {
        sink,
        encoder: OtlpEncoder::new(resource.clone(), scope),
        is_shutdown: false,
    };

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
