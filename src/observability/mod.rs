//! Tracing with file-based OpenTelemetry export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK provider → FileSpanExporter → RotatingSink
//! ```
//!
//! Spans land as OTLP JSON lines in
//! `~/.local/share/zellij/campaign-feed/campaign-feed-otlp.json`. The file
//! rotates at 5 MiB into `.1`, `.2` and `.3` backups.
//!
//! The level comes from the `trace_level` plugin option (an `EnvFilter`
//! directive such as `debug` or `campaign_feed::engine=trace`), default `info`.
//!
//! - [`init`]: Subscriber installation
//! - `exporter`: Span exporter and provider construction
//! - `otlp`: OTLP JSON encoding
//! - [`sink`]: Rotating trace file

mod exporter;
pub mod init;
mod otlp;
pub mod sink;

pub use init::init_tracing;
pub use sink::RotatingSink;
