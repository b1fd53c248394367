/// URL for the SQLite database file, e.g. `sqlite://todos.db`. The file is created if it's missing.
pub const DB_URL: &str = "DATABASE_URL";
/// Socket address the HTTP server binds to
pub const LISTEN_ADDR: &str = "LISTEN_ADDR";
/// Log level configuration for the application. For formatting info, see [tracing_subscriber's documentation](https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html)
pub const LOG_LEVEL: &str = "LOG_LEVEL";

/// OpenTelemetry span export URL. Should be http://localhost:4317 when running next to a collector
/// sidecar. Exporters are only installed when both export URLs are set.
pub const OTEL_SPAN_EXPORT_URL: &str = "OTEL_SPAN_EXPORT_URL";
/// OpenTelemetry metrics export URL. Should be http://localhost:4317 when running next to a collector
/// sidecar. Exporters are only installed when both export URLs are set.
pub const OTEL_METRIC_EXPORT_URL: &str = "OTEL_METRIC_EXPORT_URL";

/// Database used when [DB_URL] isn't set
pub const DEFAULT_DB_URL: &str = "sqlite://todos.db";
/// Address used when [LISTEN_ADDR] isn't set
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:5000";

/// Reads an environment variable, falling back to [default] if it's unset or not valid unicode
pub fn var_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_owned())
}
