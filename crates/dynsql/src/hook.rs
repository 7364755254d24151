//! Diagnostic sinks for statement execution.

use tracing::Level;

/// A sink for free-text diagnostic lines.
///
/// The [`crate::Db`] facade emits one line per statement execution —
/// successful or failed — when diagnostics are enabled in
/// [`crate::DbConfig`], and never otherwise.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, message: &str);
}

/// A `tracing`-backed sink emitting at a configurable level.
#[derive(Debug, Clone)]
pub struct TracingSink {
    /// Tracing event level to emit at.
    pub level: Level,
}

impl Default for TracingSink {
    fn default() -> Self {
        Self {
            level: Level::DEBUG,
        }
    }
}

impl TracingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the tracing event level.
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }
}

impl DiagnosticSink for TracingSink {
    fn emit(&self, message: &str) {
        /// Dispatch a tracing event at a runtime-determined level.
        macro_rules! emit_at_level {
            ($level:expr, $($field:tt)*) => {
                match $level {
                    Level::ERROR => tracing::error!($($field)*),
                    Level::WARN  => tracing::warn!($($field)*),
                    Level::INFO  => tracing::info!($($field)*),
                    Level::DEBUG => tracing::debug!($($field)*),
                    Level::TRACE => tracing::trace!($($field)*),
                }
            };
        }

        emit_at_level!(self.level, target: "dynsql.sql", "{message}");
    }
}

/// A sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn emit(&self, _message: &str) {}
}
