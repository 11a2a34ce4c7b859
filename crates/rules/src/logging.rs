//! Logger collaborator handed to rule evaluation.
//!
//! Evaluation never talks to a global logger directly; it receives a
//! [`RuleLogger`] so the orchestrator decides where log lines go. The
//! default [`TracingLogger`] forwards to `tracing`.

use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// Log sink. Implementations must not panic or fail.
pub trait RuleLogger: Send + Sync {
    fn log(&self, level: LogLevel, message: &str, context: &str, correlation_id: &str);

    fn trace(&self, message: &str, context: &str, correlation_id: &str) {
        self.log(LogLevel::Trace, message, context, correlation_id);
    }

    fn debug(&self, message: &str, context: &str, correlation_id: &str) {
        self.log(LogLevel::Debug, message, context, correlation_id);
    }

    fn info(&self, message: &str, context: &str, correlation_id: &str) {
        self.log(LogLevel::Info, message, context, correlation_id);
    }

    fn warn(&self, message: &str, context: &str, correlation_id: &str) {
        self.log(LogLevel::Warn, message, context, correlation_id);
    }

    fn error(&self, message: &str, context: &str, correlation_id: &str) {
        self.log(LogLevel::Error, message, context, correlation_id);
    }
}

/// Forwards to `tracing` with `context` and `correlation_id` as fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl RuleLogger for TracingLogger {
    fn log(&self, level: LogLevel, message: &str, context: &str, correlation_id: &str) {
        match level {
            LogLevel::Trace => tracing::trace!(context, correlation_id, "{message}"),
            LogLevel::Debug => tracing::debug!(context, correlation_id, "{message}"),
            LogLevel::Info => tracing::info!(context, correlation_id, "{message}"),
            LogLevel::Warn => tracing::warn!(context, correlation_id, "{message}"),
            LogLevel::Error => tracing::error!(context, correlation_id, "{message}"),
        }
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl RuleLogger for NoopLogger {
    fn log(&self, _: LogLevel, _: &str, _: &str, _: &str) {}
}

/// Keeps every line in memory. Useful for asserting on log output.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    lines: Mutex<Vec<LogLine>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogLine {
    pub level: LogLevel,
    pub message: String,
    pub context: String,
    pub correlation_id: String,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<LogLine> {
        match self.lines.lock() {
            Ok(lines) => lines.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl RuleLogger for MemoryLogger {
    fn log(&self, level: LogLevel, message: &str, context: &str, correlation_id: &str) {
        let line = LogLine {
            level,
            message: message.to_string(),
            context: context.to_string(),
            correlation_id: correlation_id.to_string(),
        };
        match self.lines.lock() {
            Ok(mut lines) => lines.push(line),
            Err(poisoned) => poisoned.into_inner().push(line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convenience_methods_set_level() {
        let logger = MemoryLogger::new();
        logger.trace("start", "surge@1.0.0", "msg-1");
        logger.error("boom", "surge@1.0.0", "msg-1");

        let lines = logger.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].level, LogLevel::Trace);
        assert_eq!(lines[0].correlation_id, "msg-1");
        assert_eq!(lines[1].level, LogLevel::Error);
        assert_eq!(lines[1].message, "boom");
    }

    #[test]
    fn tracing_logger_is_callable_without_subscriber() {
        TracingLogger.info("no subscriber installed", "ctx", "id");
        NoopLogger.warn("dropped", "ctx", "id");
    }
}
