use std::fmt;

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Default, ValueEnum)]
pub enum LogLevel {
    /// Completely disables logging
    Off,
    /// Only errors from the oneof crates
    Error,
    /// Warnings and errors from the oneof crates
    Warn,
    /// Info, warning and error messages from the oneof crates
    #[default]
    Info,
    /// Everything down to debug messages from the oneof crates
    Debug,
    /// Everything, from all dependencies
    Trace,
}

impl LogLevel {
    /// Every `oneof_*` target shares the `oneof` prefix, so one directive
    /// covers the whole workspace and silences the dependencies.
    pub(crate) fn env_filter(self) -> EnvFilter {
        let directive = match self {
            LogLevel::Off => "off",
            LogLevel::Error => "oneof=error,off",
            LogLevel::Warn => "oneof=warn,off",
            LogLevel::Info => "oneof=info,off",
            LogLevel::Debug => "oneof=debug,off",
            LogLevel::Trace => "trace",
        };

        EnvFilter::new(directive)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        };

        f.write_str(name)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, ValueEnum)]
pub enum LogStyle {
    /// Standard text, colored on terminals
    #[default]
    Text,
    /// JSON objects, one per line
    Json,
}

impl fmt::Display for LogStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogStyle::Text => "text",
            LogStyle::Json => "json",
        })
    }
}
