//! Final settings resolution
//!
//! Precedence: built-in defaults < configuration file < command line.

use crate::app::cli::args::Args;
use crate::app::cli::config::ConfigFile;
use crate::app::error::AppResult;
use crate::core::logging::LogFormat;
use crate::core::validation::{validate_non_negative, validate_positive_count};
use std::time::Duration;

pub const DEFAULT_ITEMS: usize = 30;
pub const DEFAULT_SHUTDOWN_AT: usize = 20;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Parameters of the producer/consumer demonstration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoSettings {
    pub producers: usize,
    pub consumers: usize,
    pub items: usize,
    /// Index before which the queue is shut down; `None` shuts down once
    /// every element has been offered
    pub shutdown_at: Option<usize>,
    pub drain: bool,
    pub readd_every: Option<usize>,
    pub producer_delay: Duration,
    pub consumer_delay: Duration,
    pub process_delay: Duration,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            producers: 1,
            consumers: 1,
            items: DEFAULT_ITEMS,
            shutdown_at: Some(DEFAULT_SHUTDOWN_AT),
            drain: false,
            readd_every: None,
            producer_delay: Duration::ZERO,
            consumer_delay: Duration::ZERO,
            process_delay: Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: String,
    pub format: LogFormat,
    pub file: Option<String>,
    /// `None` means auto-detect from the terminal
    pub color: Option<bool>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            format: LogFormat::Text,
            file: None,
            color: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub demo: DemoSettings,
    pub log: LogSettings,
}

impl Settings {
    pub fn resolve(args: &Args, config: Option<&ConfigFile>) -> AppResult<Self> {
        let mut settings = Settings::default();
        if let Some(config) = config {
            settings.apply_config(config)?;
        }
        settings.apply_args(args)?;
        Ok(settings)
    }

    fn apply_config(&mut self, config: &ConfigFile) -> AppResult<()> {
        let demo = &mut self.demo;
        if let Some(value) = config.producers {
            demo.producers = validate_positive_count("producers", value)?;
        }
        if let Some(value) = config.consumers {
            demo.consumers = validate_positive_count("consumers", value)?;
        }
        if let Some(value) = config.items {
            demo.items = validate_positive_count("items", value)?;
        }
        if let Some(value) = config.shutdown_at {
            demo.shutdown_at = Some(validate_non_negative("shutdown-at", value)? as usize);
        }
        if let Some(value) = config.drain {
            demo.drain = value;
        }
        if let Some(value) = config.readd_every {
            demo.readd_every = Some(validate_positive_count("readd-every", value)?);
        }
        if let Some(value) = config.producer_delay_ms {
            demo.producer_delay =
                Duration::from_millis(validate_non_negative("producer-delay-ms", value)?);
        }
        if let Some(value) = config.consumer_delay_ms {
            demo.consumer_delay =
                Duration::from_millis(validate_non_negative("consumer-delay-ms", value)?);
        }
        if let Some(value) = config.process_delay_ms {
            demo.process_delay =
                Duration::from_millis(validate_non_negative("process-delay-ms", value)?);
        }

        if let Some(level) = &config.log_level {
            self.log.level = level.clone();
        }
        if let Some(format) = &config.log_format {
            self.log.format = format.parse()?;
        }
        if let Some(file) = &config.log_file {
            self.log.file = log_file_value(&file.to_string_lossy());
        }
        if config.color.is_some() {
            self.log.color = config.color;
        }
        Ok(())
    }

    fn apply_args(&mut self, args: &Args) -> AppResult<()> {
        let demo = &mut self.demo;
        if let Some(value) = args.producers {
            demo.producers = value;
        }
        if let Some(value) = args.consumers {
            demo.consumers = value;
        }
        if let Some(value) = args.items {
            demo.items = value;
        }
        if args.no_shutdown_at {
            demo.shutdown_at = None;
        } else if let Some(value) = args.shutdown_at {
            demo.shutdown_at = Some(value);
        }
        if let Some(value) = args.drain_choice() {
            demo.drain = value;
        }
        if let Some(value) = args.readd_every {
            demo.readd_every = Some(value);
        }
        if let Some(ms) = args.producer_delay_ms {
            demo.producer_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = args.consumer_delay_ms {
            demo.consumer_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = args.process_delay_ms {
            demo.process_delay = Duration::from_millis(ms);
        }

        if let Some(level) = &args.log_level {
            self.log.level = level.clone();
        }
        if let Some(format) = &args.log_format {
            self.log.format = format.parse()?;
        }
        if let Some(file) = &args.log_file {
            self.log.file = log_file_value(&file.to_string_lossy());
        }
        if let Some(color) = args.color_choice() {
            self.log.color = Some(color);
        }
        Ok(())
    }
}

// "none" disables file logging
fn log_file_value(value: &str) -> Option<String> {
    if value.eq_ignore_ascii_case("none") || value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
