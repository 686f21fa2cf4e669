//! Command-line arguments
//!
//! Every option is optional so that values from the configuration file can
//! fill the gaps; see `settings` for the precedence rules.

use crate::core::validation::validate_positive_int;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "workqueue")]
#[command(about = "Producer/consumer demonstration of a fair, deduplicating work queue")]
#[command(version)]
pub struct Args {
    /// Configuration file path
    #[arg(short = 'c', long = "config-file", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Number of producer threads
    #[arg(short = 'p', long = "producers", value_name = "COUNT", value_parser = validate_positive_int)]
    pub producers: Option<usize>,

    /// Number of consumer threads
    #[arg(short = 'w', long = "consumers", value_name = "COUNT", value_parser = validate_positive_int)]
    pub consumers: Option<usize>,

    /// Number of elements the producers offer
    #[arg(short = 'n', long = "items", value_name = "COUNT", value_parser = validate_positive_int)]
    pub items: Option<usize>,

    /// Shut the queue down just before adding the element with this index
    #[arg(short = 's', long = "shutdown-at", value_name = "INDEX")]
    pub shutdown_at: Option<usize>,

    /// Only shut down once every element has been offered
    #[arg(long = "no-shutdown-at", conflicts_with = "shutdown_at")]
    pub no_shutdown_at: bool,

    /// Let queued and in-flight elements finish before consumers stop
    #[arg(short = 'd', long = "drain", conflicts_with = "no_drain")]
    pub drain: bool,

    /// Stop consumers as soon as the queue is empty (overrides config file)
    #[arg(long = "no-drain")]
    pub no_drain: bool,

    /// Re-add every Nth element once while it is being processed
    #[arg(short = 'r', long = "readd-every", value_name = "N", value_parser = validate_positive_int)]
    pub readd_every: Option<usize>,

    /// Delay before producers start, in milliseconds
    #[arg(long = "producer-delay-ms", value_name = "MS")]
    pub producer_delay_ms: Option<u64>,

    /// Delay before consumers start, in milliseconds
    #[arg(long = "consumer-delay-ms", value_name = "MS")]
    pub consumer_delay_ms: Option<u64>,

    /// Simulated processing time per element, in milliseconds
    #[arg(long = "process-delay-ms", value_name = "MS")]
    pub process_delay_ms: Option<u64>,

    /// Log level
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = ["trace", "debug", "info", "warn", "error", "off"])]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(short = 'o', long = "log-format", value_name = "FORMAT", value_parser = ["text", "simple", "ext", "json"])]
    pub log_format: Option<String>,

    /// Log file path (use 'none' to disable file logging)
    #[arg(short = 'f', long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Force colored output
    #[arg(long = "color", conflicts_with = "no_color")]
    pub color: bool,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,
}

impl Args {
    /// Tri-state color flag: Some(true) for --color, Some(false) for --no-color
    pub fn color_choice(&self) -> Option<bool> {
        match (self.color, self.no_color) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    /// Tri-state drain flag, same convention as [`color_choice`](Self::color_choice)
    pub fn drain_choice(&self) -> Option<bool> {
        match (self.drain, self.no_drain) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}
