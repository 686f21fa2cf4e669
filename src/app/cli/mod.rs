//! Command-line interface: arguments, configuration file and settings

pub mod args;
pub mod config;
pub mod settings;

pub use args::Args;
pub use config::{default_config_path, load_config, ConfigFile};
pub use settings::{DemoSettings, LogSettings, Settings};
