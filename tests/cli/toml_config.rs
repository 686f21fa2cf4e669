//! Configuration file loading and precedence tests

use clap::Parser;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;
use workqueue::app::cli::{load_config, Args, Settings};
use workqueue::app::error::AppError;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn resolve(config: &NamedTempFile, argv: &[&str]) -> Result<Settings, AppError> {
    let mut full = vec!["workqueue"];
    full.extend_from_slice(argv);
    let args = Args::try_parse_from(full).unwrap();
    let config = load_config(Some(config.path()))?;
    Settings::resolve(&args, config.as_ref())
}

#[test]
fn test_config_file_values_apply() {
    let file = write_config(
        r#"
producers = 3
consumers = 5
shutdown-at = 12
drain = true
consumer-delay-ms = 40
"#,
    );

    let settings = resolve(&file, &[]).unwrap();
    assert_eq!(settings.demo.producers, 3);
    assert_eq!(settings.demo.consumers, 5);
    assert_eq!(settings.demo.items, 30);
    assert_eq!(settings.demo.shutdown_at, Some(12));
    assert!(settings.demo.drain);
    assert_eq!(settings.demo.consumer_delay, Duration::from_millis(40));
}

#[test]
fn test_command_line_beats_config_file() {
    let file = write_config("consumers = 5\ndrain = true\nlog-level = \"warn\"\n");

    let settings = resolve(&file, &["-w", "2", "--no-drain", "-l", "trace"]).unwrap();
    assert_eq!(settings.demo.consumers, 2);
    assert!(!settings.demo.drain);
    assert_eq!(settings.log.level, "trace");
}

#[test]
fn test_negative_delay_in_config_rejected() {
    let file = write_config("process-delay-ms = -1\n");

    let err = resolve(&file, &[]).unwrap_err();
    assert!(err.is_user_actionable());
    assert!(err.to_string().contains("process-delay-ms"));
}

#[test]
fn test_malformed_config_rejected() {
    let file = write_config("consumers = [1, 2\n");
    assert!(matches!(
        resolve(&file, &[]),
        Err(AppError::ConfigParse { .. })
    ));
}
