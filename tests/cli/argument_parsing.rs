//! Command-line argument parsing tests

use clap::Parser;
use std::path::PathBuf;
use workqueue::app::cli::args::Args;

fn parse(argv: &[&str]) -> Result<Args, clap::Error> {
    let mut full = vec!["workqueue"];
    full.extend_from_slice(argv);
    Args::try_parse_from(full)
}

#[test]
fn test_no_arguments_leaves_everything_unset() {
    let args = parse(&[]).unwrap();

    assert_eq!(args.producers, None);
    assert_eq!(args.consumers, None);
    assert_eq!(args.items, None);
    assert_eq!(args.shutdown_at, None);
    assert_eq!(args.drain_choice(), None);
    assert_eq!(args.color_choice(), None);
}

#[test]
fn test_short_and_long_flags() {
    let args = parse(&[
        "-p", "2", "-w", "4", "-n", "50", "--shutdown-at", "10", "--drain", "-r", "3",
        "--process-delay-ms", "5", "--log-level", "debug", "--log-format", "json",
        "--log-file", "/tmp/workqueue.log",
    ])
    .unwrap();

    assert_eq!(args.producers, Some(2));
    assert_eq!(args.consumers, Some(4));
    assert_eq!(args.items, Some(50));
    assert_eq!(args.shutdown_at, Some(10));
    assert_eq!(args.drain_choice(), Some(true));
    assert_eq!(args.readd_every, Some(3));
    assert_eq!(args.process_delay_ms, Some(5));
    assert_eq!(args.log_level.as_deref(), Some("debug"));
    assert_eq!(args.log_format.as_deref(), Some("json"));
    assert_eq!(args.log_file, Some(PathBuf::from("/tmp/workqueue.log")));
}

#[test]
fn test_zero_consumers_rejected() {
    assert!(parse(&["--consumers", "0"]).is_err());
    assert!(parse(&["--items", "lots"]).is_err());
}

#[test]
fn test_conflicting_flags_rejected() {
    assert!(parse(&["--drain", "--no-drain"]).is_err());
    assert!(parse(&["--color", "--no-color"]).is_err());
    assert!(parse(&["--shutdown-at", "3", "--no-shutdown-at"]).is_err());
}

#[test]
fn test_unknown_log_format_rejected() {
    assert!(parse(&["--log-format", "xml"]).is_err());
    assert!(parse(&["--log-level", "loud"]).is_err());
}
