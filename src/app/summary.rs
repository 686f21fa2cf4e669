//! End-of-run summary table

use crate::app::demo::DemoReport;
use prettytable::{format, Cell, Row, Table};

/// prettytable style spec for header cells: bold yellow
const HEADER_SPEC: &str = "bFy";
/// Right-aligned numeric cells
const COUNT_SPEC: &str = "r";
const TOTAL_SPEC: &str = "bFg";

/// Build the per-consumer summary table with a trailing total row
pub fn build_table(report: &DemoReport) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
    table.set_titles(Row::new(
        ["Consumer", "Processed", "Failed"]
            .iter()
            .map(|title| Cell::new(title).style_spec(HEADER_SPEC))
            .collect(),
    ));

    for worker in &report.workers {
        table.add_row(Row::new(vec![
            Cell::new(&worker.name),
            Cell::new(&worker.processed.to_string()).style_spec(COUNT_SPEC),
            Cell::new(&worker.failed.to_string()).style_spec(COUNT_SPEC),
        ]));
    }

    let processed: usize = report.workers.iter().map(|w| w.processed).sum();
    let failed: usize = report.workers.iter().map(|w| w.failed).sum();
    table.add_row(Row::new(vec![
        Cell::new("total").style_spec(TOTAL_SPEC),
        Cell::new(&processed.to_string()).style_spec(&format!("{}{}", TOTAL_SPEC, COUNT_SPEC)),
        Cell::new(&failed.to_string()).style_spec(&format!("{}{}", TOTAL_SPEC, COUNT_SPEC)),
    ]));
    table
}

/// Plain-text rendering of the summary, without colour
pub fn render(report: &DemoReport) -> String {
    let mut out = build_table(report).to_string();
    out.push_str(&footer(report));
    out
}

fn footer(report: &DemoReport) -> String {
    format!(
        "offered {}, delivered {}, re-added {}{}\n",
        report.offered,
        report.delivered(),
        report.readds,
        if report.drained { ", drained" } else { "" }
    )
}

/// Print the summary to stdout
pub fn print_summary(report: &DemoReport, use_color: bool) {
    let table = build_table(report);
    println!();
    if let Err(e) = table.print_tty(use_color) {
        log::warn!("Failed to print summary table: {}", e);
        return;
    }
    print!("{}", footer(report));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::api::WorkerReport;

    fn report() -> DemoReport {
        DemoReport {
            workers: vec![
                WorkerReport {
                    name: "consumer-0".to_string(),
                    processed: 12,
                    failed: 0,
                },
                WorkerReport {
                    name: "consumer-1".to_string(),
                    processed: 8,
                    failed: 1,
                },
            ],
            offered: 30,
            readds: 0,
            drained: false,
        }
    }

    #[test]
    fn test_render_lists_each_consumer() {
        let rendered = render(&report());

        assert!(rendered.contains("Consumer"));
        assert!(rendered.contains("Processed"));
        assert!(rendered.contains("consumer-0"));
        assert!(rendered.contains("consumer-1"));
        assert!(rendered.contains("12"));
    }

    #[test]
    fn test_render_totals() {
        let rendered = render(&report());

        let total_line = rendered
            .lines()
            .find(|line| line.contains("total"))
            .expect("total row");
        assert!(total_line.contains("20"));
        assert!(total_line.contains('1'));
        assert!(rendered.contains("offered 30, delivered 21, re-added 0\n"));
        assert!(!rendered.contains("drained"));
    }

    #[test]
    fn test_render_without_color_has_no_escapes() {
        let mut drained = report();
        drained.drained = true;

        let rendered = render(&drained);
        assert!(!rendered.contains('\x1b'));
        assert!(rendered.ends_with(", drained\n"));
    }
}
