use crate::args::OutputFormat;
use crate::error::AppResult;
use crate::metrics::MetricsReport;

const SEPARATOR_WIDTH: usize = 80;

/// Final report rendered as the classic line-per-stat text block.
#[must_use]
pub fn report_lines(report: &MetricsReport) -> Vec<String> {
    vec![
        format!("Total Requests: {}", report.total_requests),
        format!("Successful Requests: {}", report.successful_requests),
        format!("Failed Requests: {}", report.failed_requests),
        format!("Success Rate: {:.2}%", report.success_rate),
        String::new(),
        format!("Average TPS: {:.2}", report.average_tps),
        format!("Peak TPS: {:.2}", report.peak_tps),
        String::new(),
        format!("Response Time P75: {:.2} ms", report.p75_ms),
        format!("Response Time P90: {:.2} ms", report.p90_ms),
        format!("Response Time P99: {:.2} ms", report.p99_ms),
        format!("Response Time P99.9: {:.2} ms", report.p99_9_ms),
        format!("Response Time P99.99: {:.2} ms", report.p99_99_ms),
        String::new(),
        format!("Min Response Time: {:.2} ms", report.min_latency_ms),
        format!("Max Response Time: {:.2} ms", report.max_latency_ms),
        format!("Average Response Time: {:.2} ms", report.avg_latency_ms),
    ]
}

/// Prints the final report to stdout in the requested format.
///
/// # Errors
///
/// Returns an error when JSON serialization fails.
pub fn print_report(report: &MetricsReport, format: OutputFormat) -> AppResult<()> {
    match format {
        OutputFormat::Text => {
            println!();
            println!("{}", "=".repeat(SEPARATOR_WIDTH));
            println!("LOAD TEST COMPLETED");
            println!("{}", "=".repeat(SEPARATOR_WIDTH));
            for line in report_lines(report) {
                println!("{}", line);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
    }
    Ok(())
}
