use clap::Parser;

use super::parsers::{parse_positive_u64, parse_positive_usize};
use super::types::{OutputFormat, PositiveU64, PositiveUsize};

/// Default file the curl command is read from when `--curl` is not given.
pub(crate) const DEFAULT_CURL_FILE: &str = "curl.txt";

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Lightweight concurrent HTTP load tester driven by a curl command - fixed worker pool, per-request correlation IDs, and full-percentile latency reports."
)]
pub struct LoadArgs {
    /// Number of concurrent virtual users
    #[arg(long, short = 'u', value_parser = parse_positive_u64)]
    pub users: PositiveU64,

    /// Number of worker threads driving the virtual users
    #[arg(long, short = 't', value_parser = parse_positive_usize)]
    pub threads: PositiveUsize,

    /// Test duration in seconds
    #[arg(long, short = 'd', value_parser = parse_positive_u64)]
    pub duration: PositiveU64,

    /// Delay between requests in milliseconds
    #[arg(long, short = 'r', default_value = "0")]
    pub delay: u64,

    /// File containing the curl command describing the request
    #[arg(long = "curl-file", default_value = DEFAULT_CURL_FILE)]
    pub curl_file: String,

    /// Curl command text (overrides --curl-file)
    #[arg(long = "curl")]
    pub curl: Option<String>,

    /// Final report format
    #[arg(long = "output-format", value_enum, default_value = "text", ignore_case = true)]
    pub output_format: OutputFormat,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
