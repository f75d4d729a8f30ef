use std::sync::Arc;

use clap::Parser;
use tracing::info;

use crate::args::LoadArgs;
use crate::curl;
use crate::error::{AppError, AppResult, ConfigError, TemplateError};
use crate::http::{HttpTransport, Transport};
use crate::runner::{self, RunConfig};
use crate::{logger, summary};

/// Parses arguments, validates the request template, and drives one run.
///
/// # Errors
///
/// Returns an error for configuration problems (unreadable or empty curl
/// command, invalid template, bad run parameters) and for runtime
/// construction failures. All of these abort before any load is generated.
pub fn run() -> AppResult<()> {
    let args = LoadArgs::parse();
    logger::init_logging(args.verbose);

    let command_text = load_curl_command(&args)?;
    let template = curl::parse(&command_text)?;
    let config = RunConfig::from_args(&args);

    info!("Starting load test with configuration:");
    info!("  Curl command: {}", command_text);
    info!("  Users: {}", config.users);
    info!("  Threads: {}", config.threads);
    info!("  Duration: {} seconds", config.duration.as_secs());
    info!("  Delay: {} ms", config.delay.as_millis());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let report = runtime.block_on(async {
        let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new()?);
        runner::run(config, template, transport).await
    })?;

    summary::print_report(&report, args.output_format)
}

fn load_curl_command(args: &LoadArgs) -> AppResult<String> {
    if let Some(text) = args.curl.as_ref() {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(AppError::template(TemplateError::EmptyCommand));
        }
        return Ok(trimmed.to_owned());
    }

    let content =
        std::fs::read_to_string(&args.curl_file).map_err(|err| {
            AppError::config(ConfigError::CurlFileRead {
                path: args.curl_file.clone(),
                source: err,
            })
        })?;
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(AppError::config(ConfigError::CurlFileEmpty {
            path: args.curl_file.clone(),
        }));
    }
    Ok(trimmed.to_owned())
}
