use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Installs the global tracing subscriber. `LOADLITE_LOG` wins over
/// `RUST_LOG`; without either, `--verbose` selects debug over info.
pub fn init_logging(verbose: bool) {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(resolve_filter(verbose))
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}

fn resolve_filter(verbose: bool) -> EnvFilter {
    let configured = std::env::var("LOADLITE_LOG").or_else(|_| std::env::var("RUST_LOG"));
    let fallback = if verbose { "debug" } else { "info" };

    match configured {
        Ok(value) => EnvFilter::try_new(value).unwrap_or_else(|_| EnvFilter::new(fallback)),
        Err(_) => EnvFilter::new(fallback),
    }
}
