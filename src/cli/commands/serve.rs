use tracing_subscriber::EnvFilter;

use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::http;

/// Handle the `serve` command: set up logging and run the server until a
/// shutdown signal arrives.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let mut cfg = cfg.clone();
    if let Commands::Serve { bind: Some(addr) } = cmd {
        cfg.bind = addr.clone();
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pinmap=info,tower_http=info".into()),
        )
        .init();

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| AppError::Other(format!("failed to start runtime: {e}")))?;

    runtime.block_on(http::serve(cfg))
}
