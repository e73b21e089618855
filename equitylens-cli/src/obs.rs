//! Logging setup. Logs go to stderr so command output stays pipeable.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// `EQUITYLENS_LOG` overrides `--log-level` when set.
pub fn init_tracing(log_level: &str, log_format: &str) -> Result<()> {
    let filter = std::env::var("EQUITYLENS_LOG").unwrap_or_else(|_| log_level.to_string());
    let env_filter =
        EnvFilter::try_new(filter).map_err(|err| anyhow!("invalid log filter: {err}"))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    match log_format.trim().to_lowercase().as_str() {
        "json" => builder.json().init(),
        "text" => builder.init(),
        other => return Err(anyhow!("unknown log format '{other}' (expected text or json)")),
    }
    Ok(())
}
