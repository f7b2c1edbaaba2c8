//! Subscriber installation for the `tint` binary.

use tracing_subscriber::EnvFilter;

use crate::error::{Result, TintError};

/// Environment variable consulted before `RUST_LOG`.
pub const LOG_ENV: &str = "TINT_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Resolve the filter directive: explicit flag, then config, then
/// `TINT_LOG`, then `RUST_LOG`, then `warn`.
pub fn build_filter(flag: Option<&str>, config: Option<&str>) -> Result<EnvFilter> {
    if let Some(directive) = flag.or(config) {
        return parse_filter(directive);
    }
    for var in [LOG_ENV, EnvFilter::DEFAULT_ENV] {
        match std::env::var(var) {
            Ok(directive) if !directive.trim().is_empty() => return parse_filter(&directive),
            _ => {}
        }
    }
    parse_filter(DEFAULT_FILTER)
}

fn parse_filter(directive: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directive).map_err(|e| TintError::LogFilter {
        directive: directive.to_string(),
        message: e.to_string(),
    })
}

/// Install a compact stderr subscriber. A second call is a no-op.
pub fn init_tracing(flag: Option<&str>, config: Option<&str>) -> Result<()> {
    let filter = build_filter(flag, config)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
    Ok(())
}
