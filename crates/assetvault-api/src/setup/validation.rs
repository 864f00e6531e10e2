//! Configuration validation
//!
//! Validates critical configuration values at startup to catch misconfigurations early.

use anyhow::Result;
use assetvault_core::Config;

/// Validate critical configuration values
///
/// Field-level checks live in [`Config::validate`]; this adds the checks that
/// only matter once the HTTP surface is about to be exposed.
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    let max_body_mb = config.max_request_body_bytes() / 1024 / 1024;
    if max_body_mb > 4096 {
        tracing::warn!(
            max_body_mb,
            "Largest accepted request body exceeds 4 GiB - consider lowering MAX_BATCH_ITEMS"
        );
    }

    Ok(())
}
