// src/pipeline/validate.rs

use crate::error::Result;
use crate::models::Config;

/// Validate configuration and log the effective settings.
pub fn run_validate(config: &Config) -> Result<()> {
    log::info!("Validating configuration...");

    if let Err(e) = config.validate() {
        log::error!("Config validation failed: {}", e);
        return Err(e);
    }

    log::info!("✓ Config OK");
    log::info!("    API base URL: {}", config.api.base_url);
    log::info!("    User agent: {}", config.api.user_agent);
    log::info!("    Timeout: {}s", config.api.timeout_secs);
    log::info!(
        "    Concurrency: {} character(s) per page, {} fetch(es) per list",
        config.api.max_concurrent_characters,
        config.api.max_concurrent_fetches
    );
    log::info!("    Database: {}", config.database.display_target());
    log::info!("    Pool size: {}", config.database.max_connections);
    log::info!(
        "    Auxiliary categories: {}",
        if config.loader.walk_auxiliary_categories {
            "walked"
        } else {
            "skipped"
        }
    );
    if let Some(max) = config.loader.max_pages {
        log::info!("    Page cap: {}", max);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default() {
        assert!(run_validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.api.timeout_secs = 0;
        assert!(run_validate(&config).is_err());
    }
}
