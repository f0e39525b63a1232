mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Environment variable overriding `backend.url`
pub const ENV_BACKEND_URL: &str = "SUPABASE_URL";

/// Environment variable overriding `backend.anon_key`
pub const ENV_BACKEND_KEY: &str = "SUPABASE_ANON_KEY";

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    apply_env_overrides(&mut config);
    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = ["./memoria.toml", "~/.config/memoria/config.toml"];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    let mut config = Config::default();
    apply_env_overrides(&mut config);
    validate_config(&config)?;
    Ok(config)
}

/// Fill backend credentials from the environment when set
fn apply_env_overrides(config: &mut Config) {
    if let Ok(url) = std::env::var(ENV_BACKEND_URL) {
        if !url.trim().is_empty() {
            config.backend.url = url;
        }
    }
    if let Ok(key) = std::env::var(ENV_BACKEND_KEY) {
        if !key.trim().is_empty() {
            config.backend.anon_key = key;
        }
    }
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    // Missing credentials are a startup warning, not an error
    if !config.backend.has_credentials() {
        tracing::warn!(
            "Missing backend credentials. Set {} and {} or fill [backend] in the config file.",
            ENV_BACKEND_URL,
            ENV_BACKEND_KEY
        );
    }

    if config.backend.bucket.trim().is_empty() {
        anyhow::bail!("Storage bucket name cannot be empty");
    }

    if config.backend.table.trim().is_empty() {
        anyhow::bail!("Record table name cannot be empty");
    }

    if config.normalize.max_width == 0 {
        anyhow::bail!("Normalize max_width cannot be 0");
    }

    if !(1..=100).contains(&config.normalize.quality) {
        anyhow::bail!(
            "Normalize quality must be between 1 and 100, got {}",
            config.normalize.quality
        );
    }

    if config.upload.content_type.trim().is_empty() {
        anyhow::bail!("Upload content_type cannot be empty");
    }

    Ok(())
}
