//! Host configuration: `lineage.toml` plus environment overrides.
//!
//! The file holds a [`TimelineConfig`] at the top level. Secrets are usually
//! supplied through the environment instead of the file.

use std::path::{Path, PathBuf};

use lineage_search::{LlmConfig, TimelineConfig};

use crate::error::{AppError, Result};

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "lineage.toml";

/// Environment variables consulted for the LLM key, in priority order.
pub const LLM_API_KEY_VARS: &[&str] = &["LINEAGE_OPENAI_API_KEY", "OPENAI_API_KEY"];

/// Environment variable overriding the LLM base URL.
pub const LLM_BASE_URL_VAR: &str = "LINEAGE_OPENAI_BASE_URL";

/// Environment variable marking the LLM endpoint as a credential-injecting
/// proxy (`1`, `true` or `yes`; `0`, `false` or `no` turn it off).
pub const LLM_ALLOW_KEYLESS_VAR: &str = "LINEAGE_OPENAI_ALLOW_KEYLESS";

/// Environment variables consulted for the Semantic Scholar key, in priority order.
pub const S2_API_KEY_VARS: &[&str] = &["LINEAGE_S2_API_KEY", "SEMANTIC_SCHOLAR_API_KEY"];

/// Load a [`TimelineConfig`] from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML for
/// the config schema.
pub fn from_file(path: &Path) -> Result<TimelineConfig> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| AppError::Config(format!("{}: {e}", path.display())))
}

/// Save a [`TimelineConfig`] as TOML, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if the file cannot be written or the config cannot be serialized.
pub fn save_to_file(config: &TimelineConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(|e| AppError::Config(e.to_string()))?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Returns the default config file path: `<config dir>/lineage/lineage.toml`.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("lineage")
        .join(CONFIG_FILE_NAME)
}

/// Resolve the effective configuration.
///
/// An explicit `path` must exist. Without one, the default path is used if
/// present and built-in defaults otherwise. Environment overrides are
/// applied last and the result is validated.
///
/// # Errors
///
/// Returns [`AppError::Config`] or [`AppError::Io`] for unreadable files,
/// and [`AppError::Search`] if the final config fails validation.
pub fn load(path: Option<&Path>) -> Result<TimelineConfig> {
    let mut config = match path {
        Some(path) => from_file(path)?,
        None => {
            let default_path = default_config_path();
            if default_path.is_file() {
                from_file(&default_path)?
            } else {
                tracing::debug!(path = %default_path.display(), "no config file; using defaults");
                TimelineConfig::default()
            }
        }
    };
    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    config.validate()?;
    Ok(config)
}

/// Apply environment overrides using `lookup` to read variables.
///
/// - An LLM key, base URL or keyless flag creates an [`LlmConfig`] with
///   defaults if none was configured.
/// - A base URL alone does not make expansion available. Keyless proxies
///   also need [`LLM_ALLOW_KEYLESS_VAR`].
/// - Blank values and unrecognised flag values are ignored.
pub fn apply_env_overrides<F>(config: &mut TimelineConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
    let first = |names: &[&str]| names.iter().find_map(|name| read(name));

    if let Some(key) = first(S2_API_KEY_VARS) {
        config.source.api_key = Some(key);
    }

    let llm_key = first(LLM_API_KEY_VARS);
    let llm_base = read(LLM_BASE_URL_VAR);
    let allow_keyless = read(LLM_ALLOW_KEYLESS_VAR).and_then(|v| parse_flag(&v));
    if llm_key.is_none() && llm_base.is_none() && allow_keyless.is_none() {
        return;
    }

    let llm = config.llm.get_or_insert_with(LlmConfig::default);
    if let Some(key) = llm_key {
        llm.api_key = Some(key);
    }
    if let Some(base) = llm_base {
        llm.base_url = base;
    }
    if let Some(flag) = allow_keyless {
        llm.allow_keyless = flag;
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        other => {
            tracing::warn!(var = LLM_ALLOW_KEYLESS_VAR, value = other, "ignoring unrecognised flag value");
            None
        }
    }
}
