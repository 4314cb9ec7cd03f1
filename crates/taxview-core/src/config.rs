use serde::{Deserialize, Serialize};
use std::env;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Default cap on tree depth during materialization.
pub const DEFAULT_MAX_DEPTH: usize = 100;

pub const PROJECT_CONFIG_FILE: &str = "taxview.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewerConfig {
    #[serde(default)]
    pub hierarchy: HierarchyConfig,
    #[serde(default)]
    pub calculation: CalculationConfig,
    #[serde(default)]
    pub presentation: PresentationConfig,
    #[serde(default)]
    pub output: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HierarchyConfig {
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationConfig {
    /// Wrap a role with no natural root in a synthetic role-level root.
    #[serde(default = "default_true")]
    pub synthesize_role_root: bool,
}

impl Default for CalculationConfig {
    fn default() -> Self {
        Self {
            synthesize_role_root: default_true(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresentationConfig {
    #[serde(default = "default_true")]
    pub group_by_role: bool,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            group_by_role: default_true(),
        }
    }
}

/// Load `taxview.toml` from `project_root`. A missing file yields defaults.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file exists but cannot be read or parsed.
pub fn load_project_config(project_root: &Path) -> Result<ViewerConfig, ConfigError> {
    load_config_file(&project_root.join(PROJECT_CONFIG_FILE))
}

/// Load the per-user config at `<config_dir>/taxview/config.toml`.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<ViewerConfig, ConfigError> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(ViewerConfig::default());
    };
    load_config_file(&config_dir.join("taxview/config.toml"))
}

/// Load a config file. A missing file yields defaults.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file exists but cannot be read or parsed.
pub fn load_config_file(path: &Path) -> Result<ViewerConfig, ConfigError> {
    if !path.exists() {
        return Ok(ViewerConfig::default());
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str::<ViewerConfig>(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveConfig {
    pub viewer: ViewerConfig,
    pub resolved_output: String,
}

/// Resolve the configuration for one invocation.
///
/// An explicit `config_path` replaces the project/user lookup. Otherwise the
/// project file wins over the user file when present.
///
/// # Errors
///
/// Returns [`ConfigError`] if a config file exists but is invalid.
pub fn resolve_config(
    project_root: &Path,
    config_path: Option<&PathBuf>,
    cli_json: bool,
) -> Result<EffectiveConfig, ConfigError> {
    let viewer = match config_path {
        Some(path) => load_config_file(path)?,
        None if project_root.join(PROJECT_CONFIG_FILE).exists() => {
            load_project_config(project_root)?
        }
        None => load_user_config()?,
    };

    let env_format = env::var("FORMAT").ok();
    let resolved_output = resolve_output(cli_json, viewer.output.clone(), env_format);

    Ok(EffectiveConfig {
        viewer,
        resolved_output,
    })
}

fn resolve_output(cli_json: bool, configured: Option<String>, env_format: Option<String>) -> String {
    fn normalize_output_mode(raw: &str) -> Option<&'static str> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pretty" | "human" => Some("pretty"),
            "text" | "table" => Some("text"),
            "json" => Some("json"),
            _ => None,
        }
    }

    if cli_json {
        return "json".to_string();
    }

    if let Some(mode) = env_format.as_deref().and_then(normalize_output_mode) {
        return mode.to_string();
    }

    if let Some(mode) = configured.as_deref().and_then(normalize_output_mode) {
        return mode.to_string();
    }

    if std::io::stdout().is_terminal() {
        "pretty".to_string()
    } else {
        "text".to_string()
    }
}

const fn default_true() -> bool {
    true
}

const fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}
