use crate::domain::{PhaseSelection, TagPattern, DEFAULT_TAG_PATTERN};
use crate::error::{ReleaseCheckError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the project-local configuration file
pub const CONFIG_FILE: &str = "checkrelease.toml";

/// Represents the complete configuration for check-release.
///
/// Describes the project being released and how its candidate is built.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub project: ProjectConfig,

    #[serde(default)]
    pub build: BuildConfig,
}

fn default_project_name() -> String {
    "tpaf".to_string()
}

fn default_version_header() -> String {
    "src/daemon/tpaf_version.h".to_string()
}

fn default_tag_pattern() -> String {
    DEFAULT_TAG_PATTERN.to_string()
}

/// Project identity: naming of the version artifact and release tags.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProjectConfig {
    /// Used for the `<NAME>_VERSION` marker and the `<name>-<version>/` archive prefix
    #[serde(default = "default_project_name")]
    pub name: String,

    /// Generated header holding the version marker, relative to the source root
    #[serde(default = "default_version_header")]
    pub version_header: String,

    /// Regex a tag name must match to count as a release tag
    #[serde(default = "default_tag_pattern")]
    pub tag_pattern: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        ProjectConfig {
            name: default_project_name(),
            version_header: default_version_header(),
            tag_pattern: default_tag_pattern(),
        }
    }
}

impl ProjectConfig {
    pub fn tag_pattern(&self) -> Result<TagPattern> {
        TagPattern::new(&self.tag_pattern)
    }
}

fn default_extra_cflags() -> String {
    "-Werror".to_string()
}

fn default_valgrind_flag() -> String {
    "--enable-valgrind".to_string()
}

/// Build settings applied to every candidate build.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BuildConfig {
    #[serde(default = "default_extra_cflags")]
    pub extra_cflags: String,

    /// Configure option enabling memory checking in the test suite
    #[serde(default = "default_valgrind_flag")]
    pub valgrind_flag: String,

    /// Extra options passed to `configure` for the test build
    #[serde(default)]
    pub configure_options: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            extra_cflags: default_extra_cflags(),
            valgrind_flag: default_valgrind_flag(),
            configure_options: String::new(),
        }
    }
}

/// Options handed to the validator when it is constructed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidatorOptions {
    pub phases: PhaseSelection,
    /// Run the test suite under memory-checking instrumentation
    pub use_valgrind: bool,
    /// Effective compiler flags for candidate builds
    pub cflags: String,
}

impl ValidatorOptions {
    pub fn new(
        build: &BuildConfig,
        phases: PhaseSelection,
        use_valgrind: bool,
        env_cflags: Option<&str>,
    ) -> Self {
        ValidatorOptions {
            phases,
            use_valgrind,
            cflags: effective_cflags(&build.extra_cflags, env_cflags),
        }
    }
}

/// Combine configured flags with flags from the environment, environment last.
pub fn effective_cflags(extra: &str, env_cflags: Option<&str>) -> String {
    match env_cflags.map(str::trim).filter(|s| !s.is_empty()) {
        Some(env) if extra.is_empty() => env.to_string(),
        Some(env) => format!("{} {}", extra, env),
        None => extra.to_string(),
    }
}

/// Reads `CFLAGS` from the process environment.
pub fn env_cflags() -> Option<String> {
    std::env::var("CFLAGS").ok()
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `checkrelease.toml` in current directory
/// 3. `.checkrelease.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let local = Path::new(".").join(CONFIG_FILE);

    let path = if let Some(path) = config_path {
        Path::new(path).to_path_buf()
    } else if local.exists() {
        local
    } else if let Some(config_dir) = dirs::config_dir() {
        let user = config_dir.join(format!(".{}", CONFIG_FILE));
        if user.exists() {
            user
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config_str = fs::read_to_string(&path).map_err(|e| {
        ReleaseCheckError::config(format!("Cannot read {}: {}", path.display(), e))
    })?;

    parse_config(&config_str)
        .map_err(|e| ReleaseCheckError::config(format!("{}: {}", path.display(), e)))
}

/// Parse configuration text, validating the tag pattern eagerly.
pub fn parse_config(text: &str) -> Result<Config> {
    let config: Config =
        toml::from_str(text).map_err(|e| ReleaseCheckError::config(e.to_string()))?;
    config.project.tag_pattern()?;
    Ok(config)
}
