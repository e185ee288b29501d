//! Configuration for feature selection runs.
//!
//! Uses `figment` for layered configuration: defaults -> user config file ->
//! workspace `featsel.toml` -> environment (`FEATSEL_` prefix) -> explicit
//! overrides.

use crate::error::Result;
use crate::search::SearchKind;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the workspace-level configuration file.
pub const WORKSPACE_CONFIG_FILE: &str = "featsel.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Where result files go.
    #[serde(default)]
    pub output: OutputConfig,
    /// Log file settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SelectionConfig {
    /// Path of the result file for `kind`.
    pub fn output_path(&self, kind: SearchKind) -> PathBuf {
        let file = match kind {
            SearchKind::Forward => &self.output.forward_file,
            SearchKind::Backward => &self.output.backward_file,
        };
        self.output.dir.join(file)
    }
}

/// Result file locations. One file per search kind, overwritten each run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_forward_file")]
    pub forward_file: String,
    #[serde(default = "default_backward_file")]
    pub backward_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            forward_file: default_forward_file(),
            backward_file: default_backward_file(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_forward_file() -> String {
    "forward_selection.csv".to_string()
}

fn default_backward_file() -> String {
    "backward_selection.csv".to_string()
}

/// Structured log output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Directory for daily-rotated JSON logs. Disabled when unset.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

/// Path of the user-level config file, if a home directory is known.
pub fn user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("dev", "featsel", "featsel")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Load configuration from all layers.
///
/// `explicit` names a config file that must be merged after the workspace
/// file (e.g. from `--config`).
pub fn load_config(
    workspace: Option<&Path>,
    explicit: Option<&Path>,
) -> Result<SelectionConfig> {
    let config: SelectionConfig = figment(workspace, explicit)
        .extract()
        .map_err(Box::new)?;
    Ok(config)
}

fn figment(workspace: Option<&Path>, explicit: Option<&Path>) -> Figment {
    let mut figment = Figment::from(Serialized::defaults(SelectionConfig::default()));

    // User-level config
    if let Some(user_config) = user_config_path() {
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }
    }

    // Workspace-level config
    if let Some(ws) = workspace {
        let ws_config = ws.join(WORKSPACE_CONFIG_FILE);
        if ws_config.exists() {
            figment = figment.merge(Toml::file(&ws_config));
        }
    }

    if let Some(path) = explicit {
        figment = figment.merge(Toml::file(path));
    }

    // Environment variables (FEATSEL_OUTPUT__DIR, FEATSEL_LOGGING__LOG_DIR, ...)
    figment.merge(Env::prefixed("FEATSEL_").split("__"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SelectionConfig::default();
        assert_eq!(config.output.dir, PathBuf::from("."));
        assert_eq!(
            config.output_path(SearchKind::Forward),
            PathBuf::from("./forward_selection.csv")
        );
        assert_eq!(
            config.output_path(SearchKind::Backward),
            PathBuf::from("./backward_selection.csv")
        );
        assert!(config.logging.log_dir.is_none());
    }

    #[test]
    fn test_workspace_file_and_env_layers() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                WORKSPACE_CONFIG_FILE,
                r#"
                [output]
                dir = "results"
                forward_file = "fwd.csv"
                "#,
            )?;
            jail.set_env("FEATSEL_OUTPUT__BACKWARD_FILE", "bwd.csv");

            let config = load_config(Some(jail.directory()), None).map_err(|e| e.to_string())?;
            assert_eq!(
                config.output_path(SearchKind::Forward),
                PathBuf::from("results/fwd.csv")
            );
            assert_eq!(
                config.output_path(SearchKind::Backward),
                PathBuf::from("results/bwd.csv")
            );
            Ok(())
        });
    }

    #[test]
    fn test_explicit_file_overrides_workspace() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(WORKSPACE_CONFIG_FILE, "[output]\ndir = \"a\"\n")?;
            jail.create_file("custom.toml", "[output]\ndir = \"b\"\n")?;

            let config = load_config(
                Some(jail.directory()),
                Some(&jail.directory().join("custom.toml")),
            )
            .map_err(|e| e.to_string())?;
            assert_eq!(config.output.dir, PathBuf::from("b"));
            Ok(())
        });
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(WORKSPACE_CONFIG_FILE, "[output\ndir = \"a\"\n")?;

            let err = load_config(Some(jail.directory()), None).unwrap_err();
            assert!(matches!(err, crate::error::SelectionError::Config(_)));
            assert!(err.to_string().starts_with("Configuration error: "));
            Ok(())
        });
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = SelectionConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: SelectionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
