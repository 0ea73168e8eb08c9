use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::issues::Rule;

pub const CONFIG_FILE_NAME: &str = ".tsctlrc.json";

/// Rules that cannot be turned off in the config file.
const MANDATORY_RULES: &[Rule] = &[Rule::ParseError];

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_translations_root", alias = "translationsDir")]
    pub translations_root: String,
    #[serde(default)]
    pub ignores: Vec<String>,
    /// Rule names as printed in reports, e.g. `"unfinished"`.
    #[serde(default)]
    pub disabled_rules: Vec<String>,
    #[serde(default)]
    pub fail_on_warnings: bool,
    /// Expected `language` attribute of every catalog, e.g. `"pt_BR"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

fn default_translations_root() -> String {
    "./".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            translations_root: default_translations_root(),
            ignores: Vec::new(),
            disabled_rules: Vec::new(),
            fail_on_warnings: false,
            language: None,
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `ignores` is invalid or a
    /// disabled rule name is unknown.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        for name in &self.disabled_rules {
            match Rule::from_name(name) {
                Some(rule) if MANDATORY_RULES.contains(&rule) => {
                    bail!("Rule '{}' cannot be disabled", name)
                }
                Some(_) => {}
                None => bail!("Unknown rule in 'disabledRules': \"{}\"", name),
            }
        }

        Ok(())
    }

    pub fn is_rule_enabled(&self, rule: Rule) -> bool {
        !self
            .disabled_rules
            .iter()
            .any(|name| Rule::from_name(name) == Some(rule))
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Directory containing the config file, or the start directory when using defaults.
    /// Relative paths in the config resolve against it.
    pub base_dir: PathBuf,
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            let base_dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            Ok(ConfigLoadResult {
                config,
                base_dir,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            base_dir: start_dir.to_path_buf(),
            from_file: false,
        }),
    }
}
