//! ESLint-style configuration
//!
//! Accepts the subset of an `.eslintrc.json` that concerns this plugin:
//!
//! ```json
//! {
//!   "extends": ["plugin:ringcentral/recommended"],
//!   "rules": {
//!     "ringcentral/too-many-brand-check-call": ["error", { "maxAllowBrandCheckCall": 4 }]
//!   },
//!   "settings": { "brandCheckMethods": ["isTablet"] }
//! }
//! ```
//!
//! Rule keys of other plugins are ignored. Everything under the `ringcentral/`
//! namespace is validated here, before any rule runs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::{all_rules, PLUGIN_NAME};

/// Errors raised while reading or resolving a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Definition for rule '{0}' was not found")]
    UnknownRule(String),
    #[error("Unknown preset '{0}'")]
    UnknownPreset(String),
    #[error("Configuration for rule '{rule}' is invalid: {reason}")]
    InvalidSeverity { rule: String, reason: String },
    #[error("Configuration for rule '{rule}' is invalid: {source}")]
    InvalidOptions {
        rule: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Configured rule severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "u8")]
pub enum Severity {
    #[default]
    Off,
    Warn,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Off => "off",
            Severity::Warn => "warn",
            Severity::Error => "error",
        };
        f.write_str(name)
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        severity as u8
    }
}

impl TryFrom<Value> for Severity {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, String> {
        match &value {
            Value::Number(n) => match n.as_u64() {
                Some(0) => Ok(Severity::Off),
                Some(1) => Ok(Severity::Warn),
                Some(2) => Ok(Severity::Error),
                _ => Err(format!("Severity should be one of the following: 0 = off, 1 = warn, 2 = error (you passed '{value}')")),
            },
            Value::String(s) => match s.to_lowercase().as_str() {
                "off" => Ok(Severity::Off),
                "warn" => Ok(Severity::Warn),
                "error" => Ok(Severity::Error),
                _ => Err(format!("Severity should be one of the following: 0 = off, 1 = warn, 2 = error (you passed '{s}')")),
            },
            _ => Err(format!("Severity should be a number or a string (you passed '{value}')")),
        }
    }
}

/// A rule entry: either a bare severity or `[severity, options]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleEntry {
    Severity(Severity),
    WithOptions(Vec<Value>),
}

impl RuleEntry {
    /// Split the entry into its severity and the first options element
    pub fn resolve(&self, rule: &str) -> Result<(Severity, Option<Value>), ConfigError> {
        match self {
            RuleEntry::Severity(severity) => Ok((*severity, None)),
            RuleEntry::WithOptions(items) => {
                let Some(first) = items.first() else {
                    return Err(ConfigError::InvalidSeverity {
                        rule: rule.to_string(),
                        reason: "expected a severity as the first array element".to_string(),
                    });
                };
                let severity = Severity::try_from(first.clone()).map_err(|reason| {
                    ConfigError::InvalidSeverity {
                        rule: rule.to_string(),
                        reason,
                    }
                })?;
                Ok((severity, items.get(1).cloned()))
            }
        }
    }
}

/// Shared settings, readable by every rule
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Brand check function names shared across the project
    #[serde(default)]
    pub brand_check_methods: Vec<String>,
}

/// Plugin presets, usable through `extends`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Every rule as an error
    All,
    /// Every rule as a warning
    AllWarn,
    /// The recommended set
    Recommended,
}

impl Preset {
    pub fn name(self) -> &'static str {
        match self {
            Preset::All => "all",
            Preset::AllWarn => "all-warn",
            Preset::Recommended => "recommended",
        }
    }

    /// Rule ids and severities enabled by the preset
    pub fn rules(self) -> Vec<(String, Severity)> {
        let severity = match self {
            Preset::All => Severity::Error,
            Preset::AllWarn | Preset::Recommended => Severity::Warn,
        };
        all_rules()
            .into_iter()
            .map(|rule| (rule.id, severity))
            .collect()
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    /// Accepts `plugin:ringcentral/<name>` as well as the bare preset name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let prefix = format!("plugin:{PLUGIN_NAME}/");
        let name = s.strip_prefix(prefix.as_str()).unwrap_or(s);
        match name {
            "all" => Ok(Preset::All),
            "all-warn" => Ok(Preset::AllWarn),
            "recommended" => Ok(Preset::Recommended),
            _ => Err(ConfigError::UnknownPreset(s.to_string())),
        }
    }
}

/// Top-level configuration document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LintConfig {
    #[serde(default, deserialize_with = "one_or_many")]
    pub extends: Vec<String>,
    #[serde(default)]
    pub rules: serde_json::Map<String, Value>,
    #[serde(default)]
    pub settings: Settings,
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(s) => vec![s],
        OneOrMany::Many(v) => v,
    })
}

impl LintConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// A configuration that only extends the given preset
    pub fn preset(preset: Preset) -> Self {
        Self {
            extends: vec![format!("plugin:{PLUGIN_NAME}/{}", preset.name())],
            ..Self::default()
        }
    }

    /// Resolve every plugin rule to its severity and options.
    ///
    /// Presets are applied in order, then `rules` overrides them. An entry that
    /// only sets a severity keeps the options an earlier layer gave it, like
    /// ESLint does. Without `extends` and `rules` the recommended preset is used.
    pub fn resolve_rules(&self) -> Result<Vec<(String, Severity, Option<Value>)>, ConfigError> {
        let mut resolved: Vec<(String, Severity, Option<Value>)> = Vec::new();

        let mut set = |id: &str, severity: Severity, options: Option<Value>| {
            if let Some(entry) = resolved.iter_mut().find(|(name, _, _)| name == id) {
                entry.1 = severity;
                if options.is_some() {
                    entry.2 = options;
                }
            } else {
                resolved.push((id.to_string(), severity, options));
            }
        };

        if self.extends.is_empty() && self.rules.is_empty() {
            for (id, severity) in Preset::Recommended.rules() {
                set(&id, severity, None);
            }
        }

        for name in &self.extends {
            for (id, severity) in name.parse::<Preset>()?.rules() {
                set(&id, severity, None);
            }
        }

        let prefix = format!("{PLUGIN_NAME}/");
        for (key, value) in &self.rules {
            if !key.starts_with(prefix.as_str()) {
                log::debug!("Ignoring configuration for foreign rule '{key}'");
                continue;
            }
            if !is_known_rule(key) {
                return Err(ConfigError::UnknownRule(key.clone()));
            }
            let entry: RuleEntry = serde_json::from_value(value.clone()).map_err(|err| {
                ConfigError::InvalidSeverity {
                    rule: key.clone(),
                    reason: err.to_string(),
                }
            })?;
            let (severity, options) = entry.resolve(key)?;
            set(key, severity, options);
        }

        Ok(resolved)
    }
}

fn is_known_rule(id: &str) -> bool {
    all_rules().iter().any(|rule| rule.id == id)
}
