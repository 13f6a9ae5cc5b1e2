//! RingCentral lint rules
//!
//! This crate provides the rules of eslint-plugin-ringcentral on top of the oxc AST.
//! Rules can be used:
//! 1. Standalone, by calling a rule's `check` methods on oxc nodes
//! 2. Through [`LintRunner`], which walks a whole program once
//! 3. From ESLint-style JSON configuration via [`LintConfig`]

pub mod config;
pub mod rules;
pub mod utils;
pub mod visitor;
mod diagnostic;

pub use config::{ConfigError, LintConfig, Preset, RuleEntry, Settings, Severity};
pub use diagnostic::{Diagnostic, DiagnosticSeverity};
pub use rules::*;
pub use visitor::{lint, lint_with_config, LintResult, LintRunner, RulesConfig};

use serde::Serialize;

/// Prefix under which the rules are registered, e.g. `ringcentral/too-many-brand-check-call`
pub const PLUGIN_NAME: &str = "ringcentral";

/// Rule type, mirroring ESLint's `meta.type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleCategory {
    /// Code that will cause errors or confusing behavior
    Problem,
    /// Something that could be done in a better way
    Suggestion,
    /// Whitespace, comments and other cosmetic concerns
    Layout,
}

impl RuleCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Problem => "problem",
            Self::Suggestion => "suggestion",
            Self::Layout => "layout",
        }
    }
}

/// Rule metadata
pub trait RuleMeta {
    const NAME: &'static str;
    const CATEGORY: RuleCategory;
    const DESCRIPTION: &'static str;

    /// Fully qualified rule id as used in configuration files
    fn id() -> String {
        format!("{}/{}", PLUGIN_NAME, Self::NAME)
    }

    /// URL to documentation
    fn docs_url() -> String {
        "https://github.com/ringcentral/ringcentral-javascript".to_string()
    }
}

/// Metadata of a registered rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleInfo {
    /// Fully qualified id, e.g. `ringcentral/too-many-brand-check-call`
    pub id: String,
    #[serde(skip)]
    pub name: &'static str,
    pub category: RuleCategory,
    pub description: &'static str,
    pub docs_url: String,
}

impl RuleInfo {
    fn of<R: RuleMeta>() -> Self {
        Self {
            id: R::id(),
            name: R::NAME,
            category: R::CATEGORY,
            description: R::DESCRIPTION,
            docs_url: R::docs_url(),
        }
    }
}

/// Every rule of the plugin, in registration order
pub fn all_rules() -> Vec<RuleInfo> {
    vec![
        RuleInfo::of::<SpecifiedCommentWithTaskId>(),
        RuleInfo::of::<TooManyBrandCheckCall>(),
    ]
}

/// Look up a rule by its unprefixed name
pub fn rule_info(name: &str) -> Option<RuleInfo> {
    all_rules().into_iter().find(|rule| rule.name == name)
}
