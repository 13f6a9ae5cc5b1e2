//! RingCentral lint
//!
//! Runs the eslint-plugin-ringcentral rules over JavaScript and TypeScript sources
//! parsed with OXC.
//!
//! ## Usage
//!
//! ```rust
//! use ringcentral_lint::{lint_source, RulesConfig};
//!
//! let source = "// TODO fix later\nconst a = 1;";
//! let result = lint_source("input.js", source, &RulesConfig::default()).unwrap();
//! assert_eq!(result.warning_count(), 1);
//! ```

pub use ringcentral_linter::{
    ConfigError, Diagnostic, DiagnosticSeverity, LintConfig, LintResult, RulesConfig,
};

#[cfg(feature = "napi")]
use napi_derive::napi;

use log::debug;
use oxc_allocator::Allocator;
use oxc_parser::Parser;
use oxc_span::SourceType;
use thiserror::Error;

/// Errors that stop a file from being linted
#[derive(Debug, Error)]
pub enum LintError {
    #[error("failed to parse {file}: {}", .messages.join("; "))]
    Parse { file: String, messages: Vec<String> },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A diagnostic as seen from JavaScript
#[cfg(feature = "napi")]
#[napi(object)]
pub struct JsDiagnostic {
    /// Fully qualified rule id, e.g. `ringcentral/too-many-brand-check-call`
    pub rule: String,
    pub message: String,
    /// "error" or "warning"
    pub severity: String,
    /// 1-based line
    pub line: u32,
    /// 1-based column
    pub column: u32,
    pub start: u32,
    pub end: u32,
}

/// Lint options exposed to JavaScript
#[cfg(feature = "napi")]
#[napi(object)]
#[derive(Default)]
pub struct JsLintOptions {
    /// Source filename, used to pick the syntax
    /// @default "input.tsx"
    pub filename: Option<String>,

    /// ESLint-style configuration as JSON text
    /// @default recommended preset
    pub config: Option<String>,
}

/// Lint source text
#[cfg(feature = "napi")]
#[napi]
pub fn lint_text(source: String, options: Option<JsLintOptions>) -> napi::Result<Vec<JsDiagnostic>> {
    let js_options = options.unwrap_or_default();
    let filename = js_options.filename.as_deref().unwrap_or("input.tsx");

    let config = match js_options.config.as_deref() {
        Some(text) => rules_from_json(text),
        None => Ok(RulesConfig::default()),
    }
    .map_err(|e| napi::Error::from_reason(e.to_string()))?;

    let result = lint_source(filename, &source, &config)
        .map_err(|e| napi::Error::from_reason(e.to_string()))?;

    Ok(result
        .diagnostics
        .into_iter()
        .map(|diagnostic| {
            let (line, column) = diagnostic.line_col(&source);
            JsDiagnostic {
                rule: format!("{}/{}", ringcentral_linter::PLUGIN_NAME, diagnostic.rule),
                severity: diagnostic.severity.as_str().to_string(),
                line: line as u32,
                column: column as u32,
                start: diagnostic.start,
                end: diagnostic.end,
                message: diagnostic.message,
            }
        })
        .collect())
}

/// Build the rule set from ESLint-style JSON configuration
pub fn rules_from_json(text: &str) -> Result<RulesConfig, LintError> {
    let config = LintConfig::from_json(text)?;
    Ok(RulesConfig::from_config(&config)?)
}

/// Parse and lint one file
///
/// The syntax is picked from the extension of `file_name`, falling back to TSX.
/// Any parser error fails the whole file; no rule runs on a partial AST.
pub fn lint_source(
    file_name: &str,
    source: &str,
    config: &RulesConfig,
) -> Result<LintResult, LintError> {
    let allocator = Allocator::default();
    let source_type = SourceType::from_path(file_name).unwrap_or(SourceType::tsx());

    let ret = Parser::new(&allocator, source, source_type).parse();
    if !ret.errors.is_empty() {
        return Err(LintError::Parse {
            file: file_name.to_string(),
            messages: ret.errors.iter().map(|e| e.to_string()).collect(),
        });
    }

    let result = ringcentral_linter::lint_with_config(source, source_type, &ret.program, config);
    debug!("{}: {} diagnostic(s)", file_name, result.diagnostics.len());
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_source() {
        let result = lint_source("input.js", "const a = 1;", &RulesConfig::default()).unwrap();
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_untagged_todo() {
        let source = "// TODO fix later\nconst a = 1;";
        let result = lint_source("input.js", source, &RulesConfig::default()).unwrap();
        assert_eq!(result.warning_count(), 1);
        assert_eq!(result.diagnostics[0].line_col(source), (1, 1));
    }

    #[test]
    fn test_typescript_source() {
        let source = "let n: number = 1; // FIXME (alice) widen type";
        let result = lint_source("input.ts", source, &RulesConfig::default()).unwrap();
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_unknown_extension_falls_back_to_tsx() {
        let source = "const el = <div>{value as string}</div>;";
        assert!(lint_source("input.unknown", source, &RulesConfig::default()).is_ok());
    }

    #[test]
    fn test_parse_error() {
        let err = lint_source("broken.js", "const = ;", &RulesConfig::default()).unwrap_err();
        match err {
            LintError::Parse { file, messages } => {
                assert_eq!(file, "broken.js");
                assert!(!messages.is_empty());
            }
            other => panic!("expected a parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_rules_from_json() {
        let config = rules_from_json(
            r#"{ "rules": { "ringcentral/specified-comment-with-task-id": "off" } }"#,
        )
        .unwrap();
        let result = lint_source("input.js", "// TODO later", &config).unwrap();
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_rules_from_json_rejects_unknown_rule() {
        let err = rules_from_json(r#"{ "rules": { "ringcentral/no-such-rule": "error" } }"#)
            .unwrap_err();
        assert!(matches!(err, LintError::Config(ConfigError::UnknownRule(_))));
    }
}
