//! Lint findings

use oxc_span::Span;
use serde::Serialize;

use crate::config::Severity;
use crate::utils::offset_to_line_col;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

impl DiagnosticSeverity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }

    /// Map a configured rule severity; `off` has no diagnostic counterpart
    pub fn from_configured(severity: Severity) -> Option<Self> {
        match severity {
            Severity::Off => None,
            Severity::Warn => Some(Self::Warning),
            Severity::Error => Some(Self::Error),
        }
    }
}

/// One finding of a rule, located by byte offsets into the linted source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Rule name without the plugin prefix
    pub rule: &'static str,
    pub start: u32,
    pub end: u32,
    pub message: String,
    pub severity: DiagnosticSeverity,
}

impl Diagnostic {
    pub fn new(
        rule: &'static str,
        span: Span,
        message: impl Into<String>,
        severity: DiagnosticSeverity,
    ) -> Self {
        Self {
            rule,
            start: span.start,
            end: span.end,
            message: message.into(),
            severity,
        }
    }

    pub fn warning(rule: &'static str, span: Span, message: impl Into<String>) -> Self {
        Self::new(rule, span, message, DiagnosticSeverity::Warning)
    }

    pub fn error(rule: &'static str, span: Span, message: impl Into<String>) -> Self {
        Self::new(rule, span, message, DiagnosticSeverity::Error)
    }

    pub fn with_severity(self, severity: DiagnosticSeverity) -> Self {
        Self { severity, ..self }
    }

    /// 1-based line and column of the diagnostic start within `source`
    pub fn line_col(&self, source: &str) -> (usize, usize) {
        offset_to_line_col(source, self.start)
    }
}
