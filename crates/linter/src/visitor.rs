//! Single-pass rule runner
//!
//! `LintRunner` walks a program once. Comment rules run when the program is
//! entered; expression rules run on every logical expression. State shared
//! between visits, such as the brand check operand cache, lives for one file.

use log::{debug, trace};
use oxc_ast::ast::{LogicalExpression, Program};
use oxc_ast_visit::{walk, Visit};
use oxc_span::SourceType;
use rustc_hash::FxHashMap;

use crate::config::{ConfigError, LintConfig};
use crate::diagnostic::{Diagnostic, DiagnosticSeverity};
use crate::rules::{NodeCache, SpecifiedCommentWithTaskId, TooManyBrandCheckCall};
use crate::RuleMeta;

/// Configuration for which rules are enabled, and at which severity
#[derive(Debug, Clone)]
pub struct RulesConfig {
    pub specified_comment_with_task_id: Option<SpecifiedCommentWithTaskId>,
    pub too_many_brand_check_call: Option<TooManyBrandCheckCall>,
    severities: FxHashMap<&'static str, DiagnosticSeverity>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self::none()
            .with_specified_comment_with_task_id(SpecifiedCommentWithTaskId::new())
            .with_too_many_brand_check_call(TooManyBrandCheckCall::new())
    }
}

impl RulesConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn none() -> Self {
        Self {
            specified_comment_with_task_id: None,
            too_many_brand_check_call: None,
            severities: FxHashMap::default(),
        }
    }

    /// Build the rule set described by an ESLint-style configuration
    pub fn from_config(config: &LintConfig) -> Result<Self, ConfigError> {
        let mut rules = Self::none();

        for (id, severity, options) in config.resolve_rules()? {
            let Some(severity) = DiagnosticSeverity::from_configured(severity) else {
                trace!("Rule '{id}' is turned off");
                continue;
            };

            if id == SpecifiedCommentWithTaskId::id() {
                rules = rules
                    .with_specified_comment_with_task_id(SpecifiedCommentWithTaskId::new())
                    .with_severity(SpecifiedCommentWithTaskId::NAME, severity);
            } else if id == TooManyBrandCheckCall::id() {
                let rule = TooManyBrandCheckCall::from_options(options.as_ref(), &config.settings)
                    .map_err(|source| ConfigError::InvalidOptions {
                        rule: id.clone(),
                        source,
                    })?;
                rules = rules
                    .with_too_many_brand_check_call(rule)
                    .with_severity(TooManyBrandCheckCall::NAME, severity);
            }
            debug!("Enabled rule '{id}' as {}", severity.as_str());
        }

        Ok(rules)
    }

    pub fn with_specified_comment_with_task_id(mut self, rule: SpecifiedCommentWithTaskId) -> Self {
        self.specified_comment_with_task_id = Some(rule);
        self
    }

    pub fn with_too_many_brand_check_call(mut self, rule: TooManyBrandCheckCall) -> Self {
        self.too_many_brand_check_call = Some(rule);
        self
    }

    /// Override the severity of diagnostics reported by `rule`
    pub fn with_severity(mut self, rule: &'static str, severity: DiagnosticSeverity) -> Self {
        self.severities.insert(rule, severity);
        self
    }

    /// Names of the enabled rules
    pub fn enabled_rules(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.specified_comment_with_task_id.is_some() {
            names.push(SpecifiedCommentWithTaskId::NAME);
        }
        if self.too_many_brand_check_call.is_some() {
            names.push(TooManyBrandCheckCall::NAME);
        }
        names
    }

    fn severity_of(&self, rule: &str) -> Option<DiagnosticSeverity> {
        self.severities.get(rule).copied()
    }
}

/// Visitor that runs every enabled rule during one traversal
pub struct LintRunner<'a, 'c> {
    source_text: &'a str,
    source_type: SourceType,
    config: &'c RulesConfig,
    diagnostics: Vec<Diagnostic>,
    /// Chain operands already examined by too-many-brand-check-call in this file
    brand_check_cache: NodeCache,
}

impl<'a, 'c> LintRunner<'a, 'c> {
    pub fn new(source_text: &'a str, source_type: SourceType, config: &'c RulesConfig) -> Self {
        Self {
            source_text,
            source_type,
            config,
            diagnostics: Vec::new(),
            brand_check_cache: NodeCache::new(),
        }
    }

    /// Run all enabled rules on the given program
    pub fn run(mut self, program: &Program<'a>) -> LintResult {
        self.visit_program(program);
        self.diagnostics
            .sort_by(|a, b| (a.start, a.end).cmp(&(b.start, b.end)));
        debug!(
            "Linted {} bytes of {}: {} diagnostic(s), {} chain operand(s) examined",
            self.source_text.len(),
            source_kind(self.source_type),
            self.diagnostics.len(),
            self.brand_check_cache.len()
        );
        LintResult {
            diagnostics: self.diagnostics,
        }
    }

    /// Report a diagnostic, applying the configured severity of its rule
    fn report(&mut self, diagnostic: Diagnostic) {
        let diagnostic = match self.config.severity_of(&diagnostic.rule) {
            Some(severity) => diagnostic.with_severity(severity),
            None => diagnostic,
        };
        self.diagnostics.push(diagnostic);
    }

    /// Check all comments of the program
    fn check_program(&mut self, program: &Program<'a>) {
        let config = self.config;
        // specified-comment-with-task-id
        if let Some(rule) = &config.specified_comment_with_task_id {
            for diagnostic in rule.check(program, self.source_text) {
                self.report(diagnostic);
            }
        }
    }

    /// Check a logical expression with all applicable rules
    fn check_logical_expression(&mut self, expr: &LogicalExpression<'a>) {
        let config = self.config;
        // too-many-brand-check-call
        if let Some(rule) = &config.too_many_brand_check_call {
            if let Some(diagnostic) = rule.check(expr, &mut self.brand_check_cache) {
                self.report(diagnostic);
            }
        }
    }
}

impl<'a> Visit<'a> for LintRunner<'a, '_> {
    fn visit_program(&mut self, program: &Program<'a>) {
        self.check_program(program);
        walk::walk_program(self, program);
    }

    fn visit_logical_expression(&mut self, expr: &LogicalExpression<'a>) {
        self.check_logical_expression(expr);
        walk::walk_logical_expression(self, expr);
    }
}

fn source_kind(source_type: SourceType) -> &'static str {
    match (source_type.is_typescript(), source_type.is_jsx()) {
        (true, true) => "TSX",
        (true, false) => "TypeScript",
        (false, true) => "JSX",
        (false, false) => "JavaScript",
    }
}

/// Diagnostics of one file, ordered by position
#[derive(Debug, Default)]
pub struct LintResult {
    pub diagnostics: Vec<Diagnostic>,
}

impl LintResult {
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.warning_count() > 0
    }

    pub fn error_count(&self) -> usize {
        self.count(DiagnosticSeverity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(DiagnosticSeverity::Warning)
    }

    fn count(&self, severity: DiagnosticSeverity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }
}

/// Lint a module with the default rule set
pub fn lint<'a>(source_text: &'a str, program: &Program<'a>) -> LintResult {
    let config = RulesConfig::default();
    LintRunner::new(source_text, SourceType::mjs(), &config).run(program)
}

/// Lint a program with the given rule set
pub fn lint_with_config<'a>(
    source_text: &'a str,
    source_type: SourceType,
    program: &Program<'a>,
    config: &RulesConfig,
) -> LintResult {
    LintRunner::new(source_text, source_type, config).run(program)
}
