//! ringcentral/too-many-brand-check-call
//!
//! Disallow long `&&` / `||` chains of brand check calls such as
//! `isTablet() && isFeatureEnabled() && ...`.
//!
//! A chain is walked from its outermost logical expression down the `left`
//! spine. Operands that were already examined are remembered in a [`NodeCache`]
//! so the inner logical expressions of a reported chain are not reported again
//! when the traversal reaches them.

use oxc_ast::ast::{CallExpression, Expression, LogicalExpression, UnaryExpression};
use oxc_span::{GetSpan, Span};
use oxc_syntax::operator::UnaryOperator;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::config::Settings;
use crate::diagnostic::Diagnostic;
use crate::utils::callee_identifier_name;
use crate::{RuleCategory, RuleMeta};

pub const DEFAULT_MAX_ALLOW_BRAND_CHECK_CALL: usize = 3;

/// Options accepted in the rule entry, e.g. `["error", { "maxAllowBrandCheckCall": 4 }]`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TooManyBrandCheckCallConfig {
    /// Chains with more brand check calls than this are reported.
    /// Any JSON number is accepted; it is floored and clamped at zero.
    #[serde(
        default = "default_max_allow_brand_check_call",
        deserialize_with = "deserialize_max_allow"
    )]
    pub max_allow_brand_check_call: usize,
    /// Brand check function names, merged with `settings.brandCheckMethods`
    #[serde(default)]
    pub brand_check_methods: Vec<String>,
}

fn default_max_allow_brand_check_call() -> usize {
    DEFAULT_MAX_ALLOW_BRAND_CHECK_CALL
}

/// Chain lengths are whole and at least one, so `len > max` equals
/// `len > floor(max)`, and a negative max reports like zero
fn deserialize_max_allow<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let max = f64::deserialize(deserializer)?;
    Ok(max.max(0.0).floor() as usize)
}

impl Default for TooManyBrandCheckCallConfig {
    fn default() -> Self {
        Self {
            max_allow_brand_check_call: DEFAULT_MAX_ALLOW_BRAND_CHECK_CALL,
            brand_check_methods: Vec::new(),
        }
    }
}

/// Nodes already classified during one traversal, keyed by source span
#[derive(Debug, Default)]
pub struct NodeCache {
    seen: FxHashSet<Span>,
}

impl NodeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a node; returns `false` if it was already recorded
    fn insert(&mut self, span: Span) -> bool {
        self.seen.insert(span)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// The node shapes a chain operand can take
enum ChainOperand<'e, 'a> {
    Logical(&'e LogicalExpression<'a>),
    Call(&'e CallExpression<'a>),
    Not(&'e UnaryExpression<'a>),
    Other,
}

impl<'e, 'a> ChainOperand<'e, 'a> {
    fn classify(expr: &'e Expression<'a>) -> Self {
        match expr.without_parentheses() {
            Expression::LogicalExpression(logical) => Self::Logical(logical),
            Expression::CallExpression(call) => Self::Call(call),
            Expression::UnaryExpression(unary) if unary.operator == UnaryOperator::LogicalNot => {
                Self::Not(unary)
            }
            _ => Self::Other,
        }
    }
}

/// too-many-brand-check-call rule
#[derive(Debug, Clone)]
pub struct TooManyBrandCheckCall {
    max_allow_brand_check_call: usize,
    brand_check_methods: FxHashSet<String>,
}

impl Default for TooManyBrandCheckCall {
    fn default() -> Self {
        Self::with_config(TooManyBrandCheckCallConfig::default(), &Settings::default())
    }
}

impl RuleMeta for TooManyBrandCheckCall {
    const NAME: &'static str = "too-many-brand-check-call";
    const CATEGORY: RuleCategory = RuleCategory::Suggestion;
    const DESCRIPTION: &'static str =
        "Use brand check method more than 3 times in same LogicalExpression";
}

impl TooManyBrandCheckCall {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the rule from its options and the shared settings
    pub fn with_config(config: TooManyBrandCheckCallConfig, settings: &Settings) -> Self {
        let brand_check_methods = config
            .brand_check_methods
            .into_iter()
            .chain(settings.brand_check_methods.iter().cloned())
            .collect();
        Self {
            max_allow_brand_check_call: config.max_allow_brand_check_call,
            brand_check_methods,
        }
    }

    /// Resolve the rule from a raw options value as found in a rule entry
    pub fn from_options(
        options: Option<&Value>,
        settings: &Settings,
    ) -> Result<Self, serde_json::Error> {
        let config = match options {
            Some(value) => TooManyBrandCheckCallConfig::deserialize(value)?,
            None => TooManyBrandCheckCallConfig::default(),
        };
        Ok(Self::with_config(config, settings))
    }

    pub fn with_max_allow_brand_check_call(mut self, max: usize) -> Self {
        self.max_allow_brand_check_call = max;
        self
    }

    pub fn with_brand_check_methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.brand_check_methods.extend(methods.into_iter().map(Into::into));
        self
    }

    pub fn max_allow_brand_check_call(&self) -> usize {
        self.max_allow_brand_check_call
    }

    pub fn is_brand_check_method(&self, name: &str) -> bool {
        self.brand_check_methods.contains(name)
    }

    /// Check a logical expression visited by the traversal
    pub fn check<'a>(
        &self,
        logical: &LogicalExpression<'a>,
        cache: &mut NodeCache,
    ) -> Option<Diagnostic> {
        if self.brand_check_methods.is_empty() {
            return None;
        }

        let first = self.brand_check_callee(&logical.right, cache)?;
        let mut callees = vec![first];

        let mut current = &logical.left;
        while let Some(callee) = self.operand_callee(current, cache) {
            callees.push(callee);
            match ChainOperand::classify(current) {
                ChainOperand::Logical(inner) => current = &inner.left,
                _ => break,
            }
        }

        if callees.len() <= self.max_allow_brand_check_call {
            return None;
        }

        callees.reverse();
        let callee_names = callees
            .iter()
            .map(|name| format!("{name}()"))
            .collect::<Vec<_>>()
            .join(", ");

        Some(Diagnostic::warning(
            Self::NAME,
            logical.span,
            format!(
                "Call brand check method too many times [{callee_names}], please add a new field (isXXXX) in 'brandFeaturesConfig', and use \"getBrandFeatures().isXXXX\" here."
            ),
        ))
    }

    /// Resolve the operand contributed by one step of the chain: the right side
    /// of a logical expression, or the node itself at the bottom of the spine
    fn operand_callee<'a>(&self, expr: &Expression<'a>, cache: &mut NodeCache) -> Option<&'a str> {
        match ChainOperand::classify(expr) {
            ChainOperand::Logical(logical) => self.brand_check_callee(&logical.right, cache),
            _ => self.brand_check_callee(expr, cache),
        }
    }

    /// Resolve `isFoo()` or `!isFoo()` to `isFoo`; every node is examined once
    fn brand_check_callee<'a>(&self, expr: &Expression<'a>, cache: &mut NodeCache) -> Option<&'a str> {
        let expr = expr.without_parentheses();
        if !cache.insert(expr.span()) {
            return None;
        }

        match ChainOperand::classify(expr) {
            ChainOperand::Call(call) => {
                callee_identifier_name(call).filter(|name| self.is_brand_check_method(name))
            }
            ChainOperand::Not(unary) => self.brand_check_callee(&unary.argument, cache),
            ChainOperand::Logical(_) | ChainOperand::Other => None,
        }
    }
}
