//! Report formatting

use anyhow::Result;
use colored::Colorize;
use ringcentral_lint::{Diagnostic, DiagnosticSeverity};
use ringcentral_linter::{all_rules, rule_info, RuleCategory, PLUGIN_NAME};
use serde::Serialize;
use std::fmt::Write;

use crate::FileReport;

#[derive(Serialize)]
struct JsonReport<'r> {
    file: String,
    diagnostics: Vec<JsonDiagnostic<'r>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonDiagnostic<'r> {
    rule: String,
    message: &'r str,
    severity: DiagnosticSeverity,
    line: usize,
    column: usize,
    start: u32,
    end: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<RuleCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    docs_url: Option<String>,
}

fn visible(diagnostic: &Diagnostic, quiet: bool) -> bool {
    !quiet || diagnostic.severity == DiagnosticSeverity::Error
}

fn qualified(rule: &str) -> String {
    format!("{PLUGIN_NAME}/{rule}")
}

/// One line per diagnostic, followed by a summary
pub fn render_pretty(reports: &[FileReport], quiet: bool) -> String {
    let mut out = String::new();
    let mut errors = 0;
    let mut warnings = 0;

    for report in reports {
        let path = report.path.display();
        let result = match &report.outcome {
            Ok(result) => result,
            Err(err) => {
                errors += 1;
                writeln!(out, "{}  {}  {}", path, "error".red(), err).unwrap();
                continue;
            }
        };

        for diagnostic in result.diagnostics.iter().filter(|d| visible(d, quiet)) {
            let (line, col) = diagnostic.line_col(&report.source);
            let severity = match diagnostic.severity {
                DiagnosticSeverity::Error => {
                    errors += 1;
                    "error".red()
                }
                DiagnosticSeverity::Warning => {
                    warnings += 1;
                    "warning".yellow()
                }
            };
            writeln!(
                out,
                "{}:{}:{}  {}  {}  {}",
                path,
                line,
                col,
                severity,
                diagnostic.message,
                qualified(&diagnostic.rule).dimmed()
            )
            .unwrap();
        }
    }

    if errors + warnings == 0 {
        writeln!(out, "{}", "No problems found".green()).unwrap();
    } else {
        writeln!(
            out,
            "\nFound {} problem(s) ({} error(s), {} warning(s))",
            errors + warnings,
            errors.to_string().red(),
            warnings.to_string().yellow()
        )
        .unwrap();
    }

    out
}

/// Rule id, type and description, with the documentation link below
pub fn render_rules() -> String {
    let mut out = String::new();
    for rule in all_rules() {
        writeln!(
            out,
            "{}  {}  {}\n    {}",
            rule.id.bold(),
            rule.category.as_str(),
            rule.description,
            rule.docs_url.dimmed()
        )
        .unwrap();
    }
    out
}

/// A JSON array of `{ file, diagnostics }`
pub fn render_json(reports: &[FileReport], quiet: bool) -> Result<String> {
    let json: Vec<JsonReport> = reports
        .iter()
        .map(|report| {
            let file = report.path.display().to_string();
            match &report.outcome {
                Ok(result) => JsonReport {
                    file,
                    diagnostics: result
                        .diagnostics
                        .iter()
                        .filter(|d| visible(d, quiet))
                        .map(|d| {
                            let (line, column) = d.line_col(&report.source);
                            let info = rule_info(d.rule);
                            JsonDiagnostic {
                                rule: qualified(&d.rule),
                                message: &d.message,
                                severity: d.severity,
                                line,
                                column,
                                start: d.start,
                                end: d.end,
                                category: info.as_ref().map(|info| info.category),
                                docs_url: info.map(|info| info.docs_url),
                            }
                        })
                        .collect(),
                    error: None,
                },
                Err(err) => JsonReport {
                    file,
                    diagnostics: Vec::new(),
                    error: Some(err.to_string()),
                },
            }
        })
        .collect();

    Ok(serde_json::to_string_pretty(&json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ringcentral_lint::lint_source;
    use std::path::PathBuf;

    fn report(name: &str, source: &str) -> FileReport {
        let rules = ringcentral_lint::rules_from_json(
            r#"{
                "rules": {
                    "ringcentral/specified-comment-with-task-id": "warn",
                    "ringcentral/too-many-brand-check-call": "error"
                },
                "settings": { "brandCheckMethods": ["isA", "isB", "isC", "isD"] }
            }"#,
        )
        .unwrap();
        FileReport {
            path: PathBuf::from(name),
            source: source.to_string(),
            outcome: lint_source(name, source, &rules),
        }
    }

    fn sample() -> Vec<FileReport> {
        vec![report(
            "src/a.js",
            "// TODO later\nconst ok = isA() && isB() && isC() && isD();\n",
        )]
    }

    #[test]
    fn test_render_pretty() {
        colored::control::set_override(false);
        insta::assert_snapshot!(render_pretty(&sample(), false), @r#"
        src/a.js:1:1  warning  Please specify comment with a task id or username (e.g. TODO [UIA-12345] summary | TODO (username) summary)  ringcentral/specified-comment-with-task-id
        src/a.js:2:12  error  Call brand check method too many times [isA(), isB(), isC(), isD()], please add a new field (isXXXX) in 'brandFeaturesConfig', and use "getBrandFeatures().isXXXX" here.  ringcentral/too-many-brand-check-call

        Found 2 problem(s) (1 error(s), 1 warning(s))
        "#);
    }

    #[test]
    fn test_render_pretty_quiet() {
        colored::control::set_override(false);
        let out = render_pretty(&sample(), true);
        assert!(!out.contains("warning  "));
        assert!(out.contains("(1 error(s), 0 warning(s))"));
    }

    #[test]
    fn test_render_pretty_parse_failure() {
        colored::control::set_override(false);
        let out = render_pretty(&[report("src/b.js", "const = ;")], false);
        assert!(out.starts_with("src/b.js  error  failed to parse src/b.js"));
        assert!(out.contains("(1 error(s), 0 warning(s))"));
    }

    #[test]
    fn test_render_pretty_clean() {
        colored::control::set_override(false);
        let out = render_pretty(&[report("src/c.ts", "const a: number = 1;")], false);
        assert_eq!(out, "No problems found\n");
    }

    #[test]
    fn test_render_rules() {
        colored::control::set_override(false);
        let out = render_rules();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "ringcentral/specified-comment-with-task-id  layout  Specify TODO / FIXME comments with a task id or username"
        );
        assert!(lines[1].trim_start().starts_with("https://github.com/ringcentral/ringcentral-javascript#"));
        assert!(lines[2].starts_with("ringcentral/too-many-brand-check-call  suggestion  "));
    }

    #[test]
    fn test_render_json() {
        let mut reports = sample();
        reports.push(report("src/b.js", "const = ;"));
        let json: serde_json::Value =
            serde_json::from_str(&render_json(&reports, true).unwrap()).unwrap();

        assert_eq!(json[0]["file"], "src/a.js");
        assert_eq!(json[0]["diagnostics"].as_array().unwrap().len(), 1);
        assert_eq!(json[0]["diagnostics"][0]["rule"], "ringcentral/too-many-brand-check-call");
        assert_eq!(json[0]["diagnostics"][0]["severity"], "error");
        assert_eq!(json[0]["diagnostics"][0]["line"], 2);
        assert_eq!(json[0]["diagnostics"][0]["column"], 12);
        assert_eq!(json[0]["diagnostics"][0]["category"], "suggestion");
        assert_eq!(
            json[0]["diagnostics"][0]["docsUrl"],
            "https://github.com/ringcentral/ringcentral-javascript"
        );
        assert!(json[0].get("error").is_none());
        assert!(json[1]["error"].as_str().unwrap().starts_with("failed to parse src/b.js"));
    }
}
