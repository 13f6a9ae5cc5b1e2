//! rc-lint - run the RingCentral lint rules over JavaScript and TypeScript files.

mod output;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use log::debug;
use rayon::prelude::*;
use ringcentral_lint::{lint_source, LintConfig, LintError, LintResult, RulesConfig};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const EXTENSIONS: &[&str] = &["js", "jsx", "mjs", "cjs", "ts", "tsx", "mts", "cts"];

#[derive(Parser)]
#[command(name = "rc-lint")]
#[command(about = "Lint JavaScript and TypeScript with the RingCentral rules", long_about = None)]
struct Cli {
    /// Files or directories to lint
    #[arg(required_unless_present = "list_rules")]
    paths: Vec<PathBuf>,

    /// Print the available rules and exit
    #[arg(long)]
    list_rules: bool,

    /// Path to an ESLint-style JSON config
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Pretty)]
    format: Format,

    /// Report errors only
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Pretty,
    Json,
}

/// Outcome of linting one file
pub struct FileReport {
    pub path: PathBuf,
    pub source: String,
    pub outcome: Result<LintResult, LintError>,
}

impl FileReport {
    /// Parse failures count as errors
    pub fn has_errors(&self) -> bool {
        match &self.outcome {
            Ok(result) => result.has_errors(),
            Err(_) => true,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    if cli.list_rules {
        print!("{}", output::render_rules());
        return Ok(());
    }

    let rules = load_rules(cli.config.as_deref())?;

    let files = collect_files(&cli.paths)?;
    if cli.format == Format::Pretty {
        let enabled = rules.enabled_rules();
        eprintln!(
            "Linting {} file(s) with {} rule(s): {}",
            files.len(),
            enabled.len(),
            enabled.join(", ")
        );
    }

    let reports = files
        .par_iter()
        .map(|path| lint_file(path, &rules))
        .collect::<Result<Vec<_>>>()?;

    match cli.format {
        Format::Pretty => print!("{}", output::render_pretty(&reports, cli.quiet)),
        Format::Json => println!("{}", output::render_json(&reports, cli.quiet)?),
    }

    if reports.iter().any(FileReport::has_errors) {
        std::process::exit(1);
    }

    Ok(())
}

/// Load rules from a config file, or the recommended preset without one
fn load_rules(config_path: Option<&Path>) -> Result<RulesConfig> {
    let config = match config_path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let config = LintConfig::from_json(&text)
                .with_context(|| format!("Failed to parse {}", path.display()))?;
            debug!("loaded config from {}", path.display());
            config
        }
        None => LintConfig::default(),
    };

    let rules = RulesConfig::from_config(&config).context("Invalid lint configuration")?;
    if rules.enabled_rules().is_empty() {
        eprintln!("{}", "Warning: No rules enabled".yellow());
    }
    Ok(rules)
}

fn is_lintable(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| EXTENSIONS.contains(&ext))
}

/// Expand the given paths into a sorted list of source files
fn collect_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            if is_lintable(path) {
                files.push(path.clone());
            }
        } else if path.is_dir() {
            for entry in WalkDir::new(path)
                .into_iter()
                .filter_entry(|e| e.file_name() != "node_modules")
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file() && is_lintable(e.path()))
            {
                files.push(entry.into_path());
            }
        } else {
            anyhow::bail!("Path not found: {}", path.display());
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

fn lint_file(path: &Path, rules: &RulesConfig) -> Result<FileReport> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let outcome = lint_source(&path.to_string_lossy(), &source, rules);

    Ok(FileReport {
        path: path.to_path_buf(),
        source,
        outcome,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_lintable() {
        for name in ["a.js", "a.jsx", "a.mjs", "a.cjs", "a.ts", "a.tsx", "a.mts", "a.cts"] {
            assert!(is_lintable(Path::new(name)), "{name} should be linted");
        }
        for name in ["a.json", "a.d", "Makefile", "a.js.map", "a.JSX"] {
            assert!(!is_lintable(Path::new(name)), "{name} should be skipped");
        }
    }

    #[test]
    fn test_collect_missing_path() {
        let err = collect_files(&[PathBuf::from("does/not/exist.js")]).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.js"));
    }

    #[test]
    fn test_collect_skips_node_modules() {
        let root = std::env::temp_dir().join(format!("rc-lint-collect-{}", std::process::id()));
        std::fs::create_dir_all(root.join("src")).unwrap();
        std::fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        std::fs::write(root.join("src/b.ts"), "").unwrap();
        std::fs::write(root.join("src/a.js"), "").unwrap();
        std::fs::write(root.join("src/notes.md"), "").unwrap();
        std::fs::write(root.join("node_modules/pkg/index.js"), "").unwrap();

        let files = collect_files(&[root.clone()]).unwrap();
        std::fs::remove_dir_all(&root).unwrap();

        assert_eq!(files, vec![root.join("src/a.js"), root.join("src/b.ts")]);
    }

    #[test]
    fn test_cli_args() {
        let cli = Cli::try_parse_from(["rc-lint", "--format", "json", "-q", "src"]).unwrap();
        assert_eq!(cli.format, Format::Json);
        assert!(cli.quiet);
        assert_eq!(cli.paths, vec![PathBuf::from("src")]);

        let cli = Cli::try_parse_from(["rc-lint", "--list-rules"]).unwrap();
        assert!(cli.list_rules);
        assert!(cli.paths.is_empty());

        assert!(Cli::try_parse_from(["rc-lint"]).is_err());
    }

    #[test]
    fn test_default_rules() {
        let rules = load_rules(None).unwrap();
        assert_eq!(
            rules.enabled_rules(),
            vec!["specified-comment-with-task-id", "too-many-brand-check-call"]
        );
    }

    #[test]
    fn test_has_errors() {
        let report = FileReport {
            path: PathBuf::from("broken.js"),
            source: "const = ;".to_string(),
            outcome: lint_source("broken.js", "const = ;", &RulesConfig::default()),
        };
        assert!(report.has_errors());
    }
}
