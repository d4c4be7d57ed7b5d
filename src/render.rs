//! Output formats for lint results.

use std::fmt;

use crate::issue::{Issue, LintResult, Severity};

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable issue list with a summary line
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
    /// GitHub Actions workflow annotations
    Github,
}

impl OutputFormat {
    /// Render one or more results.
    ///
    /// A single result renders on its own; several results get a header per
    /// file (text) or are wrapped in an array (JSON).
    pub fn render(&self, results: &[LintResult]) -> Result<String, serde_json::Error> {
        match self {
            OutputFormat::Text => Ok(match results {
                [single] => render_text(single),
                _ => results
                    .iter()
                    .map(|result| format!("==> {}\n{}", result.schema_path, render_text(result)))
                    .collect::<Vec<_>>()
                    .join("\n"),
            }),
            OutputFormat::Json => match results {
                [single] => render_json(single),
                _ => serde_json::to_string_pretty(results),
            },
            OutputFormat::Github => Ok(results.iter().map(render_github).collect()),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.path, self.message)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  suggestion: {}", suggestion)?;
        }
        Ok(())
    }
}

/// Issue list followed by an error/warning summary.
pub fn render_text(result: &LintResult) -> String {
    if result.is_clean() {
        return "✅ No issues found\n".to_string();
    }

    let issues: String = result
        .issues
        .iter()
        .map(|issue| format!("{}\n", issue))
        .collect();
    format!(
        "{}\nSummary: {} error(s), {} warning(s)\n",
        issues,
        result.error_count(),
        result.warning_count()
    )
}

/// Pretty-printed JSON (`schema_path`, `issues`).
pub fn render_json(result: &LintResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}

/// One `::error` / `::warning` workflow command per issue.
pub fn render_github(result: &LintResult) -> String {
    result
        .issues
        .iter()
        .map(|issue| {
            let level = match issue.severity {
                Severity::Error => "error",
                Severity::Warning | Severity::Info => "warning",
            };
            format!(
                "::{} file={}::{} - {}\n",
                level, result.schema_path, issue.code, issue.message
            )
        })
        .collect()
}
