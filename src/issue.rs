//! Lint findings and the per-document result.

use std::fmt;

use serde::Serialize;

/// Severity level for issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies the kind of problem an issue reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueCode {
    // Errors: break generated code.
    UnionNoDiscriminator,
    /// Reserved.
    InconsistentDiscriminator,
    MissingConst,
    DuplicateConstValue,
    InvalidPropertyCase,

    // Warnings: suboptimal or risky patterns.
    LargeUnion,
    NestedUnion,
    #[serde(rename = "additional-properties")]
    AdditionalProps,
    /// Reserved.
    AmbiguousUnion,
    /// Reserved.
    CircularReference,

    // Scale profile errors.
    CompositionDisallowed,
    #[serde(rename = "additional-properties-disallowed")]
    AdditionalPropsDisallowed,
    MissingType,
    MixedTypeDisallowed,
}

impl IssueCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCode::UnionNoDiscriminator => "union-no-discriminator",
            IssueCode::InconsistentDiscriminator => "inconsistent-discriminator",
            IssueCode::MissingConst => "missing-const",
            IssueCode::DuplicateConstValue => "duplicate-const-value",
            IssueCode::InvalidPropertyCase => "invalid-property-case",
            IssueCode::LargeUnion => "large-union",
            IssueCode::NestedUnion => "nested-union",
            IssueCode::AdditionalProps => "additional-properties",
            IssueCode::AmbiguousUnion => "ambiguous-union",
            IssueCode::CircularReference => "circular-reference",
            IssueCode::CompositionDisallowed => "composition-disallowed",
            IssueCode::AdditionalPropsDisallowed => "additional-properties-disallowed",
            IssueCode::MissingType => "missing-type",
            IssueCode::MixedTypeDisallowed => "mixed-type-disallowed",
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub code: IssueCode,
    pub severity: Severity,
    /// Location of the offending node, e.g. `$/$defs/Animal/anyOf/1`.
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Definition the issue was found under, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
}

impl Issue {
    pub fn new(
        code: IssueCode,
        severity: Severity,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code,
            severity,
            path: path.into(),
            message: message.into(),
            suggestion: None,
            type_name: None,
        }
    }

    pub fn error(code: IssueCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(code, Severity::Error, path, message)
    }

    pub fn warning(code: IssueCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(code, Severity::Warning, path, message)
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn with_type_name(mut self, type_name: Option<&str>) -> Self {
        self.type_name = type_name.map(str::to_string);
        self
    }
}

/// Overall outcome of a lint run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// No errors or warnings (info issues allowed).
    Ok,
    /// Warnings but no errors.
    Warning,
    Error,
}

impl Status {
    /// Process exit code: 0 ok, 1 errors, 2 warnings only.
    pub fn exit_code(&self) -> i32 {
        match self {
            Status::Ok => 0,
            Status::Error => 1,
            Status::Warning => 2,
        }
    }
}

/// All issues found in one document, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LintResult {
    pub schema_path: String,
    pub issues: Vec<Issue>,
}

impl LintResult {
    pub fn new(schema_path: impl Into<String>) -> Self {
        Self {
            schema_path: schema_path.into(),
            issues: Vec::new(),
        }
    }

    pub fn push(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn info_count(&self) -> usize {
        self.count(Severity::Info)
    }

    fn count(&self, severity: Severity) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == severity)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.warning_count() > 0
    }

    /// Returns true if there are no issues at all.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn status(&self) -> Status {
        if self.has_errors() {
            Status::Error
        } else if self.has_warnings() {
            Status::Warning
        } else {
            Status::Ok
        }
    }
}
