//! Core configuration types for schema linting.

use std::fmt;

use serde_json::Value;

use crate::error::LintError;

/// Field names checked for discriminator `const` values, in priority order.
pub const DEFAULT_DISCRIMINATOR_FIELDS: &[&str] = &["component_type", "type", "kind"];

/// Default threshold for large union warnings.
pub const DEFAULT_MAX_UNION_VARIANTS: usize = 10;

/// Default threshold for nested union warnings.
pub const DEFAULT_MAX_UNION_DEPTH: usize = 2;

/// Returns the JSON type name for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Linting profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Profile {
    /// Discriminators, union size and nesting.
    #[default]
    Default,
    /// Strict rules for static type generation: no composition, no open
    /// objects, one explicit type per schema.
    Scale,
}

impl Profile {
    /// Parse a profile name (`default` or `scale`).
    pub fn parse(s: &str) -> Result<Self, LintError> {
        match s {
            "default" => Ok(Profile::Default),
            "scale" => Ok(Profile::Scale),
            _ => Err(LintError::UnknownProfile {
                value: s.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Default => "default",
            Profile::Scale => "scale",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Casing convention enforced on object property names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PropertyCase {
    /// No property name checks.
    None,
    #[default]
    Camel,
    Snake,
    Kebab,
    Pascal,
}

impl PropertyCase {
    /// Parse a convention name as accepted on the command line.
    pub fn parse(s: &str) -> Result<Self, LintError> {
        match s {
            "none" => Ok(PropertyCase::None),
            "camelCase" => Ok(PropertyCase::Camel),
            "snake_case" => Ok(PropertyCase::Snake),
            "kebab-case" => Ok(PropertyCase::Kebab),
            "PascalCase" => Ok(PropertyCase::Pascal),
            _ => Err(LintError::UnknownPropertyCase {
                value: s.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyCase::None => "none",
            PropertyCase::Camel => "camelCase",
            PropertyCase::Snake => "snake_case",
            PropertyCase::Kebab => "kebab-case",
            PropertyCase::Pascal => "PascalCase",
        }
    }

    /// Returns true if `name` follows this convention.
    ///
    /// `None` accepts everything. Only ASCII letters and digits count as
    /// alphanumeric.
    pub fn matches(&self, name: &str) -> bool {
        match self {
            PropertyCase::None => true,
            PropertyCase::Camel => leading_then_alnum(name, |c| c.is_ascii_lowercase()),
            PropertyCase::Pascal => leading_then_alnum(name, |c| c.is_ascii_uppercase()),
            PropertyCase::Snake => name
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'),
            PropertyCase::Kebab => name
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'),
        }
    }
}

/// Empty names pass vacuously.
fn leading_then_alnum(name: &str, leading: impl Fn(char) -> bool) -> bool {
    match name.chars().next() {
        None => true,
        Some(first) => leading(first) && name.chars().all(|c| c.is_ascii_alphanumeric()),
    }
}

impl fmt::Display for PropertyCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Linter configuration.
///
/// Read-only during a run; one instance can be shared by any number of runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub profile: Profile,
    pub property_case: PropertyCase,
    /// Unions with more variants than this get a `large-union` warning.
    pub max_union_variants: usize,
    /// Unions nested at least this deep get a `nested-union` warning.
    pub max_union_depth: usize,
    /// Candidate discriminator fields. The first one that qualifies wins.
    pub discriminator_fields: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile: Profile::Default,
            property_case: PropertyCase::Camel,
            max_union_variants: DEFAULT_MAX_UNION_VARIANTS,
            max_union_depth: DEFAULT_MAX_UNION_DEPTH,
            discriminator_fields: DEFAULT_DISCRIMINATOR_FIELDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl Config {
    /// Returns true if the scale profile is active.
    pub fn is_scale_profile(&self) -> bool {
        self.profile == Profile::Scale
    }

    pub fn profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    pub fn property_case(mut self, property_case: PropertyCase) -> Self {
        self.property_case = property_case;
        self
    }

    pub fn max_union_variants(mut self, max: usize) -> Self {
        self.max_union_variants = max;
        self
    }

    pub fn max_union_depth(mut self, max: usize) -> Self {
        self.max_union_depth = max;
        self
    }

    /// Replace the discriminator candidates, keeping the given order.
    pub fn discriminator_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.discriminator_fields = fields.into_iter().map(Into::into).collect();
        self
    }
}
