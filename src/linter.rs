//! Schema linting - static analysis for static type code generation.
//!
//! Walks the document root and every `$defs` / `definitions` entry and reports:
//! - unions without a usable discriminator, or with broken discriminator values
//! - large and deeply nested unions
//! - open (`additionalProperties: true`) union variants
//! - property names outside the configured case convention
//! - scale profile violations (composition, open objects, implicit or mixed types)
//!
//! `$ref` targets are never resolved. Reference nodes are opaque.

use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use serde_json::Value;
use tracing::{debug, trace};

use crate::error::LintError;
use crate::issue::{Issue, IssueCode, LintResult};
use crate::loader::{load_schema, load_schema_auto};
use crate::schema::{Document, SchemaNode, Slot};
use crate::types::{Config, PropertyCase};

/// Property marking the reference side of a reference-vs-inline union.
const COMPONENT_REF_PROPERTY: &str = "$component_ref";

/// Checks JSON Schemas for patterns that break static type generation.
#[derive(Debug, Clone, Default)]
pub struct Linter {
    config: Config,
}

impl Linter {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Lint raw JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns `LintError::InvalidJson` or `LintError::InvalidSchema` if the
    /// input cannot be decoded. Nothing found inside the schema is an error.
    pub fn lint(&self, data: &[u8]) -> Result<LintResult, LintError> {
        let document = Document::from_slice(data)?;
        Ok(self.lint_document(&document))
    }

    /// Lint a JSON string. See [`Linter::lint`].
    pub fn lint_str(&self, content: &str) -> Result<LintResult, LintError> {
        self.lint(content.as_bytes())
    }

    /// Lint an already parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns `LintError::InvalidSchema` if the value cannot be decoded.
    pub fn lint_value(&self, value: &Value) -> Result<LintResult, LintError> {
        let document = Document::from_value(value)?;
        Ok(self.lint_document(&document))
    }

    /// Lint a schema file. The result's `schema_path` is the given path.
    ///
    /// # Errors
    ///
    /// Returns loader errors (missing file, unreadable file, invalid JSON) or
    /// `LintError::InvalidSchema`.
    pub fn lint_file(&self, path: &Path) -> Result<LintResult, LintError> {
        let value = load_schema(path)?;
        let mut result = self.lint_value(&value)?;
        result.schema_path = path.display().to_string();
        Ok(result)
    }

    /// Lint a file path or URL. The result's `schema_path` is `source`.
    ///
    /// # Errors
    ///
    /// As [`Linter::lint_file`], plus network errors for URLs.
    pub fn lint_source(&self, source: &str) -> Result<LintResult, LintError> {
        let value = load_schema_auto(source)?;
        let mut result = self.lint_value(&value)?;
        result.schema_path = source.to_string();
        Ok(result)
    }

    /// Lint a decoded document.
    ///
    /// The root is linted at `$`, then each `$defs` entry at `$/$defs/<name>`
    /// and each `definitions` entry at `$/definitions/<name>`, all into one
    /// result.
    pub fn lint_document(&self, document: &Document) -> LintResult {
        let mut result = LintResult::default();

        debug!(profile = %self.config.profile, "linting document root");
        Pass::new(&self.config, None, &mut result.issues).visit(&document.root, "$", 0);

        let roots = [("$defs", &document.defs), ("definitions", &document.definitions)];
        for (keyword, definitions) in roots {
            for (name, definition) in definitions {
                let Some(definition) = definition else {
                    continue;
                };
                debug!(definition = %name, keyword, "linting definition");
                let path = format!("$/{}/{}", keyword, name);
                Pass::new(&self.config, Some(name.as_str()), &mut result.issues)
                    .visit(definition, &path, 0);
            }
        }

        debug!(
            errors = result.error_count(),
            warnings = result.warning_count(),
            "lint complete"
        );
        result
    }
}

/// One traversal from a single root.
struct Pass<'a> {
    config: &'a Config,
    /// Definition name attached to every issue found from this root.
    type_name: Option<&'a str>,
    issues: &'a mut Vec<Issue>,
}

impl<'a> Pass<'a> {
    fn new(config: &'a Config, type_name: Option<&'a str>, issues: &'a mut Vec<Issue>) -> Self {
        Self {
            config,
            type_name,
            issues,
        }
    }

    fn report(&mut self, issue: Issue) {
        self.issues.push(issue.with_type_name(self.type_name));
    }

    fn visit(&mut self, schema: &SchemaNode, path: &str, union_depth: usize) {
        if schema.is_ref() {
            return;
        }

        if self.config.is_scale_profile() {
            self.check_scale_profile(schema, path);
        }

        if !schema.any_of.is_empty() {
            self.check_union(&schema.any_of, &format!("{}/anyOf", path), union_depth, "anyOf");
        }
        if !schema.one_of.is_empty() {
            self.check_union(&schema.one_of, &format!("{}/oneOf", path), union_depth, "oneOf");
        }

        for (name, property) in &schema.properties {
            if let Some(property) = property {
                let property_path = format!("{}/properties/{}", path, name);
                self.visit(property, &property_path, union_depth);
            }
        }

        if let Some(items) = &schema.items {
            self.visit(items, &format!("{}/items", path), union_depth);
        }

        if let Some(additional) = schema.additional_properties_schema() {
            self.visit(
                additional,
                &format!("{}/additionalProperties", path),
                union_depth,
            );
        }

        if self.config.property_case != PropertyCase::None {
            self.check_property_names(schema, path);
        }
    }

    fn check_property_names(&mut self, schema: &SchemaNode, path: &str) {
        let case = self.config.property_case;
        for name in schema.properties.keys() {
            if case.matches(name) {
                continue;
            }
            self.report(
                Issue::error(
                    IssueCode::InvalidPropertyCase,
                    format!("{}/properties/{}", path, name),
                    format!("Property '{}' is not in {}", name, case),
                )
                .with_suggestion(format!("Rename property to follow the {} convention", case)),
            );
        }
    }

    fn check_scale_profile(&mut self, schema: &SchemaNode, path: &str) {
        let compositions = [
            (
                "anyOf",
                &schema.any_of,
                "Use separate schema definitions instead of unions",
            ),
            (
                "oneOf",
                &schema.one_of,
                "Use separate schema definitions instead of unions",
            ),
            (
                "allOf",
                &schema.all_of,
                "Flatten the schema structure instead of using composition",
            ),
        ];
        for (keyword, branches, suggestion) in compositions {
            if branches.is_empty() {
                continue;
            }
            self.report(
                Issue::error(
                    IssueCode::CompositionDisallowed,
                    format!("{}/{}", path, keyword),
                    format!("{} is disallowed in scale profile", keyword),
                )
                .with_suggestion(suggestion),
            );
        }

        if schema.allows_additional_properties() {
            self.report(
                Issue::error(
                    IssueCode::AdditionalPropsDisallowed,
                    path,
                    "additionalProperties: true is disallowed in scale profile",
                )
                .with_suggestion(
                    "Set additionalProperties: false or remove it to ensure strict type mapping",
                ),
            );
        }

        // Empty placeholders ({}) are fine; only schemas with content need a type.
        if !schema.has_type()
            && !schema.is_ref()
            && !schema.is_boolean_schema()
            && schema.is_meaningful()
        {
            self.report(
                Issue::error(
                    IssueCode::MissingType,
                    path,
                    "missing explicit type field in scale profile",
                )
                .with_suggestion("Add a 'type' field to specify the schema type"),
            );
        }

        if schema.has_mixed_type() {
            self.report(
                Issue::error(
                    IssueCode::MixedTypeDisallowed,
                    path,
                    format!(
                        "mixed type array [{}] is disallowed in scale profile",
                        schema.type_list().join(" ")
                    ),
                )
                .with_suggestion("Use a single type; for nullable types, use a separate null check"),
            );
        }
    }

    fn check_union(&mut self, branches: &[Slot], path: &str, union_depth: usize, keyword: &str) {
        if is_nullable_pattern(branches) {
            trace!(path, "nullable union, skipping");
            return;
        }

        // Verifying anything here would need the $refs resolved.
        if all_refs(branches) {
            trace!(path, "all variants are references, skipping");
            return;
        }

        let max_variants = self.config.max_union_variants;
        if branches.len() > max_variants {
            self.report(
                Issue::warning(
                    IssueCode::LargeUnion,
                    path,
                    format!(
                        "Union has {} variants (threshold: {})",
                        branches.len(),
                        max_variants
                    ),
                )
                .with_suggestion("Consider splitting into smaller, more focused unions"),
            );
        }

        let max_depth = self.config.max_union_depth;
        if union_depth >= max_depth {
            self.report(
                Issue::warning(
                    IssueCode::NestedUnion,
                    path,
                    format!(
                        "Union nested {} levels deep (threshold: {})",
                        union_depth + 1,
                        max_depth
                    ),
                )
                .with_suggestion("Flatten the union hierarchy for better static type mapping"),
            );
        }

        if let Some(field) = self.find_discriminator(branches) {
            trace!(path, field, "discriminator found");
            self.verify_discriminator(branches, field, path);
        } else {
            if branches.len() > 1 && !is_reference_pattern(branches) {
                self.report(
                    Issue::error(
                        IssueCode::UnionNoDiscriminator,
                        path,
                        format!("{} union has no discriminator field", keyword),
                    )
                    .with_suggestion(
                        "Add a const property (e.g., 'type' or 'kind') to each variant with a unique value",
                    ),
                );
            } else if branches.len() > 1 {
                trace!(path, "reference pattern, discriminator not required");
            }

            // Point at the variants that break an intended but invalid tag.
            if let Some(field) = self.find_partial_discriminator(branches) {
                trace!(path, field, "verifying partial discriminator");
                self.verify_discriminator(branches, field, path);
            }
        }

        for (i, branch) in branches.iter().enumerate() {
            let Some(branch) = branch else { continue };
            if branch.is_ref() || !branch.allows_additional_properties() {
                continue;
            }
            self.report(
                Issue::warning(
                    IssueCode::AdditionalProps,
                    format!("{}/{}", path, i),
                    "Union variant has additionalProperties: true",
                )
                .with_suggestion("Set additionalProperties: false to avoid ambiguous JSON decoding"),
            );
        }

        for (i, branch) in branches.iter().enumerate() {
            if let Some(branch) = branch.as_ref().filter(|b| !b.is_ref()) {
                self.visit(branch, &format!("{}/{}", path, i), union_depth + 1);
            }
        }
    }

    /// Pick the discriminator field for a union.
    ///
    /// A candidate qualifies when every inline (non-`$ref`) variant declares a
    /// string `const` for it and all values differ. The first qualifying
    /// candidate in configured order wins.
    fn find_discriminator(&self, branches: &[Slot]) -> Option<&'a str> {
        if branches.len() < 2 {
            return None;
        }

        let inline = inline_variants(branches);
        if inline.is_empty() {
            return None;
        }

        let config: &'a Config = self.config;
        config
            .discriminator_fields
            .iter()
            .find(|field| {
                let values: BTreeSet<&str> = inline
                    .iter()
                    .filter_map(|variant| variant.property_const_str(field))
                    .collect();
                values.len() == inline.len()
            })
            .map(String::as_str)
    }

    /// First candidate carrying a string `const` in at least two inline
    /// variants, for unions where no candidate qualifies outright.
    fn find_partial_discriminator(&self, branches: &[Slot]) -> Option<&'a str> {
        let inline = inline_variants(branches);
        let config: &'a Config = self.config;
        config
            .discriminator_fields
            .iter()
            .find(|field| {
                inline
                    .iter()
                    .filter(|variant| variant.property_const_str(field).is_some())
                    .count()
                    >= 2
            })
            .map(String::as_str)
    }

    fn verify_discriminator(&mut self, branches: &[Slot], field: &str, path: &str) {
        let mut seen: HashSet<&str> = HashSet::new();

        for (i, branch) in branches.iter().enumerate() {
            let Some(branch) = branch else { continue };
            if branch.is_ref() {
                continue;
            }

            let Some(property) = branch.property(field) else {
                self.report(
                    Issue::error(
                        IssueCode::MissingConst,
                        format!("{}/{}", path, i),
                        format!("Variant missing discriminator property '{}'", field),
                    )
                    .with_suggestion(format!(
                        "Add '{}' property with a const value to this variant",
                        field
                    )),
                );
                continue;
            };

            let property_path = format!("{}/{}/properties/{}", path, i, field);
            let Some(value) = &property.const_value else {
                self.report(
                    Issue::error(
                        IssueCode::MissingConst,
                        property_path,
                        format!("Discriminator property '{}' has no const value", field),
                    )
                    .with_suggestion(format!(
                        "Add 'const' to the '{}' property with a unique string value",
                        field
                    )),
                );
                continue;
            };

            let Some(value) = value.as_str() else {
                continue;
            };
            if !seen.insert(value) {
                self.report(
                    Issue::error(
                        IssueCode::DuplicateConstValue,
                        property_path,
                        format!("Duplicate discriminator value '{}'", value),
                    )
                    .with_suggestion(
                        "Each variant must have a unique const value for the discriminator",
                    ),
                );
            }
        }
    }
}

fn inline_variants(branches: &[Slot]) -> Vec<&SchemaNode> {
    branches.iter().flatten().filter(|b| !b.is_ref()).collect()
}

/// `[T, null]`: a two-variant union that only marks a type as nullable.
fn is_nullable_pattern(branches: &[Slot]) -> bool {
    if branches.len() != 2 {
        return false;
    }

    let mut has_null = false;
    let mut has_type = false;
    for branch in branches.iter().flatten() {
        if branch.single_type() == Some("null") {
            has_null = true;
        } else if branch.has_type() || branch.is_ref() {
            has_type = true;
        }
    }
    has_null && has_type
}

/// Absent (`null`) variants are ignored.
fn all_refs(branches: &[Slot]) -> bool {
    branches.iter().flatten().all(SchemaNode::is_ref)
}

/// `[SomethingReference, InlineSomething]`: a two-variant union choosing
/// between a reference and an inline definition.
fn is_reference_pattern(branches: &[Slot]) -> bool {
    if branches.len() != 2 {
        return false;
    }

    branches.iter().flatten().any(|branch| {
        branch.property(COMPONENT_REF_PROPERTY).is_some()
            || (branch.is_ref()
                && (branch.reference.contains("Reference") || branch.reference.contains("Ref")))
    })
}
