//! JSON Schema linter for static type code generation.
//!
//! Flags schema patterns that code generators for statically typed languages
//! cannot map cleanly: unions without a discriminator, broken discriminator
//! values, oversized or deeply nested unions, open union variants, and
//! property names outside a casing convention. The stricter `scale` profile
//! additionally rejects composition keywords, open objects and implicit or
//! mixed types.
//!
//! # Example
//!
//! ```
//! use schemalint::{IssueCode, Linter};
//!
//! let schema = r#"{
//!     "$defs": {
//!         "Pet": {
//!             "anyOf": [
//!                 { "type": "object", "properties": { "name": { "type": "string" } } },
//!                 { "type": "object", "properties": { "title": { "type": "string" } } }
//!             ]
//!         }
//!     }
//! }"#;
//!
//! let result = Linter::default().lint_str(schema).unwrap();
//! assert_eq!(result.error_count(), 1);
//! assert_eq!(result.issues[0].code, IssueCode::UnionNoDiscriminator);
//! assert_eq!(result.issues[0].path, "$/$defs/Pet/anyOf");
//! ```
//!
//! # Checks
//!
//! | Code | Severity | Profile |
//! |------|----------|---------|
//! | `union-no-discriminator` | error | all |
//! | `missing-const` | error | all |
//! | `duplicate-const-value` | error | all |
//! | `invalid-property-case` | error | all (unless case is `none`) |
//! | `large-union` | warning | all |
//! | `nested-union` | warning | all |
//! | `additional-properties` | warning | all |
//! | `composition-disallowed` | error | scale |
//! | `additional-properties-disallowed` | error | scale |
//! | `missing-type` | error | scale |
//! | `mixed-type-disallowed` | error | scale |
//!
//! Two-variant nullable unions (`[T, null]`) and unions made only of `$ref`s
//! are skipped. References are never resolved.

mod config;
mod error;
mod issue;
mod linter;
mod loader;
mod render;
mod schema;
mod types;

pub use config::{find_config_file, resolve_config, Settings, CONFIG_FILE_NAME};
pub use error::LintError;
pub use issue::{Issue, IssueCode, LintResult, Severity, Status};
pub use linter::Linter;
pub use loader::{collect_schema_files, is_url, load_schema, load_schema_auto, load_schema_str};
pub use render::{render_github, render_json, render_text, OutputFormat};
pub use schema::{AdditionalProperties, Document, SchemaNode, Slot, TypeDecl};
pub use types::{
    json_type_name, Config, Profile, PropertyCase, DEFAULT_DISCRIMINATOR_FIELDS,
    DEFAULT_MAX_UNION_DEPTH, DEFAULT_MAX_UNION_VARIANTS,
};

#[cfg(feature = "remote")]
pub use loader::load_schema_url;
