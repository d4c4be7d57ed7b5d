//! In-memory JSON Schema model.
//!
//! A [`SchemaNode`] keeps one flat shape because JSON Schema keywords are not
//! mutually exclusive: a node may carry `properties` and `anyOf` at the same
//! time. Only the keywords the linter looks at are decoded; everything else is
//! ignored.
//!
//! Presence matters. `additionalProperties` absent, `false`, `true` and a
//! schema are four different states, and `const: null` is not the same as no
//! `const` at all.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::LintError;
use crate::types::json_type_name;

/// The `type` keyword: a single name or a list of names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDecl {
    Single(String),
    List(Vec<String>),
}

/// The `additionalProperties` keyword when present.
#[derive(Debug, Clone, PartialEq)]
pub enum AdditionalProperties {
    Allowed(bool),
    Schema(Box<SchemaNode>),
}

/// A subschema slot that may hold a literal `null`.
pub type Slot = Option<SchemaNode>;

/// One schema or subschema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaNode {
    pub type_decl: Option<TypeDecl>,
    pub properties: BTreeMap<String, Slot>,
    pub required: Vec<String>,
    pub items: Option<Box<SchemaNode>>,
    pub additional_properties: Option<AdditionalProperties>,
    pub any_of: Vec<Slot>,
    pub one_of: Vec<Slot>,
    pub all_of: Vec<Slot>,
    /// `Some(Value::Null)` for `"const": null`.
    pub const_value: Option<Value>,
    pub enum_values: Vec<Value>,
    /// The `$ref` target; empty unless the node is a reference.
    pub reference: String,
    /// `Some` for the literal schemas `true` and `false`.
    pub boolean: Option<bool>,
}

impl SchemaNode {
    /// A literal `true`/`false` schema.
    pub fn boolean_schema(value: bool) -> Self {
        Self {
            boolean: Some(value),
            ..Self::default()
        }
    }

    /// Returns true if `type` is a non-empty string or a non-empty list.
    pub fn has_type(&self) -> bool {
        match &self.type_decl {
            Some(TypeDecl::Single(name)) => !name.is_empty(),
            Some(TypeDecl::List(names)) => !names.is_empty(),
            None => false,
        }
    }

    /// Returns true if `type` is a list with more than one entry.
    pub fn has_mixed_type(&self) -> bool {
        matches!(&self.type_decl, Some(TypeDecl::List(names)) if names.len() > 1)
    }

    pub fn is_ref(&self) -> bool {
        !self.reference.is_empty()
    }

    pub fn is_boolean_schema(&self) -> bool {
        self.boolean.is_some()
    }

    /// The single-valued `type`, if declared that way.
    pub fn single_type(&self) -> Option<&str> {
        match &self.type_decl {
            Some(TypeDecl::Single(name)) => Some(name),
            _ => None,
        }
    }

    /// The list-valued `type`, or an empty slice.
    pub fn type_list(&self) -> &[String] {
        match &self.type_decl {
            Some(TypeDecl::List(names)) => names,
            _ => &[],
        }
    }

    /// The named property's schema, skipping `null` entries.
    pub fn property(&self, name: &str) -> Option<&SchemaNode> {
        self.properties.get(name).and_then(Option::as_ref)
    }

    /// The `const` string of the named property, if it has one.
    pub fn property_const_str(&self, name: &str) -> Option<&str> {
        self.property(name)
            .and_then(|prop| prop.const_value.as_ref())
            .and_then(Value::as_str)
    }

    /// Returns true for `additionalProperties: true` (not for a schema).
    pub fn allows_additional_properties(&self) -> bool {
        matches!(
            self.additional_properties,
            Some(AdditionalProperties::Allowed(true))
        )
    }

    /// The `additionalProperties` schema, when it is one.
    pub fn additional_properties_schema(&self) -> Option<&SchemaNode> {
        match &self.additional_properties {
            Some(AdditionalProperties::Schema(schema)) => Some(schema),
            _ => None,
        }
    }

    /// Returns true if the node says something a type could be derived from:
    /// properties, items, a `const` or a non-empty `enum`.
    pub fn is_meaningful(&self) -> bool {
        !self.properties.is_empty()
            || self.items.is_some()
            || self.const_value.is_some()
            || !self.enum_values.is_empty()
    }

    /// Decode a node from JSON. `null` decodes to an empty schema.
    ///
    /// # Errors
    ///
    /// Returns `LintError::InvalidSchema` if a known keyword has the wrong
    /// shape or the value is not an object, boolean or `null`.
    pub fn from_value(value: &Value) -> Result<Self, LintError> {
        Ok(decode_slot(value, "")?.unwrap_or_default())
    }
}

/// A parsed schema document: the root plus both definition maps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub root: SchemaNode,
    /// `$defs`
    pub defs: BTreeMap<String, Slot>,
    /// Legacy `definitions`
    pub definitions: BTreeMap<String, Slot>,
}

impl Document {
    /// Decode a document from parsed JSON.
    ///
    /// # Errors
    ///
    /// Returns `LintError::InvalidSchema` for values that cannot be a schema.
    pub fn from_value(value: &Value) -> Result<Self, LintError> {
        let root = SchemaNode::from_value(value)?;
        let (defs, definitions) = match value {
            Value::Object(map) => (
                decode_schema_map(map, "$defs", "")?,
                decode_schema_map(map, "definitions", "")?,
            ),
            _ => Default::default(),
        };
        Ok(Document {
            root,
            defs,
            definitions,
        })
    }

    /// Parse and decode a document from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns `LintError::InvalidJson` for malformed JSON, or
    /// `LintError::InvalidSchema` for values that cannot be a schema.
    pub fn from_slice(data: &[u8]) -> Result<Self, LintError> {
        let value: Value =
            serde_json::from_slice(data).map_err(|source| LintError::InvalidJson { source })?;
        Self::from_value(&value)
    }
}

/// Escape a key for use as a JSON Pointer segment.
fn pointer_segment(key: &str) -> String {
    key.replace('~', "~0").replace('/', "~1")
}

fn invalid(path: &str, message: String) -> LintError {
    LintError::InvalidSchema {
        path: if path.is_empty() {
            "/".to_string()
        } else {
            path.to_string()
        },
        message,
    }
}

fn decode_slot(value: &Value, path: &str) -> Result<Slot, LintError> {
    match value {
        Value::Null => Ok(None),
        Value::Bool(b) => Ok(Some(SchemaNode::boolean_schema(*b))),
        Value::Object(map) => decode_object(map, path).map(Some),
        other => Err(invalid(
            path,
            format!(
                "expected schema object or boolean, got {}",
                json_type_name(other)
            ),
        )),
    }
}

fn decode_object(map: &Map<String, Value>, path: &str) -> Result<SchemaNode, LintError> {
    let mut node = SchemaNode::default();

    if let Some(value) = map.get("type") {
        node.type_decl = Some(decode_type(value, &format!("{}/type", path))?);
    }

    node.properties = decode_schema_map(map, "properties", path)?;

    if let Some(value) = map.get("required") {
        node.required = decode_string_list(value, &format!("{}/required", path))?;
    }

    if let Some(value) = map.get("items") {
        // Tuple-form `items` (an array) is not traversed.
        if !value.is_array() {
            node.items = decode_slot(value, &format!("{}/items", path))?.map(Box::new);
        }
    }

    if let Some(value) = map.get("additionalProperties") {
        let ap_path = format!("{}/additionalProperties", path);
        node.additional_properties = match value {
            Value::Bool(b) => Some(AdditionalProperties::Allowed(*b)),
            other => decode_slot(other, &ap_path)?
                .map(|schema| AdditionalProperties::Schema(Box::new(schema))),
        };
    }

    node.any_of = decode_branches(map, "anyOf", path)?;
    node.one_of = decode_branches(map, "oneOf", path)?;
    node.all_of = decode_branches(map, "allOf", path)?;

    node.const_value = map.get("const").cloned();

    if let Some(value) = map.get("enum") {
        node.enum_values = match value {
            Value::Array(values) => values.clone(),
            other => {
                return Err(invalid(
                    &format!("{}/enum", path),
                    format!("expected array, got {}", json_type_name(other)),
                ))
            }
        };
    }

    if let Some(value) = map.get("$ref") {
        node.reference = match value {
            Value::String(target) => target.clone(),
            other => {
                return Err(invalid(
                    &format!("{}/$ref", path),
                    format!("expected string, got {}", json_type_name(other)),
                ))
            }
        };
    }

    Ok(node)
}

fn decode_type(value: &Value, path: &str) -> Result<TypeDecl, LintError> {
    match value {
        Value::String(name) => Ok(TypeDecl::Single(name.clone())),
        Value::Array(_) => decode_string_list(value, path).map(TypeDecl::List),
        other => Err(invalid(
            path,
            format!(
                "expected string or array of strings, got {}",
                json_type_name(other)
            ),
        )),
    }
}

fn decode_string_list(value: &Value, path: &str) -> Result<Vec<String>, LintError> {
    let Value::Array(items) = value else {
        return Err(invalid(
            path,
            format!("expected array of strings, got {}", json_type_name(value)),
        ));
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::String(s) => Ok(s.clone()),
            other => Err(invalid(
                &format!("{}/{}", path, i),
                format!("expected string, got {}", json_type_name(other)),
            )),
        })
        .collect()
}

fn decode_branches(
    map: &Map<String, Value>,
    keyword: &str,
    path: &str,
) -> Result<Vec<Slot>, LintError> {
    let Some(value) = map.get(keyword) else {
        return Ok(Vec::new());
    };
    let keyword_path = format!("{}/{}", path, keyword);
    let Value::Array(branches) = value else {
        return Err(invalid(
            &keyword_path,
            format!("expected array, got {}", json_type_name(value)),
        ));
    };

    branches
        .iter()
        .enumerate()
        .map(|(i, branch)| decode_slot(branch, &format!("{}/{}", keyword_path, i)))
        .collect()
}

fn decode_schema_map(
    map: &Map<String, Value>,
    keyword: &str,
    path: &str,
) -> Result<BTreeMap<String, Slot>, LintError> {
    let Some(value) = map.get(keyword) else {
        return Ok(BTreeMap::new());
    };
    let keyword_path = format!("{}/{}", path, keyword);
    let Value::Object(entries) = value else {
        return Err(invalid(
            &keyword_path,
            format!("expected object, got {}", json_type_name(value)),
        ));
    };

    entries
        .iter()
        .map(|(name, schema)| {
            let entry_path = format!("{}/{}", keyword_path, pointer_segment(name));
            Ok((name.clone(), decode_slot(schema, &entry_path)?))
        })
        .collect()
}
