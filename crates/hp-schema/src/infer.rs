//! Structural type inference over one example JSON value.

use hp_core::enums::{NumericStringPolicy, PrimitiveKind};
use serde::Serialize;
use serde_json::Value;

/// Field name carrying a GraphQL object's concrete type.
pub const TYPENAME_FIELD: &str = "__typename";

/// Inferred type of one JSON position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SchemaNode {
    Null,
    Boolean,
    Number,
    String,
    /// `element` is `None` when the example array was empty.
    Array { element: Option<Box<SchemaNode>> },
    /// Fields in the order they appeared in the example.
    Object { fields: Vec<SchemaField> },
}

/// One named field of an object schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaField {
    pub name: String,
    pub schema: SchemaNode,
    /// Observed value of a discriminator field (`__typename`), if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl SchemaNode {
    /// Scalar kind for `typeof` checks; `None` for null and containers.
    #[must_use]
    pub const fn primitive_kind(&self) -> Option<PrimitiveKind> {
        match self {
            Self::Boolean => Some(PrimitiveKind::Boolean),
            Self::Number => Some(PrimitiveKind::Number),
            Self::String => Some(PrimitiveKind::String),
            Self::Null | Self::Array { .. } | Self::Object { .. } => None,
        }
    }

    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array { .. } => "array",
            Self::Object { .. } => "object",
        }
    }

    /// Look up a direct child field of an object schema.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&SchemaField> {
        match self {
            Self::Object { fields } => fields.iter().find(|field| field.name == name),
            _ => None,
        }
    }
}

/// Builds [`SchemaNode`] trees. Pure: the same value always yields the same tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaInferrer {
    numeric_strings: NumericStringPolicy,
}

impl SchemaInferrer {
    #[must_use]
    pub const fn new(numeric_strings: NumericStringPolicy) -> Self {
        Self { numeric_strings }
    }

    #[must_use]
    pub fn infer(&self, value: &Value) -> SchemaNode {
        match value {
            Value::Null => SchemaNode::Null,
            Value::Bool(_) => SchemaNode::Boolean,
            Value::Number(_) => SchemaNode::Number,
            Value::String(text) => self.infer_string(text),
            // Homogeneity is assumed: only the first element is inspected.
            Value::Array(items) => SchemaNode::Array {
                element: items.first().map(|first| Box::new(self.infer(first))),
            },
            Value::Object(map) => SchemaNode::Object {
                fields: map
                    .iter()
                    .map(|(name, child)| SchemaField {
                        name: name.clone(),
                        schema: self.infer(child),
                        tag: discriminator_tag(name, child),
                    })
                    .collect(),
            },
        }
    }

    fn infer_string(&self, text: &str) -> SchemaNode {
        match self.numeric_strings {
            NumericStringPolicy::Number if is_numeric_literal(text) => SchemaNode::Number,
            NumericStringPolicy::Number | NumericStringPolicy::Literal => SchemaNode::String,
        }
    }
}

/// Infer with the default (literal) numeric-string policy.
#[must_use]
pub fn infer(value: &Value) -> SchemaNode {
    SchemaInferrer::default().infer(value)
}

fn discriminator_tag(name: &str, value: &Value) -> Option<String> {
    match value {
        Value::String(tag) if name == TYPENAME_FIELD => Some(tag.clone()),
        _ => None,
    }
}

fn is_numeric_literal(text: &str) -> bool {
    let trimmed = text.trim();
    !trimmed.is_empty() && trimmed.parse::<f64>().is_ok_and(f64::is_finite)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn primitives_map_to_their_kind() {
        assert_eq!(infer(&json!(null)), SchemaNode::Null);
        assert_eq!(infer(&json!(true)), SchemaNode::Boolean);
        assert_eq!(infer(&json!(1.5)), SchemaNode::Number);
        assert_eq!(infer(&json!("x")), SchemaNode::String);
    }

    #[test]
    fn numeric_strings_follow_policy() {
        let literal = SchemaInferrer::new(NumericStringPolicy::Literal);
        let numeric = SchemaInferrer::new(NumericStringPolicy::Number);

        assert_eq!(literal.infer(&json!("1002")), SchemaNode::String);
        assert_eq!(numeric.infer(&json!("1002")), SchemaNode::Number);
        assert_eq!(numeric.infer(&json!(" 12.5 ")), SchemaNode::Number);
        assert_eq!(numeric.infer(&json!("")), SchemaNode::String);
        assert_eq!(numeric.infer(&json!("   ")), SchemaNode::String);
        assert_eq!(numeric.infer(&json!("NaN")), SchemaNode::String);
        assert_eq!(numeric.infer(&json!("inf")), SchemaNode::String);
        assert_eq!(numeric.infer(&json!("12abc")), SchemaNode::String);
    }

    #[test]
    fn arrays_infer_from_first_element_only() {
        let node = infer(&json!([{"id": "1"}, 5, null]));
        assert_eq!(
            node,
            SchemaNode::Array {
                element: Some(Box::new(SchemaNode::Object {
                    fields: vec![SchemaField {
                        name: "id".into(),
                        schema: SchemaNode::String,
                        tag: None,
                    }],
                })),
            }
        );
        assert_eq!(infer(&json!([])), SchemaNode::Array { element: None });
    }

    #[test]
    fn objects_keep_field_order() {
        let value: Value = serde_json::from_str(r#"{"zeta": 1, "alpha": "a", "mid": []}"#).unwrap();
        let SchemaNode::Object { fields } = infer(&value) else {
            panic!("expected object");
        };
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn typename_fields_carry_their_tag() {
        let node = infer(&json!({"__typename": "Character", "name": "Diana"}));
        assert_eq!(
            node.field(TYPENAME_FIELD).and_then(|f| f.tag.as_deref()),
            Some("Character")
        );
        assert_eq!(node.field("name").and_then(|f| f.tag.as_deref()), None);
    }

    #[test]
    fn inference_is_deterministic() {
        let value = json!({"a": {"b": [{"c": [1, 2]}], "d": null}, "e": false});
        assert_eq!(infer(&value), infer(&value));
    }

    #[test]
    fn deep_nesting_is_followed() {
        let value = json!({"a": {"b": {"c": {"d": {"e": "leaf"}}}}});
        let leaf = infer(&value)
            .field("a")
            .and_then(|f| f.schema.field("b"))
            .and_then(|f| f.schema.field("c"))
            .and_then(|f| f.schema.field("d"))
            .and_then(|f| f.schema.field("e"))
            .map(|f| f.schema.clone());
        assert_eq!(leaf, Some(SchemaNode::String));
    }

    #[test]
    fn serializes_as_tagged_tree() {
        let value = serde_json::to_value(infer(&json!({"items": []}))).unwrap();
        assert_eq!(
            value,
            json!({"type": "object", "fields": [
                {"name": "items", "schema": {"type": "array", "element": null}}
            ]})
        );
    }
}
