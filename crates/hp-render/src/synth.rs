//! Assertion synthesis over an inferred schema tree.

use hp_core::checks::{AccessPath, CheckKind, CheckSpec};
use hp_core::enums::PrimitiveKind;
use hp_core::exchange::CapturedExchange;
use hp_schema::{SchemaField, SchemaInferrer, SchemaNode};
use serde_json::Value;

/// Top-level payload container of a GraphQL response.
pub const DATA_FIELD: &str = "data";

/// Checks for the root field `root_field` whose inferred shape is `schema`.
///
/// Emits `data` exists, `data.<root>` exists, then one check per reachable
/// position in depth-first schema order:
///
/// - discriminator fields (`__typename` with a string value) compare against
///   the observed literal
/// - scalars get a `typeof` check and `null` gets an existence check
/// - arrays get an `Array.isArray` check; a non-empty example is followed into
///   its first element with every nested check guarded by the array
/// - objects contribute only their descendants
#[must_use]
pub fn synthesize(root_field: &str, schema: &SchemaNode) -> Vec<CheckSpec> {
    let data = AccessPath::root().field(DATA_FIELD);
    let root = data.field(root_field);

    let mut synth = Synthesizer::default();
    synth.push(data, CheckKind::Exists);
    synth.push(root.clone(), CheckKind::Exists);

    match schema {
        SchemaNode::Object { fields } => synth.visit_fields(&root, fields),
        SchemaNode::Null => {}
        other => synth.visit(root, other),
    }
    synth.checks
}

/// Checks for a captured exchange's response body.
///
/// Without a response, or with a response lacking a `data` object, only the
/// `data` existence check is produced.
#[must_use]
pub fn synthesize_exchange(exchange: &CapturedExchange, inferrer: &SchemaInferrer) -> Vec<CheckSpec> {
    match exchange.root_field() {
        Some((name, value)) => synthesize(name, &inferrer.infer(value)),
        None => {
            tracing::debug!(
                operation = exchange.operation_name(),
                "no root field in captured response; emitting data check only"
            );
            vec![CheckSpec::new(
                AccessPath::root().field(DATA_FIELD),
                CheckKind::Exists,
                Vec::new(),
            )]
        }
    }
}

#[derive(Default)]
struct Synthesizer {
    checks: Vec<CheckSpec>,
    /// Arrays enclosing the current position, outermost first.
    guards: Vec<AccessPath>,
}

impl Synthesizer {
    fn push(&mut self, path: AccessPath, kind: CheckKind) {
        self.checks
            .push(CheckSpec::new(path, kind, self.guards.clone()));
    }

    fn visit_fields(&mut self, parent: &AccessPath, fields: &[SchemaField]) {
        for field in fields {
            let path = parent.field(&field.name);
            match &field.tag {
                Some(tag) => self.push(
                    path,
                    CheckKind::EqualsLiteral {
                        value: Value::String(tag.clone()),
                    },
                ),
                None => self.visit(path, &field.schema),
            }
        }
    }

    fn visit(&mut self, path: AccessPath, node: &SchemaNode) {
        match node {
            SchemaNode::Null => self.push(path, CheckKind::Exists),
            SchemaNode::Boolean => self.push_type(path, PrimitiveKind::Boolean),
            SchemaNode::Number => self.push_type(path, PrimitiveKind::Number),
            SchemaNode::String => self.push_type(path, PrimitiveKind::String),
            SchemaNode::Array { element } => {
                self.push(path.clone(), CheckKind::IsArray);
                if let Some(element) = element {
                    let first = path.first_element();
                    self.guards.push(path);
                    self.visit(first, element);
                    self.guards.pop();
                }
            }
            SchemaNode::Object { fields } => self.visit_fields(&path, fields),
        }
    }

    fn push_type(&mut self, path: AccessPath, primitive: PrimitiveKind) {
        self.push(path, CheckKind::TypeOf { primitive });
    }
}
