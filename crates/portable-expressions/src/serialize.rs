//! Conversion between trees (and environments) and their type-tagged JSON
//! structure.
//!
//! Every structure starts with an `object` discriminator naming the type,
//! followed by the type's fields:
//!
//! ```json
//! {"object": "PortableExpressions::Expression", "operator": "-", "operands": [
//!   {"object": "PortableExpressions::Variable", "name": "rating_b"},
//!   {"object": "PortableExpressions::Variable", "name": "rating_a"}
//! ], "output": null}
//! ```
//!
//! Decoding dispatches on the discriminator through a fixed table and rejects
//! anything outside it.

use crate::environment::Environment;
use crate::error::ExprError;
use crate::node::{Expression, Node, Scalar, Variable};
use crate::value::Value;
use serde_json::{json, Map, Value as Json};
use tracing::debug;

/// The four serializable types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Environment,
    Expression,
    Variable,
    Scalar,
}

/// Discriminator table. Tags from the library's earlier `Expressive`
/// namespace are still accepted on input.
const TAGS: &[(&str, ObjectKind)] = &[
    ("PortableExpressions::Environment", ObjectKind::Environment),
    ("PortableExpressions::Expression", ObjectKind::Expression),
    ("PortableExpressions::Variable", ObjectKind::Variable),
    ("PortableExpressions::Scalar", ObjectKind::Scalar),
    ("Expressive::Environment", ObjectKind::Environment),
    ("Expressive::Expression", ObjectKind::Expression),
    ("Expressive::Variable", ObjectKind::Variable),
    ("Expressive::Scalar", ObjectKind::Scalar),
];

impl ObjectKind {
    /// The tag written into the `object` field.
    pub fn tag(self) -> &'static str {
        match self {
            ObjectKind::Environment => "PortableExpressions::Environment",
            ObjectKind::Expression => "PortableExpressions::Expression",
            ObjectKind::Variable => "PortableExpressions::Variable",
            ObjectKind::Scalar => "PortableExpressions::Scalar",
        }
    }

    pub fn from_tag(tag: &str) -> Option<ObjectKind> {
        TAGS.iter().find(|(t, _)| *t == tag).map(|(_, kind)| *kind)
    }
}

/// Types that can be written as a tagged structure.
pub trait Serializable {
    fn kind(&self) -> ObjectKind;

    /// Type-specific fields, appended after the discriminator.
    fn fields(&self, map: &mut Map<String, Json>);

    /// The structure, with `object` as the first key.
    fn as_structure(&self) -> Json {
        let mut map = Map::new();
        map.insert("object".to_string(), Json::String(self.kind().tag().to_string()));
        self.fields(&mut map);
        Json::Object(map)
    }

    /// Compact JSON text, or a multi-line layout when `pretty` is set.
    fn to_text(&self, pretty: bool) -> String {
        let structure = self.as_structure();
        if pretty {
            serde_json::to_string_pretty(&structure).unwrap_or_else(|_| structure.to_string())
        } else {
            structure.to_string()
        }
    }
}

impl Serializable for Scalar {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Scalar
    }

    fn fields(&self, map: &mut Map<String, Json>) {
        map.insert("value".to_string(), self.value().to_json());
    }
}

impl Serializable for Variable {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Variable
    }

    fn fields(&self, map: &mut Map<String, Json>) {
        map.insert("name".to_string(), Json::String(self.name().to_string()));
    }
}

impl Serializable for Expression {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Expression
    }

    fn fields(&self, map: &mut Map<String, Json>) {
        map.insert(
            "operator".to_string(),
            Json::String(self.operator().as_str().to_string()),
        );
        map.insert(
            "operands".to_string(),
            Json::Array(self.operands().iter().map(|operand| operand.as_structure()).collect()),
        );
        map.insert("output".to_string(), json!(self.output()));
    }
}

impl Serializable for Node {
    fn kind(&self) -> ObjectKind {
        match self {
            Node::Scalar(s) => s.kind(),
            Node::Variable(v) => v.kind(),
            Node::Expression(e) => e.kind(),
        }
    }

    fn fields(&self, map: &mut Map<String, Json>) {
        match self {
            Node::Scalar(s) => s.fields(map),
            Node::Variable(v) => v.fields(map),
            Node::Expression(e) => e.fields(map),
        }
    }
}

impl Serializable for Environment {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Environment
    }

    fn fields(&self, map: &mut Map<String, Json>) {
        let variables = self
            .variables()
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect::<Map<_, _>>();
        map.insert("variables".to_string(), Json::Object(variables));
    }
}

/// Anything `from_structure_or_text` can return.
#[derive(Debug, Clone)]
pub enum Object {
    Environment(Environment),
    Node(Node),
}

impl Object {
    pub fn into_node(self) -> Option<Node> {
        match self {
            Object::Node(node) => Some(node),
            Object::Environment(_) => None,
        }
    }

    pub fn into_environment(self) -> Option<Environment> {
        match self {
            Object::Environment(env) => Some(env),
            Object::Node(_) => None,
        }
    }
}

/// Operands must be nodes; an environment in operand position is rejected.
impl TryFrom<Object> for Node {
    type Error = ExprError;

    fn try_from(object: Object) -> Result<Self, Self::Error> {
        object.into_node().ok_or_else(|| {
            ExprError::InvalidOperand(
                "Operands must be one of Expression, Scalar, Variable.".to_string(),
            )
        })
    }
}

/// Input to `from_structure_or_text`: JSON text or an already-parsed
/// structure.
pub enum Input<'a> {
    Text(&'a str),
    Structure(&'a Json),
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(s: &'a str) -> Self {
        Input::Text(s)
    }
}

impl<'a> From<&'a String> for Input<'a> {
    fn from(s: &'a String) -> Self {
        Input::Text(s)
    }
}

impl<'a> From<&'a Json> for Input<'a> {
    fn from(v: &'a Json) -> Self {
        Input::Structure(v)
    }
}

/// Rebuilds a node or environment from JSON text or a parsed structure.
pub fn from_structure_or_text<'a>(input: impl Into<Input<'a>>) -> Result<Object, ExprError> {
    match input.into() {
        Input::Text(text) => {
            let json: Json = serde_json::from_str(text).map_err(|e| {
                ExprError::Deserialization(format!("Unable to parse JSON: {}.", e))
            })?;
            from_structure(&json)
        }
        Input::Structure(json) => from_structure(json),
    }
}

fn from_structure(json: &Json) -> Result<Object, ExprError> {
    let tag = json.get("object").and_then(Json::as_str).ok_or_else(|| {
        ExprError::Deserialization("Missing \"object\" discriminator.".to_string())
    })?;
    let kind = ObjectKind::from_tag(tag).ok_or_else(|| {
        ExprError::Deserialization(format!(
            "Object class {} does not support deserialization.",
            tag
        ))
    })?;
    debug!(tag, ?kind, "deserializing");

    match kind {
        ObjectKind::Environment => {
            let variables = field(json, "variables")?.as_object().ok_or_else(|| {
                ExprError::Deserialization("\"variables\" must be an object.".to_string())
            })?;
            let variables = variables
                .iter()
                .map(|(k, v)| Ok((k.clone(), Value::from_json(v)?)))
                .collect::<Result<Vec<_>, ExprError>>()?;
            Ok(Object::Environment(Environment::new(variables)))
        }
        ObjectKind::Expression => {
            let operator = string_field(json, "operator")?;
            let operands = field(json, "operands")?.as_array().ok_or_else(|| {
                ExprError::Deserialization("\"operands\" must be an array.".to_string())
            })?;
            let operands = operands
                .iter()
                .map(|operand| Node::try_from(from_structure(operand)?))
                .collect::<Result<Vec<_>, ExprError>>()?;
            let output = match json.get("output") {
                None | Some(Json::Null) => None,
                Some(Json::String(s)) => Some(s.clone()),
                Some(other) => {
                    return Err(ExprError::Deserialization(format!(
                        "\"output\" must be a string or null, got {}.",
                        other
                    )))
                }
            };
            Ok(Object::Node(Expression::new(operator, operands, output)?.into()))
        }
        ObjectKind::Variable => Ok(Object::Node(
            Variable::new(string_field(json, "name")?).into(),
        )),
        ObjectKind::Scalar => Ok(Object::Node(
            Scalar::new(Value::from_json(field(json, "value")?)?).into(),
        )),
    }
}

fn field<'a>(json: &'a Json, name: &str) -> Result<&'a Json, ExprError> {
    json.get(name)
        .ok_or_else(|| ExprError::Deserialization(format!("Missing field \"{}\".", name)))
}

fn string_field<'a>(json: &'a Json, name: &str) -> Result<&'a str, ExprError> {
    field(json, name)?
        .as_str()
        .ok_or_else(|| ExprError::Deserialization(format!("\"{}\" must be a string.", name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_is_the_first_key() {
        let expr = Expression::new("+", [Scalar::new(1), Scalar::new(2)], None).unwrap();
        let text = expr.to_text(false);
        assert!(text.starts_with("{\"object\":\"PortableExpressions::Expression\""), "{}", text);
    }

    #[test]
    fn pretty_and_compact_encode_the_same_structure() {
        let expr = Expression::new("*", [Variable::new("a"), Variable::new("b")], None)
            .unwrap()
            .with_output("c");
        let compact: Json = serde_json::from_str(&expr.to_text(false)).unwrap();
        let pretty: Json = serde_json::from_str(&expr.to_text(true)).unwrap();
        assert_eq!(compact, pretty);
        assert!(expr.to_text(true).contains('\n'));
    }

    #[test]
    fn tag_table() {
        assert_eq!(
            ObjectKind::from_tag("Expressive::Scalar"),
            Some(ObjectKind::Scalar)
        );
        assert_eq!(ObjectKind::from_tag("Scalar"), None);
        assert_eq!(
            ObjectKind::from_tag(ObjectKind::Environment.tag()),
            Some(ObjectKind::Environment)
        );
    }

    #[test]
    fn objects_are_debug_printable() {
        let env = from_structure_or_text(&json!({
            "object": "PortableExpressions::Environment",
            "variables": {"rating_a": 1000}
        }))
        .unwrap();
        let printed = format!("{:?}", env);
        assert!(printed.starts_with("Environment("), "{}", printed);
        assert!(printed.contains("rating_a"), "{}", printed);
    }

    #[test]
    fn environment_operand_is_rejected() {
        let json = json!({
            "object": "PortableExpressions::Expression",
            "operator": "+",
            "operands": [
                {"object": "PortableExpressions::Scalar", "value": 1},
                {"object": "PortableExpressions::Environment", "variables": {}}
            ]
        });
        assert!(matches!(
            from_structure_or_text(&json),
            Err(ExprError::InvalidOperand(_))
        ));
    }
}
