//! The `Environment`: named variables plus the evaluation entry point.

use crate::error::ExprError;
use crate::node::{Expression, Node};
use crate::operators::{insert_operator, operators_map, OperatorDefinition, OperatorMap};
use crate::value::Value;
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// Holds state in the form of a variable mapping and evaluates nodes
/// against it.
///
/// Evaluation mutates the mapping in place: an `Expression` with an output
/// binding writes its result before returning, so later nodes (and later
/// operands of the same tree) observe it. Entries are only ever added or
/// overwritten. Failures do not roll back writes made before them.
///
/// Evaluation recurses once per tree level; very deep trees are bounded by
/// the thread's stack.
#[derive(Debug, Clone)]
pub struct Environment {
    variables: IndexMap<String, Value>,
    operators: Arc<OperatorMap>,
}

impl Environment {
    /// Creates an environment with the built-in operators.
    pub fn new<K, V>(variables: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Environment {
            variables: variables
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            operators: Arc::new(operators_map()),
        }
    }

    /// Replaces the operator map wholesale.
    pub fn with_operators(mut self, operators: Arc<OperatorMap>) -> Self {
        self.operators = operators;
        self
    }

    /// Registers an operator (under its name and aliases, in canonical form),
    /// replacing any existing entry with the same key.
    pub fn register_operator(&mut self, definition: OperatorDefinition) {
        debug!(name = definition.name, aliases = ?definition.aliases, "registering operator");
        insert_operator(Arc::make_mut(&mut self.operators), Arc::new(definition));
    }

    pub fn variables(&self) -> &IndexMap<String, Value> {
        &self.variables
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    pub fn operators(&self) -> &OperatorMap {
        &self.operators
    }

    /// Evaluates a single node.
    pub fn evaluate(&mut self, node: &Node) -> Result<Value, ExprError> {
        match node {
            Node::Scalar(scalar) => Ok(scalar.value().clone()),
            Node::Variable(variable) => self
                .variables
                .get(variable.name())
                .cloned()
                .ok_or_else(|| ExprError::MissingVariable(variable.name().to_string())),
            Node::Expression(expression) => self.evaluate_expression(expression),
        }
    }

    /// Evaluates each node in order and returns the value of the last one.
    /// Writes made by earlier nodes are visible to later ones. Returns
    /// `Value::Null` when `nodes` is empty.
    pub fn evaluate_all<'a>(
        &mut self,
        nodes: impl IntoIterator<Item = &'a Node>,
    ) -> Result<Value, ExprError> {
        let mut last = Value::Null;
        for node in nodes {
            last = self.evaluate(node)?;
        }
        Ok(last)
    }

    fn evaluate_expression(&mut self, expression: &Expression) -> Result<Value, ExprError> {
        let values = expression
            .operands()
            .iter()
            .map(|operand| self.evaluate(operand))
            .collect::<Result<Vec<_>, _>>()?;

        let key = expression.operator().as_str();
        let definition = self.operators.get(key).cloned().ok_or_else(|| {
            ExprError::InvalidOperator(format!("Unknown operator \"{}\".", key))
        })?;

        trace!(operator = key, operands = values.len(), "reducing expression");
        let mut values = values.into_iter();
        let first = values.next().unwrap_or(Value::Null);
        let value = values.try_fold(first, |acc, v| (definition.apply)(&acc, &v))?;

        if let Some(output) = expression.output() {
            debug!(output, %value, "writing output binding");
            self.variables.insert(output.to_string(), value.clone());
        }

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Scalar, Variable};

    fn env() -> Environment {
        Environment::new([("variable_a", 1), ("variable_b", 2)])
    }

    #[test]
    fn scalars_and_variables() {
        let mut env = env();
        assert_eq!(env.evaluate(&Scalar::new(1).into()).unwrap(), Value::Int(1));
        assert_eq!(
            env.evaluate(&Variable::new("variable_b").into()).unwrap(),
            Value::Int(2)
        );
    }

    #[test]
    fn unknown_operator() {
        let expr = Expression::new("contains", [Scalar::new(1), Scalar::new(2)], None).unwrap();
        let err = env().evaluate(&expr.into()).unwrap_err();
        assert!(matches!(err, ExprError::InvalidOperator(_)));
    }

    #[test]
    fn operator_is_resolved_case_insensitively() {
        let expr = Expression::new("AND", [Scalar::new(true), Scalar::new(true)], None).unwrap();
        assert_eq!(env().evaluate(&expr.into()).unwrap(), Value::Bool(true));
    }

    #[test]
    fn registered_operator() {
        fn max(a: &Value, b: &Value) -> Result<Value, ExprError> {
            match (a, b) {
                (Value::Int(x), Value::Int(y)) => Ok(Value::Int(*x.max(y))),
                _ => Err(ExprError::InvalidOperator("max".to_string())),
            }
        }
        let mut env = env();
        env.register_operator(OperatorDefinition {
            name: "max",
            aliases: &["greatest"],
            apply: max,
        });
        let expr = Expression::new(
            "greatest",
            [Scalar::new(3), Scalar::new(9), Scalar::new(4)],
            None,
        )
        .unwrap();
        assert_eq!(env.evaluate(&expr.into()).unwrap(), Value::Int(9));
    }

    #[test]
    fn registered_operator_with_mixed_case_name() {
        let mut env = env();
        env.register_operator(OperatorDefinition {
            name: "Max",
            aliases: &[" Greatest "],
            apply: |a, b| match (a, b) {
                (Value::Int(x), Value::Int(y)) => Ok(Value::Int(*x.max(y))),
                _ => Err(ExprError::InvalidOperator("max".to_string())),
            },
        });
        for name in ["Max", "max", "GREATEST"] {
            let expr = Expression::new(name, [Scalar::new(3), Scalar::new(9)], None).unwrap();
            assert_eq!(env.evaluate(&expr.into()).unwrap(), Value::Int(9), "{}", name);
        }
    }

    #[test]
    fn registering_does_not_leak_into_clones() {
        let base = env();
        let mut custom = base.clone();
        custom.register_operator(OperatorDefinition {
            name: "first",
            aliases: &[],
            apply: |a, _| Ok(a.clone()),
        });
        assert!(custom.operators().contains_key("first"));
        assert!(!base.operators().contains_key("first"));
    }

    #[test]
    fn evaluate_all_with_no_nodes() {
        assert_eq!(env().evaluate_all([]).unwrap(), Value::Null);
    }
}
