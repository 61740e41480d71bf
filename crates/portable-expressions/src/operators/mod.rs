//! Operator dispatch table.
//!
//! Every operator is a binary function over already-evaluated values. An
//! expression with `n` operands applies it `n - 1` times, folding from the
//! left. Logical operators are ordinary entries here, so both sides are
//! always evaluated before they are combined.

pub mod arithmetic;
pub mod bitwise;
pub mod comparison;
pub mod logical;

use crate::error::ExprError;
use crate::node::Operator;
use crate::value::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// The binary function an operator applies to two evaluated values.
pub type BinaryFn = fn(&Value, &Value) -> Result<Value, ExprError>;

/// An operator definition: canonical name, aliases and its function.
#[derive(Debug)]
pub struct OperatorDefinition {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub apply: BinaryFn,
}

/// Map of operator name/alias -> definition.
pub type OperatorMap = HashMap<String, Arc<OperatorDefinition>>;

/// Inserts a definition under the canonical form of its name and of each
/// alias, matching how `Expression` operators are looked up.
pub fn insert_operator(map: &mut OperatorMap, op: Arc<OperatorDefinition>) {
    map.insert(Operator::new(op.name).as_str().to_string(), Arc::clone(&op));
    for alias in op.aliases {
        map.insert(Operator::new(alias).as_str().to_string(), Arc::clone(&op));
    }
}

/// Builds an `OperatorMap` from a list of operator definitions.
pub fn operators_to_map(operators: Vec<Arc<OperatorDefinition>>) -> OperatorMap {
    let mut map = HashMap::new();
    for op in operators {
        insert_operator(&mut map, op);
    }
    map
}

/// All built-in operators.
pub fn all_operators() -> Vec<Arc<OperatorDefinition>> {
    let mut ops = Vec::new();
    ops.extend(arithmetic::operators());
    ops.extend(comparison::operators());
    ops.extend(logical::operators());
    ops.extend(bitwise::operators());
    ops
}

/// The default operator map used by `Environment::new`.
pub fn operators_map() -> OperatorMap {
    operators_to_map(all_operators())
}

/// Error for an operator applied to values it does not support.
pub(crate) fn unsupported(operator: &str, left: &Value, right: &Value) -> ExprError {
    ExprError::InvalidOperator(format!(
        "\"{}\" is not supported between {} and {}.",
        operator,
        left.kind(),
        right.kind()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_share_a_definition() {
        let map = operators_map();
        for (name, alias) in [("+", "add"), ("==", "eq"), ("and", "&&"), ("or", "||")] {
            let a = map.get(name).unwrap();
            let b = map.get(alias).unwrap();
            assert!(Arc::ptr_eq(a, b), "{} / {}", name, alias);
        }
    }

    #[test]
    fn keys_are_canonical() {
        let map = operators_to_map(vec![Arc::new(OperatorDefinition {
            name: " Max",
            aliases: &["GREATEST"],
            apply: |a, _| Ok(a.clone()),
        })]);
        assert!(map.contains_key("max"));
        assert!(map.contains_key("greatest"));
        assert!(!map.contains_key("Max"));
    }

    #[test]
    fn unknown_operator_is_absent() {
        assert!(operators_map().get("contains").is_none());
    }
}
