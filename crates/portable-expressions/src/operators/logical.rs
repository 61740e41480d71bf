//! Logical operators.
//!
//! These are plain binary functions over evaluated booleans. By the time
//! `and`/`or` run, every operand has already been evaluated (including any
//! output bindings it writes), so nothing is ever skipped.

use super::{unsupported, OperatorDefinition};
use crate::error::ExprError;
use crate::value::Value;
use std::sync::Arc;

fn booleans(name: &str, a: &Value, b: &Value) -> Result<(bool, bool), ExprError> {
    match (a.as_bool(), b.as_bool()) {
        (Some(x), Some(y)) => Ok((x, y)),
        _ => Err(unsupported(name, a, b)),
    }
}

fn and(a: &Value, b: &Value) -> Result<Value, ExprError> {
    let (x, y) = booleans("and", a, b)?;
    Ok(Value::Bool(x && y))
}

fn or(a: &Value, b: &Value) -> Result<Value, ExprError> {
    let (x, y) = booleans("or", a, b)?;
    Ok(Value::Bool(x || y))
}

pub fn operators() -> Vec<Arc<OperatorDefinition>> {
    vec![
        Arc::new(OperatorDefinition {
            name: "and",
            aliases: &["&&"],
            apply: and,
        }),
        Arc::new(OperatorDefinition {
            name: "or",
            aliases: &["||"],
            apply: or,
        }),
    ]
}
