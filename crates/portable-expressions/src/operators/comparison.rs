//! Comparison operators.

use super::{unsupported, OperatorDefinition};
use crate::error::ExprError;
use crate::value::Value;
use std::cmp::Ordering;
use std::sync::Arc;

/// Equality across all values. Integers and floats compare numerically;
/// values of different kinds are unequal.
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Int(x), Value::Float(y)) | (Value::Float(y), Value::Int(x)) => *x as f64 == *y,
        _ => a == b,
    }
}

/// Ordering between two numbers or two strings.
fn order(name: &str, a: &Value, b: &Value) -> Result<Ordering, ExprError> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => Ok(x.cmp(y)),
        (Value::String(x), Value::String(y)) => Ok(x.cmp(y)),
        _ => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x.partial_cmp(&y).ok_or_else(|| unsupported(name, a, b)),
            _ => Err(unsupported(name, a, b)),
        },
    }
}

fn eq(a: &Value, b: &Value) -> Result<Value, ExprError> {
    Ok(Value::Bool(loose_eq(a, b)))
}

fn ne(a: &Value, b: &Value) -> Result<Value, ExprError> {
    Ok(Value::Bool(!loose_eq(a, b)))
}

fn lt(a: &Value, b: &Value) -> Result<Value, ExprError> {
    Ok(Value::Bool(order("<", a, b)?.is_lt()))
}

fn le(a: &Value, b: &Value) -> Result<Value, ExprError> {
    Ok(Value::Bool(order("<=", a, b)?.is_le()))
}

fn gt(a: &Value, b: &Value) -> Result<Value, ExprError> {
    Ok(Value::Bool(order(">", a, b)?.is_gt()))
}

fn ge(a: &Value, b: &Value) -> Result<Value, ExprError> {
    Ok(Value::Bool(order(">=", a, b)?.is_ge()))
}

pub fn operators() -> Vec<Arc<OperatorDefinition>> {
    vec![
        Arc::new(OperatorDefinition {
            name: "==",
            aliases: &["eq"],
            apply: eq,
        }),
        Arc::new(OperatorDefinition {
            name: "!=",
            aliases: &["ne"],
            apply: ne,
        }),
        Arc::new(OperatorDefinition {
            name: "<",
            aliases: &["lt"],
            apply: lt,
        }),
        Arc::new(OperatorDefinition {
            name: "<=",
            aliases: &["le"],
            apply: le,
        }),
        Arc::new(OperatorDefinition {
            name: ">",
            aliases: &["gt"],
            apply: gt,
        }),
        Arc::new(OperatorDefinition {
            name: ">=",
            aliases: &["ge"],
            apply: ge,
        }),
    ]
}
