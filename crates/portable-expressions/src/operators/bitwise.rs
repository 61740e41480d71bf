//! Bitwise operators over integers; `&`, `|` and `^` also combine booleans.

use super::{unsupported, OperatorDefinition};
use crate::error::ExprError;
use crate::value::Value;
use std::sync::Arc;

fn bit_and(a: &Value, b: &Value) -> Result<Value, ExprError> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => Ok(Value::Int(x & y)),
        (Value::Bool(x), Value::Bool(y)) => Ok(Value::Bool(x & y)),
        _ => Err(unsupported("&", a, b)),
    }
}

fn bit_or(a: &Value, b: &Value) -> Result<Value, ExprError> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => Ok(Value::Int(x | y)),
        (Value::Bool(x), Value::Bool(y)) => Ok(Value::Bool(x | y)),
        _ => Err(unsupported("|", a, b)),
    }
}

fn bit_xor(a: &Value, b: &Value) -> Result<Value, ExprError> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => Ok(Value::Int(x ^ y)),
        (Value::Bool(x), Value::Bool(y)) => Ok(Value::Bool(x ^ y)),
        _ => Err(unsupported("^", a, b)),
    }
}

fn shift_amount(name: &str, a: &Value, b: &Value) -> Result<(i64, u32), ExprError> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => u32::try_from(*y)
            .ok()
            .filter(|y| *y < 64)
            .map(|y| (*x, y))
            .ok_or_else(|| unsupported(name, a, b)),
        _ => Err(unsupported(name, a, b)),
    }
}

fn shl(a: &Value, b: &Value) -> Result<Value, ExprError> {
    let (x, y) = shift_amount("<<", a, b)?;
    Ok(Value::Int(x << y))
}

fn shr(a: &Value, b: &Value) -> Result<Value, ExprError> {
    let (x, y) = shift_amount(">>", a, b)?;
    Ok(Value::Int(x >> y))
}

pub fn operators() -> Vec<Arc<OperatorDefinition>> {
    vec![
        Arc::new(OperatorDefinition {
            name: "&",
            aliases: &[],
            apply: bit_and,
        }),
        Arc::new(OperatorDefinition {
            name: "|",
            aliases: &[],
            apply: bit_or,
        }),
        Arc::new(OperatorDefinition {
            name: "^",
            aliases: &[],
            apply: bit_xor,
        }),
        Arc::new(OperatorDefinition {
            name: "<<",
            aliases: &[],
            apply: shl,
        }),
        Arc::new(OperatorDefinition {
            name: ">>",
            aliases: &[],
            apply: shr,
        }),
    ]
}
