//! Arithmetic operators.

use super::{unsupported, OperatorDefinition};
use crate::error::ExprError;
use crate::value::Value;
use std::sync::Arc;

/// Applies an integer operation, falling back to floats on `i64` overflow,
/// or the float operation when either side is a float.
fn numeric(
    name: &str,
    a: &Value,
    b: &Value,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> Result<Value, ExprError> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => Ok(match int_op(*x, *y) {
            Some(n) => Value::Int(n),
            None => Value::Float(float_op(*x as f64, *y as f64)),
        }),
        _ => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => Ok(Value::Float(float_op(x, y))),
            _ => Err(unsupported(name, a, b)),
        },
    }
}

/// Floored integer division: the quotient rounds toward negative infinity.
pub fn floor_div(a: i64, b: i64) -> Option<i64> {
    let q = a.checked_div(b)?;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        Some(q - 1)
    } else {
        Some(q)
    }
}

/// Floored modulo: the result takes the sign of the divisor.
pub fn floor_mod(a: i64, b: i64) -> Option<i64> {
    let r = a.checked_rem(b)?;
    if r != 0 && ((r < 0) != (b < 0)) {
        Some(r + b)
    } else {
        Some(r)
    }
}

fn float_floor_mod(a: f64, b: f64) -> f64 {
    a - b * (a / b).floor()
}

fn add(a: &Value, b: &Value) -> Result<Value, ExprError> {
    if let (Value::String(x), Value::String(y)) = (a, b) {
        return Ok(Value::String(format!("{}{}", x, y)));
    }
    numeric("+", a, b, i64::checked_add, |x, y| x + y)
}

fn subtract(a: &Value, b: &Value) -> Result<Value, ExprError> {
    numeric("-", a, b, i64::checked_sub, |x, y| x - y)
}

/// Longest string, in bytes, that `String * Int` may produce.
pub const MAX_REPEAT_LEN: usize = 1 << 24;

fn multiply(a: &Value, b: &Value) -> Result<Value, ExprError> {
    if let (Value::String(s), Value::Int(n)) = (a, b) {
        let count = usize::try_from(*n).map_err(|_| unsupported("*", a, b))?;
        return match s.len().checked_mul(count) {
            Some(len) if len <= MAX_REPEAT_LEN => Ok(Value::String(s.repeat(count))),
            _ => Err(ExprError::InvalidOperator(format!(
                "\"*\" would build a string longer than {} bytes.",
                MAX_REPEAT_LEN
            ))),
        };
    }
    numeric("*", a, b, i64::checked_mul, |x, y| x * y)
}

fn divide(a: &Value, b: &Value) -> Result<Value, ExprError> {
    if let (Value::Int(_), Value::Int(0)) = (a, b) {
        return Err(ExprError::InvalidOperator(
            "\"/\" divided by integer zero.".to_string(),
        ));
    }
    numeric("/", a, b, floor_div, |x, y| x / y)
}

fn modulo(a: &Value, b: &Value) -> Result<Value, ExprError> {
    if let (Value::Int(_), Value::Int(0)) = (a, b) {
        return Err(ExprError::InvalidOperator(
            "\"%\" divided by integer zero.".to_string(),
        ));
    }
    numeric("%", a, b, floor_mod, float_floor_mod)
}

fn pow(a: &Value, b: &Value) -> Result<Value, ExprError> {
    numeric(
        "**",
        a,
        b,
        |x, y| u32::try_from(y).ok().and_then(|y| x.checked_pow(y)),
        f64::powf,
    )
}

pub fn operators() -> Vec<Arc<OperatorDefinition>> {
    vec![
        Arc::new(OperatorDefinition {
            name: "+",
            aliases: &["add"],
            apply: add,
        }),
        Arc::new(OperatorDefinition {
            name: "-",
            aliases: &["subtract"],
            apply: subtract,
        }),
        Arc::new(OperatorDefinition {
            name: "*",
            aliases: &["multiply"],
            apply: multiply,
        }),
        Arc::new(OperatorDefinition {
            name: "/",
            aliases: &["divide"],
            apply: divide,
        }),
        Arc::new(OperatorDefinition {
            name: "%",
            aliases: &["mod"],
            apply: modulo,
        }),
        Arc::new(OperatorDefinition {
            name: "**",
            aliases: &["pow"],
            apply: pow,
        }),
    ]
}
