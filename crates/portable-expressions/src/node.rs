//! The expression tree: scalars, variables and operator nodes.

use crate::error::ExprError;
use crate::value::Value;
use std::fmt;

/// A leaf holding a literal value.
#[derive(Debug, Clone, PartialEq)]
pub struct Scalar {
    value: Value,
}

impl Scalar {
    pub fn new(value: impl Into<Value>) -> Self {
        Scalar {
            value: value.into(),
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// A leaf naming a value that is resolved from an `Environment` at
/// evaluation time. Nothing is checked at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    name: String,
}

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Variable { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Canonical operator identifier.
///
/// Surrounding whitespace is dropped and ASCII letters are lowercased, so
/// `"AND"`, `" and "` and `"and"` name the same operator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Operator(String);

impl Operator {
    pub fn new(symbol: impl AsRef<str>) -> Self {
        Operator(symbol.as_ref().trim().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Operator {
    fn from(s: &str) -> Self {
        Operator::new(s)
    }
}

impl From<String> for Operator {
    fn from(s: String) -> Self {
        Operator::new(s)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An operator node reducing two or more operands left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    operator: Operator,
    operands: Vec<Node>,
    output: Option<String>,
}

impl Expression {
    /// Builds an expression, failing with `InvalidOperand` when fewer than
    /// two operands are given.
    pub fn new(
        operator: impl Into<Operator>,
        operands: impl IntoIterator<Item = impl Into<Node>>,
        output: Option<String>,
    ) -> Result<Self, ExprError> {
        let operands: Vec<Node> = operands.into_iter().map(Into::into).collect();
        if operands.len() < 2 {
            return Err(ExprError::InvalidOperand(
                "Must provide 2 or more operands.".to_string(),
            ));
        }
        Ok(Expression {
            operator: operator.into(),
            operands,
            output,
        })
    }

    pub fn operator(&self) -> &Operator {
        &self.operator
    }

    pub fn operands(&self) -> &[Node] {
        &self.operands
    }

    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    /// Assigns (or clears) the variable the result is written into.
    pub fn set_output(&mut self, output: Option<String>) {
        self.output = output;
    }

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }
}

/// Any node that can appear in a tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Scalar(Scalar),
    Variable(Variable),
    Expression(Expression),
}

impl From<Scalar> for Node {
    fn from(s: Scalar) -> Self {
        Node::Scalar(s)
    }
}

impl From<Variable> for Node {
    fn from(v: Variable) -> Self {
        Node::Variable(v)
    }
}

impl From<Expression> for Node {
    fn from(e: Expression) -> Self {
        Node::Expression(e)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Infix rendering for debugging, e.g. `(rating_b - rating_a)`. Not a
/// serialization format.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, operand) in self.operands.iter().enumerate() {
            if i > 0 {
                write!(f, " {} ", self.operator)?;
            }
            write!(f, "{}", operand)?;
        }
        f.write_str(")")
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Scalar(s) => s.fmt(f),
            Node::Variable(v) => v.fmt(f),
            Node::Expression(e) => e.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_two_operands() {
        let none: Vec<Node> = vec![];
        assert!(matches!(
            Expression::new("+", none, None),
            Err(ExprError::InvalidOperand(_))
        ));
        assert!(matches!(
            Expression::new("+", [Scalar::new(1)], None),
            Err(ExprError::InvalidOperand(_))
        ));
        assert!(Expression::new("+", [Scalar::new(1), Scalar::new(2)], None).is_ok());
    }

    #[test]
    fn operator_is_canonical() {
        assert_eq!(Operator::new(" AND "), Operator::new("and"));
        assert_eq!(Operator::new("**").as_str(), "**");
    }

    #[test]
    fn output_can_be_assigned_later() {
        let mut expr = Expression::new("+", [Scalar::new(1), Scalar::new(2)], None).unwrap();
        assert_eq!(expr.output(), None);
        expr.set_output(Some("total".to_string()));
        assert_eq!(expr.output(), Some("total"));
    }

    #[test]
    fn infix_rendering() {
        let inner = Expression::new(
            "-",
            [Variable::new("rating_b"), Variable::new("rating_a")],
            None,
        )
        .unwrap();
        let expr = Expression::new(
            "/",
            [Node::from(inner), Node::from(Variable::new("scale_factor"))],
            None,
        )
        .unwrap();
        assert_eq!(expr.to_string(), "((rating_b - rating_a) / scale_factor)");
    }
}
