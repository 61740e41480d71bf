use thiserror::Error;

/// Every failure the crate reports. Callers branch on the variant to tell a
/// missing input apart from a malformed definition or bad wire data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExprError {
    /// Expression construction with fewer than two operands, or with an
    /// operand that is not a Scalar, Variable or Expression.
    #[error("Invalid operand: {0}")]
    InvalidOperand(String),

    /// Operator not registered, or not supported by the evaluated operands.
    #[error("Invalid operator: {0}")]
    InvalidOperator(String),

    #[error("Environment missing variable {0}.")]
    MissingVariable(String),

    #[error("Deserialization failed: {0}")]
    Deserialization(String),
}
