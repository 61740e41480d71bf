//! Portable expressions: computation defined once as a tree of scalars,
//! variables and operators, evaluated repeatedly against a mutable
//! `Environment`, and shipped across process boundaries as JSON.
//!
//! # Example
//!
//! ```
//! use portable_expressions::{
//!     from_structure_or_text, Environment, Expression, Serializable, Value, Variable,
//! };
//!
//! let diff = Expression::new(
//!     "-",
//!     [Variable::new("rating_b"), Variable::new("rating_a")],
//!     Some("rating_difference".to_string()),
//! )
//! .unwrap();
//!
//! let mut env = Environment::new([("rating_a", 1000), ("rating_b", 1200)]);
//! let node = from_structure_or_text(&diff.to_text(false)).unwrap().into_node().unwrap();
//!
//! assert_eq!(env.evaluate(&node).unwrap(), Value::Int(200));
//! assert_eq!(env.get("rating_difference"), Some(&Value::Int(200)));
//! ```

pub mod environment;
pub mod error;
pub mod node;
pub mod operators;
pub mod serialize;
pub mod value;

pub use environment::Environment;
pub use error::ExprError;
pub use node::{Expression, Node, Operator, Scalar, Variable};
pub use operators::{operators_map, BinaryFn, OperatorDefinition, OperatorMap};
pub use serialize::{from_structure_or_text, Input, Object, ObjectKind, Serializable};
pub use value::Value;
