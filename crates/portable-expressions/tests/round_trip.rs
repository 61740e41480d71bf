//! Any tree survives `to_text` followed by `from_structure_or_text`.

use portable_expressions::{
    from_structure_or_text, Expression, Node, Scalar, Serializable, Value, Variable,
};
use proptest::prelude::*;

fn value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        (-1.0e12f64..1.0e12f64).prop_map(Value::Float),
        "[a-z_ ]{0,8}".prop_map(Value::String),
    ]
}

fn node() -> impl Strategy<Value = Node> {
    let leaf = prop_oneof![
        value().prop_map(|v| Node::from(Scalar::new(v))),
        "[a-z_]{1,8}".prop_map(|name| Node::from(Variable::new(name))),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        (
            prop_oneof![Just("+"), Just("-"), Just("and"), Just("<="), Just("**")],
            prop::collection::vec(inner, 2..4),
            prop::option::of("[a-z_]{1,8}"),
        )
            .prop_map(|(operator, operands, output)| {
                Node::from(Expression::new(operator, operands, output).unwrap())
            })
    })
}

proptest! {
    #[test]
    fn compact_text_round_trips(tree in node()) {
        let decoded = from_structure_or_text(&tree.to_text(false)).unwrap().into_node().unwrap();
        prop_assert_eq!(decoded, tree);
    }

    #[test]
    fn pretty_text_round_trips(tree in node()) {
        let decoded = from_structure_or_text(&tree.to_text(true)).unwrap().into_node().unwrap();
        prop_assert_eq!(decoded, tree);
    }

    #[test]
    fn structure_round_trips(tree in node()) {
        let decoded = from_structure_or_text(&tree.as_structure()).unwrap().into_node().unwrap();
        prop_assert_eq!(decoded, tree);
    }
}
