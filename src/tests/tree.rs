use std::rc::Rc;

use crate::{
    AstError, AstNode, DocumentVersion, MathContainer, NodeType, Shape,
    builder,
    compilers::FormulaCompiler,
    tests::util::rate_law,
};

#[test]
fn test_deep_clone() {
    let tree = rate_law();
    tree.set_id("rate");
    let copy = tree.deep_clone();

    assert_eq!(copy, tree);
    assert!(!copy.ptr_eq(&tree));
    assert!(copy.parent().is_none());
    assert_eq!(copy.id(), Ok("rate".to_string()));

    // The copy's children belong to the copy
    let volume = copy.right_child().unwrap();
    assert!(volume.parent().unwrap().ptr_eq(&copy));

    volume.set_name("W").unwrap();
    assert_ne!(copy, tree);
    assert_eq!(tree.right_child().unwrap().name(), Ok("V".to_string()));
}

#[test]
fn test_strict_arity() {
    let node = op!(Minus, int!(1), int!(2));
    assert_eq!(node.child_count(), 2);
    assert_eq!(
        node.add_child(&int!(3)),
        Err(AstError::Arity { node_type: NodeType::Minus, expected: 2, found: 3 }),
    );
    assert_eq!(node.child_count(), 2);

    let node = op!(Sin, ci!(x));
    assert!(matches!(node.prepend_child(&ci!(y)), Err(AstError::Arity { expected: 1, .. })));
}

#[test]
fn test_lenient_arity() {
    let node = op!(Divide, int!(1), int!(2));
    node.set_strict(false);
    node.add_child(&int!(3)).unwrap();
    assert_eq!(node.child_count(), 3);
    assert_eq!(node.right_child().unwrap().integer_value(), Ok(3));

    // Going back to strict hides the extra child rather than dropping it
    node.set_strict(true);
    assert_eq!(node.child_count(), 2);
    assert_eq!(node.get_child_at(2), Err(AstError::Index { index: 2, count: 2 }));
    assert_eq!(node.right_child().unwrap().integer_value(), Ok(2));

    // Nor can it be replaced or removed by position
    assert_eq!(node.replace_child(2, &int!(4)), Err(AstError::Index { index: 2, count: 2 }));
    assert!(node.remove_child(2).is_none());

    // Compiling checks arity even on lenient nodes
    node.set_strict(false);
    assert_eq!(
        node.to_formula(),
        Err(AstError::Arity { node_type: NodeType::Divide, expected: 2, found: 3 }),
    );
}

#[test]
fn test_remove_then_left_child() {
    let node = op!(Power, ci!(x), int!(2));
    let removed = node.remove_child(0).unwrap();
    assert_eq!(removed.name(), Ok("x".to_string()));
    assert!(removed.parent().is_none());

    assert_eq!(
        node.left_child(),
        Err(AstError::Arity { node_type: NodeType::Power, expected: 2, found: 1 }),
    );
    assert!(node.remove_child(5).is_none());
}

#[test]
fn test_set_type() {
    let node = op!(Minus, ci!(a), ci!(b));
    node.set_type(NodeType::Divide).unwrap();
    assert_eq!(node.node_type(), NodeType::Divide);

    assert_eq!(
        node.set_type(NodeType::Plus),
        Err(AstError::InvalidType { node_type: NodeType::Plus, shape: Shape::Binary }),
    );
    assert_eq!(node.node_type(), NodeType::Divide);

    // Every type in the allowable set is accepted, and nothing else
    for t in Shape::Unary.allowable_types() {
        let node = AstNode::with_shape(Shape::Unary, NodeType::Sin).unwrap();
        assert!(node.set_type(*t).is_ok());
    }
    assert!(AstNode::new(NodeType::Sin).set_type(NodeType::Log).is_err());
    assert!(AstNode::with_shape(Shape::Unary, NodeType::Root).is_err());
}

#[test]
fn test_unknown_placeholder() {
    let a = AstNode::unknown();
    let b = AstNode::unknown();
    assert!(a.ptr_eq(&b));
    assert!(a.is_sentinel());
    assert!(a.deep_clone().ptr_eq(&a));

    // Can sit in several trees at once without being reparented
    let first = op!(Plus, int!(1), AstNode::unknown());
    let second = op!(Times, AstNode::unknown(), AstNode::unknown());
    assert_eq!(first.child_count(), 2);
    assert_eq!(second.child_count(), 2);
    assert!(a.parent().is_none());

    // Never modified
    a.set_id("nope");
    a.set_strict(false);
    assert!(!a.is_set_id());
    assert!(a.is_strict());
    assert_eq!(a.add_child(&int!(1)), Err(AstError::ChildrenNotAllowed { node_type: NodeType::Unknown }));

    assert_eq!(a.to_formula(), Err(AstError::UnknownNode));
    assert_eq!(first.to_formula(), Err(AstError::UnknownNode));
    assert_eq!(a.to_latex(), Ok("\\text{ unknown }".to_string()));
}

#[test]
fn test_leaves_and_cycles() {
    assert_eq!(
        int!(1).add_child(&int!(2)),
        Err(AstError::ChildrenNotAllowed { node_type: NodeType::Integer }),
    );

    let inner = op!(Plus, ci!(x));
    let outer = op!(Times, inner.clone());
    assert_eq!(inner.add_child(&outer), Err(AstError::Cycle));
    assert_eq!(outer.add_child(&outer), Err(AstError::Cycle));

    assert_eq!(inner.insert_child(5, &ci!(y)), Err(AstError::Index { index: 5, count: 1 }));
}

#[test]
fn test_reparenting() {
    let x = ci!(x);
    let first = op!(Plus, x.clone(), ci!(y));
    let second = op!(Times, int!(2));

    second.add_child(&x).unwrap();
    assert_eq!(first.child_count(), 1);
    assert!(x.parent().unwrap().ptr_eq(&second));
    assert_eq!(second.index_of(&x), Some(1));

    // Moving a child within the same parent
    second.prepend_child(&x).unwrap();
    assert_eq!(second.child_count(), 2);
    assert_eq!(second.index_of(&x), Some(0));
    assert_eq!(formula!(second), "x*2");
}

#[test]
fn test_replace_child() {
    let node = op!(Eq, ci!(x), int!(1));
    let old = node.replace_child(1, &int!(2)).unwrap();
    assert_eq!(old.integer_value(), Ok(1));
    assert!(old.parent().is_none());
    assert_eq!(formula!(node), "x == 2");

    node.set_left_child(&ci!(y)).unwrap();
    node.set_right_child(&ci!(z)).unwrap();
    assert_eq!(formula!(node), "y == z");

    assert!(matches!(node.child(), Err(AstError::Unsupported { .. })));
    assert!(matches!(int!(1).set_left_child(&int!(2)), Err(AstError::Unsupported { .. })));
}

#[test]
fn test_undefined_properties() {
    let x = ci!(x);
    assert_eq!(x.id(), Err(AstError::PropertyUndefined { property: "id", node_type: NodeType::Name }));
    assert!(x.definition_url().is_err());

    x.set_strict(false);
    assert_eq!(x.id(), Ok(String::new()));
    assert_eq!(x.style(), Ok(String::new()));

    x.set_style("bold");
    assert_eq!(x.style(), Ok("bold".to_string()));
    x.unset_style();
    assert!(!x.is_set_style());

    let n = AstNode::new(NodeType::Integer);
    assert!(matches!(n.integer_value(), Err(AstError::PropertyUndefined { .. })));
    n.set_strict(false);
    assert_eq!(n.integer_value(), Ok(0));

    let r = AstNode::new(NodeType::Real);
    r.set_strict(false);
    assert!(r.real_value().unwrap().is_nan());

    // Values a shape doesn't have are always an error
    assert!(matches!(r.name(), Err(AstError::Unsupported { .. })));
    assert!(matches!(x.set_integer(3), Err(AstError::Unsupported { .. })));
}

#[test]
fn test_leaf_values() {
    let q = AstNode::rational(3, 4);
    assert_eq!(q.numerator(), Ok(3));
    assert_eq!(q.denominator(), Ok(4));
    q.set_denominator(8).unwrap();
    assert_eq!(formula!(q), "3/8");

    let n = AstNode::exponential(1.5, 3);
    assert_eq!(n.mantissa(), Ok(1.5));
    assert_eq!(n.exponent(), Ok(3));

    let i = int!(5);
    assert!(!i.is_set_units());
    i.set_units("mole").unwrap();
    assert_eq!(i.units(), Ok("mole".to_string()));
    i.unset_units().unwrap();
    assert_eq!(i.units_opt(), None);

    let t = AstNode::time();
    assert_eq!(t.name(), Ok("time".to_string()));
    assert_eq!(t.encoding(), Ok("text".to_string()));
    assert_eq!(t.definition_url(), Ok(crate::node_type::TIME_URI.to_string()));

    assert!(int!(10).is_literal(10));
    assert!(real!(10.0).is_literal(10));
    assert!(AstNode::rational(20, 2).is_literal(10));
    assert!(AstNode::exponential(1.0, 1).is_literal(10));
    assert!(!ci!(ten).is_literal(10));
}

#[test]
fn test_lambda() {
    let lambda = AstNode::new(NodeType::Lambda);
    lambda.add_bvar(&ci!(x)).unwrap();
    lambda.set_body(&op!(Times, ci!(x), ci!(x))).unwrap();
    assert_eq!(lambda.bvar_count(), Ok(1));

    // New bound variables go before the body
    lambda.add_bvar(&ci!(y)).unwrap();
    assert_eq!(lambda.bvar_count(), Ok(2));
    assert_eq!(lambda.child_count(), 3);
    assert_eq!(lambda.get_child_at(1).unwrap().node_type(), NodeType::Bvar);
    assert_eq!(lambda.body().unwrap().node_type(), NodeType::Times);

    lambda.set_body(&ci!(y)).unwrap();
    assert_eq!(lambda.child_count(), 3);
    assert_eq!(formula!(lambda), "lambda(x, y, y)");

    lambda.remove_child(0);
    assert_eq!(lambda.bvar_count(), Ok(1));
}

#[test]
fn test_piecewise() {
    let piecewise = AstNode::new(NodeType::Piecewise);
    piecewise.add_piece(&int!(1), &op!(Lt, ci!(x), int!(0))).unwrap();
    piecewise.set_otherwise(&int!(0)).unwrap();
    piecewise.add_piece(&int!(2), &op!(Gt, ci!(x), int!(10))).unwrap();

    assert_eq!(piecewise.piece_count(), Ok(2));
    assert_eq!(piecewise.has_otherwise(), Ok(true));
    assert_eq!(piecewise.get_child_at(2).unwrap().node_type(), NodeType::Otherwise);
    assert_eq!(formula!(piecewise), "piecewise(1, x < 0, 2, x > 10, 0)");

    // Replacing the fallback keeps a single one
    piecewise.set_otherwise(&int!(-1)).unwrap();
    assert_eq!(piecewise.child_count(), 3);

    piecewise.remove_child(2);
    assert_eq!(piecewise.has_otherwise(), Ok(false));
    assert!(matches!(int!(1).piece_count(), Err(AstError::Unsupported { .. })));

    // A piece holds both its value and its condition
    let piece = AstNode::piece(&int!(1), &AstNode::boolean(true)).unwrap();
    assert_eq!(piece.child_count(), 2);
    assert!(matches!(piece.add_child(&int!(2)), Err(AstError::Arity { expected: 2, .. })));
}

#[test]
fn test_failed_wrap_keeps_input() {
    let lambda = AstNode::new(NodeType::Lambda);
    let parent = op!(Plus, int!(1), lambda.clone());
    assert_eq!(lambda.add_bvar(&lambda), Err(AstError::Cycle));
    assert_eq!(parent.child_count(), 2);
    assert!(lambda.parent().unwrap().ptr_eq(&parent));
    assert_eq!(lambda.child_count(), 0);

    let piecewise = AstNode::new(NodeType::Piecewise);
    let outer = op!(Not, piecewise.clone());
    assert_eq!(piecewise.set_otherwise(&outer), Err(AstError::Cycle));
    assert_eq!(piecewise.add_piece(&int!(1), &outer), Err(AstError::Cycle));
    assert!(piecewise.parent().unwrap().ptr_eq(&outer));
    assert_eq!(piecewise.child_count(), 0);
}

#[test]
fn test_replace_argument() {
    let body = op!(Plus, ci!(x), op!(Times, ci!(x), ci!(y)));
    let lambda = builder::lambda(&[ci!(x)], &body).unwrap();
    assert_eq!(lambda.replace_argument("x", &real!(3.0)), Ok(2));
    assert_eq!(formula!(lambda), "lambda(x, 3+3*y)");

    // Every occurrence gets its own copy
    let argument = ci!(k);
    let tree = op!(Minus, ci!(y), op!(Sin, ci!(y)));
    assert_eq!(tree.replace_argument("y", &argument), Ok(2));
    assert_eq!(formula!(tree), "k-sin(k)");
    assert!(!tree.left_child().unwrap().ptr_eq(&argument));
    assert!(argument.parent().is_none());

    assert_eq!(tree.replace_argument("w", &argument), Ok(0));
}

#[test]
fn test_children_matching() {
    let tree = op!(Plus, ci!(x), int!(1), ci!(y), op!(Times, ci!(z), int!(2)));
    let names = tree.children_matching(|c| c.node_type() == NodeType::Name);
    assert_eq!(names.len(), 2);
    assert!(names[1].ptr_eq(&tree.get_child_at(2).unwrap()));

    assert_eq!(tree.children_matching(|c| !c.is_leaf()).len(), 1);
    assert!(int!(1).children_matching(|_| true).is_empty());
}

#[test]
fn test_structure_predicates() {
    assert!(builder::sqrt(&ci!(x)).unwrap().is_sqrt());
    let degree = AstNode::qualifier(NodeType::Degree, &int!(2)).unwrap();
    assert!(op!(Root, degree, ci!(x)).is_sqrt());
    assert!(!op!(Root, int!(3), ci!(x)).is_sqrt());
    assert!(!op!(Power, int!(2), ci!(x)).is_sqrt());

    assert!(builder::u_minus(&ci!(x)).unwrap().is_u_minus());
    assert!(op!(Minus, ci!(x)).is_u_minus());
    assert!(!op!(Minus, ci!(x), ci!(y)).is_u_minus());
    assert!(!op!(Plus, ci!(x)).is_u_minus());
}

#[test]
fn test_container() {
    let document: Rc<dyn MathContainer> = Rc::new(DocumentVersion::new(3, 2));
    let tree = rate_law();
    tree.set_container(&document);

    let numerator = tree.left_child().unwrap();
    assert!(numerator.container().is_some());

    // Compiled values are stamped with the container's metadata
    let compiled = tree.compile(&mut FormulaCompiler::default()).unwrap();
    assert_eq!(compiled.node_type, NodeType::Divide);
    assert_eq!(compiled.level, Some(3));
    assert_eq!(compiled.version, Some(2));
    assert_eq!(compiled.to_string(), "k*(S1+S2)/V");

    // Added children pick up the container, removed ones lose it
    let added = int!(2);
    numerator.add_child(&added).unwrap();
    assert_eq!(added.container().map(|c| c.level()), Some(3));
    let removed = numerator.remove_child(0).unwrap();
    assert!(removed.container().is_none());

    // Reparenting does not change the container by itself
    let loose = ci!(z);
    let other = op!(Plus, loose.clone());
    assert!(other.container().is_none());
    assert!(loose.container().is_none());

    // Only a weak reference is held
    drop(document);
    assert!(tree.container().is_none());
    let compiled = tree.compile(&mut FormulaCompiler::default()).unwrap();
    assert_eq!(compiled.level, None);
}

#[test]
fn test_count_type() {
    let tree = op!(Plus, ci!(x), op!(Times, ci!(x), ci!(y)), op!(Plus, int!(1)));
    assert_eq!(tree.count_type(NodeType::Name), 3);
    assert_eq!(tree.count_type(NodeType::Plus), 2);
    assert_eq!(tree.count_type(NodeType::Divide), 0);
}
