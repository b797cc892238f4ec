use crate::{AstError, AstNode, NodeType, builder};

#[test]
fn test_inputs_are_copied() {
    let x = ci!(x);
    let parent = op!(Plus, x.clone(), int!(1));

    let power = builder::power_int(&x, 2).unwrap();
    assert_eq!(formula!(power), "x^2");

    // The input keeps its place in its original tree
    assert!(x.parent().unwrap().ptr_eq(&parent));
    assert_eq!(parent.child_count(), 2);
    assert!(!power.left_child().unwrap().ptr_eq(&x));
}

#[test]
fn test_arithmetic_helpers() {
    let (a, b) = (ci!(a), ci!(b));
    assert_eq!(formula!(builder::plus(&a, &b).unwrap()), "a+b");
    assert_eq!(formula!(builder::times(&a, &b).unwrap()), "a*b");
    assert_eq!(formula!(builder::minus(&a, &b).unwrap()), "a-b");
    assert_eq!(formula!(builder::u_minus(&a).unwrap()), "-a");
    assert_eq!(formula!(builder::frac_int(1, 3).unwrap()), "1/3");
    assert_eq!(formula!(builder::root(&int!(3), &a).unwrap()), "(a)^(1/(3))");
    assert_eq!(formula!(builder::sqrt(&a).unwrap()), "(a)^(0.5)");
    assert_eq!(formula!(builder::log(&a).unwrap()), "log10(a)");
    assert_eq!(formula!(builder::log_base(&int!(2), &a).unwrap()), "log(2, a)");
    assert_eq!(formula!(builder::exp(&a).unwrap()), "exp(a)");
    assert_eq!(formula!(builder::delay(&a, &int!(3)).unwrap()), "delay(a, 3)");

    let terms = vec![ci!(a), ci!(b), ci!(c)];
    assert_eq!(formula!(builder::sum(&terms).unwrap()), "a+b+c");
    assert_eq!(formula!(builder::product(&terms).unwrap()), "a*b*c");
}

#[test]
fn test_relational_helpers() {
    let (x, one) = (ci!(x), int!(1));
    assert_eq!(formula!(builder::neq(&x, &one).unwrap()), "x != 1");
    assert_eq!(formula!(builder::lt(&x, &one).unwrap()), "x < 1");
    assert_eq!(formula!(builder::leq(&x, &one).unwrap()), "x <= 1");
    assert_eq!(formula!(builder::gt(&x, &one).unwrap()), "x > 1");
    assert_eq!(formula!(builder::geq(&x, &one).unwrap()), "x >= 1");
    assert_eq!(formula!(builder::relational(NodeType::Eq, &x, &one).unwrap()), "x == 1");

    assert!(matches!(
        builder::relational(NodeType::Divide, &x, &one),
        Err(AstError::InvalidArgument(_)),
    ));
}

#[test]
fn test_logical_helpers() {
    let operands = vec![ci!(p), ci!(q)];
    assert_eq!(formula!(builder::and(&operands).unwrap()), "p && q");
    assert_eq!(formula!(builder::or(&operands).unwrap()), "p || q");
    assert_eq!(formula!(builder::xor(&operands).unwrap()), "p XOR q");
    assert_eq!(formula!(builder::not(&operands[0]).unwrap()), "!(p)");
}

#[test]
fn test_structure_helpers() {
    let piecewise = builder::piecewise(
        &[(int!(1), ci!(p)), (int!(2), ci!(q))],
        None,
    ).unwrap();
    assert_eq!(piecewise.piece_count(), Ok(2));
    assert_eq!(piecewise.has_otherwise(), Ok(false));

    let lambda = builder::lambda(&[ci!(x), ci!(y)], &builder::plus(&ci!(x), &ci!(y)).unwrap()).unwrap();
    assert_eq!(lambda.bvar_count(), Ok(2));
    assert_eq!(formula!(lambda), "lambda(x, y, x+y)");

    assert_eq!(builder::count_type(&lambda, NodeType::Name), 4);
    assert_eq!(builder::count_type(&lambda, NodeType::Bvar), 2);
}

#[test]
fn test_reduce_to_binary() {
    let chain = op!(And, ci!(x), ci!(y), ci!(z), ci!(w));
    let reduced = builder::reduce_to_binary(&chain).unwrap();

    let expected = op!(And,
        op!(And,
            op!(And, ci!(x), ci!(y)),
            ci!(z),
        ),
        ci!(w),
    );
    assert_eq!(reduced, expected);
    assert_eq!(chain.child_count(), 4);

    let sum = op!(Plus, int!(1), int!(2), int!(3));
    assert_eq!(formula!(builder::reduce_to_binary(&sum).unwrap()), "1+2+3");
    assert_eq!(builder::reduce_to_binary(&sum).unwrap().child_count(), 2);

    // Short chains come back unchanged
    let pair = op!(Times, ci!(a), ci!(b));
    let reduced = builder::reduce_to_binary(&pair).unwrap();
    assert_eq!(reduced, pair);
    assert!(!reduced.ptr_eq(&pair));

    assert_eq!(
        builder::reduce_to_binary(&op!(Minus, ci!(a), ci!(b))),
        Err(AstError::Unsupported { operation: "reduce_to_binary", node_type: NodeType::Minus }),
    );
    assert!(builder::reduce_to_binary(&AstNode::new(NodeType::Lambda)).is_err());
}
