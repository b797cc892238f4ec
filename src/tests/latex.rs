use crate::{
    AstError, AstNode, NodeType,
    builder,
    compilers::{mask_special_chars, LatexCompiler, LatexSettings},
    tests::util::rate_law,
};

#[test]
fn test_arithmetic() {
    assert_eq!(latex!(rate_law()), "\\frac{k\\cdot \\left(S1+S2\\right)}{V}");
    assert_eq!(latex!(op!(Minus, ci!(a), op!(Minus, ci!(b), ci!(c)))), "a-\\left(b-c\\right)");
    assert_eq!(latex!(op!(Power, ci!(x), int!(2))), "x^{2}");
    assert_eq!(latex!(op!(Power, op!(Plus, ci!(x), int!(1)), int!(2))), "\\left(x+1\\right)^{2}");
    assert_eq!(latex!(op!(Power, ci!(x), int!(1))), "x");
}

#[test]
fn test_roots_and_logs() {
    assert_eq!(latex!(builder::sqrt(&ci!(x)).unwrap()), "\\sqrt{x}");
    assert_eq!(latex!(op!(Root, int!(3), ci!(x))), "\\sqrt[3]{x}");
    assert!(matches!(op!(Root, int!(0), ci!(x)).to_latex(), Err(AstError::InvalidArgument(_))));
    assert_eq!(latex!(op!(Log, int!(2), ci!(x))), "\\log_{2}{x}");
    assert_eq!(latex!(op!(Log, int!(2), op!(Plus, ci!(x), ci!(y)))), "\\log_{2}{\\left(x+y\\right)}");
}

#[test]
fn test_functions() {
    assert_eq!(latex!(op!(Sin, ci!(x))), "\\sin{x}");
    assert_eq!(latex!(op!(Sin, op!(Plus, ci!(a), ci!(b)))), "\\sin{\\left(a+b\\right)}");
    assert_eq!(latex!(op!(Sech, ci!(x))), "\\mathrm{sech}\\left(x\\right)");
    assert_eq!(latex!(op!(Abs, ci!(x))), "\\left\\lvert x\\right\\rvert");
    assert_eq!(latex!(op!(Floor, ci!(x))), "\\left\\lfloor x\\right\\rfloor ");
    assert_eq!(latex!(op!(Factorial, ci!(n))), "n!");
    assert_eq!(latex!(op!(FunctionDelay, ci!(x), int!(5))), "\\mathrm{delay}\\left(x, 5\\right)");

    let call = AstNode::function_call("f");
    call.add_child(&ci!(x)).unwrap();
    call.add_child(&int!(1)).unwrap();
    assert_eq!(latex!(call), "\\mathtt{f}\\left(x, 1\\right)");
}

#[test]
fn test_logic_and_relations() {
    assert_eq!(latex!(op!(Neq, ci!(x), int!(5))), "x \\neq 5");
    assert_eq!(latex!(op!(And, ci!(a), op!(Leq, ci!(x), int!(1)))), "a\\wedge \\left(x \\leq 1\\right)");
    assert_eq!(latex!(op!(Not, ci!(a))), "\\neg a");
    assert_eq!(latex!(AstNode::boolean(false)), "\\mathrm{false}");
}

#[test]
fn test_numbers() {
    assert_eq!(latex!(real!(1.5e-5)), "1.5\\cdot 10^{-5}");
    assert_eq!(latex!(real!(1e-5)), "10^{-5}");
    assert_eq!(latex!(real!(0.5)), "0.5");
    assert_eq!(latex!(AstNode::exponential(2.5, 3)), "2.5\\cdot 10^{3}");
    assert_eq!(latex!(AstNode::rational(1, 2)), "\\frac{1}{2}");
    assert_eq!(latex!(real!(f64::NEG_INFINITY)), "-\\infty");
    assert_eq!(latex!(AstNode::constant_pi()), "\\pi");
}

#[test]
fn test_structures() {
    let lambda = AstNode::new(NodeType::Lambda);
    lambda.add_bvar(&ci!(x)).unwrap();
    lambda.set_body(&op!(Times, ci!(x), ci!(x))).unwrap();
    assert_eq!(latex!(lambda), "\\lambda\\left(x\\right) = x\\cdot x");

    let piecewise = builder::piecewise(
        &[(int!(1), op!(Lt, ci!(x), int!(0)))],
        Some(&int!(0)),
    ).unwrap();
    assert_eq!(
        latex!(piecewise),
        "\\begin{dcases}\n1 & \\text{if\\ } x < 0\\\\\n0 & \\text{otherwise}\n\\end{dcases}",
    );
}

#[test]
fn test_names() {
    assert_eq!(latex!(ci!(k_cat)), "k\\_cat");
    assert_eq!(latex!(AstNode::time()), "\\mathrm{time}");
    assert_eq!(latex!(AstNode::ci("a<b")), "a$<$b");

    assert_eq!(mask_special_chars("k_cat_f", true), "k\\-\\_cat\\-\\_f");
    assert_eq!(mask_special_chars("_x", true), "\\_x");
    assert_eq!(mask_special_chars(" 50% ", false), "50\\%");

    let mut raw = LatexCompiler::new(LatexSettings { mask_special_chars: false, hyphenate: false });
    assert_eq!(ci!(k_cat).compile(&mut raw).unwrap().into_value(), "k_cat");
}
