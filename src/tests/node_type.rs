use crate::{NodeType, Shape, node_type::{TIME_URI, DELAY_URI, AVOGADRO_URI}};

#[test]
fn test_resolve() {
    assert_eq!(NodeType::resolve("plus"), NodeType::Plus);
    assert_eq!(NodeType::resolve("arccoth"), NodeType::Arccoth);
    assert_eq!(NodeType::resolve("leq"), NodeType::Leq);
    assert_eq!(NodeType::resolve("exponentiale"), NodeType::ConstantE);
    assert_eq!(NodeType::resolve("otherwise"), NodeType::Otherwise);

    // Number types are case-insensitive
    assert_eq!(NodeType::resolve("e-notation"), NodeType::RealE);
    assert_eq!(NodeType::resolve("E-Notation"), NodeType::RealE);
    assert_eq!(NodeType::resolve("INTEGER"), NodeType::Integer);
    assert_eq!(NodeType::resolve("Rational"), NodeType::Rational);
    assert_eq!(NodeType::resolve("cn"), NodeType::Real);
    assert_eq!(NodeType::resolve("CN"), NodeType::Real);
    assert_eq!(NodeType::resolve("notanumber"), NodeType::Real);

    // Operator symbols
    assert_eq!(NodeType::resolve("&&"), NodeType::And);
    assert_eq!(NodeType::resolve("||"), NodeType::Or);
    assert_eq!(NodeType::resolve("!"), NodeType::Not);
    assert_eq!(NodeType::resolve("="), NodeType::Eq);
    assert_eq!(NodeType::resolve(">"), NodeType::Gt);
    assert_eq!(NodeType::resolve("<"), NodeType::Lt);
    assert_eq!(NodeType::resolve(">="), NodeType::Geq);
    assert_eq!(NodeType::resolve("<="), NodeType::Leq);

    assert_eq!(NodeType::resolve(TIME_URI), NodeType::NameTime);
    assert_eq!(NodeType::resolve(DELAY_URI), NodeType::FunctionDelay);
    assert_eq!(NodeType::resolve(AVOGADRO_URI), NodeType::NameAvogadro);

    assert_eq!(NodeType::resolve("not-a-real-token"), NodeType::Unknown);
    assert_eq!(NodeType::resolve(""), NodeType::Unknown);
    assert_eq!(NodeType::resolve("Plus"), NodeType::Unknown);
}

#[test]
fn test_element_names() {
    for name in &["plus", "divide", "sin", "arcsech", "lambda", "piece", "factorial", "geq"] {
        assert_eq!(NodeType::resolve(name).element_name(), Some(*name));
    }
    assert_eq!(NodeType::Rational.element_name(), Some("cn"));
    assert_eq!(NodeType::FunctionDelay.element_name(), Some("csymbol"));
    assert_eq!(NodeType::Function.element_name(), None);
    assert_eq!(NodeType::Unknown.element_name(), None);
}

#[test]
fn test_categories() {
    assert!(NodeType::Power.is_operator());
    assert!(!NodeType::Root.is_operator());

    assert!(NodeType::Neq.is_relational());
    assert!(!NodeType::Not.is_relational());
    assert!(NodeType::Not.is_logical());

    assert!(NodeType::RealE.is_number());
    assert!(!NodeType::ConstantPi.is_number());
    assert!(NodeType::ConstantPi.is_constant());
    assert!(NodeType::NameAvogadro.is_constant());

    assert!(NodeType::Arccsch.is_trigonometric());
    assert!(NodeType::Arccsch.is_function());
    assert!(NodeType::FunctionDelay.is_function());
    assert!(!NodeType::Plus.is_function());

    assert!(NodeType::Logbase.is_qualifier());
    assert!(NodeType::NameTime.is_csymbol());
    assert_eq!(NodeType::NameTime.definition_url(), Some(TIME_URI));
    assert_eq!(NodeType::Name.definition_url(), None);
}

#[test]
fn test_is_defined_in_is_unknown() {
    assert_eq!(NodeType::Plus.is_defined_in(3, 2), None);
    assert_eq!(NodeType::NameAvogadro.is_defined_in(2, 4), None);
}

#[test]
fn test_shapes() {
    assert_eq!(Shape::for_type(NodeType::Plus), Shape::NAry);
    assert_eq!(Shape::for_type(NodeType::Minus), Shape::Binary);
    assert_eq!(Shape::for_type(NodeType::Sin), Shape::Unary);
    assert_eq!(Shape::for_type(NodeType::Piece), Shape::Qualifier);
    assert_eq!(Shape::for_type(NodeType::ConstantTrue), Shape::Constant);
    assert_eq!(Shape::for_type(NodeType::RealE), Shape::Exponential);

    // Minus is both a binary difference and a unary negation
    assert!(Shape::Binary.allows(NodeType::Minus));
    assert!(Shape::Unary.allows(NodeType::Minus));

    assert!(!Shape::NAry.allows(NodeType::Minus));
    assert!(!Shape::Unary.allows(NodeType::Plus));

    assert_eq!(Shape::Binary.max_children(NodeType::Divide), Some(2));
    assert_eq!(Shape::Qualifier.max_children(NodeType::Piece), Some(2));
    assert_eq!(Shape::Qualifier.max_children(NodeType::Bvar), Some(1));
    assert_eq!(Shape::Integer.max_children(NodeType::Integer), Some(0));
    assert_eq!(Shape::Lambda.max_children(NodeType::Lambda), None);
}
