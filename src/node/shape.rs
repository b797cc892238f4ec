use crate::node_type::NodeType;

/// The structural variant of a node. Each shape accepts a closed set of node types and
/// a fixed number of children.
#[derive(PartialEq, Eq, Hash, Debug, Copy, Clone)]
pub enum Shape {
    Integer,
    Real,
    Rational,
    Exponential,
    Constant,
    Ci,
    CSymbol,
    Unknown,

    /// An associative operator with any number of operands.
    NAry,
    /// An operator which takes exactly two operands while strict.
    Binary,
    Unary,
    Lambda,
    Piecewise,
    Qualifier,
    FunctionCall,
}

const N_ARY_TYPES: &[NodeType] = &[
    NodeType::Plus, NodeType::Times, NodeType::And, NodeType::Or, NodeType::Xor,
];

const BINARY_TYPES: &[NodeType] = &[
    NodeType::Minus, NodeType::Divide, NodeType::Power, NodeType::Root, NodeType::Log,
    NodeType::FunctionDelay,
    NodeType::Eq, NodeType::Neq, NodeType::Lt, NodeType::Leq, NodeType::Gt, NodeType::Geq,
];

const UNARY_TYPES: &[NodeType] = &[
    NodeType::Sin, NodeType::Cos, NodeType::Tan, NodeType::Sec, NodeType::Csc, NodeType::Cot,
    NodeType::Sinh, NodeType::Cosh, NodeType::Tanh, NodeType::Sech, NodeType::Csch, NodeType::Coth,
    NodeType::Arcsin, NodeType::Arccos, NodeType::Arctan, NodeType::Arcsec, NodeType::Arccsc,
    NodeType::Arccot, NodeType::Arcsinh, NodeType::Arccosh, NodeType::Arctanh, NodeType::Arcsech,
    NodeType::Arccsch, NodeType::Arccoth,
    NodeType::Abs, NodeType::Ceiling, NodeType::Floor, NodeType::Exp, NodeType::Factorial,
    NodeType::Ln, NodeType::Not, NodeType::Minus,
];

const CONSTANT_TYPES: &[NodeType] = &[
    NodeType::ConstantE, NodeType::ConstantPi, NodeType::ConstantTrue, NodeType::ConstantFalse,
];

const QUALIFIER_TYPES: &[NodeType] = &[
    NodeType::Bvar, NodeType::Degree, NodeType::Logbase, NodeType::Piece, NodeType::Otherwise,
];

impl Shape {
    /// The shape a fresh node of the given type takes. `Minus` defaults to binary; unary
    /// negation has to be asked for explicitly.
    pub fn for_type(node_type: NodeType) -> Shape {
        match node_type {
            NodeType::Integer => Shape::Integer,
            NodeType::Real => Shape::Real,
            NodeType::Rational => Shape::Rational,
            NodeType::RealE => Shape::Exponential,
            NodeType::Name => Shape::Ci,
            NodeType::NameTime | NodeType::NameAvogadro => Shape::CSymbol,
            NodeType::Lambda => Shape::Lambda,
            NodeType::Piecewise => Shape::Piecewise,
            NodeType::Function => Shape::FunctionCall,
            NodeType::Unknown => Shape::Unknown,
            t if CONSTANT_TYPES.contains(&t) => Shape::Constant,
            t if N_ARY_TYPES.contains(&t) => Shape::NAry,
            t if BINARY_TYPES.contains(&t) => Shape::Binary,
            t if QUALIFIER_TYPES.contains(&t) => Shape::Qualifier,
            _ => Shape::Unary,
        }
    }

    /// Every node type which a node of this shape may take.
    pub fn allowable_types(&self) -> &'static [NodeType] {
        match self {
            Shape::Integer => &[NodeType::Integer],
            Shape::Real => &[NodeType::Real],
            Shape::Rational => &[NodeType::Rational],
            Shape::Exponential => &[NodeType::RealE],
            Shape::Constant => CONSTANT_TYPES,
            Shape::Ci => &[NodeType::Name],
            Shape::CSymbol => &[NodeType::NameTime, NodeType::NameAvogadro],
            Shape::Unknown => &[NodeType::Unknown],
            Shape::NAry => N_ARY_TYPES,
            Shape::Binary => BINARY_TYPES,
            Shape::Unary => UNARY_TYPES,
            Shape::Lambda => &[NodeType::Lambda],
            Shape::Piecewise => &[NodeType::Piecewise],
            Shape::Qualifier => QUALIFIER_TYPES,
            Shape::FunctionCall => &[NodeType::Function],
        }
    }

    pub fn allows(&self, node_type: NodeType) -> bool {
        self.allowable_types().contains(&node_type)
    }

    /// Returns true if nodes of this shape can never have children.
    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            Shape::Integer | Shape::Real | Shape::Rational | Shape::Exponential | Shape::Constant
                | Shape::Ci | Shape::CSymbol | Shape::Unknown
        )
    }

    /// The maximum number of children a strict node of this shape and type may hold, or
    /// `None` if there is no limit.
    ///
    /// A `piece` qualifier holds its value and its condition, so it is the one qualifier
    /// allowed two children.
    pub fn max_children(&self, node_type: NodeType) -> Option<usize> {
        match self {
            _ if self.is_leaf() => Some(0),
            Shape::Binary => Some(2),
            Shape::Unary => Some(1),
            Shape::Qualifier if node_type == NodeType::Piece => Some(2),
            Shape::Qualifier => Some(1),
            _ => None,
        }
    }
}

/// `name`, `definitionURL` and `encoding` of identifiers, csymbols and calls.
#[derive(PartialEq, Eq, Debug, Clone, Default)]
pub(crate) struct Symbol {
    pub name: Option<String>,
    pub definition_url: Option<String>,
    pub encoding: Option<String>,
}

impl Symbol {
    pub fn named(name: &str) -> Symbol {
        Symbol { name: Some(name.to_string()), ..Default::default() }
    }

    /// The symbol carried by a csymbol of the given type, with its default name, URL
    /// and encoding.
    pub fn csymbol(node_type: NodeType, name: &str) -> Symbol {
        Symbol {
            name: Some(name.to_string()),
            definition_url: node_type.definition_url().map(|u| u.to_string()),
            encoding: Some("text".to_string()),
        }
    }
}

/// Per-shape payload of a node. Reals use NaN to mean "unset".
#[derive(Debug, Clone)]
pub(crate) enum NodeKind {
    Integer { value: Option<i32>, units: Option<String> },
    Real { value: f64, units: Option<String> },
    Rational { numerator: Option<i32>, denominator: Option<i32>, units: Option<String> },
    Exponential { mantissa: f64, exponent: Option<i32>, units: Option<String> },
    Constant,
    Ci(Symbol),
    CSymbol(Symbol),
    Unknown,
    NAry,
    /// Only `delay` makes use of the symbol.
    Binary(Symbol),
    Unary,
    Lambda { bvar_count: usize },
    Piecewise { piece_count: usize, has_otherwise: bool },
    Qualifier,
    FunctionCall(Symbol),
}

impl NodeKind {
    /// An empty payload for a fresh node of the given shape and type.
    pub fn empty(shape: Shape, node_type: NodeType) -> NodeKind {
        match shape {
            Shape::Integer => NodeKind::Integer { value: None, units: None },
            Shape::Real => NodeKind::Real { value: f64::NAN, units: None },
            Shape::Rational => NodeKind::Rational { numerator: None, denominator: None, units: None },
            Shape::Exponential => NodeKind::Exponential { mantissa: f64::NAN, exponent: None, units: None },
            Shape::Constant => NodeKind::Constant,
            Shape::Ci => NodeKind::Ci(Symbol::default()),
            Shape::CSymbol if node_type == NodeType::NameAvogadro
                => NodeKind::CSymbol(Symbol::csymbol(node_type, "avogadro")),
            Shape::CSymbol => NodeKind::CSymbol(Symbol::csymbol(node_type, "time")),
            Shape::Unknown => NodeKind::Unknown,
            Shape::NAry => NodeKind::NAry,
            Shape::Binary if node_type == NodeType::FunctionDelay
                => NodeKind::Binary(Symbol::csymbol(node_type, "delay")),
            Shape::Binary => NodeKind::Binary(Symbol::default()),
            Shape::Unary => NodeKind::Unary,
            Shape::Lambda => NodeKind::Lambda { bvar_count: 0 },
            Shape::Piecewise => NodeKind::Piecewise { piece_count: 0, has_otherwise: false },
            Shape::Qualifier => NodeKind::Qualifier,
            Shape::FunctionCall => NodeKind::FunctionCall(Symbol::default()),
        }
    }

    pub fn shape(&self) -> Shape {
        match self {
            NodeKind::Integer { .. } => Shape::Integer,
            NodeKind::Real { .. } => Shape::Real,
            NodeKind::Rational { .. } => Shape::Rational,
            NodeKind::Exponential { .. } => Shape::Exponential,
            NodeKind::Constant => Shape::Constant,
            NodeKind::Ci(_) => Shape::Ci,
            NodeKind::CSymbol(_) => Shape::CSymbol,
            NodeKind::Unknown => Shape::Unknown,
            NodeKind::NAry => Shape::NAry,
            NodeKind::Binary(_) => Shape::Binary,
            NodeKind::Unary => Shape::Unary,
            NodeKind::Lambda { .. } => Shape::Lambda,
            NodeKind::Piecewise { .. } => Shape::Piecewise,
            NodeKind::Qualifier => Shape::Qualifier,
            NodeKind::FunctionCall(_) => Shape::FunctionCall,
        }
    }

    /// The symbol of shapes which carry one.
    pub fn symbol(&self) -> Option<&Symbol> {
        match self {
            NodeKind::Ci(s) | NodeKind::CSymbol(s) | NodeKind::Binary(s) | NodeKind::FunctionCall(s)
                => Some(s),
            _ => None,
        }
    }

    pub fn symbol_mut(&mut self) -> Option<&mut Symbol> {
        match self {
            NodeKind::Ci(s) | NodeKind::CSymbol(s) | NodeKind::Binary(s) | NodeKind::FunctionCall(s)
                => Some(s),
            _ => None,
        }
    }

    pub fn units(&self) -> Option<&Option<String>> {
        match self {
            NodeKind::Integer { units, .. }
            | NodeKind::Real { units, .. }
            | NodeKind::Rational { units, .. }
            | NodeKind::Exponential { units, .. } => Some(units),
            _ => None,
        }
    }

    pub fn units_mut(&mut self) -> Option<&mut Option<String>> {
        match self {
            NodeKind::Integer { units, .. }
            | NodeKind::Real { units, .. }
            | NodeKind::Rational { units, .. }
            | NodeKind::Exponential { units, .. } => Some(units),
            _ => None,
        }
    }
}

/// Two reals are the same value if they are equal, or if both are unset.
fn same_real(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

impl PartialEq for NodeKind {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (NodeKind::Integer { value: v1, units: u1 }, NodeKind::Integer { value: v2, units: u2 })
                => v1 == v2 && u1 == u2,
            (NodeKind::Real { value: v1, units: u1 }, NodeKind::Real { value: v2, units: u2 })
                => same_real(*v1, *v2) && u1 == u2,
            (
                NodeKind::Rational { numerator: n1, denominator: d1, units: u1 },
                NodeKind::Rational { numerator: n2, denominator: d2, units: u2 },
            ) => n1 == n2 && d1 == d2 && u1 == u2,
            (
                NodeKind::Exponential { mantissa: m1, exponent: e1, units: u1 },
                NodeKind::Exponential { mantissa: m2, exponent: e2, units: u2 },
            ) => same_real(*m1, *m2) && e1 == e2 && u1 == u2,
            (NodeKind::Lambda { bvar_count: b1 }, NodeKind::Lambda { bvar_count: b2 }) => b1 == b2,
            (
                NodeKind::Piecewise { piece_count: p1, has_otherwise: o1 },
                NodeKind::Piecewise { piece_count: p2, has_otherwise: o2 },
            ) => p1 == p2 && o1 == o2,
            (a, b) if a.shape() == b.shape() => a.symbol() == b.symbol(),
            _ => false,
        }
    }
}
