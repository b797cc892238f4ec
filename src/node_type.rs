//! The closed vocabulary of node types, and the mapping from MathML tokens onto it.

/// `definitionURL` of the `time` csymbol.
pub const TIME_URI: &str = "http://www.sbml.org/sbml/symbols/time";

/// `definitionURL` of the `delay` csymbol.
pub const DELAY_URI: &str = "http://www.sbml.org/sbml/symbols/delay";

/// `definitionURL` of the `avogadro` csymbol.
pub const AVOGADRO_URI: &str = "http://www.sbml.org/sbml/symbols/avogadro";

#[derive(PartialEq, Eq, Hash, Debug, Copy, Clone)]
pub enum NodeType {
    Plus,
    Minus,
    Times,
    Divide,
    Power,

    Eq,
    Neq,
    Lt,
    Leq,
    Gt,
    Geq,

    And,
    Or,
    Xor,
    Not,

    Integer,
    Real,
    Rational,
    RealE,
    ConstantE,
    ConstantPi,
    ConstantTrue,
    ConstantFalse,

    Name,
    NameTime,
    NameAvogadro,
    FunctionDelay,

    Sin,
    Cos,
    Tan,
    Sec,
    Csc,
    Cot,
    Sinh,
    Cosh,
    Tanh,
    Sech,
    Csch,
    Coth,
    Arcsin,
    Arccos,
    Arctan,
    Arcsec,
    Arccsc,
    Arccot,
    Arcsinh,
    Arccosh,
    Arctanh,
    Arcsech,
    Arccsch,
    Arccoth,

    Abs,
    Ceiling,
    Floor,
    Exp,
    Factorial,
    Ln,
    Log,
    Root,

    Lambda,
    Piecewise,
    Function,

    Bvar,
    Degree,
    Logbase,
    Piece,
    Otherwise,

    Unknown,
}

impl NodeType {
    /// Maps a MathML element name, operator name, number-type attribute or csymbol
    /// `definitionURL` onto a node type.
    ///
    /// This never fails; anything unrecognised becomes `Unknown`.
    pub fn resolve(token: &str) -> NodeType {
        match token {
            "plus" => Self::Plus,
            "minus" => Self::Minus,
            "times" => Self::Times,
            "divide" => Self::Divide,
            "power" => Self::Power,
            "root" => Self::Root,
            "abs" => Self::Abs,
            "exp" => Self::Exp,
            "ln" => Self::Ln,
            "log" => Self::Log,
            "floor" => Self::Floor,
            "ceiling" => Self::Ceiling,
            "factorial" => Self::Factorial,

            "and" | "&&" => Self::And,
            "or" | "||" => Self::Or,
            "xor" => Self::Xor,
            "not" | "!" => Self::Not,

            "sin" => Self::Sin,
            "cos" => Self::Cos,
            "tan" => Self::Tan,
            "sec" => Self::Sec,
            "csc" => Self::Csc,
            "cot" => Self::Cot,
            "sinh" => Self::Sinh,
            "cosh" => Self::Cosh,
            "tanh" => Self::Tanh,
            "sech" => Self::Sech,
            "csch" => Self::Csch,
            "coth" => Self::Coth,
            "arcsin" => Self::Arcsin,
            "arccos" => Self::Arccos,
            "arctan" => Self::Arctan,
            "arcsec" => Self::Arcsec,
            "arccsc" => Self::Arccsc,
            "arccot" => Self::Arccot,
            "arcsinh" => Self::Arcsinh,
            "arccosh" => Self::Arccosh,
            "arctanh" => Self::Arctanh,
            "arcsech" => Self::Arcsech,
            "arccsch" => Self::Arccsch,
            "arccoth" => Self::Arccoth,

            "eq" | "=" => Self::Eq,
            "neq" => Self::Neq,
            "gt" | ">" => Self::Gt,
            "lt" | "<" => Self::Lt,
            "geq" | ">=" => Self::Geq,
            "leq" | "<=" => Self::Leq,

            "ci" => Self::Name,

            TIME_URI => Self::NameTime,
            DELAY_URI => Self::FunctionDelay,
            AVOGADRO_URI => Self::NameAvogadro,

            "lambda" => Self::Lambda,
            "piecewise" => Self::Piecewise,
            "bvar" => Self::Bvar,
            "degree" => Self::Degree,
            "logbase" => Self::Logbase,
            "piece" => Self::Piece,
            "otherwise" => Self::Otherwise,

            "true" => Self::ConstantTrue,
            "false" => Self::ConstantFalse,
            "pi" => Self::ConstantPi,
            "exponentiale" => Self::ConstantE,
            "notanumber" | "infinity" => Self::Real,

            // `cn` and the `type` attribute values of <cn> are matched regardless of case
            other if other.eq_ignore_ascii_case("cn") => Self::Real,
            other if other.eq_ignore_ascii_case("real") => Self::Real,
            other if other.eq_ignore_ascii_case("e-notation") => Self::RealE,
            other if other.eq_ignore_ascii_case("integer") => Self::Integer,
            other if other.eq_ignore_ascii_case("rational") => Self::Rational,

            _ => Self::Unknown,
        }
    }

    /// The content MathML element which introduces a node of this type, if there is a
    /// single one.
    ///
    /// Number literals all map to `cn`, and csymbols to `csymbol`; callers needing the
    /// `type` or `definitionURL` attribute have to look at the node itself.
    pub fn element_name(&self) -> Option<&'static str> {
        Some(match self {
            Self::Plus => "plus",
            Self::Minus => "minus",
            Self::Times => "times",
            Self::Divide => "divide",
            Self::Power => "power",
            Self::Eq => "eq",
            Self::Neq => "neq",
            Self::Lt => "lt",
            Self::Leq => "leq",
            Self::Gt => "gt",
            Self::Geq => "geq",
            Self::And => "and",
            Self::Or => "or",
            Self::Xor => "xor",
            Self::Not => "not",
            Self::Integer | Self::Real | Self::Rational | Self::RealE => "cn",
            Self::ConstantE => "exponentiale",
            Self::ConstantPi => "pi",
            Self::ConstantTrue => "true",
            Self::ConstantFalse => "false",
            Self::Name => "ci",
            Self::NameTime | Self::NameAvogadro | Self::FunctionDelay => "csymbol",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Sec => "sec",
            Self::Csc => "csc",
            Self::Cot => "cot",
            Self::Sinh => "sinh",
            Self::Cosh => "cosh",
            Self::Tanh => "tanh",
            Self::Sech => "sech",
            Self::Csch => "csch",
            Self::Coth => "coth",
            Self::Arcsin => "arcsin",
            Self::Arccos => "arccos",
            Self::Arctan => "arctan",
            Self::Arcsec => "arcsec",
            Self::Arccsc => "arccsc",
            Self::Arccot => "arccot",
            Self::Arcsinh => "arcsinh",
            Self::Arccosh => "arccosh",
            Self::Arctanh => "arctanh",
            Self::Arcsech => "arcsech",
            Self::Arccsch => "arccsch",
            Self::Arccoth => "arccoth",
            Self::Abs => "abs",
            Self::Ceiling => "ceiling",
            Self::Floor => "floor",
            Self::Exp => "exp",
            Self::Factorial => "factorial",
            Self::Ln => "ln",
            Self::Log => "log",
            Self::Root => "root",
            Self::Lambda => "lambda",
            Self::Piecewise => "piecewise",
            Self::Bvar => "bvar",
            Self::Degree => "degree",
            Self::Logbase => "logbase",
            Self::Piece => "piece",
            Self::Otherwise => "otherwise",
            Self::Function | Self::Unknown => return None,
        })
    }

    /// Returns true for the arithmetic operators.
    pub fn is_operator(&self) -> bool {
        matches!(self, Self::Plus | Self::Minus | Self::Times | Self::Divide | Self::Power)
    }

    pub fn is_relational(&self) -> bool {
        matches!(self, Self::Eq | Self::Neq | Self::Lt | Self::Leq | Self::Gt | Self::Geq)
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, Self::And | Self::Or | Self::Xor | Self::Not)
    }

    /// Returns true for numeric literals, not including the named constants.
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Integer | Self::Real | Self::Rational | Self::RealE)
    }

    pub fn is_constant(&self) -> bool {
        matches!(
            self,
            Self::ConstantE | Self::ConstantPi | Self::ConstantTrue | Self::ConstantFalse
                | Self::NameAvogadro
        )
    }

    /// Returns true for the trigonometric and hyperbolic functions and their inverses.
    pub fn is_trigonometric(&self) -> bool {
        matches!(
            self,
            Self::Sin | Self::Cos | Self::Tan | Self::Sec | Self::Csc | Self::Cot
                | Self::Sinh | Self::Cosh | Self::Tanh | Self::Sech | Self::Csch | Self::Coth
                | Self::Arcsin | Self::Arccos | Self::Arctan | Self::Arcsec | Self::Arccsc
                | Self::Arccot | Self::Arcsinh | Self::Arccosh | Self::Arctanh | Self::Arcsech
                | Self::Arccsch | Self::Arccoth
        )
    }

    /// Returns true for everything written as a function application which isn't an
    /// operator: the trigonometric family, the other elementary functions, `lambda`,
    /// `piecewise`, `delay` and user-defined calls.
    pub fn is_function(&self) -> bool {
        self.is_trigonometric()
            || matches!(
                self,
                Self::Abs | Self::Ceiling | Self::Floor | Self::Exp | Self::Factorial
                    | Self::Ln | Self::Log | Self::Root | Self::Lambda | Self::Piecewise
                    | Self::Function | Self::FunctionDelay
            )
    }

    pub fn is_qualifier(&self) -> bool {
        matches!(self, Self::Bvar | Self::Degree | Self::Logbase | Self::Piece | Self::Otherwise)
    }

    /// Returns true for the types represented as a `csymbol` with a fixed `definitionURL`.
    pub fn is_csymbol(&self) -> bool {
        matches!(self, Self::NameTime | Self::NameAvogadro | Self::FunctionDelay)
    }

    /// The `definitionURL` of a csymbol type.
    pub fn definition_url(&self) -> Option<&'static str> {
        match self {
            Self::NameTime => Some(TIME_URI),
            Self::NameAvogadro => Some(AVOGADRO_URI),
            Self::FunctionDelay => Some(DELAY_URI),
            _ => None,
        }
    }

    /// Whether this type may appear in a document of the given level and version.
    ///
    /// The legality tables have never been filled in, so this always answers `None`
    /// ("not known") rather than guessing.
    pub fn is_defined_in(&self, _level: u32, _version: u32) -> Option<bool> {
        None
    }
}
