use std::str::FromStr;

use rust_decimal::Decimal;

use crate::{
    compile::Compiler,
    error::AstError,
    node::AstNode,
    node_type::NodeType,
    number::{format_decimal, format_real},
};

/// Options for [FormulaCompiler].
#[derive(Default, Clone, Debug)]
pub struct FormulaSettings {
    /// Write logical operators as functions, `and(a, b)`, rather than infix, `a && b`.
    pub prefix_logical_operators: bool,
}

/// Compiles trees into infix formula text, such as `k*(S1+S2)/V`.
#[derive(Default, Clone, Debug)]
pub struct FormulaCompiler {
    pub settings: FormulaSettings,
}

fn brackets(term: &str) -> String {
    format!("({})", term)
}

/// Returns true if the term contains any character which would bind more loosely than
/// an exponentiation.
fn contains_operator(term: &str) -> bool {
    term.contains(|c: char| matches!(c, '*' | '-' | '+' | '/' | '^'))
}

/// `base^exponent`, simplifying the exponents 0 and 1.
fn pow_text(base: String, exponent: String) -> String {
    match Decimal::from_str(&exponent) {
        Ok(e) if e.is_zero() => return "1".to_string(),
        Ok(e) if e == Decimal::ONE => return base,
        _ => (),
    }

    let base = if contains_operator(&base) { brackets(&base) } else { base };
    let exponent = if contains_operator(&exponent) { brackets(&exponent) } else { exponent };
    format!("{}^{}", base, exponent)
}

impl FormulaCompiler {
    pub fn new(settings: FormulaSettings) -> FormulaCompiler {
        FormulaCompiler { settings }
    }

    fn formula(&mut self, node: &AstNode) -> Result<String, AstError> {
        Ok(node.compile(self)?.into_value())
    }

    fn arguments(&mut self, nodes: &[AstNode]) -> Result<String, AstError> {
        let args = nodes.iter()
            .map(|n| self.formula(n))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(args.join(", "))
    }

    fn call(&mut self, name: &str, nodes: &[AstNode]) -> Result<String, AstError> {
        Ok(format!("{}({})", name, self.arguments(nodes)?))
    }

    fn unary(&mut self, name: &str, node: &AstNode) -> Result<String, AstError> {
        self.call(name, std::slice::from_ref(node))
    }

    /// Compiles an operand of a sum, difference or product, bracketing it if it would
    /// otherwise bind wrongly.
    fn check_brackets(&mut self, node: &AstNode) -> Result<String, AstError> {
        let term = self.formula(node)?;
        let needs_brackets = match node.node_type() {
            NodeType::Plus | NodeType::Minus => true,
            NodeType::Real => node.real_value().map_or(false, |v| v < 0.0),
            _ => false,
        };
        Ok(if needs_brackets { brackets(&term) } else { term })
    }

    fn check_denominator_brackets(&mut self, node: &AstNode) -> Result<String, AstError> {
        let term = self.formula(node)?;
        Ok(match node.node_type() {
            NodeType::Plus | NodeType::Minus | NodeType::Times => brackets(&term),
            _ => term,
        })
    }

    /// Joins the operands with `operator`, bracketing all but the first as needed.
    fn chain(&mut self, operator: char, nodes: &[AstNode]) -> Result<String, AstError> {
        let mut result = String::new();
        for (i, node) in nodes.iter().enumerate() {
            if i == 0 {
                result.push_str(&self.formula(node)?);
            } else {
                result.push(operator);
                result.push_str(&self.check_brackets(node)?);
            }
        }
        Ok(result)
    }

    fn relation(&mut self, left: &AstNode, symbol: &str, right: &AstNode) -> Result<String, AstError> {
        let mut side = |node: &AstNode| -> Result<String, AstError> {
            let term = self.formula(node)?;
            Ok(if node.node_type().is_relational() { brackets(&term) } else { term })
        };
        let left = side(left)?;
        let right = side(right)?;
        Ok(format!("{}{}{}", left, symbol, right))
    }

    fn logical(&mut self, name: &str, operator: &str, nodes: &[AstNode]) -> Result<String, AstError> {
        if self.settings.prefix_logical_operators {
            return self.call(name, nodes);
        }

        let terms = nodes.iter()
            .map(|node| {
                let term = self.formula(node)?;
                Ok(if node.child_count() > 0 { brackets(&term) } else { term })
            })
            .collect::<Result<Vec<_>, AstError>>()?;
        Ok(terms.join(operator))
    }

    /// Qualifiers are transparent in formulas; they stand for their contents.
    fn qualifier(&mut self, nodes: &[AstNode]) -> Result<String, AstError> {
        self.arguments(nodes)
    }
}

impl Compiler for FormulaCompiler {
    type Value = String;

    fn plus(&mut self, nodes: &[AstNode]) -> Result<String, AstError> {
        self.chain('+', nodes)
    }

    fn minus(&mut self, nodes: &[AstNode]) -> Result<String, AstError> {
        self.chain('-', nodes)
    }

    fn u_minus(&mut self, node: &AstNode) -> Result<String, AstError> {
        Ok(format!("-{}", self.check_brackets(node)?))
    }

    fn times(&mut self, nodes: &[AstNode]) -> Result<String, AstError> {
        let factors = nodes.iter()
            .map(|n| self.check_brackets(n))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(factors.into_iter().filter(|f| !f.is_empty()).collect::<Vec<_>>().join("*"))
    }

    fn frac(&mut self, numerator: &AstNode, denominator: &AstNode) -> Result<String, AstError> {
        let numerator = self.check_brackets(numerator)?;
        let denominator = self.check_denominator_brackets(denominator)?;
        Ok(format!("{}/{}", numerator, denominator))
    }

    fn pow(&mut self, base: &AstNode, exponent: &AstNode) -> Result<String, AstError> {
        let base = self.formula(base)?;
        let exponent = self.formula(exponent)?;
        Ok(pow_text(base, exponent))
    }

    fn root(&mut self, degree: &AstNode, radicand: &AstNode) -> Result<String, AstError> {
        super::check_root_degree(degree)?;
        let radicand = self.formula(radicand)?;
        let degree = self.formula(degree)?;
        Ok(format!("({})^(1/({}))", radicand, degree))
    }

    fn sqrt(&mut self, radicand: &AstNode) -> Result<String, AstError> {
        Ok(format!("({})^(0.5)", self.formula(radicand)?))
    }

    fn log(&mut self, base: &AstNode, value: &AstNode) -> Result<String, AstError> {
        if base.is_literal(10) {
            self.unary("log10", value)
        } else {
            self.call("log", &[base.clone(), value.clone()])
        }
    }

    fn delay(&mut self, name: &str, x: &AstNode, delay: &AstNode) -> Result<String, AstError> {
        self.call(name, &[x.clone(), delay.clone()])
    }

    fn eq(&mut self, left: &AstNode, right: &AstNode) -> Result<String, AstError> {
        self.relation(left, " == ", right)
    }

    fn neq(&mut self, left: &AstNode, right: &AstNode) -> Result<String, AstError> {
        self.relation(left, " != ", right)
    }

    fn lt(&mut self, left: &AstNode, right: &AstNode) -> Result<String, AstError> {
        self.relation(left, " < ", right)
    }

    fn leq(&mut self, left: &AstNode, right: &AstNode) -> Result<String, AstError> {
        self.relation(left, " <= ", right)
    }

    fn gt(&mut self, left: &AstNode, right: &AstNode) -> Result<String, AstError> {
        self.relation(left, " > ", right)
    }

    fn geq(&mut self, left: &AstNode, right: &AstNode) -> Result<String, AstError> {
        self.relation(left, " >= ", right)
    }

    fn and(&mut self, nodes: &[AstNode]) -> Result<String, AstError> {
        self.logical("and", " && ", nodes)
    }

    fn or(&mut self, nodes: &[AstNode]) -> Result<String, AstError> {
        self.logical("or", " || ", nodes)
    }

    fn xor(&mut self, nodes: &[AstNode]) -> Result<String, AstError> {
        self.logical("xor", " XOR ", nodes)
    }

    fn not(&mut self, node: &AstNode) -> Result<String, AstError> {
        self.unary("!", node)
    }

    fn abs(&mut self, node: &AstNode) -> Result<String, AstError> {
        self.unary("abs", node)
    }

    fn ceiling(&mut self, node: &AstNode) -> Result<String, AstError> {
        self.unary("ceil", node)
    }

    fn floor(&mut self, node: &AstNode) -> Result<String, AstError> {
        self.unary("floor", node)
    }

    fn exp(&mut self, node: &AstNode) -> Result<String, AstError> {
        self.unary("exp", node)
    }

    fn factorial(&mut self, node: &AstNode) -> Result<String, AstError> {
        Ok(format!("({})!", self.formula(node)?))
    }

    fn ln(&mut self, node: &AstNode) -> Result<String, AstError> {
        self.unary("log", node)
    }

    fn sin(&mut self, node: &AstNode) -> Result<String, AstError> { self.unary("sin", node) }
    fn cos(&mut self, node: &AstNode) -> Result<String, AstError> { self.unary("cos", node) }
    fn tan(&mut self, node: &AstNode) -> Result<String, AstError> { self.unary("tan", node) }
    fn sec(&mut self, node: &AstNode) -> Result<String, AstError> { self.unary("sec", node) }
    fn csc(&mut self, node: &AstNode) -> Result<String, AstError> { self.unary("csc", node) }
    fn cot(&mut self, node: &AstNode) -> Result<String, AstError> { self.unary("cot", node) }
    fn sinh(&mut self, node: &AstNode) -> Result<String, AstError> { self.unary("sinh", node) }
    fn cosh(&mut self, node: &AstNode) -> Result<String, AstError> { self.unary("cosh", node) }
    fn tanh(&mut self, node: &AstNode) -> Result<String, AstError> { self.unary("tanh", node) }
    fn sech(&mut self, node: &AstNode) -> Result<String, AstError> { self.unary("sech", node) }
    fn csch(&mut self, node: &AstNode) -> Result<String, AstError> { self.unary("csch", node) }
    fn coth(&mut self, node: &AstNode) -> Result<String, AstError> { self.unary("coth", node) }
    fn arcsin(&mut self, node: &AstNode) -> Result<String, AstError> { self.unary("asin", node) }
    fn arccos(&mut self, node: &AstNode) -> Result<String, AstError> { self.unary("acos", node) }
    fn arctan(&mut self, node: &AstNode) -> Result<String, AstError> { self.unary("atan", node) }
    fn arcsec(&mut self, node: &AstNode) -> Result<String, AstError> { self.unary("asec", node) }
    fn arccsc(&mut self, node: &AstNode) -> Result<String, AstError> { self.unary("acsc", node) }
    fn arccot(&mut self, node: &AstNode) -> Result<String, AstError> { self.unary("acot", node) }
    fn arcsinh(&mut self, node: &AstNode) -> Result<String, AstError> { self.unary("asinh", node) }
    fn arccosh(&mut self, node: &AstNode) -> Result<String, AstError> { self.unary("acosh", node) }
    fn arctanh(&mut self, node: &AstNode) -> Result<String, AstError> { self.unary("atanh", node) }
    fn arcsech(&mut self, node: &AstNode) -> Result<String, AstError> { self.unary("asech", node) }
    fn arccsch(&mut self, node: &AstNode) -> Result<String, AstError> { self.unary("acsch", node) }
    fn arccoth(&mut self, node: &AstNode) -> Result<String, AstError> { self.unary("acoth", node) }

    fn integer(&mut self, value: i32, _units: Option<&str>) -> Result<String, AstError> {
        Ok(value.to_string())
    }

    fn real(&mut self, value: f64, _units: Option<&str>) -> Result<String, AstError> {
        Ok(format_real(value))
    }

    fn rational(&mut self, numerator: i32, denominator: i32, _units: Option<&str>) -> Result<String, AstError> {
        let part = |v: i32| if v < 0 { brackets(&v.to_string()) } else { v.to_string() };
        Ok(format!("{}/{}", part(numerator), part(denominator)))
    }

    fn exponential(&mut self, mantissa: f64, exponent: i32, _units: Option<&str>) -> Result<String, AstError> {
        if exponent == 0 {
            Ok(format_real(mantissa))
        } else {
            Ok(format!("{}E{}", format_decimal(mantissa), exponent))
        }
    }

    fn positive_infinity(&mut self) -> Result<String, AstError> {
        Ok(format_real(f64::INFINITY))
    }

    fn negative_infinity(&mut self) -> Result<String, AstError> {
        Ok(format_real(f64::NEG_INFINITY))
    }

    fn constant_e(&mut self) -> Result<String, AstError> {
        Ok("e".to_string())
    }

    fn constant_pi(&mut self) -> Result<String, AstError> {
        Ok("pi".to_string())
    }

    fn constant_true(&mut self) -> Result<String, AstError> {
        Ok("true".to_string())
    }

    fn constant_false(&mut self) -> Result<String, AstError> {
        Ok("false".to_string())
    }

    fn constant_avogadro(&mut self, name: &str) -> Result<String, AstError> {
        Ok(name.to_string())
    }

    fn symbol_time(&mut self, name: &str) -> Result<String, AstError> {
        Ok(name.to_string())
    }

    fn name(&mut self, name: &str) -> Result<String, AstError> {
        Ok(name.to_string())
    }

    fn lambda(&mut self, nodes: &[AstNode]) -> Result<String, AstError> {
        self.call("lambda", nodes)
    }

    fn piecewise(&mut self, nodes: &[AstNode]) -> Result<String, AstError> {
        self.call("piecewise", nodes)
    }

    fn function(&mut self, name: &str, args: &[AstNode]) -> Result<String, AstError> {
        self.call(name, args)
    }

    fn bvar(&mut self, nodes: &[AstNode]) -> Result<String, AstError> {
        self.qualifier(nodes)
    }

    fn degree(&mut self, nodes: &[AstNode]) -> Result<String, AstError> {
        self.qualifier(nodes)
    }

    fn logbase(&mut self, nodes: &[AstNode]) -> Result<String, AstError> {
        self.qualifier(nodes)
    }

    fn piece(&mut self, nodes: &[AstNode]) -> Result<String, AstError> {
        self.qualifier(nodes)
    }

    fn otherwise(&mut self, nodes: &[AstNode]) -> Result<String, AstError> {
        self.qualifier(nodes)
    }

    fn unknown_value(&mut self) -> Result<String, AstError> {
        Err(AstError::UnknownNode)
    }
}
