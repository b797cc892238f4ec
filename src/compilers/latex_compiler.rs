use crate::{
    compile::Compiler,
    error::AstError,
    node::AstNode,
    node_type::NodeType,
    number::{format_real, split_scientific},
};

/// Options for [LatexCompiler].
#[derive(Clone, Debug)]
pub struct LatexSettings {
    /// Escape characters in identifiers which LaTeX treats specially.
    pub mask_special_chars: bool,

    /// When masking, allow a line break before each escaped character after the first,
    /// which helps long identifiers like `k_cat_forward` wrap.
    pub hyphenate: bool,
}

impl Default for LatexSettings {
    fn default() -> Self {
        LatexSettings { mask_special_chars: true, hyphenate: false }
    }
}

/// Compiles trees into LaTeX math-mode source.
#[derive(Default, Clone, Debug)]
pub struct LatexCompiler {
    pub settings: LatexSettings,
}

const LEFT: &str = "\\left(";
const RIGHT: &str = "\\right)";

fn brackets(term: &str) -> String {
    format!("{}{}{}", LEFT, term, RIGHT)
}

fn command(name: &str, argument: &str) -> String {
    format!("\\{}{{{}}}", name, argument)
}

fn mathrm(text: &str) -> String {
    command("mathrm", text)
}

/// Escapes the characters in `text` which LaTeX would otherwise interpret.
pub fn mask_special_chars(text: &str, hyphenate: bool) -> String {
    let mut masked = String::with_capacity(text.len());
    let mut previous = None;
    for (i, c) in text.chars().enumerate() {
        match c {
            '<' => masked.push_str("$<$"),
            '>' => masked.push_str("$>$"),
            '_' | '\\' | '$' | '&' | '#' | '{' | '}' | '~' | '%' | '^' => {
                if i == 0 || !hyphenate {
                    masked.push('\\');
                } else if previous != Some('\\') {
                    masked.push_str("\\-\\");
                }
                masked.push(c);
            }
            _ => masked.push(c),
        }
        previous = Some(c);
    }
    masked.trim().to_string()
}

/// Formats a number, writing scientific notation as a power of ten.
fn format_number(value: f64) -> String {
    let formatted = format_real(value);
    match split_scientific(&formatted) {
        Some((mantissa, exponent)) => {
            let power = format!("10^{{{}}}", exponent);
            match mantissa {
                "1" => power,
                "-1" => format!("-{}", power),
                _ => format!("{}\\cdot {}", mantissa, power),
            }
        }
        None => formatted,
    }
}

impl LatexCompiler {
    pub fn new(settings: LatexSettings) -> LatexCompiler {
        LatexCompiler { settings }
    }

    fn latex(&mut self, node: &AstNode) -> Result<String, AstError> {
        Ok(node.compile(self)?.into_value())
    }

    fn mask(&self, text: &str) -> String {
        if self.settings.mask_special_chars {
            mask_special_chars(text, self.settings.hyphenate)
        } else {
            text.to_string()
        }
    }

    fn arguments(&mut self, nodes: &[AstNode]) -> Result<String, AstError> {
        let args = nodes.iter()
            .map(|n| self.latex(n))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(args.join(", "))
    }

    fn check_brackets(&mut self, node: &AstNode) -> Result<String, AstError> {
        let term = self.latex(node)?;
        let needs_brackets = match node.node_type() {
            NodeType::Plus | NodeType::Minus => true,
            NodeType::Real => node.real_value().map_or(false, |v| v < 0.0),
            _ => false,
        };
        Ok(if needs_brackets { brackets(&term) } else { term })
    }

    /// Applies a function to an operand. Functions LaTeX has a command for take the
    /// operand in braces, bracketed if it is compound; others are set upright and always
    /// bracket their operand.
    fn apply(&mut self, name: &str, node: &AstNode) -> Result<String, AstError> {
        let value = self.latex(node)?;
        if name.starts_with('\\') {
            let value = if node.child_count() > 1 { brackets(&value) } else { value };
            Ok(format!("{}{{{}}}", name, value))
        } else {
            Ok(format!("{}{}", mathrm(name), brackets(&value)))
        }
    }

    fn chain(&mut self, operator: &str, nodes: &[AstNode]) -> Result<String, AstError> {
        let mut result = String::new();
        for (i, node) in nodes.iter().enumerate() {
            if i == 0 {
                result.push_str(&self.latex(node)?);
            } else {
                result.push_str(operator);
                result.push_str(&self.check_brackets(node)?);
            }
        }
        Ok(result)
    }

    fn relation(&mut self, left: &AstNode, symbol: &str, right: &AstNode) -> Result<String, AstError> {
        let mut side = |node: &AstNode| -> Result<String, AstError> {
            let term = self.latex(node)?;
            Ok(if node.node_type().is_relational() { brackets(&term) } else { term })
        };
        let left = side(left)?;
        let right = side(right)?;
        Ok(format!("{}{}{}", left, symbol, right))
    }

    fn logical(&mut self, symbol: &str, nodes: &[AstNode]) -> Result<String, AstError> {
        let terms = nodes.iter()
            .map(|node| {
                let term = self.latex(node)?;
                Ok(if node.child_count() > 0 { brackets(&term) } else { term })
            })
            .collect::<Result<Vec<_>, AstError>>()?;
        Ok(terms.join(symbol))
    }

    fn first(&mut self, nodes: &[AstNode]) -> Result<String, AstError> {
        match nodes.first() {
            Some(node) => self.latex(node),
            None => Ok(String::new()),
        }
    }
}

impl Compiler for LatexCompiler {
    type Value = String;

    fn plus(&mut self, nodes: &[AstNode]) -> Result<String, AstError> {
        self.chain("+", nodes)
    }

    fn minus(&mut self, nodes: &[AstNode]) -> Result<String, AstError> {
        self.chain("-", nodes)
    }

    fn u_minus(&mut self, node: &AstNode) -> Result<String, AstError> {
        Ok(format!("-{}", self.check_brackets(node)?))
    }

    fn times(&mut self, nodes: &[AstNode]) -> Result<String, AstError> {
        let factors = nodes.iter()
            .map(|n| self.check_brackets(n))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(factors.join("\\cdot "))
    }

    fn frac(&mut self, numerator: &AstNode, denominator: &AstNode) -> Result<String, AstError> {
        let numerator = self.latex(numerator)?;
        let denominator = self.latex(denominator)?;
        Ok(format!("\\frac{{{}}}{{{}}}", numerator, denominator))
    }

    fn pow(&mut self, base: &AstNode, exponent: &AstNode) -> Result<String, AstError> {
        let mut value = self.latex(base)?;
        let exponent = self.latex(exponent)?;
        if exponent != "1" {
            if base.child_count() >= 2 {
                value = brackets(&value);
            }
            value.push_str(&format!("^{{{}}}", exponent));
        }
        Ok(value)
    }

    fn root(&mut self, degree: &AstNode, radicand: &AstNode) -> Result<String, AstError> {
        super::check_root_degree(degree)?;
        let degree = self.latex(degree)?;
        let radicand = self.latex(radicand)?;
        Ok(format!("\\sqrt[{}]{{{}}}", degree, radicand))
    }

    fn sqrt(&mut self, radicand: &AstNode) -> Result<String, AstError> {
        Ok(command("sqrt", &self.latex(radicand)?))
    }

    fn log(&mut self, base: &AstNode, value: &AstNode) -> Result<String, AstError> {
        let base = self.latex(base)?;
        let argument = self.latex(value)?;
        let argument = if value.child_count() > 1 { brackets(&argument) } else { argument };
        Ok(format!("\\log_{{{}}}{{{}}}", base, argument))
    }

    fn delay(&mut self, name: &str, x: &AstNode, delay: &AstNode) -> Result<String, AstError> {
        let name = mathrm(&self.mask(name));
        let x = self.latex(x)?;
        let delay = self.latex(delay)?;
        Ok(format!("{}{}", name, brackets(&format!("{}, {}", x, delay))))
    }

    fn eq(&mut self, left: &AstNode, right: &AstNode) -> Result<String, AstError> {
        self.relation(left, " = ", right)
    }

    fn neq(&mut self, left: &AstNode, right: &AstNode) -> Result<String, AstError> {
        self.relation(left, " \\neq ", right)
    }

    fn lt(&mut self, left: &AstNode, right: &AstNode) -> Result<String, AstError> {
        self.relation(left, " < ", right)
    }

    fn leq(&mut self, left: &AstNode, right: &AstNode) -> Result<String, AstError> {
        self.relation(left, " \\leq ", right)
    }

    fn gt(&mut self, left: &AstNode, right: &AstNode) -> Result<String, AstError> {
        self.relation(left, " > ", right)
    }

    fn geq(&mut self, left: &AstNode, right: &AstNode) -> Result<String, AstError> {
        self.relation(left, " \\geq ", right)
    }

    fn and(&mut self, nodes: &[AstNode]) -> Result<String, AstError> {
        self.logical("\\wedge ", nodes)
    }

    fn or(&mut self, nodes: &[AstNode]) -> Result<String, AstError> {
        self.logical("\\lor ", nodes)
    }

    fn xor(&mut self, nodes: &[AstNode]) -> Result<String, AstError> {
        self.logical("\\oplus ", nodes)
    }

    fn not(&mut self, node: &AstNode) -> Result<String, AstError> {
        let value = self.latex(node)?;
        let value = if node.child_count() == 0 { value } else { brackets(&value) };
        Ok(format!("\\neg {}", value))
    }

    fn abs(&mut self, node: &AstNode) -> Result<String, AstError> {
        Ok(format!("\\left\\lvert {}\\right\\rvert", self.latex(node)?))
    }

    fn ceiling(&mut self, node: &AstNode) -> Result<String, AstError> {
        Ok(format!("\\left\\lceil {}\\right\\rceil ", self.latex(node)?))
    }

    fn floor(&mut self, node: &AstNode) -> Result<String, AstError> {
        Ok(format!("\\left\\lfloor {}\\right\\rfloor ", self.latex(node)?))
    }

    fn exp(&mut self, node: &AstNode) -> Result<String, AstError> {
        self.apply("\\exp", node)
    }

    fn factorial(&mut self, node: &AstNode) -> Result<String, AstError> {
        let value = self.latex(node)?;
        let value = if node.child_count() > 0 { brackets(&value) } else { value };
        Ok(format!("{}!", value))
    }

    fn ln(&mut self, node: &AstNode) -> Result<String, AstError> {
        self.apply("\\ln", node)
    }

    fn sin(&mut self, node: &AstNode) -> Result<String, AstError> { self.apply("\\sin", node) }
    fn cos(&mut self, node: &AstNode) -> Result<String, AstError> { self.apply("\\cos", node) }
    fn tan(&mut self, node: &AstNode) -> Result<String, AstError> { self.apply("\\tan", node) }
    fn sec(&mut self, node: &AstNode) -> Result<String, AstError> { self.apply("\\sec", node) }
    fn csc(&mut self, node: &AstNode) -> Result<String, AstError> { self.apply("\\csc", node) }
    fn cot(&mut self, node: &AstNode) -> Result<String, AstError> { self.apply("\\cot", node) }
    fn sinh(&mut self, node: &AstNode) -> Result<String, AstError> { self.apply("\\sinh", node) }
    fn cosh(&mut self, node: &AstNode) -> Result<String, AstError> { self.apply("\\cosh", node) }
    fn tanh(&mut self, node: &AstNode) -> Result<String, AstError> { self.apply("\\tanh", node) }
    fn sech(&mut self, node: &AstNode) -> Result<String, AstError> { self.apply("sech", node) }
    fn csch(&mut self, node: &AstNode) -> Result<String, AstError> { self.apply("csch", node) }
    fn coth(&mut self, node: &AstNode) -> Result<String, AstError> { self.apply("\\coth", node) }
    fn arcsin(&mut self, node: &AstNode) -> Result<String, AstError> { self.apply("\\arcsin", node) }
    fn arccos(&mut self, node: &AstNode) -> Result<String, AstError> { self.apply("\\arccos", node) }
    fn arctan(&mut self, node: &AstNode) -> Result<String, AstError> { self.apply("\\arctan", node) }
    fn arcsec(&mut self, node: &AstNode) -> Result<String, AstError> { self.apply("arcsec", node) }
    fn arccsc(&mut self, node: &AstNode) -> Result<String, AstError> { self.apply("arccsc", node) }
    fn arccot(&mut self, node: &AstNode) -> Result<String, AstError> { self.apply("arccot", node) }
    fn arcsinh(&mut self, node: &AstNode) -> Result<String, AstError> { self.apply("arcsinh", node) }
    fn arccosh(&mut self, node: &AstNode) -> Result<String, AstError> { self.apply("arccosh", node) }
    fn arctanh(&mut self, node: &AstNode) -> Result<String, AstError> { self.apply("arctanh", node) }
    fn arcsech(&mut self, node: &AstNode) -> Result<String, AstError> { self.apply("arcsech", node) }
    fn arccsch(&mut self, node: &AstNode) -> Result<String, AstError> { self.apply("arccsch", node) }
    fn arccoth(&mut self, node: &AstNode) -> Result<String, AstError> { self.apply("arccoth", node) }

    fn integer(&mut self, value: i32, _units: Option<&str>) -> Result<String, AstError> {
        Ok(value.to_string())
    }

    fn real(&mut self, value: f64, _units: Option<&str>) -> Result<String, AstError> {
        Ok(format_number(value))
    }

    fn rational(&mut self, numerator: i32, denominator: i32, _units: Option<&str>) -> Result<String, AstError> {
        Ok(format!("\\frac{{{}}}{{{}}}", numerator, denominator))
    }

    fn exponential(&mut self, mantissa: f64, exponent: i32, _units: Option<&str>) -> Result<String, AstError> {
        Ok(format!("{}\\cdot 10^{{{}}}", format_number(mantissa), exponent))
    }

    fn positive_infinity(&mut self) -> Result<String, AstError> {
        Ok("\\infty".to_string())
    }

    fn negative_infinity(&mut self) -> Result<String, AstError> {
        Ok("-\\infty".to_string())
    }

    fn constant_e(&mut self) -> Result<String, AstError> {
        Ok(mathrm("e"))
    }

    fn constant_pi(&mut self) -> Result<String, AstError> {
        Ok("\\pi".to_string())
    }

    fn constant_true(&mut self) -> Result<String, AstError> {
        Ok(mathrm("true"))
    }

    fn constant_false(&mut self) -> Result<String, AstError> {
        Ok(mathrm("false"))
    }

    fn constant_avogadro(&mut self, name: &str) -> Result<String, AstError> {
        Ok(self.mask(name))
    }

    fn symbol_time(&mut self, name: &str) -> Result<String, AstError> {
        Ok(mathrm(&self.mask(name)))
    }

    fn name(&mut self, name: &str) -> Result<String, AstError> {
        Ok(self.mask(name))
    }

    /// `\lambda(x, y) = body`
    fn lambda(&mut self, nodes: &[AstNode]) -> Result<String, AstError> {
        let (body, bvars) = match nodes.split_last() {
            Some((body, bvars)) => (self.latex(body)?, bvars),
            None => (String::new(), nodes),
        };
        Ok(format!("\\lambda{} = {}", brackets(&self.arguments(bvars)?), body))
    }

    fn piecewise(&mut self, nodes: &[AstNode]) -> Result<String, AstError> {
        let cases = nodes.iter()
            .map(|n| self.latex(n))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(format!("\\begin{{dcases}}\n{}\n\\end{{dcases}}", cases.join("\\\\\n")))
    }

    fn function(&mut self, name: &str, args: &[AstNode]) -> Result<String, AstError> {
        let mut value = command("mathtt", &self.mask(name));
        if !args.is_empty() {
            value.push_str(&brackets(&self.arguments(args)?));
        }
        Ok(value)
    }

    fn bvar(&mut self, nodes: &[AstNode]) -> Result<String, AstError> {
        self.first(nodes)
    }

    fn degree(&mut self, nodes: &[AstNode]) -> Result<String, AstError> {
        self.first(nodes)
    }

    fn logbase(&mut self, nodes: &[AstNode]) -> Result<String, AstError> {
        self.first(nodes)
    }

    fn piece(&mut self, nodes: &[AstNode]) -> Result<String, AstError> {
        let value = self.first(nodes)?;
        match nodes.get(1) {
            Some(condition) => Ok(format!("{} & \\text{{if\\ }} {}", value, self.latex(condition)?)),
            None => Ok(value),
        }
    }

    fn otherwise(&mut self, nodes: &[AstNode]) -> Result<String, AstError> {
        Ok(format!("{} & \\text{{otherwise}}", self.first(nodes)?))
    }

    fn unknown_value(&mut self) -> Result<String, AstError> {
        Ok(command("text", " unknown "))
    }
}
