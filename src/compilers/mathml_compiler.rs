//! Content MathML output.
//!
//! Unlike the text compilers, [MathMlCompiler] streams into its own buffer rather than
//! returning strings, since MathML nests elements instead of composing values. Each
//! node's `id`, `style` and `class` attributes are written on the element it opens.

use crate::{
    compile::Compiler,
    error::AstError,
    node::AstNode,
    node_type::{NodeType, AVOGADRO_URI, DELAY_URI, TIME_URI},
    number::format_real,
};

pub const MATHML_NAMESPACE: &str = "http://www.w3.org/1998/Math/MathML";
pub const SBML_NAMESPACE: &str = "http://www.sbml.org/sbml/level3/version2/core";

/// Options for [MathMlCompiler].
#[derive(Default, Clone, Debug)]
pub struct MathMlSettings {
    /// Spaces per nesting level. With 0, everything is written on one line.
    pub indent: usize,
}

#[derive(Default, Clone, Debug)]
pub struct MathMlCompiler {
    pub settings: MathMlSettings,
    out: String,
    depth: usize,
    pending: Vec<(&'static str, String)>,
}

/// Escapes text for use in element content or a double-quoted attribute.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn uses_units(node: &AstNode) -> bool {
    node.is_set_units() || node.children().iter().any(uses_units)
}

fn attributes(attrs: &[(&str, String)]) -> String {
    attrs.iter()
        .map(|(key, value)| format!(" {}=\"{}\"", key, escape(value)))
        .collect()
}

impl MathMlCompiler {
    pub fn new(settings: MathMlSettings) -> MathMlCompiler {
        MathMlCompiler { settings, ..Default::default() }
    }

    /// Everything written so far.
    pub fn output(&self) -> &str {
        &self.out
    }

    pub fn into_output(self) -> String {
        self.out
    }

    /// Writes `node` as a complete `<math>` document.
    pub fn document(&mut self, node: &AstNode) -> Result<(), AstError> {
        let mut namespaces = vec![("xmlns", MATHML_NAMESPACE.to_string())];
        if uses_units(node) {
            namespaces.push(("xmlns:sbml", SBML_NAMESPACE.to_string()));
        }
        self.open_with("math", namespaces);
        self.emit(node)?;
        self.close("math");
        Ok(())
    }

    /// Writes `node`, carrying its presentation attributes onto the element it opens.
    pub fn emit(&mut self, node: &AstNode) -> Result<(), AstError> {
        self.pending.clear();
        if node.is_set_id() {
            self.pending.push(("id", node.id()?));
        }
        if node.is_set_style() {
            self.pending.push(("style", node.style()?));
        }
        if node.is_set_math_ml_class() {
            self.pending.push(("class", node.math_ml_class()?));
        }
        node.compile(self)?;
        Ok(())
    }

    fn emit_all(&mut self, nodes: &[AstNode]) -> Result<(), AstError> {
        for node in nodes {
            self.emit(node)?;
        }
        Ok(())
    }

    fn line(&mut self, text: &str) {
        if self.settings.indent > 0 {
            self.out.push_str(&" ".repeat(self.depth * self.settings.indent));
            self.out.push_str(text);
            self.out.push('\n');
        } else {
            self.out.push_str(text);
        }
    }

    fn take_attributes(&mut self, mut extra: Vec<(&'static str, String)>) -> String {
        let mut attrs = std::mem::take(&mut self.pending);
        attrs.append(&mut extra);
        attributes(&attrs)
    }

    fn open_with(&mut self, tag: &str, extra: Vec<(&'static str, String)>) {
        let attrs = self.take_attributes(extra);
        self.line(&format!("<{}{}>", tag, attrs));
        self.depth += 1;
    }

    fn open(&mut self, tag: &str) {
        self.open_with(tag, vec![]);
    }

    fn close(&mut self, tag: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.line(&format!("</{}>", tag));
    }

    fn empty(&mut self, tag: &str) {
        let attrs = self.take_attributes(vec![]);
        self.line(&format!("<{}{}/>", tag, attrs));
    }

    fn text_element(&mut self, tag: &str, extra: Vec<(&'static str, String)>, text: &str) {
        let attrs = self.take_attributes(extra);
        self.line(&format!("<{}{}>{}</{}>", tag, attrs, escape(text), tag));
    }

    /// `<apply><operator/>operands</apply>`
    fn apply(&mut self, operator: &str, nodes: &[AstNode]) -> Result<(), AstError> {
        self.open("apply");
        self.line(&format!("<{}/>", operator));
        self.emit_all(nodes)?;
        self.close("apply");
        Ok(())
    }

    fn apply_one(&mut self, operator: &str, node: &AstNode) -> Result<(), AstError> {
        self.apply(operator, std::slice::from_ref(node))
    }

    fn apply_two(&mut self, operator: &str, left: &AstNode, right: &AstNode) -> Result<(), AstError> {
        self.apply(operator, &[left.clone(), right.clone()])
    }

    /// Wraps `node` in a qualifier element, unless it already is that qualifier.
    fn qualified(&mut self, qualifier: NodeType, node: &AstNode) -> Result<(), AstError> {
        let tag = qualifier.element_name().unwrap_or("degree");
        if node.node_type() == qualifier {
            return self.emit(node);
        }
        self.line(&format!("<{}>", tag));
        self.depth += 1;
        self.emit(node)?;
        self.close(tag);
        Ok(())
    }

    fn csymbol(&mut self, url: &str, name: &str) {
        self.text_element("csymbol", vec![
            ("encoding", "text".to_string()),
            ("definitionURL", url.to_string()),
        ], name);
    }

    fn number(&mut self, cn_type: Option<&str>, units: Option<&str>, content: &str) {
        let mut extra = vec![];
        if let Some(t) = cn_type {
            extra.push(("type", t.to_string()));
        }
        if let Some(u) = units {
            extra.push(("sbml:units", u.to_string()));
        }
        let attrs = self.take_attributes(extra);
        self.line(&format!("<cn{}> {} </cn>", attrs, content));
    }

    fn qualifier(&mut self, tag: &str, nodes: &[AstNode]) -> Result<(), AstError> {
        self.open(tag);
        self.emit_all(nodes)?;
        self.close(tag);
        Ok(())
    }
}

impl Compiler for MathMlCompiler {
    type Value = ();

    fn plus(&mut self, nodes: &[AstNode]) -> Result<(), AstError> { self.apply("plus", nodes) }
    fn minus(&mut self, nodes: &[AstNode]) -> Result<(), AstError> { self.apply("minus", nodes) }
    fn u_minus(&mut self, node: &AstNode) -> Result<(), AstError> { self.apply_one("minus", node) }
    fn times(&mut self, nodes: &[AstNode]) -> Result<(), AstError> { self.apply("times", nodes) }

    fn frac(&mut self, numerator: &AstNode, denominator: &AstNode) -> Result<(), AstError> {
        self.apply_two("divide", numerator, denominator)
    }

    fn pow(&mut self, base: &AstNode, exponent: &AstNode) -> Result<(), AstError> {
        self.apply_two("power", base, exponent)
    }

    fn root(&mut self, degree: &AstNode, radicand: &AstNode) -> Result<(), AstError> {
        super::check_root_degree(degree)?;
        self.open("apply");
        self.line("<root/>");
        self.qualified(NodeType::Degree, degree)?;
        self.emit(radicand)?;
        self.close("apply");
        Ok(())
    }

    fn sqrt(&mut self, radicand: &AstNode) -> Result<(), AstError> {
        self.apply_one("root", radicand)
    }

    fn log(&mut self, base: &AstNode, value: &AstNode) -> Result<(), AstError> {
        self.open("apply");
        self.line("<log/>");
        if !base.is_literal(10) {
            self.qualified(NodeType::Logbase, base)?;
        }
        self.emit(value)?;
        self.close("apply");
        Ok(())
    }

    fn delay(&mut self, name: &str, x: &AstNode, delay: &AstNode) -> Result<(), AstError> {
        self.open("apply");
        self.csymbol(DELAY_URI, name);
        self.emit(x)?;
        self.emit(delay)?;
        self.close("apply");
        Ok(())
    }

    fn eq(&mut self, left: &AstNode, right: &AstNode) -> Result<(), AstError> { self.apply_two("eq", left, right) }
    fn neq(&mut self, left: &AstNode, right: &AstNode) -> Result<(), AstError> { self.apply_two("neq", left, right) }
    fn lt(&mut self, left: &AstNode, right: &AstNode) -> Result<(), AstError> { self.apply_two("lt", left, right) }
    fn leq(&mut self, left: &AstNode, right: &AstNode) -> Result<(), AstError> { self.apply_two("leq", left, right) }
    fn gt(&mut self, left: &AstNode, right: &AstNode) -> Result<(), AstError> { self.apply_two("gt", left, right) }
    fn geq(&mut self, left: &AstNode, right: &AstNode) -> Result<(), AstError> { self.apply_two("geq", left, right) }

    fn and(&mut self, nodes: &[AstNode]) -> Result<(), AstError> { self.apply("and", nodes) }
    fn or(&mut self, nodes: &[AstNode]) -> Result<(), AstError> { self.apply("or", nodes) }
    fn xor(&mut self, nodes: &[AstNode]) -> Result<(), AstError> { self.apply("xor", nodes) }
    fn not(&mut self, node: &AstNode) -> Result<(), AstError> { self.apply_one("not", node) }

    fn abs(&mut self, node: &AstNode) -> Result<(), AstError> { self.apply_one("abs", node) }
    fn ceiling(&mut self, node: &AstNode) -> Result<(), AstError> { self.apply_one("ceiling", node) }
    fn floor(&mut self, node: &AstNode) -> Result<(), AstError> { self.apply_one("floor", node) }
    fn exp(&mut self, node: &AstNode) -> Result<(), AstError> { self.apply_one("exp", node) }
    fn factorial(&mut self, node: &AstNode) -> Result<(), AstError> { self.apply_one("factorial", node) }
    fn ln(&mut self, node: &AstNode) -> Result<(), AstError> { self.apply_one("ln", node) }

    fn sin(&mut self, node: &AstNode) -> Result<(), AstError> { self.apply_one("sin", node) }
    fn cos(&mut self, node: &AstNode) -> Result<(), AstError> { self.apply_one("cos", node) }
    fn tan(&mut self, node: &AstNode) -> Result<(), AstError> { self.apply_one("tan", node) }
    fn sec(&mut self, node: &AstNode) -> Result<(), AstError> { self.apply_one("sec", node) }
    fn csc(&mut self, node: &AstNode) -> Result<(), AstError> { self.apply_one("csc", node) }
    fn cot(&mut self, node: &AstNode) -> Result<(), AstError> { self.apply_one("cot", node) }
    fn sinh(&mut self, node: &AstNode) -> Result<(), AstError> { self.apply_one("sinh", node) }
    fn cosh(&mut self, node: &AstNode) -> Result<(), AstError> { self.apply_one("cosh", node) }
    fn tanh(&mut self, node: &AstNode) -> Result<(), AstError> { self.apply_one("tanh", node) }
    fn sech(&mut self, node: &AstNode) -> Result<(), AstError> { self.apply_one("sech", node) }
    fn csch(&mut self, node: &AstNode) -> Result<(), AstError> { self.apply_one("csch", node) }
    fn coth(&mut self, node: &AstNode) -> Result<(), AstError> { self.apply_one("coth", node) }
    fn arcsin(&mut self, node: &AstNode) -> Result<(), AstError> { self.apply_one("arcsin", node) }
    fn arccos(&mut self, node: &AstNode) -> Result<(), AstError> { self.apply_one("arccos", node) }
    fn arctan(&mut self, node: &AstNode) -> Result<(), AstError> { self.apply_one("arctan", node) }
    fn arcsec(&mut self, node: &AstNode) -> Result<(), AstError> { self.apply_one("arcsec", node) }
    fn arccsc(&mut self, node: &AstNode) -> Result<(), AstError> { self.apply_one("arccsc", node) }
    fn arccot(&mut self, node: &AstNode) -> Result<(), AstError> { self.apply_one("arccot", node) }
    fn arcsinh(&mut self, node: &AstNode) -> Result<(), AstError> { self.apply_one("arcsinh", node) }
    fn arccosh(&mut self, node: &AstNode) -> Result<(), AstError> { self.apply_one("arccosh", node) }
    fn arctanh(&mut self, node: &AstNode) -> Result<(), AstError> { self.apply_one("arctanh", node) }
    fn arcsech(&mut self, node: &AstNode) -> Result<(), AstError> { self.apply_one("arcsech", node) }
    fn arccsch(&mut self, node: &AstNode) -> Result<(), AstError> { self.apply_one("arccsch", node) }
    fn arccoth(&mut self, node: &AstNode) -> Result<(), AstError> { self.apply_one("arccoth", node) }

    fn integer(&mut self, value: i32, units: Option<&str>) -> Result<(), AstError> {
        self.number(Some("integer"), units, &value.to_string());
        Ok(())
    }

    fn real(&mut self, value: f64, units: Option<&str>) -> Result<(), AstError> {
        if value.is_nan() {
            self.empty("notanumber");
        } else {
            self.number(None, units, &format_real(value));
        }
        Ok(())
    }

    fn rational(&mut self, numerator: i32, denominator: i32, units: Option<&str>) -> Result<(), AstError> {
        self.number(Some("rational"), units, &format!("{} <sep/> {}", numerator, denominator));
        Ok(())
    }

    fn exponential(&mut self, mantissa: f64, exponent: i32, units: Option<&str>) -> Result<(), AstError> {
        self.number(Some("e-notation"), units, &format!("{} <sep/> {}", format_real(mantissa), exponent));
        Ok(())
    }

    fn positive_infinity(&mut self) -> Result<(), AstError> {
        self.empty("infinity");
        Ok(())
    }

    fn negative_infinity(&mut self) -> Result<(), AstError> {
        self.open("apply");
        self.line("<minus/>");
        self.line("<infinity/>");
        self.close("apply");
        Ok(())
    }

    fn constant_e(&mut self) -> Result<(), AstError> {
        self.empty("exponentiale");
        Ok(())
    }

    fn constant_pi(&mut self) -> Result<(), AstError> {
        self.empty("pi");
        Ok(())
    }

    fn constant_true(&mut self) -> Result<(), AstError> {
        self.empty("true");
        Ok(())
    }

    fn constant_false(&mut self) -> Result<(), AstError> {
        self.empty("false");
        Ok(())
    }

    fn constant_avogadro(&mut self, name: &str) -> Result<(), AstError> {
        self.csymbol(AVOGADRO_URI, name);
        Ok(())
    }

    fn symbol_time(&mut self, name: &str) -> Result<(), AstError> {
        self.csymbol(TIME_URI, name);
        Ok(())
    }

    fn name(&mut self, name: &str) -> Result<(), AstError> {
        self.text_element("ci", vec![], name);
        Ok(())
    }

    fn lambda(&mut self, nodes: &[AstNode]) -> Result<(), AstError> {
        self.qualifier("lambda", nodes)
    }

    fn piecewise(&mut self, nodes: &[AstNode]) -> Result<(), AstError> {
        self.qualifier("piecewise", nodes)
    }

    fn function(&mut self, name: &str, args: &[AstNode]) -> Result<(), AstError> {
        self.open("apply");
        self.text_element("ci", vec![], name);
        self.emit_all(args)?;
        self.close("apply");
        Ok(())
    }

    fn bvar(&mut self, nodes: &[AstNode]) -> Result<(), AstError> { self.qualifier("bvar", nodes) }
    fn degree(&mut self, nodes: &[AstNode]) -> Result<(), AstError> { self.qualifier("degree", nodes) }
    fn logbase(&mut self, nodes: &[AstNode]) -> Result<(), AstError> { self.qualifier("logbase", nodes) }
    fn piece(&mut self, nodes: &[AstNode]) -> Result<(), AstError> { self.qualifier("piece", nodes) }
    fn otherwise(&mut self, nodes: &[AstNode]) -> Result<(), AstError> { self.qualifier("otherwise", nodes) }

    fn unknown_value(&mut self) -> Result<(), AstError> {
        Err(AstError::UnknownNode)
    }
}
