//! Rendering trees through a [Compiler].
//!
//! A compiler has one method per kind of node. [AstNode::compile] picks the method for a
//! node's type and hands it the node's operands; compilers recurse by calling `compile`
//! on those operands themselves, so they can decide how each operand is bracketed.

use std::fmt;

use tracing::trace;

use crate::{
    error::AstError,
    node::{AstNode, Shape},
    node_type::NodeType,
};

/// The result of compiling a node, stamped with the node's type and, if the node is
/// anchored to a container, the container's level and version.
#[derive(PartialEq, Debug, Clone)]
pub struct CompiledValue<T> {
    pub value: T,
    pub node_type: NodeType,
    pub level: Option<u32>,
    pub version: Option<u32>,
}

impl<T> CompiledValue<T> {
    pub fn into_value(self) -> T {
        self.value
    }
}

impl<T: fmt::Display> fmt::Display for CompiledValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

type Output<C> = Result<<C as Compiler>::Value, AstError>;

/// A rendering backend.
///
/// Methods taking a single node receive the operand of a unary function. Methods taking
/// a slice receive every child of the node, in order.
pub trait Compiler {
    type Value;

    fn plus(&mut self, nodes: &[AstNode]) -> Output<Self>;
    fn minus(&mut self, nodes: &[AstNode]) -> Output<Self>;
    fn u_minus(&mut self, node: &AstNode) -> Output<Self>;
    fn times(&mut self, nodes: &[AstNode]) -> Output<Self>;
    fn frac(&mut self, numerator: &AstNode, denominator: &AstNode) -> Output<Self>;
    fn pow(&mut self, base: &AstNode, exponent: &AstNode) -> Output<Self>;
    fn root(&mut self, degree: &AstNode, radicand: &AstNode) -> Output<Self>;
    fn sqrt(&mut self, radicand: &AstNode) -> Output<Self>;
    fn log(&mut self, base: &AstNode, value: &AstNode) -> Output<Self>;
    fn delay(&mut self, name: &str, x: &AstNode, delay: &AstNode) -> Output<Self>;

    fn eq(&mut self, left: &AstNode, right: &AstNode) -> Output<Self>;
    fn neq(&mut self, left: &AstNode, right: &AstNode) -> Output<Self>;
    fn lt(&mut self, left: &AstNode, right: &AstNode) -> Output<Self>;
    fn leq(&mut self, left: &AstNode, right: &AstNode) -> Output<Self>;
    fn gt(&mut self, left: &AstNode, right: &AstNode) -> Output<Self>;
    fn geq(&mut self, left: &AstNode, right: &AstNode) -> Output<Self>;

    fn and(&mut self, nodes: &[AstNode]) -> Output<Self>;
    fn or(&mut self, nodes: &[AstNode]) -> Output<Self>;
    fn xor(&mut self, nodes: &[AstNode]) -> Output<Self>;
    fn not(&mut self, node: &AstNode) -> Output<Self>;

    fn abs(&mut self, node: &AstNode) -> Output<Self>;
    fn ceiling(&mut self, node: &AstNode) -> Output<Self>;
    fn floor(&mut self, node: &AstNode) -> Output<Self>;
    fn exp(&mut self, node: &AstNode) -> Output<Self>;
    fn factorial(&mut self, node: &AstNode) -> Output<Self>;
    fn ln(&mut self, node: &AstNode) -> Output<Self>;

    fn sin(&mut self, node: &AstNode) -> Output<Self>;
    fn cos(&mut self, node: &AstNode) -> Output<Self>;
    fn tan(&mut self, node: &AstNode) -> Output<Self>;
    fn sec(&mut self, node: &AstNode) -> Output<Self>;
    fn csc(&mut self, node: &AstNode) -> Output<Self>;
    fn cot(&mut self, node: &AstNode) -> Output<Self>;
    fn sinh(&mut self, node: &AstNode) -> Output<Self>;
    fn cosh(&mut self, node: &AstNode) -> Output<Self>;
    fn tanh(&mut self, node: &AstNode) -> Output<Self>;
    fn sech(&mut self, node: &AstNode) -> Output<Self>;
    fn csch(&mut self, node: &AstNode) -> Output<Self>;
    fn coth(&mut self, node: &AstNode) -> Output<Self>;
    fn arcsin(&mut self, node: &AstNode) -> Output<Self>;
    fn arccos(&mut self, node: &AstNode) -> Output<Self>;
    fn arctan(&mut self, node: &AstNode) -> Output<Self>;
    fn arcsec(&mut self, node: &AstNode) -> Output<Self>;
    fn arccsc(&mut self, node: &AstNode) -> Output<Self>;
    fn arccot(&mut self, node: &AstNode) -> Output<Self>;
    fn arcsinh(&mut self, node: &AstNode) -> Output<Self>;
    fn arccosh(&mut self, node: &AstNode) -> Output<Self>;
    fn arctanh(&mut self, node: &AstNode) -> Output<Self>;
    fn arcsech(&mut self, node: &AstNode) -> Output<Self>;
    fn arccsch(&mut self, node: &AstNode) -> Output<Self>;
    fn arccoth(&mut self, node: &AstNode) -> Output<Self>;

    fn integer(&mut self, value: i32, units: Option<&str>) -> Output<Self>;
    fn real(&mut self, value: f64, units: Option<&str>) -> Output<Self>;
    fn rational(&mut self, numerator: i32, denominator: i32, units: Option<&str>) -> Output<Self>;
    fn exponential(&mut self, mantissa: f64, exponent: i32, units: Option<&str>) -> Output<Self>;
    fn positive_infinity(&mut self) -> Output<Self>;
    fn negative_infinity(&mut self) -> Output<Self>;

    fn constant_e(&mut self) -> Output<Self>;
    fn constant_pi(&mut self) -> Output<Self>;
    fn constant_true(&mut self) -> Output<Self>;
    fn constant_false(&mut self) -> Output<Self>;
    fn constant_avogadro(&mut self, name: &str) -> Output<Self>;
    fn symbol_time(&mut self, name: &str) -> Output<Self>;
    fn name(&mut self, name: &str) -> Output<Self>;

    fn lambda(&mut self, nodes: &[AstNode]) -> Output<Self>;
    fn piecewise(&mut self, nodes: &[AstNode]) -> Output<Self>;
    fn function(&mut self, name: &str, args: &[AstNode]) -> Output<Self>;

    fn bvar(&mut self, nodes: &[AstNode]) -> Output<Self>;
    fn degree(&mut self, nodes: &[AstNode]) -> Output<Self>;
    fn logbase(&mut self, nodes: &[AstNode]) -> Output<Self>;
    fn piece(&mut self, nodes: &[AstNode]) -> Output<Self>;
    fn otherwise(&mut self, nodes: &[AstNode]) -> Output<Self>;

    /// Called for the unknown placeholder, and for any node the other methods don't cover.
    fn unknown_value(&mut self) -> Output<Self>;
}

impl AstNode {
    /// Renders this node through `compiler`.
    pub fn compile<C: Compiler + ?Sized>(&self, compiler: &mut C) -> Result<CompiledValue<C::Value>, AstError> {
        let node_type = self.node_type();
        trace!(?node_type, "compiling node");

        let value = self.dispatch(node_type, compiler)?;

        let container = self.container();
        Ok(CompiledValue {
            value,
            node_type,
            level: container.as_ref().map(|c| c.level()),
            version: container.as_ref().map(|c| c.version()),
        })
    }

    fn dispatch<C: Compiler + ?Sized>(&self, node_type: NodeType, c: &mut C) -> Output<C> {
        use NodeType::*;

        if self.is_sentinel() {
            return c.unknown_value();
        }

        match node_type {
            Plus => c.plus(&self.children()),
            Times => c.times(&self.children()),
            And => c.and(&self.children()),
            Or => c.or(&self.children()),
            Xor => c.xor(&self.children()),

            Minus if self.shape() == Shape::Unary => c.u_minus(&self.operand()?),
            Minus => {
                let (left, right) = self.binary_operands()?;
                c.minus(&[left, right])
            }
            Divide => {
                let (left, right) = self.binary_operands()?;
                c.frac(&left, &right)
            }
            Power => {
                let (left, right) = self.binary_operands()?;
                c.pow(&left, &right)
            }
            Root => {
                let (degree, radicand) = self.binary_operands()?;
                let degree = degree.qualified_value();
                if degree.is_literal(2) {
                    c.sqrt(&radicand)
                } else {
                    c.root(&degree, &radicand)
                }
            }
            Log => {
                let (base, value) = self.binary_operands()?;
                c.log(&base.qualified_value(), &value)
            }
            FunctionDelay => {
                let (x, delay) = self.binary_operands()?;
                c.delay(&self.name()?, &x, &delay)
            }

            Eq | Neq | Lt | Leq | Gt | Geq => {
                let (left, right) = self.binary_operands()?;
                match node_type {
                    Eq => c.eq(&left, &right),
                    Neq => c.neq(&left, &right),
                    Lt => c.lt(&left, &right),
                    Leq => c.leq(&left, &right),
                    Gt => c.gt(&left, &right),
                    _ => c.geq(&left, &right),
                }
            }

            Not => c.not(&self.operand()?),
            Abs => c.abs(&self.operand()?),
            Ceiling => c.ceiling(&self.operand()?),
            Floor => c.floor(&self.operand()?),
            Exp => c.exp(&self.operand()?),
            Factorial => c.factorial(&self.operand()?),
            Ln => c.ln(&self.operand()?),
            Sin => c.sin(&self.operand()?),
            Cos => c.cos(&self.operand()?),
            Tan => c.tan(&self.operand()?),
            Sec => c.sec(&self.operand()?),
            Csc => c.csc(&self.operand()?),
            Cot => c.cot(&self.operand()?),
            Sinh => c.sinh(&self.operand()?),
            Cosh => c.cosh(&self.operand()?),
            Tanh => c.tanh(&self.operand()?),
            Sech => c.sech(&self.operand()?),
            Csch => c.csch(&self.operand()?),
            Coth => c.coth(&self.operand()?),
            Arcsin => c.arcsin(&self.operand()?),
            Arccos => c.arccos(&self.operand()?),
            Arctan => c.arctan(&self.operand()?),
            Arcsec => c.arcsec(&self.operand()?),
            Arccsc => c.arccsc(&self.operand()?),
            Arccot => c.arccot(&self.operand()?),
            Arcsinh => c.arcsinh(&self.operand()?),
            Arccosh => c.arccosh(&self.operand()?),
            Arctanh => c.arctanh(&self.operand()?),
            Arcsech => c.arcsech(&self.operand()?),
            Arccsch => c.arccsch(&self.operand()?),
            Arccoth => c.arccoth(&self.operand()?),

            Integer => c.integer(self.integer_value()?, self.units_opt().as_deref()),
            Real => {
                let value = self.real_or_nan();
                if value == f64::INFINITY {
                    c.positive_infinity()
                } else if value == f64::NEG_INFINITY {
                    c.negative_infinity()
                } else {
                    c.real(value, self.units_opt().as_deref())
                }
            }
            Rational => c.rational(self.numerator()?, self.denominator()?, self.units_opt().as_deref()),
            RealE => c.exponential(self.mantissa()?, self.exponent()?, self.units_opt().as_deref()),

            ConstantE => c.constant_e(),
            ConstantPi => c.constant_pi(),
            ConstantTrue => c.constant_true(),
            ConstantFalse => c.constant_false(),

            Name => c.name(&self.name()?),
            NameTime => c.symbol_time(&self.name()?),
            NameAvogadro => c.constant_avogadro(&self.name()?),

            Lambda => c.lambda(&self.children()),
            Piecewise => c.piecewise(&self.children()),
            Function => c.function(&self.name()?, &self.children()),

            Bvar => c.bvar(&self.qualifier_operands()?),
            Degree => c.degree(&self.qualifier_operands()?),
            Logbase => c.logbase(&self.qualifier_operands()?),
            Piece => c.piece(&self.qualifier_operands()?),
            Otherwise => c.otherwise(&self.qualifier_operands()?),

            Unknown => c.unknown_value(),
        }
    }

    /// Both operands of a binary node, which must expose exactly two children.
    fn binary_operands(&self) -> Result<(AstNode, AstNode), AstError> {
        match self.children().as_slice() {
            [left, right] => Ok((left.clone(), right.clone())),
            other => Err(AstError::Arity { node_type: self.node_type(), expected: 2, found: other.len() }),
        }
    }

    /// The contents of a qualifier, which must be full: a value and a condition for
    /// `piece`, and a single child otherwise.
    fn qualifier_operands(&self) -> Result<Vec<AstNode>, AstError> {
        let children = self.children();
        let expected = self.max_children().unwrap_or(1);
        if children.len() != expected {
            return Err(AstError::Arity { node_type: self.node_type(), expected, found: children.len() });
        }
        Ok(children)
    }

    /// The operand of a unary node.
    fn operand(&self) -> Result<AstNode, AstError> {
        let children = self.children();
        children.first().cloned().ok_or(AstError::Arity {
            node_type: self.node_type(),
            expected: 1,
            found: children.len(),
        })
    }
}
