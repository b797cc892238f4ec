//! Functions which build new subtrees out of existing ones.
//!
//! Every operand is deep-copied into the result, so the inputs keep their parents and
//! can go on being used. The results are ordinary strict nodes.

use crate::{
    error::AstError,
    node::{AstNode, Shape},
    node_type::NodeType,
};

/// A new node of `node_type` and `shape`, holding copies of `operands`.
fn build(shape: Shape, node_type: NodeType, operands: &[&AstNode]) -> Result<AstNode, AstError> {
    let node = AstNode::with_shape(shape, node_type)?;
    for operand in operands {
        node.add_child(&operand.deep_clone())?;
    }
    Ok(node)
}

fn n_ary(node_type: NodeType, operands: &[AstNode]) -> Result<AstNode, AstError> {
    let operands = operands.iter().collect::<Vec<_>>();
    build(Shape::NAry, node_type, &operands)
}

fn binary(node_type: NodeType, left: &AstNode, right: &AstNode) -> Result<AstNode, AstError> {
    build(Shape::Binary, node_type, &[left, right])
}

fn unary(node_type: NodeType, operand: &AstNode) -> Result<AstNode, AstError> {
    build(Shape::Unary, node_type, &[operand])
}

pub fn plus(left: &AstNode, right: &AstNode) -> Result<AstNode, AstError> {
    build(Shape::NAry, NodeType::Plus, &[left, right])
}

pub fn times(left: &AstNode, right: &AstNode) -> Result<AstNode, AstError> {
    build(Shape::NAry, NodeType::Times, &[left, right])
}

/// `terms[0] + terms[1] + ...`
pub fn sum(terms: &[AstNode]) -> Result<AstNode, AstError> {
    n_ary(NodeType::Plus, terms)
}

/// `factors[0] * factors[1] * ...`
pub fn product(factors: &[AstNode]) -> Result<AstNode, AstError> {
    n_ary(NodeType::Times, factors)
}

pub fn minus(left: &AstNode, right: &AstNode) -> Result<AstNode, AstError> {
    binary(NodeType::Minus, left, right)
}

/// Negation, `-operand`.
pub fn u_minus(operand: &AstNode) -> Result<AstNode, AstError> {
    unary(NodeType::Minus, operand)
}

pub fn divide(numerator: &AstNode, denominator: &AstNode) -> Result<AstNode, AstError> {
    binary(NodeType::Divide, numerator, denominator)
}

/// `numerator / denominator` as a division of two integers, rather than a rational.
pub fn frac_int(numerator: i32, denominator: i32) -> Result<AstNode, AstError> {
    divide(&AstNode::integer(numerator), &AstNode::integer(denominator))
}

pub fn power(base: &AstNode, exponent: &AstNode) -> Result<AstNode, AstError> {
    binary(NodeType::Power, base, exponent)
}

pub fn power_int(base: &AstNode, exponent: i32) -> Result<AstNode, AstError> {
    power(base, &AstNode::integer(exponent))
}

/// The `degree`th root of `radicand`.
pub fn root(degree: &AstNode, radicand: &AstNode) -> Result<AstNode, AstError> {
    binary(NodeType::Root, degree, radicand)
}

pub fn sqrt(radicand: &AstNode) -> Result<AstNode, AstError> {
    root(&AstNode::integer(2), radicand)
}

/// The base 10 logarithm.
pub fn log(value: &AstNode) -> Result<AstNode, AstError> {
    log_base(&AstNode::integer(10), value)
}

pub fn log_base(base: &AstNode, value: &AstNode) -> Result<AstNode, AstError> {
    binary(NodeType::Log, base, value)
}

pub fn exp(exponent: &AstNode) -> Result<AstNode, AstError> {
    unary(NodeType::Exp, exponent)
}

/// The value of `x` delayed by `delay` time units.
pub fn delay(x: &AstNode, delay: &AstNode) -> Result<AstNode, AstError> {
    binary(NodeType::FunctionDelay, x, delay)
}

/// Compares `left` and `right` with the relational operator `node_type`.
pub fn relational(node_type: NodeType, left: &AstNode, right: &AstNode) -> Result<AstNode, AstError> {
    if !node_type.is_relational() {
        return Err(AstError::InvalidArgument(format!("{:?} is not a relational operator", node_type)));
    }
    binary(node_type, left, right)
}

pub fn eq(left: &AstNode, right: &AstNode) -> Result<AstNode, AstError> {
    relational(NodeType::Eq, left, right)
}

pub fn neq(left: &AstNode, right: &AstNode) -> Result<AstNode, AstError> {
    relational(NodeType::Neq, left, right)
}

pub fn lt(left: &AstNode, right: &AstNode) -> Result<AstNode, AstError> {
    relational(NodeType::Lt, left, right)
}

pub fn leq(left: &AstNode, right: &AstNode) -> Result<AstNode, AstError> {
    relational(NodeType::Leq, left, right)
}

pub fn gt(left: &AstNode, right: &AstNode) -> Result<AstNode, AstError> {
    relational(NodeType::Gt, left, right)
}

pub fn geq(left: &AstNode, right: &AstNode) -> Result<AstNode, AstError> {
    relational(NodeType::Geq, left, right)
}

pub fn and(operands: &[AstNode]) -> Result<AstNode, AstError> {
    n_ary(NodeType::And, operands)
}

pub fn or(operands: &[AstNode]) -> Result<AstNode, AstError> {
    n_ary(NodeType::Or, operands)
}

pub fn xor(operands: &[AstNode]) -> Result<AstNode, AstError> {
    n_ary(NodeType::Xor, operands)
}

pub fn not(operand: &AstNode) -> Result<AstNode, AstError> {
    unary(NodeType::Not, operand)
}

/// A piecewise function of `(value, condition)` cases, tried in order, with an optional
/// fallback value.
pub fn piecewise(pieces: &[(AstNode, AstNode)], otherwise: Option<&AstNode>) -> Result<AstNode, AstError> {
    let node = AstNode::new(NodeType::Piecewise);
    for (value, condition) in pieces {
        node.add_piece(&value.deep_clone(), &condition.deep_clone())?;
    }
    if let Some(value) = otherwise {
        node.set_otherwise(&value.deep_clone())?;
    }
    Ok(node)
}

/// A lambda binding `variables` over `body`.
pub fn lambda(variables: &[AstNode], body: &AstNode) -> Result<AstNode, AstError> {
    let node = AstNode::new(NodeType::Lambda);
    for variable in variables {
        node.add_bvar(&variable.deep_clone())?;
    }
    node.set_body(&body.deep_clone())?;
    Ok(node)
}

/// Counts the nodes of `node_type` in the subtree rooted at `node`.
pub fn count_type(node: &AstNode, node_type: NodeType) -> usize {
    node.count_type(node_type)
}

/// Rewrites an n-ary associative operator as nested binary applications of the same
/// operator, folding from the left: `and(x, y, z)` becomes `and(and(x, y), z)`.
///
/// Only `plus`, `times`, `and`, `or` and `xor` can be reduced. Operands are copied and
/// not reduced themselves. A node with two or fewer operands comes back as a copy.
pub fn reduce_to_binary(node: &AstNode) -> Result<AstNode, AstError> {
    let node_type = node.node_type();
    if node.shape() != Shape::NAry {
        return Err(AstError::Unsupported { operation: "reduce_to_binary", node_type });
    }

    let operands = node.children();
    if operands.len() <= 2 {
        return Ok(node.deep_clone());
    }

    let mut reduced = build(Shape::NAry, node_type, &[&operands[0], &operands[1]])?;
    for operand in &operands[2..] {
        let next = AstNode::with_shape(Shape::NAry, node_type)?;
        next.add_child(&reduced)?;
        next.add_child(&operand.deep_clone())?;
        reduced = next;
    }
    Ok(reduced)
}
