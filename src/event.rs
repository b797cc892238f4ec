//! Change notification.
//!
//! Listeners are called synchronously from inside the mutating call, after the change
//! has been applied and with no borrow of the tree held, so they may read the node
//! they are told about. They must not mutate the tree they are observing.

use crate::{node::AstNode, node_type::NodeType};

/// Which attribute of a node changed.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum Property {
    Type,
    Strict,
    Id,
    Style,
    MathMlClass,
    Parent,
    Value,
    Numerator,
    Denominator,
    Mantissa,
    Exponent,
    Units,
    Name,
    DefinitionUrl,
    Encoding,
    BvarCount,
    PieceCount,
    Otherwise,
}

#[derive(PartialEq, Debug, Clone)]
pub enum PropertyValue {
    None,
    Bool(bool),
    Integer(i32),
    Real(f64),
    Count(usize),
    Text(String),
    Type(NodeType),
    Node(AstNode),
}

impl From<Option<String>> for PropertyValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(PropertyValue::None, PropertyValue::Text)
    }
}

impl From<Option<i32>> for PropertyValue {
    fn from(value: Option<i32>) -> Self {
        value.map_or(PropertyValue::None, PropertyValue::Integer)
    }
}

#[derive(Debug, Clone)]
pub struct ChangeEvent {
    /// The node whose property changed.
    pub source: AstNode,
    pub property: Property,
    pub old_value: PropertyValue,
    pub new_value: PropertyValue,
}

/// Receives notifications about changes to a tree.
///
/// A listener registered on a node is also registered on all of its descendants, and
/// on any node later added beneath it.
pub trait ChangeListener {
    fn property_changed(&self, event: &ChangeEvent);

    /// Called on the parent's listeners after `node` has been attached to it.
    fn node_added(&self, _node: &AstNode) {}

    /// Called on the parent's listeners after `node` has been detached from it.
    fn node_removed(&self, _node: &AstNode) {}
}
