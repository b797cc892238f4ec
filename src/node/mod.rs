//! Expression tree nodes.
//!
//! An [AstNode] is a cheap, shareable handle to one node of a tree. Cloning the handle
//! shares the node; [AstNode::deep_clone] copies the whole subtree. Children are owned by
//! their parent, and each node keeps non-owning links back to its parent and to the
//! [MathContainer] which anchors the tree in a document.
//!
//! Every node has a [Shape], which fixes both the node types it may take and how many
//! children it holds. Shape-specific operations live in [children] and [leaf].

use std::{cell::RefCell, fmt, rc::{Rc, Weak}};

use tracing::warn;

use crate::{
    container::MathContainer,
    error::AstError,
    event::{ChangeEvent, ChangeListener, Property, PropertyValue},
    node_type::NodeType,
};

mod shape;
pub mod children;
pub mod leaf;

pub use shape::Shape;
pub(crate) use shape::{NodeKind, Symbol};

pub(crate) struct NodeData {
    pub node_type: NodeType,
    pub strict: bool,
    pub id: Option<String>,
    pub style: Option<String>,
    pub math_ml_class: Option<String>,
    pub parent: Weak<RefCell<NodeData>>,
    pub container: Option<Weak<dyn MathContainer>>,
    pub listeners: Vec<Rc<dyn ChangeListener>>,
    pub sentinel: bool,
    pub children: Vec<AstNode>,
    pub kind: NodeKind,
}

impl NodeData {
    fn new(node_type: NodeType, kind: NodeKind) -> NodeData {
        NodeData {
            node_type,
            strict: true,
            id: None,
            style: None,
            math_ml_class: None,
            parent: Weak::new(),
            container: None,
            listeners: vec![],
            sentinel: false,
            children: vec![],
            kind,
        }
    }
}

thread_local! {
    static UNKNOWN: AstNode = {
        let mut data = NodeData::new(NodeType::Unknown, NodeKind::Unknown);
        data.sentinel = true;
        AstNode(Rc::new(RefCell::new(data)))
    };
}

/// A handle to a node of an expression tree.
///
/// Equality (`==`) is structural; use [AstNode::ptr_eq] to compare identity.
#[derive(Clone)]
pub struct AstNode(pub(crate) Rc<RefCell<NodeData>>);

impl AstNode {
    fn from_kind(node_type: NodeType, kind: NodeKind) -> AstNode {
        AstNode(Rc::new(RefCell::new(NodeData::new(node_type, kind))))
    }

    /// Creates an empty node of the given type, in its default shape.
    pub fn new(node_type: NodeType) -> AstNode {
        let shape = Shape::for_type(node_type);
        Self::from_kind(node_type, NodeKind::empty(shape, node_type))
    }

    /// Creates an empty node of the given shape and type.
    pub fn with_shape(shape: Shape, node_type: NodeType) -> Result<AstNode, AstError> {
        if !shape.allows(node_type) {
            return Err(AstError::InvalidType { node_type, shape });
        }
        Ok(Self::from_kind(node_type, NodeKind::empty(shape, node_type)))
    }

    pub fn integer(value: i32) -> AstNode {
        Self::from_kind(NodeType::Integer, NodeKind::Integer { value: Some(value), units: None })
    }

    pub fn real(value: f64) -> AstNode {
        Self::from_kind(NodeType::Real, NodeKind::Real { value, units: None })
    }

    pub fn rational(numerator: i32, denominator: i32) -> AstNode {
        Self::from_kind(NodeType::Rational, NodeKind::Rational {
            numerator: Some(numerator),
            denominator: Some(denominator),
            units: None,
        })
    }

    /// A number written in e-notation, `mantissa * 10^exponent`.
    pub fn exponential(mantissa: f64, exponent: i32) -> AstNode {
        Self::from_kind(NodeType::RealE, NodeKind::Exponential {
            mantissa,
            exponent: Some(exponent),
            units: None,
        })
    }

    pub fn ci(name: &str) -> AstNode {
        Self::from_kind(NodeType::Name, NodeKind::Ci(Symbol::named(name)))
    }

    pub fn time() -> AstNode {
        Self::new(NodeType::NameTime)
    }

    pub fn avogadro() -> AstNode {
        Self::new(NodeType::NameAvogadro)
    }

    pub fn constant_e() -> AstNode {
        Self::new(NodeType::ConstantE)
    }

    pub fn constant_pi() -> AstNode {
        Self::new(NodeType::ConstantPi)
    }

    pub fn boolean(value: bool) -> AstNode {
        Self::new(if value { NodeType::ConstantTrue } else { NodeType::ConstantFalse })
    }

    /// A call of the user-defined function `name`, with no arguments yet.
    pub fn function_call(name: &str) -> AstNode {
        Self::from_kind(NodeType::Function, NodeKind::FunctionCall(Symbol::named(name)))
    }

    /// The shared placeholder for absent or unrecognised nodes.
    ///
    /// Every call on the same thread returns the same node. It has no children, is never
    /// given a parent, and ignores attempts to modify it.
    pub fn unknown() -> AstNode {
        UNKNOWN.with(|n| n.clone())
    }

    /// Returns true if this is the shared unknown placeholder.
    pub fn is_sentinel(&self) -> bool {
        self.0.borrow().sentinel
    }

    /// Returns true if both handles refer to the same node.
    pub fn ptr_eq(&self, other: &AstNode) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn node_type(&self) -> NodeType {
        self.0.borrow().node_type
    }

    pub fn shape(&self) -> Shape {
        self.0.borrow().kind.shape()
    }

    /// Changes the type of this node, within the types its shape allows.
    pub fn set_type(&self, node_type: NodeType) -> Result<(), AstError> {
        let shape = self.shape();
        if !shape.allows(node_type) {
            return Err(AstError::InvalidType { node_type, shape });
        }
        let old = std::mem::replace(&mut self.0.borrow_mut().node_type, node_type);
        if old != node_type {
            self.fire_property_change(Property::Type, PropertyValue::Type(old), PropertyValue::Type(node_type));
        }
        Ok(())
    }

    pub fn is_strict(&self) -> bool {
        self.0.borrow().strict
    }

    /// Switches arity enforcement and undefined-property errors on or off for this node.
    pub fn set_strict(&self, strict: bool) {
        if self.ignore_on_sentinel("set_strict") {
            return;
        }
        let old = std::mem::replace(&mut self.0.borrow_mut().strict, strict);
        if old != strict {
            self.fire_property_change(Property::Strict, PropertyValue::Bool(old), PropertyValue::Bool(strict));
        }
    }

    pub fn id(&self) -> Result<String, AstError> {
        self.optional_attribute("id", |d| d.id.clone(), String::new())
    }

    pub fn is_set_id(&self) -> bool {
        self.0.borrow().id.is_some()
    }

    pub fn set_id(&self, id: &str) {
        self.set_attribute(Property::Id, Some(id.to_string()), |d| &mut d.id)
    }

    pub fn unset_id(&self) {
        self.set_attribute(Property::Id, None, |d| &mut d.id)
    }

    pub fn style(&self) -> Result<String, AstError> {
        self.optional_attribute("style", |d| d.style.clone(), String::new())
    }

    pub fn is_set_style(&self) -> bool {
        self.0.borrow().style.is_some()
    }

    pub fn set_style(&self, style: &str) {
        self.set_attribute(Property::Style, Some(style.to_string()), |d| &mut d.style)
    }

    pub fn unset_style(&self) {
        self.set_attribute(Property::Style, None, |d| &mut d.style)
    }

    /// The MathML `class` attribute.
    pub fn math_ml_class(&self) -> Result<String, AstError> {
        self.optional_attribute("class", |d| d.math_ml_class.clone(), String::new())
    }

    pub fn is_set_math_ml_class(&self) -> bool {
        self.0.borrow().math_ml_class.is_some()
    }

    pub fn set_math_ml_class(&self, class: &str) {
        self.set_attribute(Property::MathMlClass, Some(class.to_string()), |d| &mut d.math_ml_class)
    }

    pub fn unset_math_ml_class(&self) {
        self.set_attribute(Property::MathMlClass, None, |d| &mut d.math_ml_class)
    }

    pub fn parent(&self) -> Option<AstNode> {
        self.0.borrow().parent.upgrade().map(AstNode)
    }

    /// The container this node is anchored to, if it is still alive.
    pub fn container(&self) -> Option<Rc<dyn MathContainer>> {
        self.0.borrow().container.as_ref().and_then(|c| c.upgrade())
    }

    /// Anchors this node and all of its descendants to `container`. Only a weak reference
    /// is kept.
    pub fn set_container(&self, container: &Rc<dyn MathContainer>) {
        self.set_container_link(Some(Rc::downgrade(container)));
    }

    /// Removes the container anchor from this node and all of its descendants.
    pub fn unset_container(&self) {
        self.set_container_link(None);
    }

    pub(crate) fn set_container_link(&self, container: Option<Weak<dyn MathContainer>>) {
        if self.is_sentinel() {
            return;
        }
        let children = {
            let mut data = self.0.borrow_mut();
            data.container = container.clone();
            data.children.clone()
        };
        for child in children {
            child.set_container_link(container.clone());
        }
    }

    /// Registers a listener on this node and all of its descendants. Registering the same
    /// listener twice has no effect.
    pub fn add_listener(&self, listener: Rc<dyn ChangeListener>) {
        if self.is_sentinel() {
            return;
        }
        let children = {
            let mut data = self.0.borrow_mut();
            if !data.listeners.iter().any(|l| same_listener(l, &listener)) {
                data.listeners.push(listener.clone());
            }
            data.children.clone()
        };
        for child in children {
            child.add_listener(listener.clone());
        }
    }

    /// Unregisters a listener from this node and all of its descendants.
    pub fn remove_listener(&self, listener: &Rc<dyn ChangeListener>) {
        let children = {
            let mut data = self.0.borrow_mut();
            data.listeners.retain(|l| !same_listener(l, listener));
            data.children.clone()
        };
        for child in children {
            child.remove_listener(listener);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.0.borrow().listeners.len()
    }

    /// Recursively copies this subtree.
    ///
    /// The copy has the same types, values, attributes and container anchor, but no
    /// parent and no listeners. The unknown placeholder is never copied.
    pub fn deep_clone(&self) -> AstNode {
        if self.is_sentinel() {
            return self.clone();
        }

        let data = self.0.borrow();
        let copy = AstNode(Rc::new(RefCell::new(NodeData {
            node_type: data.node_type,
            strict: data.strict,
            id: data.id.clone(),
            style: data.style.clone(),
            math_ml_class: data.math_ml_class.clone(),
            parent: Weak::new(),
            container: data.container.clone(),
            listeners: vec![],
            sentinel: false,
            children: Vec::with_capacity(data.children.len()),
            kind: data.kind.clone(),
        })));

        for child in &data.children {
            let child_copy = child.deep_clone();
            if !child_copy.is_sentinel() {
                child_copy.0.borrow_mut().parent = Rc::downgrade(&copy.0);
            }
            copy.0.borrow_mut().children.push(child_copy);
        }

        copy
    }

    /// Notifies this node's listeners that a property has changed.
    pub(crate) fn fire_property_change(&self, property: Property, old_value: PropertyValue, new_value: PropertyValue) {
        let listeners = self.0.borrow().listeners.clone();
        if listeners.is_empty() {
            return;
        }

        let event = ChangeEvent { source: self.clone(), property, old_value, new_value };
        for listener in listeners {
            listener.property_changed(&event);
        }
    }

    pub(crate) fn fire_node_added(&self, node: &AstNode) {
        let listeners = self.0.borrow().listeners.clone();
        for listener in listeners {
            listener.node_added(node);
        }
    }

    pub(crate) fn fire_node_removed(&self, node: &AstNode) {
        let listeners = self.0.borrow().listeners.clone();
        for listener in listeners {
            listener.node_removed(node);
        }
    }

    /// Logs and returns true if this is the unknown placeholder, which must not change.
    pub(crate) fn ignore_on_sentinel(&self, operation: &'static str) -> bool {
        let sentinel = self.is_sentinel();
        if sentinel {
            warn!(operation, "ignoring modification of the unknown placeholder node");
        }
        sentinel
    }

    /// Reads an optional attribute. Unset attributes are an error on strict nodes, and
    /// fall back to `default` with a warning otherwise.
    pub(crate) fn optional_attribute<T>(
        &self,
        property: &'static str,
        read: impl FnOnce(&NodeData) -> Option<T>,
        default: T,
    ) -> Result<T, AstError> {
        let data = self.0.borrow();
        match read(&data) {
            Some(value) => Ok(value),
            None if data.strict => Err(AstError::PropertyUndefined { property, node_type: data.node_type }),
            None => {
                warn!(property, node_type = ?data.node_type, "reading undefined property, using default");
                Ok(default)
            }
        }
    }

    fn set_attribute(
        &self,
        property: Property,
        value: Option<String>,
        field: impl FnOnce(&mut NodeData) -> &mut Option<String>,
    ) {
        if self.ignore_on_sentinel("set_attribute") {
            return;
        }
        let old = std::mem::replace(field(&mut self.0.borrow_mut()), value.clone());
        self.fire_property_change(property, old.into(), value.into());
    }
}

fn same_listener(a: &Rc<dyn ChangeListener>, b: &Rc<dyn ChangeListener>) -> bool {
    Rc::as_ptr(a) as *const () == Rc::as_ptr(b) as *const ()
}

impl PartialEq for AstNode {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }

        let a = self.0.borrow();
        let b = other.0.borrow();
        a.node_type == b.node_type
            && a.strict == b.strict
            && a.id == b.id
            && a.style == b.style
            && a.math_ml_class == b.math_ml_class
            && a.kind == b.kind
            && a.children == b.children
    }
}

impl fmt::Debug for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0.borrow();
        let mut s = f.debug_struct("AstNode");
        s.field("type", &data.node_type).field("kind", &data.kind);
        if !data.strict {
            s.field("strict", &false);
        }
        if !data.children.is_empty() {
            s.field("children", &data.children);
        }
        s.finish()
    }
}
