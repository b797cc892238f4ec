//! Child list operations, and the arity policy that goes with them.
//!
//! A strict node refuses to grow past [Shape::max_children]. A lenient node accepts any
//! number of children, but a strict node only ever reports (and hands out) up to its
//! maximum, so re-enabling strictness never exposes extra children.

use std::rc::{Rc, Weak};

use tracing::debug;

use crate::{
    error::AstError,
    event::{Property, PropertyValue},
    node_type::NodeType,
};

use super::{AstNode, NodeKind, Shape};

impl AstNode {
    pub(crate) fn max_children(&self) -> Option<usize> {
        let data = self.0.borrow();
        data.kind.shape().max_children(data.node_type)
    }

    /// The number of children this node exposes. For strict nodes this is capped at the
    /// shape's maximum.
    pub fn child_count(&self) -> usize {
        let count = self.0.borrow().children.len();
        match self.max_children() {
            Some(max) if self.is_strict() => count.min(max),
            _ => count,
        }
    }

    /// The children this node exposes, in order.
    pub fn children(&self) -> Vec<AstNode> {
        let count = self.child_count();
        self.0.borrow().children[..count].to_vec()
    }

    pub fn is_leaf(&self) -> bool {
        self.shape().is_leaf()
    }

    pub fn get_child_at(&self, index: usize) -> Result<AstNode, AstError> {
        let count = self.child_count();
        if index >= count {
            return Err(AstError::Index { index, count });
        }
        Ok(self.0.borrow().children[index].clone())
    }

    /// The position of `child` among this node's children, compared by identity.
    pub fn index_of(&self, child: &AstNode) -> Option<usize> {
        self.0.borrow().children.iter().position(|c| c.ptr_eq(child))
    }

    /// Appends a child.
    pub fn add_child(&self, child: &AstNode) -> Result<(), AstError> {
        let mut index = self.0.borrow().children.len();
        if self.is_moving_within(child) {
            index -= 1;
        }
        self.insert_child(index, child)
    }

    pub fn prepend_child(&self, child: &AstNode) -> Result<(), AstError> {
        self.insert_child(0, child)
    }

    /// Inserts a child at `index`, which counts positions after `child` has been detached
    /// from wherever it currently is.
    ///
    /// Fails if this node is a leaf, if it is strict and already full, or if `child` is
    /// this node or one of its ancestors.
    pub fn insert_child(&self, index: usize, child: &AstNode) -> Result<(), AstError> {
        self.check_can_adopt(child)?;

        let mut count = self.0.borrow().children.len();
        if self.is_moving_within(child) {
            count -= 1;
        }

        if let Some(max) = self.max_children() {
            if count >= max {
                if self.is_strict() {
                    return Err(AstError::Arity { node_type: self.node_type(), expected: max, found: count + 1 });
                }
                debug!(node_type = ?self.node_type(), max, "exceeding child limit on lenient node");
            }
        }

        if index > count {
            return Err(AstError::Index { index, count });
        }

        child.detach();
        self.attach(index, child);
        Ok(())
    }

    /// Detaches and returns the child at `index`. The removed child loses its parent and
    /// container links, and becomes a free subtree.
    ///
    /// Children hidden by a strict node's cap can't be removed by position.
    pub fn remove_child(&self, index: usize) -> Option<AstNode> {
        if index >= self.child_count() {
            return None;
        }
        self.remove_at(index)
    }

    fn remove_at(&self, index: usize) -> Option<AstNode> {
        let removed = {
            let mut data = self.0.borrow_mut();
            if index >= data.children.len() {
                return None;
            }
            data.children.remove(index)
        };

        if !removed.is_sentinel() {
            removed.0.borrow_mut().parent = Weak::new();
            removed.unset_container();
            removed.fire_property_change(Property::Parent, PropertyValue::Node(self.clone()), PropertyValue::None);
        }

        self.recount();
        self.fire_node_removed(&removed);
        Some(removed)
    }

    /// Puts `child` in place of the child at `index`, returning the one it replaced.
    pub fn replace_child(&self, index: usize, child: &AstNode) -> Result<AstNode, AstError> {
        self.check_can_adopt(child)?;

        let count = self.child_count();
        if index >= count {
            return Err(AstError::Index { index, count });
        }

        let mut index = index;
        if let Some(current) = self.index_of(child).filter(|_| !child.is_sentinel()) {
            if current == index {
                return Ok(child.clone());
            }
            if current < index {
                index -= 1;
            }
        }

        child.detach();
        let old = self.remove_at(index).ok_or(AstError::Index { index, count })?;
        self.attach(index, child);
        Ok(old)
    }

    /// Removes this node from its parent, if it has one.
    pub fn detach(&self) {
        if let Some(parent) = self.parent() {
            if let Some(index) = parent.index_of(self) {
                debug!(node_type = ?self.node_type(), "detaching node from its previous parent");
                parent.remove_at(index);
            }
        }
    }

    /// Returns true if `child` is already one of this node's children, and so will be
    /// detached from this node before being re-inserted.
    fn is_moving_within(&self, child: &AstNode) -> bool {
        !child.is_sentinel() && self.index_of(child).is_some()
    }

    fn check_can_adopt(&self, child: &AstNode) -> Result<(), AstError> {
        if self.is_leaf() {
            return Err(AstError::ChildrenNotAllowed { node_type: self.node_type() });
        }

        let mut ancestor = Some(self.clone());
        while let Some(node) = ancestor {
            if node.ptr_eq(child) {
                return Err(AstError::Cycle);
            }
            ancestor = node.parent();
        }

        Ok(())
    }

    /// Links an already-detached child in at `index`, passing on this node's container
    /// and listeners.
    fn attach(&self, index: usize, child: &AstNode) {
        let (container, listeners) = {
            let mut data = self.0.borrow_mut();
            data.children.insert(index, child.clone());
            (data.container.clone(), data.listeners.clone())
        };

        // The placeholder is shared between trees, so it never takes a parent
        if !child.is_sentinel() {
            child.0.borrow_mut().parent = Rc::downgrade(&self.0);
            if container.is_some() {
                child.set_container_link(container);
            }
            for listener in listeners {
                child.add_listener(listener);
            }
            child.fire_property_change(Property::Parent, PropertyValue::None, PropertyValue::Node(self.clone()));
        }

        self.recount();
        self.fire_node_added(child);
    }

    /// Brings the bound-variable and piece counts of lambdas and piecewise nodes back in
    /// line with their children.
    fn recount(&self) {
        let counted: Vec<NodeType> = self.0.borrow().children.iter().map(|c| c.node_type()).collect();
        let bvars = counted.iter().filter(|t| **t == NodeType::Bvar).count();
        let pieces = counted.iter().filter(|t| **t == NodeType::Piece).count();
        let otherwise = counted.contains(&NodeType::Otherwise);

        let mut changes = vec![];
        {
            let mut data = self.0.borrow_mut();
            match &mut data.kind {
                NodeKind::Lambda { bvar_count } if *bvar_count != bvars => {
                    changes.push((Property::BvarCount, PropertyValue::Count(*bvar_count), PropertyValue::Count(bvars)));
                    *bvar_count = bvars;
                }
                NodeKind::Piecewise { piece_count, has_otherwise } => {
                    if *piece_count != pieces {
                        changes.push((Property::PieceCount, PropertyValue::Count(*piece_count), PropertyValue::Count(pieces)));
                        *piece_count = pieces;
                    }
                    if *has_otherwise != otherwise {
                        changes.push((Property::Otherwise, PropertyValue::Bool(*has_otherwise), PropertyValue::Bool(otherwise)));
                        *has_otherwise = otherwise;
                    }
                }
                _ => (),
            }
        }

        for (property, old, new) in changes {
            self.fire_property_change(property, old, new);
        }
    }

    fn expect_shape(&self, shape: Shape, operation: &'static str) -> Result<(), AstError> {
        if self.shape() == shape {
            Ok(())
        } else {
            Err(AstError::Unsupported { operation, node_type: self.node_type() })
        }
    }

    /// The two operands of a binary node.
    ///
    /// A strict node must expose exactly two children. A lenient one only needs one, and
    /// its right operand is its last child.
    fn operands(&self, operation: &'static str) -> Result<(AstNode, AstNode), AstError> {
        self.expect_shape(Shape::Binary, operation)?;

        let children = self.children();
        if self.is_strict() && children.len() != 2 {
            return Err(AstError::Arity { node_type: self.node_type(), expected: 2, found: children.len() });
        }
        match (children.first(), children.last()) {
            (Some(left), Some(right)) => Ok((left.clone(), right.clone())),
            _ => Err(AstError::Index { index: 0, count: 0 }),
        }
    }

    pub fn left_child(&self) -> Result<AstNode, AstError> {
        self.operands("left_child").map(|(left, _)| left)
    }

    pub fn right_child(&self) -> Result<AstNode, AstError> {
        self.operands("right_child").map(|(_, right)| right)
    }

    /// Replaces the left operand, or adds it if there are no children yet.
    pub fn set_left_child(&self, child: &AstNode) -> Result<(), AstError> {
        self.expect_shape(Shape::Binary, "set_left_child")?;
        if self.child_count() >= 1 {
            self.replace_child(0, child).map(|_| ())
        } else {
            self.add_child(child)
        }
    }

    /// Replaces the right operand, or adds it if there is no right operand yet.
    pub fn set_right_child(&self, child: &AstNode) -> Result<(), AstError> {
        self.expect_shape(Shape::Binary, "set_right_child")?;
        let count = self.child_count();
        if count >= 2 {
            self.replace_child(count - 1, child).map(|_| ())
        } else {
            self.add_child(child)
        }
    }

    /// The operand of a unary node.
    pub fn child(&self) -> Result<AstNode, AstError> {
        self.expect_shape(Shape::Unary, "child")?;
        self.get_child_at(0)
    }

    pub fn set_child(&self, child: &AstNode) -> Result<(), AstError> {
        self.expect_shape(Shape::Unary, "set_child")?;
        if self.child_count() >= 1 {
            self.replace_child(0, child).map(|_| ())
        } else {
            self.add_child(child)
        }
    }

    /// Wraps `child` in a new qualifier node of the given type.
    pub fn qualifier(node_type: NodeType, child: &AstNode) -> Result<AstNode, AstError> {
        let qualifier = AstNode::with_shape(Shape::Qualifier, node_type)?;
        qualifier.add_child(child)?;
        Ok(qualifier)
    }

    /// A `piece` qualifier holding a value and the condition under which it applies.
    pub fn piece(value: &AstNode, condition: &AstNode) -> Result<AstNode, AstError> {
        let piece = AstNode::qualifier(NodeType::Piece, value)?;
        piece.add_child(condition)?;
        Ok(piece)
    }

    pub fn bvar_count(&self) -> Result<usize, AstError> {
        match self.0.borrow().kind {
            NodeKind::Lambda { bvar_count } => Ok(bvar_count),
            _ => Err(AstError::Unsupported { operation: "bvar_count", node_type: self.node_type() }),
        }
    }

    /// Adds a bound variable to a lambda, after any existing ones and before the body.
    /// Nodes which aren't already a `bvar` qualifier are wrapped in one.
    pub fn add_bvar(&self, variable: &AstNode) -> Result<(), AstError> {
        let index = self.bvar_count()?;
        let bvar = if variable.node_type() == NodeType::Bvar {
            variable.clone()
        } else {
            // Checked before wrapping, which detaches the variable
            self.check_can_adopt(variable)?;
            AstNode::qualifier(NodeType::Bvar, variable)?
        };
        self.insert_child(index, &bvar)
    }

    /// The body of a lambda: its first child after the bound variables.
    pub fn body(&self) -> Result<AstNode, AstError> {
        let index = self.bvar_count()?;
        self.get_child_at(index)
    }

    pub fn set_body(&self, body: &AstNode) -> Result<(), AstError> {
        let index = self.bvar_count()?;
        if self.child_count() > index {
            self.replace_child(index, body).map(|_| ())
        } else {
            self.add_child(body)
        }
    }

    pub fn piece_count(&self) -> Result<usize, AstError> {
        match self.0.borrow().kind {
            NodeKind::Piecewise { piece_count, .. } => Ok(piece_count),
            _ => Err(AstError::Unsupported { operation: "piece_count", node_type: self.node_type() }),
        }
    }

    pub fn has_otherwise(&self) -> Result<bool, AstError> {
        match self.0.borrow().kind {
            NodeKind::Piecewise { has_otherwise, .. } => Ok(has_otherwise),
            _ => Err(AstError::Unsupported { operation: "has_otherwise", node_type: self.node_type() }),
        }
    }

    fn otherwise_index(&self) -> Option<usize> {
        self.0.borrow().children.iter().position(|c| c.node_type() == NodeType::Otherwise)
    }

    /// Adds a case to a piecewise node, ahead of its `otherwise` case if it has one.
    pub fn add_piece(&self, value: &AstNode, condition: &AstNode) -> Result<(), AstError> {
        self.piece_count()?;
        self.check_can_adopt(value)?;
        self.check_can_adopt(condition)?;
        let piece = AstNode::piece(value, condition)?;
        match self.otherwise_index() {
            Some(index) => self.insert_child(index, &piece),
            None => self.add_child(&piece),
        }
    }

    /// Sets the fallback value of a piecewise node, replacing any existing one.
    pub fn set_otherwise(&self, value: &AstNode) -> Result<(), AstError> {
        self.piece_count()?;
        self.check_can_adopt(value)?;
        let otherwise = AstNode::qualifier(NodeType::Otherwise, value)?;
        match self.otherwise_index() {
            Some(index) => self.replace_child(index, &otherwise).map(|_| ()),
            None => self.add_child(&otherwise),
        }
    }

    /// The children of this node which `filter` accepts, in order.
    pub fn children_matching<F: Fn(&AstNode) -> bool>(&self, filter: F) -> Vec<AstNode> {
        self.children().into_iter().filter(|c| filter(c)).collect()
    }

    /// Substitutes a copy of `argument` for every identifier called `name` below this
    /// node, returning how many were replaced. Bound variable declarations are left alone.
    pub fn replace_argument(&self, name: &str, argument: &AstNode) -> Result<usize, AstError> {
        let mut replaced = 0;
        for (index, child) in self.children().iter().enumerate() {
            match child.node_type() {
                NodeType::Name if child.name().map_or(false, |n| n == name) => {
                    self.replace_child(index, &argument.deep_clone())?;
                    replaced += 1;
                }
                NodeType::Bvar => (),
                _ if !child.is_leaf() => replaced += child.replace_argument(name, argument)?,
                _ => (),
            }
        }
        Ok(replaced)
    }

    /// The node a `degree` or `logbase` qualifier stands for. Any other node stands for
    /// itself.
    pub(crate) fn qualified_value(&self) -> AstNode {
        match self.node_type() {
            NodeType::Degree | NodeType::Logbase => self.get_child_at(0).unwrap_or_else(|_| self.clone()),
            _ => self.clone(),
        }
    }

    /// Returns true if this is a root of degree 2, given either directly or through a
    /// `degree` qualifier.
    pub fn is_sqrt(&self) -> bool {
        self.node_type() == NodeType::Root
            && self.child_count() == 2
            && self.get_child_at(0).map_or(false, |degree| degree.qualified_value().is_literal(2))
    }

    /// Returns true if this is a `minus` with a single operand.
    pub fn is_u_minus(&self) -> bool {
        self.node_type() == NodeType::Minus && self.child_count() == 1
    }

    /// Counts the nodes of the given type in this subtree, including this node.
    pub fn count_type(&self, node_type: NodeType) -> usize {
        let own = if self.node_type() == node_type { 1 } else { 0 };
        own + self.children().iter().map(|c| c.count_type(node_type)).sum::<usize>()
    }
}
