use std::cell::RefCell;

use crate::{AstNode, ChangeEvent, ChangeListener, Property, PropertyValue};

macro_rules! int {
    ($v:expr) => { crate::AstNode::integer($v) };
}

macro_rules! real {
    ($v:expr) => { crate::AstNode::real($v) };
}

macro_rules! ci {
    ($name:ident) => { crate::AstNode::ci(stringify!($name)) };
}

/// Builds an operator node of the given type holding the given children.
macro_rules! op {
    ($t:ident $(, $c:expr)* $(,)?) => { {
        let node = crate::AstNode::new(crate::NodeType::$t);
        $( node.add_child(&$c).unwrap(); )*
        node
    } };
}

macro_rules! formula {
    ($n:expr) => { $n.to_formula().unwrap() };
}

macro_rules! latex {
    ($n:expr) => { $n.to_latex().unwrap() };
}

macro_rules! math_ml {
    ($n:expr) => { {
        let mut compiler = crate::compilers::MathMlCompiler::default();
        compiler.emit(&$n).unwrap();
        compiler.into_output()
    } };
}

/// Records every notification it receives.
#[derive(Default)]
pub struct RecordingListener {
    pub changes: RefCell<Vec<(Property, PropertyValue, PropertyValue)>>,
    pub added: RefCell<Vec<AstNode>>,
    pub removed: RefCell<Vec<AstNode>>,
}

impl RecordingListener {
    pub fn properties(&self) -> Vec<Property> {
        self.changes.borrow().iter().map(|(p, _, _)| *p).collect()
    }

    pub fn changes_of(&self, property: Property) -> Vec<(PropertyValue, PropertyValue)> {
        self.changes.borrow().iter()
            .filter(|(p, _, _)| *p == property)
            .map(|(_, old, new)| (old.clone(), new.clone()))
            .collect()
    }
}

impl ChangeListener for RecordingListener {
    fn property_changed(&self, event: &ChangeEvent) {
        self.changes.borrow_mut().push((event.property, event.old_value.clone(), event.new_value.clone()));
    }

    fn node_added(&self, node: &AstNode) {
        self.added.borrow_mut().push(node.clone());
    }

    fn node_removed(&self, node: &AstNode) {
        self.removed.borrow_mut().push(node.clone());
    }
}

/// `k * (S1 + S2) / V`, a typical rate law.
pub fn rate_law() -> AstNode {
    op!(Divide,
        op!(Times, ci!(k), op!(Plus, ci!(S1), ci!(S2))),
        ci!(V),
    )
}
