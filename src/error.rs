use thiserror::Error;

use crate::{node::Shape, node_type::NodeType};

/// Every failure the tree and its compilers can report.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AstError {
    /// A node of this type requires a fixed number of children and didn't get it.
    #[error("{node_type:?} node expects {expected} children, but has {found}")]
    Arity { node_type: NodeType, expected: usize, found: usize },

    #[error("child index {index} out of range for a node with {count} children")]
    Index { index: usize, count: usize },

    /// An optional attribute was read before being set, on a strict node.
    #[error("property `{property}` is not defined on this {node_type:?} node")]
    PropertyUndefined { property: &'static str, node_type: NodeType },

    #[error("type {node_type:?} is not allowed for {shape:?} nodes")]
    InvalidType { node_type: NodeType, shape: Shape },

    #[error("{node_type:?} nodes cannot have children")]
    ChildrenNotAllowed { node_type: NodeType },

    #[error("a node cannot become a descendant of itself")]
    Cycle,

    #[error("the unknown placeholder node cannot be rendered")]
    UnknownNode,

    #[error("`{operation}` is not supported for {node_type:?} nodes")]
    Unsupported { operation: &'static str, node_type: NodeType },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
