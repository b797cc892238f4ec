//! Abstract syntax trees for content MathML.
//!
//! Trees are built from [AstNode]s, which enforce the arity of their node type, notify
//! registered [ChangeListener]s of every change, and render themselves through a
//! [Compiler]. Formula text, LaTeX and MathML compilers are provided in [compilers].

pub mod error;
pub mod node_type;
pub mod container;
pub mod event;
pub mod node;
pub mod compile;
pub mod compilers;
pub mod builder;
pub mod number;

#[cfg(test)]
mod tests;

pub use crate::{
    error::AstError,
    node_type::NodeType,
    container::{MathContainer, DocumentVersion},
    event::{ChangeEvent, ChangeListener, Property, PropertyValue},
    node::{AstNode, Shape},
    compile::{Compiler, CompiledValue},
};

pub const VERSION: &'static str = env!("CARGO_PKG_VERSION");
