#[macro_use]
mod util;

mod node_type;
mod tree;
mod latex;
mod builder;
mod number;
