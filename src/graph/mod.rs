//! Procedure call graph resolution and tree output

mod printer;
mod resolver;

pub use printer::{render_tree, TreePrinter, TreeStyle};
pub use resolver::CallGraphResolver;
