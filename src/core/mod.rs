pub mod ast;

pub use ast::{Block, Document, InlineNode};
