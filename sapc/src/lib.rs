pub mod ast;
pub mod codegen;
pub mod emit;
pub mod error;
pub mod inst;
pub mod label;
pub mod optimize;
pub mod symbol;

pub use ast::{parse_tree, Module};
pub use codegen::{compile, Compiler};
pub use emit::Program;
pub use error::Error;
