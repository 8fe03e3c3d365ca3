pub mod ast;
pub mod builtins;
pub mod evaluator;
pub mod lint;
pub mod native;
pub mod parser;
