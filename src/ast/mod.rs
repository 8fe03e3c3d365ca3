pub mod block;
pub mod node;
pub mod position;
pub mod stmt;
