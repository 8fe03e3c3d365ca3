use crate::ast::{node::HasPos, position::Position, stmt::CallStmt};

/// A sequence of call statements: the whole script, or a `{ ... }` block
/// attached to a call site.
#[derive(Debug, Clone)]
pub struct Block {
    pub stmts: Vec<CallStmt>,
    pub pos: Position, // position of the opening brace or start of script
}

impl Block {
    #[inline]
    pub fn new(stmts: Vec<CallStmt>, pos: Position) -> Self {
        Self { stmts, pos }
    }
}

impl HasPos for Block {
    #[inline]
    fn pos(&self) -> Position {
        self.pos
    }
}
