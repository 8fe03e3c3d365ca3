use crate::ast::{block::Block, node::HasPos, position::Position};

/// One statement: a call to a named builtin.
///
/// Arguments are kept as the raw source text between the commas. Whether a
/// piece of text is a literal, a `$name` reference, or a mix is decided by
/// whichever builtin evaluates it, never by the parser.
#[derive(Debug, Clone)]
pub struct CallStmt {
    pub name: String,
    pub args: Vec<String>,
    /// Trailing `{ ... }` block, if the call site wrote one.
    pub block: Option<Block>,
    pub pos: Position,
}

impl HasPos for CallStmt {
    #[inline]
    fn pos(&self) -> Position {
        self.pos
    }
}
