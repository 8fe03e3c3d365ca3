//! Static checks that run before a script executes.
//!
//! Everything reported here would also fail at runtime, but the checks walk
//! the whole tree instead of stopping at the first problem, so `check` can
//! report every finding in one pass.

use std::cmp::Ordering;
use std::fmt;

use crate::{
    ast::{block::Block, node::HasPos, position::Position, stmt::CallStmt},
    native::{registry::Registry, UNBOUNDED},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintError {
    pub pos: Position,
    pub message: String,
}

impl LintError {
    #[inline]
    pub fn new(pos: Position, message: impl Into<String>) -> Self {
        Self { pos, message: message.into() }
    }
}

impl Ord for LintError {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.pos.line, self.pos.column)
            .cmp(&(other.pos.line, other.pos.column))
            .then_with(|| self.message.cmp(&other.message))
    }
}
impl PartialOrd for LintError {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl fmt::Display for LintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} {}", self.pos.line, self.pos.column, self.message)
    }
}

/// Returns a flat, sorted list of findings (empty if OK).
pub fn check_block(reg: &Registry, block: &Block) -> Vec<LintError> {
    let mut errs = Vec::new();
    walk(reg, block, &mut errs);
    errs.sort();
    errs
}

fn walk(reg: &Registry, block: &Block, errs: &mut Vec<LintError>) {
    for call in &block.stmts {
        check_call(reg, call, errs);
        if let Some(inner) = &call.block {
            walk(reg, inner, errs);
        }
    }
}

fn check_call(reg: &Registry, call: &CallStmt, errs: &mut Vec<LintError>) {
    let (info, _) = match reg.get(&call.name) {
        Some(entry) => entry,
        None => {
            errs.push(LintError::new(
                call.pos(),
                format!("Unknown function `{}`", call.name),
            ));
            return;
        }
    };

    if !info.arity_ok(call.args.len()) {
        errs.push(LintError::new(
            call.pos(),
            format!(
                "`{}` called with {} arguments, expects {}",
                call.name,
                call.args.len(),
                arity_text(info.min_args, info.max_args),
            ),
        ));
    }

    if info.uses_block && call.block.is_none() {
        errs.push(LintError::new(
            call.pos(),
            format!("`{}` requires a `{{ ... }}` block", call.name),
        ));
    }
    if !info.uses_block && call.block.is_some() {
        errs.push(LintError::new(
            call.pos(),
            format!("`{}` does not take a block", call.name),
        ));
    }
}

fn arity_text(min: i32, max: i32) -> String {
    if min == max {
        format!("exactly {}", min)
    } else if max == UNBOUNDED {
        format!("at least {}", min)
    } else {
        format!("{} to {}", min, max)
    }
}
