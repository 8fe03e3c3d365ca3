use std::fmt;

use crate::ast::position::Position;
use crate::evaluator::expr::ExprError;

/// Everything that can go wrong between "statement resolved" and "builtin
/// returned". The first four are raised by the driver before an entry point
/// runs and carry the call site; the rest are raised inside the protocol and
/// name the builtin instead.
#[derive(Debug)]
pub enum EvalError {
    UnknownFunction(String, Position),
    WrongArgCount {
        func: String,
        found: usize,
        min: i32,
        max: i32,
        pos: Position,
    },
    MissingBlock(String, Position),
    DepthLimit(usize, Position),
    DuplicateFunction(String),
    /// An argument could not be resolved to a value; the evaluator's own
    /// error rides along unchanged.
    Evaluation {
        func: String,
        expr: String,
        reason: ExprError,
    },
    ExpectedNumeric {
        func: String,
        what: String,
    },
    DivisionByZero(String),
    General(String),
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::UnknownFunction(name, pos) => {
                write!(f, "Unknown function '{}', at: {}:{}", name, pos.line, pos.column)
            }
            EvalError::WrongArgCount {
                func,
                found,
                min,
                max,
                pos,
            } => {
                if min == max {
                    write!(
                        f,
                        "'{}()' expects exactly {} arguments, got {}, at: {}:{}",
                        func, min, found, pos.line, pos.column
                    )
                } else if *max == -1 {
                    write!(
                        f,
                        "'{}()' expects at least {} arguments, got {}, at: {}:{}",
                        func, min, found, pos.line, pos.column
                    )
                } else {
                    write!(
                        f,
                        "'{}()' expects {} to {} arguments, got {}, at: {}:{}",
                        func, min, max, found, pos.line, pos.column
                    )
                }
            }
            EvalError::MissingBlock(func, pos) => {
                write!(
                    f,
                    "Function '{}' requires a block, at: {}:{}",
                    func, pos.line, pos.column
                )
            }
            EvalError::DepthLimit(limit, pos) => {
                write!(
                    f,
                    "Nesting depth limit of {} exceeded, at: {}:{}",
                    limit, pos.line, pos.column
                )
            }
            EvalError::DuplicateFunction(name) => {
                write!(f, "Function '{}' already registered", name)
            }
            EvalError::Evaluation { func, expr, reason } => {
                write!(
                    f,
                    "Function '{}' failed while evaluating '{}': {}",
                    func, expr, reason
                )
            }
            EvalError::ExpectedNumeric { func, what } => {
                write!(
                    f,
                    "Function '{}': expected '{}' to contain a number",
                    func, what
                )
            }
            EvalError::DivisionByZero(func) => {
                write!(f, "Division by zero in '{}()'", func)
            }
            EvalError::General(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for EvalError {}
