//! The native-builtin ABI: descriptors, the invocation frame, and the
//! helpers every entry point marshals its arguments through.

pub mod registry;

use crate::{
    ast::block::Block,
    evaluator::{env::EnvRef, errors::EvalError, expr, EvalResult},
};

/// Sentinel for "no bound": as `max_args` it means unbounded above, as a
/// fixed count it disables the arity check entirely.
pub const UNBOUNDED: i32 = -1;

/// Static descriptor for one builtin: name, arity bounds, and execution
/// requirements. One instance per builtin, built in a `const` table, never
/// mutated.
#[derive(Debug, Clone, Copy)]
pub struct FnInfo {
    pub name: &'static str,
    pub min_args: i32,
    pub max_args: i32,
    /// `true`: the entry point runs in the caller's environment. `false`:
    /// the driver pushes a fresh child scope for the call.
    pub persist_env: bool,
    /// Whether the call site must supply a `{ ... }` block.
    pub uses_block: bool,
}

impl FnInfo {
    /// Fixed-arity descriptor. `count == UNBOUNDED` means "no arity check
    /// at all"; anything below that fails const evaluation of the table
    /// holding the descriptor.
    pub const fn fixed(
        name: &'static str,
        count: i32,
        persist_env: bool,
        uses_block: bool,
    ) -> Self {
        assert!(count >= UNBOUNDED, "fixed arity must be >= -1");
        FnInfo {
            name,
            min_args: count,
            max_args: count,
            persist_env,
            uses_block,
        }
    }

    /// Variable-arity descriptor; `max == UNBOUNDED` means "at least `min`,
    /// unbounded above". Invalid bounds fail const evaluation of the table
    /// holding the descriptor.
    pub const fn variadic(
        name: &'static str,
        min: i32,
        max: i32,
        persist_env: bool,
        uses_block: bool,
    ) -> Self {
        assert!(min >= 0, "variadic arity needs min >= 0");
        assert!(
            max > min || max == UNBOUNDED,
            "variadic arity needs max > min, or max == -1 for unbounded"
        );
        FnInfo {
            name,
            min_args: min,
            max_args: max,
            persist_env,
            uses_block,
        }
    }

    /// The single arity predicate shared by the driver and the lint pass.
    pub fn arity_ok(&self, found: usize) -> bool {
        if self.min_args == UNBOUNDED {
            // fixed(-1): proceed unconditionally
            return true;
        }
        let found = found as i32;
        if found < self.min_args {
            return false;
        }
        self.max_args == UNBOUNDED || found <= self.max_args
    }
}

/// Everything one invocation receives, borrowed from the caller for the
/// duration of the call. The argument count has already been validated
/// against the descriptor when a frame exists.
#[derive(Debug)]
pub struct CallFrame<'a> {
    /// Raw argument text, unevaluated.
    pub args: &'a [String],
    /// Current nesting depth; block-running builtins pass `depth + 1` back
    /// into the driver.
    pub depth: usize,
    /// Borrowed block for `uses_block` builtins, `None` for everyone else.
    /// Never retained past the call.
    pub block: Option<&'a Block>,
    /// Statement-tracing flag; propagated, not interpreted, by most builtins.
    pub display: bool,
}

/// Block execution as builtins see it. The driver implements this; tests can
/// substitute a stub.
pub trait BlockExec {
    fn run_block(&self, block: &Block, env: &EnvRef, depth: usize, display: bool)
        -> EvalResult<()>;
}

/// The entry-point signature every builtin obeys. Side effects go through
/// the environment (and, for block builtins, through `host`); failures come
/// back as values, never as output.
pub type BuiltinFn = fn(host: &dyn BlockExec, env: &EnvRef, frame: &CallFrame<'_>) -> EvalResult<()>;

/// Evaluate one raw argument on behalf of `func`. A failure comes back as
/// `EvalError::Evaluation` with the evaluator's own error inside, unchanged.
pub fn eval_arg(func: &str, env: &EnvRef, raw: &str) -> EvalResult<String> {
    expr::eval(env, raw).map_err(|reason| EvalError::Evaluation {
        func: func.to_string(),
        expr: raw.to_string(),
        reason,
    })
}

/// Validate that an evaluated value is a whole number and parse it. `what`
/// names the offending argument or variable in the error. Empty values fail:
/// an absent variable dereferences to "" and must not pass as numeric.
/// Values outside `i64` fail the same way as malformed ones.
pub fn expect_num(func: &str, what: &str, val: &str) -> EvalResult<i64> {
    if !is_num(val) {
        return Err(expected_numeric(func, what));
    }
    val.parse::<i64>().map_err(|_| expected_numeric(func, what))
}

fn expected_numeric(func: &str, what: &str) -> EvalError {
    EvalError::ExpectedNumeric {
        func: func.to_string(),
        what: what.to_string(),
    }
}

fn is_num(val: &str) -> bool {
    let bytes = val.as_bytes();
    let digits = match bytes.first() {
        Some(b'+') | Some(b'-') => &bytes[1..],
        _ => bytes,
    };
    !digits.is_empty() && digits.iter().all(|b| b.is_ascii_digit())
}
