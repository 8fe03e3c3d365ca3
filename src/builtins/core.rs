use crate::{
    evaluator::{env::EnvRef, errors::EvalError, EvalResult},
    native::{eval_arg, expect_num, BlockExec, BuiltinFn, CallFrame, FnInfo, UNBOUNDED},
};

/// Core builtins: variables, output, and the two block runners.
pub const CORE_FNS: &[(FnInfo, BuiltinFn)] = &[
    (FnInfo::fixed("set", 2, true, false), core_set),
    (FnInfo::variadic("print", 1, UNBOUNDED, true, false), core_print),
    (FnInfo::fixed("repeat", 1, true, true), core_repeat),
    (FnInfo::fixed("scope", 0, false, true), core_scope),
];

/// `set(name, value)`: evaluate both arguments, then write the variable.
/// The name is evaluated too, so it can come out of another variable.
fn core_set(_host: &dyn BlockExec, env: &EnvRef, frame: &CallFrame) -> EvalResult<()> {
    let name = eval_arg("set", env, &frame.args[0])?;
    let val = eval_arg("set", env, &frame.args[1])?;
    env.borrow_mut().set(&name, &val);
    Ok(())
}

/// `print(args...)`: evaluate every argument, join them, one line to stdout.
fn core_print(_host: &dyn BlockExec, env: &EnvRef, frame: &CallFrame) -> EvalResult<()> {
    let mut out = String::new();
    for raw in frame.args {
        out.push_str(&eval_arg("print", env, raw)?);
    }
    println!("{}", out);
    Ok(())
}

/// `repeat(n) { ... }`: run the block `n` times in the caller's environment,
/// one nesting level deeper. Counts below one run zero times.
fn core_repeat(host: &dyn BlockExec, env: &EnvRef, frame: &CallFrame) -> EvalResult<()> {
    let count = eval_arg("repeat", env, &frame.args[0])?;
    let count = expect_num("repeat", &frame.args[0], &count)?;
    let block = match frame.block {
        Some(b) => b,
        // The driver guarantees the block for uses_block builtins.
        None => return Err(EvalError::General("'repeat' called without a block".into())),
    };
    for _ in 0..count {
        host.run_block(block, env, frame.depth + 1, frame.display)?;
    }
    Ok(())
}

/// `scope() { ... }`: run the block once in the fresh scope the driver
/// pushed for this call (the descriptor clears `persist_env`). Variables
/// defined inside vanish when the call returns.
fn core_scope(host: &dyn BlockExec, env: &EnvRef, frame: &CallFrame) -> EvalResult<()> {
    let block = match frame.block {
        Some(b) => b,
        None => return Err(EvalError::General("'scope' called without a block".into())),
    };
    host.run_block(block, env, frame.depth + 1, frame.display)
}
