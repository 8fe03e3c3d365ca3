//! Arithmetic builtins.
//!
//! Values are `i64` and the arithmetic uses the wrapping operations, so
//! overflow wraps two's-complement instead of aborting the script. Operands
//! are evaluated and numeric-checked left to right; the first failure aborts
//! the call before anything is written.

use crate::{
    evaluator::{env::EnvRef, errors::EvalError, EvalResult},
    native::{eval_arg, expect_num, BlockExec, BuiltinFn, CallFrame, FnInfo},
};

/// The implicit destination written by the short arithmetic forms.
pub const RESULT_VAR: &str = "RESULT";

/// Two-operand builtins take `(a, b)` writing `RESULT`, or `(target, a, b)`
/// writing `target`; `sqrt`/`isprime` take `(n)` or `(target, n)` the same
/// way.
pub const MATH_FNS: &[(FnInfo, BuiltinFn)] = &[
    (FnInfo::fixed("inc", 1, true, false), math_inc),
    (FnInfo::fixed("dec", 1, true, false), math_dec),
    (FnInfo::variadic("add", 2, 3, true, false), math_add),
    (FnInfo::variadic("sub", 2, 3, true, false), math_sub),
    (FnInfo::variadic("mul", 2, 3, true, false), math_mul),
    (FnInfo::variadic("div", 2, 3, true, false), math_div),
    (FnInfo::variadic("mod", 2, 3, true, false), math_mod),
    (FnInfo::variadic("sqrt", 1, 2, true, false), math_sqrt),
    (FnInfo::variadic("isprime", 1, 2, true, false), math_isprime),
];

/// `inc(v)`: evaluate the argument to a variable name, then add one to
/// that variable. It must already hold a number.
fn math_inc(_host: &dyn BlockExec, env: &EnvRef, frame: &CallFrame) -> EvalResult<()> {
    step_var("inc", env, frame, 1)
}

/// `dec(v)`: counterpart of `inc`, subtracting one.
fn math_dec(_host: &dyn BlockExec, env: &EnvRef, frame: &CallFrame) -> EvalResult<()> {
    step_var("dec", env, frame, -1)
}

fn step_var(func: &str, env: &EnvRef, frame: &CallFrame, delta: i64) -> EvalResult<()> {
    let name = eval_arg(func, env, &frame.args[0])?;
    let val = env.borrow().get(&name).unwrap_or_default();
    let n = expect_num(func, &name, &val)?;
    env.borrow_mut().set(&name, &n.wrapping_add(delta).to_string());
    Ok(())
}

fn math_add(_host: &dyn BlockExec, env: &EnvRef, frame: &CallFrame) -> EvalResult<()> {
    let (target, lhs, rhs) = binary_operands("add", env, frame)?;
    store(env, target, lhs.wrapping_add(rhs));
    Ok(())
}

fn math_sub(_host: &dyn BlockExec, env: &EnvRef, frame: &CallFrame) -> EvalResult<()> {
    let (target, lhs, rhs) = binary_operands("sub", env, frame)?;
    store(env, target, lhs.wrapping_sub(rhs));
    Ok(())
}

fn math_mul(_host: &dyn BlockExec, env: &EnvRef, frame: &CallFrame) -> EvalResult<()> {
    let (target, lhs, rhs) = binary_operands("mul", env, frame)?;
    store(env, target, lhs.wrapping_mul(rhs));
    Ok(())
}

/// `div` truncates toward zero, like the underlying integer division.
fn math_div(_host: &dyn BlockExec, env: &EnvRef, frame: &CallFrame) -> EvalResult<()> {
    let (target, lhs, rhs) = binary_operands("div", env, frame)?;
    if rhs == 0 {
        return Err(EvalError::DivisionByZero("div".to_string()));
    }
    store(env, target, lhs.wrapping_div(rhs));
    Ok(())
}

/// `mod` keeps the sign of the dividend, like the underlying remainder.
fn math_mod(_host: &dyn BlockExec, env: &EnvRef, frame: &CallFrame) -> EvalResult<()> {
    let (target, lhs, rhs) = binary_operands("mod", env, frame)?;
    if rhs == 0 {
        return Err(EvalError::DivisionByZero("mod".to_string()));
    }
    store(env, target, lhs.wrapping_rem(rhs));
    Ok(())
}

/// `sqrt(n)` / `sqrt(target, n)`: truncated (not rounded) integer square
/// root. Negative operands are an error.
fn math_sqrt(_host: &dyn BlockExec, env: &EnvRef, frame: &CallFrame) -> EvalResult<()> {
    let (target, n) = unary_operand("sqrt", env, frame)?;
    if n < 0 {
        return Err(EvalError::General(format!(
            "'sqrt' of negative value {}",
            n
        )));
    }
    store(env, target, isqrt(n));
    Ok(())
}

/// `isprime(n)` / `isprime(target, n)`: writes "true" or "false". Values
/// below 2, negatives included, are not prime.
fn math_isprime(_host: &dyn BlockExec, env: &EnvRef, frame: &CallFrame) -> EvalResult<()> {
    let (target, n) = unary_operand("isprime", env, frame)?;
    let verdict = if is_prime(n) { "true" } else { "false" };
    env.borrow_mut().set(target, verdict);
    Ok(())
}

/// Marshal a two-or-three argument call: resolve the target name, then
/// evaluate and numeric-check both operands left to right. The explicit
/// target is the raw first argument, taken verbatim.
fn binary_operands<'a>(
    func: &str,
    env: &EnvRef,
    frame: &CallFrame<'a>,
) -> EvalResult<(&'a str, i64, i64)> {
    let first = if frame.args.len() == 2 { 0 } else { 1 };
    let target = if frame.args.len() == 2 {
        RESULT_VAR
    } else {
        &frame.args[0]
    };

    let lhs_raw = &frame.args[first];
    let lhs = eval_arg(func, env, lhs_raw)?;
    let lhs = expect_num(func, lhs_raw, &lhs)?;

    let rhs_raw = &frame.args[first + 1];
    let rhs = eval_arg(func, env, rhs_raw)?;
    let rhs = expect_num(func, rhs_raw, &rhs)?;

    Ok((target, lhs, rhs))
}

/// One-or-two argument counterpart of `binary_operands`.
fn unary_operand<'a>(
    func: &str,
    env: &EnvRef,
    frame: &CallFrame<'a>,
) -> EvalResult<(&'a str, i64)> {
    let at = if frame.args.len() == 1 { 0 } else { 1 };
    let target = if frame.args.len() == 1 {
        RESULT_VAR
    } else {
        &frame.args[0]
    };

    let raw = &frame.args[at];
    let val = eval_arg(func, env, raw)?;
    let n = expect_num(func, raw, &val)?;
    Ok((target, n))
}

fn store(env: &EnvRef, target: &str, value: i64) {
    env.borrow_mut().set(target, &value.to_string());
}

/// Truncated integer square root, `n >= 0`.
fn isqrt(n: i64) -> i64 {
    let mut r = (n as f64).sqrt() as i64;
    // Float rounding can land one off near perfect squares; settle exactly.
    while r > 0 && r.saturating_mul(r) > n {
        r -= 1;
    }
    while (r + 1).checked_mul(r + 1).is_some_and(|sq| sq <= n) {
        r += 1;
    }
    r
}

/// Trial division from 2 through the integer square root, inclusive.
fn is_prime(n: i64) -> bool {
    if n < 2 {
        return false;
    }
    for i in 2..=isqrt(n) {
        if n % i == 0 {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn isqrt_truncates() {
        assert_eq!(isqrt(0), 0);
        assert_eq!(isqrt(1), 1);
        assert_eq!(isqrt(2), 1);
        assert_eq!(isqrt(3), 1);
        assert_eq!(isqrt(4), 2);
        assert_eq!(isqrt(15), 3);
        assert_eq!(isqrt(16), 4);
        assert_eq!(isqrt(17), 4);
    }

    #[test]
    fn isqrt_is_exact_at_the_top_of_the_range() {
        assert_eq!(isqrt(i64::MAX), 3_037_000_499);
        let big = 3_037_000_499_i64;
        assert_eq!(isqrt(big * big), big);
        assert_eq!(isqrt(big * big - 1), big - 1);
    }

    #[test]
    fn primality_boundaries() {
        assert!(!is_prime(-7));
        assert!(!is_prime(0));
        assert!(!is_prime(1));
        assert!(is_prime(2));
        assert!(is_prime(3));
        assert!(!is_prime(4));
        assert!(is_prime(7));
        assert!(!is_prime(8));
        // Perfect squares of primes pin the inclusive bound.
        assert!(!is_prime(9));
        assert!(!is_prime(25));
        assert!(is_prime(29));
        assert!(is_prime(7919));
    }
}
