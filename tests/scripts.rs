use skit::{
    builtins,
    evaluator::{
        driver::Interp,
        env::{Env, EnvRef},
        errors::EvalError,
    },
    native::registry::Registry,
    parser,
};

fn interp() -> Interp {
    let mut registry = Registry::new();
    builtins::install(&mut registry).unwrap();
    Interp::new(registry)
}

fn run(src: &str) -> EnvRef {
    let block = parser::parse(src).unwrap();
    let env = Env::new_ref();
    interp().run_block(&block, &env, 0, false).unwrap();
    env
}

fn run_err(src: &str) -> EvalError {
    let block = parser::parse(src).unwrap();
    let env = Env::new_ref();
    interp().run_block(&block, &env, 0, false).unwrap_err()
}

fn run_with_depth(src: &str, max_depth: usize) -> Result<EnvRef, EvalError> {
    let block = parser::parse(src).unwrap();
    let env = Env::new_ref();
    let mut interp = interp();
    interp.set_max_depth(max_depth);
    interp.run_block(&block, &env, 0, false)?;
    Ok(env)
}

fn var(env: &EnvRef, name: &str) -> Option<String> {
    env.borrow().get(name)
}

#[test]
fn repeat_accumulates_in_the_caller_environment() {
    let env = run("set(n, 0) repeat(3) { inc(n) }");
    assert_eq!(var(&env, "n"), Some("3".to_string()));
}

#[test]
fn repeat_counts_below_one_run_zero_times() {
    let env = run("set(n, 0) repeat(0) { inc(n) }");
    assert_eq!(var(&env, "n"), Some("0".to_string()));

    let env = run("set(n, 0) repeat(-2) { inc(n) }");
    assert_eq!(var(&env, "n"), Some("0".to_string()));
}

#[test]
fn repeat_rejects_a_non_numeric_count() {
    let err = run_err("repeat(lots) { set(x, 1) }");
    assert!(
        matches!(err, EvalError::ExpectedNumeric { func, what } if func == "repeat" && what == "lots")
    );
}

#[test]
fn nested_repeat_multiplies() {
    let env = run("set(n, 0) repeat(2) { repeat(3) { inc(n) } }");
    assert_eq!(var(&env, "n"), Some("6".to_string()));
}

#[test]
fn repeat_count_can_come_from_a_variable() {
    let env = run("set(times, 4) set(n, 0) repeat($times) { inc(n) }");
    assert_eq!(var(&env, "n"), Some("4".to_string()));
}

#[test]
fn scope_discards_its_definitions() {
    let env = run("scope() { set(tmp, 1) }");
    assert_eq!(var(&env, "tmp"), None);
}

#[test]
fn scope_writes_through_to_existing_variables() {
    let env = run("set(x, 1) scope() { set(x, 2) }");
    assert_eq!(var(&env, "x"), Some("2".to_string()));
}

#[test]
fn repeat_definitions_persist() {
    let env = run("repeat(1) { set(inside, yes) }");
    assert_eq!(var(&env, "inside"), Some("yes".to_string()));
}

#[test]
fn unknown_function_names_the_call_site() {
    let err = run_err("set(x, 1)\nnope()");
    match err {
        EvalError::UnknownFunction(name, pos) => {
            assert_eq!(name, "nope");
            assert_eq!((pos.line, pos.column), (2, 1));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn arity_errors_carry_the_descriptor_bounds() {
    let err = run_err("set(a)");
    assert!(
        matches!(err, EvalError::WrongArgCount { found: 1, min: 2, max: 2, .. })
    );

    let err = run_err("print()");
    assert!(
        matches!(err, EvalError::WrongArgCount { found: 0, min: 1, max: -1, .. })
    );
}

#[test]
fn block_builtin_without_a_block_fails() {
    let err = run_err("repeat(3)");
    assert!(matches!(err, EvalError::MissingBlock(name, _) if name == "repeat"));
}

#[test]
fn stray_block_on_a_plain_builtin_is_skipped() {
    // The lint pass flags this; at runtime the block is simply not run.
    let env = run("set(x, 1) { set(y, 2) }");
    assert_eq!(var(&env, "x"), Some("1".to_string()));
    assert_eq!(var(&env, "y"), None);
}

#[test]
fn depth_limit_is_enforced_across_builtin_reentry() {
    let src = "repeat(1) { repeat(1) { set(x, 1) } }";

    let err = run_with_depth(src, 1).unwrap_err();
    assert!(matches!(err, EvalError::DepthLimit(1, _)));

    let env = run_with_depth(src, 2).unwrap();
    assert_eq!(var(&env, "x"), Some("1".to_string()));
}

#[test]
fn interpolation_happens_when_the_argument_is_evaluated() {
    let env = run("set(name, world) set(greeting, \"hello $name\")");
    assert_eq!(var(&env, "greeting"), Some("hello world".to_string()));
}

#[test]
fn doubled_dollar_stays_literal() {
    let env = run("set(price, \"$$5\")");
    assert_eq!(var(&env, "price"), Some("$5".to_string()));
}

#[test]
fn present_but_empty_still_fails_numeric_checks() {
    let err = run_err("set(e, \"\") inc(e)");
    assert!(matches!(err, EvalError::ExpectedNumeric { .. }));
}

#[test]
fn print_arguments_are_fully_evaluated() {
    // Only checks that evaluation succeeds; stdout is not captured here.
    let env = run("set(who, world) print(\"hello \", $who)");
    assert_eq!(var(&env, "who"), Some("world".to_string()));
}

#[test]
fn comments_do_not_reach_the_interpreter() {
    let env = run("// setup\nset(x, 1) /* inline */ inc(x)");
    assert_eq!(var(&env, "x"), Some("2".to_string()));
}

#[test]
fn trace_flag_does_not_change_semantics() {
    let block = parser::parse("set(n, 0) repeat(2) { inc(n) }").unwrap();
    let env = Env::new_ref();
    interp().run_block(&block, &env, 0, true).unwrap();
    assert_eq!(var(&env, "n"), Some("2".to_string()));
}
