use std::rc::Rc;

use tracing::debug;

use crate::{
    ast::{block::Block, node::HasPos, stmt::CallStmt},
    evaluator::{
        env::{Env, EnvRef},
        errors::EvalError,
        EvalResult,
    },
    native::{registry::Registry, BlockExec, CallFrame},
};

pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Executes scripts against a registry of native functions.
///
/// Every call is resolved through the registry the interpreter was built
/// with; nothing is looked up in process-wide state, so two interpreters
/// with different registries can coexist.
pub struct Interp {
    registry: Registry,
    max_depth: usize,
}

impl Interp {
    pub fn new(registry: Registry) -> Self {
        Interp {
            registry,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Cap for block nesting, counted from 0 at the top level.
    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth;
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Evaluate each statement in order, stopping at the first failure.
    pub fn run_block(
        &self,
        block: &Block,
        env: &EnvRef,
        depth: usize,
        display: bool,
    ) -> EvalResult<()> {
        if depth > self.max_depth {
            return Err(EvalError::DepthLimit(self.max_depth, block.pos()));
        }
        for call in &block.stmts {
            self.exec_call(call, env, depth, display)?;
        }
        Ok(())
    }

    fn exec_call(
        &self,
        call: &CallStmt,
        env: &EnvRef,
        depth: usize,
        display: bool,
    ) -> EvalResult<()> {
        let (info, func) = match self.registry.get(&call.name) {
            Some(&entry) => entry,
            None => return Err(EvalError::UnknownFunction(call.name.clone(), call.pos())),
        };

        if !info.arity_ok(call.args.len()) {
            return Err(EvalError::WrongArgCount {
                func: call.name.clone(),
                found: call.args.len(),
                min: info.min_args,
                max: info.max_args,
                pos: call.pos(),
            });
        }

        let block = if info.uses_block {
            match call.block.as_ref() {
                Some(b) => Some(b),
                None => return Err(EvalError::MissingBlock(call.name.clone(), call.pos())),
            }
        } else {
            // A stray block on a non-block function is ignored at runtime;
            // `lint::check_block` flags it.
            None
        };

        if display {
            debug!(func = %call.name, argc = call.args.len(), depth, pos = %call.pos(), "call");
        }

        // Persisting functions see the caller's environment directly; the
        // rest get a child scope that is dropped when the call returns.
        let call_env = if info.persist_env {
            Rc::clone(env)
        } else {
            Env::push_scope(env)
        };

        let frame = CallFrame {
            args: &call.args,
            depth,
            block,
            display,
        };
        func(self, &call_env, &frame)
    }
}

impl BlockExec for Interp {
    fn run_block(
        &self,
        block: &Block,
        env: &EnvRef,
        depth: usize,
        display: bool,
    ) -> EvalResult<()> {
        Interp::run_block(self, block, env, depth, display)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{builtins, parser};

    fn interp() -> Interp {
        let mut registry = Registry::new();
        builtins::install(&mut registry).unwrap();
        Interp::new(registry)
    }

    #[test]
    fn statements_run_in_order() {
        let block = parser::parse("set(a, 1) set(a, 2)").unwrap();
        let env = Env::new_ref();
        interp().run_block(&block, &env, 0, false).unwrap();
        assert_eq!(env.borrow().get("a"), Some("2".to_string()));
    }

    #[test]
    fn first_failure_stops_the_script() {
        let block = parser::parse("set(a, 1) nope() set(b, 2)").unwrap();
        let env = Env::new_ref();
        let err = interp().run_block(&block, &env, 0, false).unwrap_err();
        match err {
            EvalError::UnknownFunction(name, pos) => {
                assert_eq!(name, "nope");
                assert_eq!((pos.line, pos.column), (1, 11));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(env.borrow().get("a"), Some("1".to_string()));
        assert_eq!(env.borrow().get("b"), None);
    }

    #[test]
    fn arity_is_checked_before_the_function_runs() {
        let block = parser::parse("set(only_one)").unwrap();
        let env = Env::new_ref();
        let err = interp().run_block(&block, &env, 0, false).unwrap_err();
        match err {
            EvalError::WrongArgCount {
                func, found, min, max, ..
            } => {
                assert_eq!(func, "set");
                assert_eq!(found, 1);
                assert_eq!((min, max), (2, 2));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn block_functions_require_their_block() {
        let block = parser::parse("repeat(2)").unwrap();
        let env = Env::new_ref();
        let err = interp().run_block(&block, &env, 0, false).unwrap_err();
        assert!(matches!(err, EvalError::MissingBlock(name, _) if name == "repeat"));
    }

    #[test]
    fn depth_limit_trips_on_deep_nesting() {
        let block = parser::parse("repeat(1) { repeat(1) { set(x, 1) } }").unwrap();
        let env = Env::new_ref();

        let mut shallow = interp();
        shallow.set_max_depth(1);
        let err = shallow.run_block(&block, &env, 0, false).unwrap_err();
        assert!(matches!(err, EvalError::DepthLimit(1, _)));

        let mut deep = interp();
        deep.set_max_depth(2);
        deep.run_block(&block, &env, 0, false).unwrap();
        assert_eq!(env.borrow().get("x"), Some("1".to_string()));
    }
}
