use std::collections::HashMap;

use crate::{
    evaluator::{errors::EvalError, EvalResult},
    native::{BuiltinFn, FnInfo},
};

/// Explicit name → (descriptor, entry point) table. Populated by `register`
/// calls at startup; nothing is discovered through link-time symbols.
#[derive(Default)]
pub struct Registry {
    fns: HashMap<String, (FnInfo, BuiltinFn)>,
}

impl Registry {
    pub fn new() -> Self {
        Registry {
            fns: HashMap::new(),
        }
    }

    /// Register one builtin. Names are unique within a registry; a second
    /// registration under the same name is rejected.
    pub fn register(&mut self, info: FnInfo, func: BuiltinFn) -> EvalResult<()> {
        if self.fns.contains_key(info.name) {
            return Err(EvalError::DuplicateFunction(info.name.to_string()));
        }
        self.fns.insert(info.name.to_string(), (info, func));
        Ok(())
    }

    /// Register a whole descriptor table, first duplicate aborts.
    pub fn register_all(&mut self, table: &[(FnInfo, BuiltinFn)]) -> EvalResult<()> {
        for &(info, func) in table {
            self.register(info, func)?;
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&(FnInfo, BuiltinFn)> {
        self.fns.get(name)
    }

    pub fn len(&self) -> usize {
        self.fns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        evaluator::env::EnvRef,
        native::{BlockExec, CallFrame},
    };

    fn noop(_: &dyn BlockExec, _: &EnvRef, _: &CallFrame) -> EvalResult<()> {
        Ok(())
    }

    #[test]
    fn register_and_get() {
        let mut reg = Registry::new();
        reg.register(FnInfo::fixed("f", 1, true, false), noop).unwrap();
        let (info, _) = reg.get("f").unwrap();
        assert_eq!(info.name, "f");
        assert_eq!(info.min_args, 1);
        assert!(reg.get("g").is_none());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut reg = Registry::new();
        reg.register(FnInfo::fixed("f", 1, true, false), noop).unwrap();
        let err = reg
            .register(FnInfo::fixed("f", 2, true, false), noop)
            .unwrap_err();
        assert!(matches!(err, EvalError::DuplicateFunction(name) if name == "f"));
        // The first registration survives.
        assert_eq!(reg.get("f").unwrap().0.min_args, 1);
    }

    #[test]
    fn register_all_installs_every_entry() {
        const TABLE: &[(FnInfo, BuiltinFn)] = &[
            (FnInfo::fixed("a", 0, true, false), noop),
            (FnInfo::variadic("b", 1, 3, true, false), noop),
        ];
        let mut reg = Registry::new();
        reg.register_all(TABLE).unwrap();
        assert_eq!(reg.len(), 2);
        assert!(!reg.is_empty());
    }
}
