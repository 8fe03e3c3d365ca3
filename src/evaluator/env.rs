use std::{
    cell::RefCell,
    collections::{BTreeMap, HashMap},
    rc::Rc,
};

pub type EnvRef = Rc<RefCell<Env>>;

/// Name-keyed store of string variables, chained to an optional parent scope.
/// Shared access goes through `EnvRef`; the host is single-threaded.
#[derive(Debug, Default)]
pub struct Env {
    vars: HashMap<String, String>,
    parent: Option<EnvRef>,
}

impl Env {
    pub fn new_ref() -> EnvRef {
        let e = Env {
            vars: HashMap::new(),
            parent: None,
        };
        Rc::new(RefCell::new(e))
    }

    pub fn push_scope(parent: &EnvRef) -> EnvRef {
        let child = Env {
            vars: HashMap::new(),
            parent: Some(Rc::clone(parent)),
        };
        Rc::new(RefCell::new(child))
    }

    /// Walk the scope chain outward; `None` when no scope holds `name`.
    /// Absent is distinguishable from present-but-empty; both fail numeric
    /// validation downstream.
    pub fn get(&self, name: &str) -> Option<String> {
        if let Some(val) = self.vars.get(name) {
            Some(val.clone())
        } else if let Some(ref parent_rc) = self.parent {
            parent_rc.borrow().get(name)
        } else {
            None
        }
    }

    /// Assign to the nearest scope that already holds `name`, or define the
    /// variable in this scope if none does.
    pub fn set(&mut self, name: &str, val: &str) {
        if self.vars.contains_key(name) {
            self.vars.insert(name.to_string(), val.to_string());
            return;
        }
        if let Some(ref parent_rc) = self.parent {
            if parent_rc.borrow_mut().assign_existing(name, val) {
                return;
            }
        }
        self.vars.insert(name.to_string(), val.to_string());
    }

    fn assign_existing(&mut self, name: &str, val: &str) -> bool {
        if self.vars.contains_key(name) {
            self.vars.insert(name.to_string(), val.to_string());
            return true;
        }
        match self.parent {
            Some(ref parent_rc) => parent_rc.borrow_mut().assign_existing(name, val),
            None => false,
        }
    }

    /// Snapshot of every visible variable, inner scopes shadowing outer,
    /// sorted by name.
    pub fn export(&self) -> BTreeMap<String, String> {
        let mut out = match self.parent {
            Some(ref parent_rc) => parent_rc.borrow().export(),
            None => BTreeMap::new(),
        };
        for (name, val) in &self.vars {
            out.insert(name.clone(), val.clone());
        }
        out
    }
}
