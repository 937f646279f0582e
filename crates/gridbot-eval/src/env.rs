//! Scoped variable environment for the GridBot evaluator.
//!
//! Values are plain integers — the learner language has no other
//! variable type.

use std::collections::BTreeMap;

/// A single scope level.
#[derive(Debug, Clone)]
struct Scope {
    bindings: BTreeMap<String, i64>,
}

impl Scope {
    fn new() -> Self {
        Self {
            bindings: BTreeMap::new(),
        }
    }
}

/// Scoped variable environment with push/pop semantics.
///
/// Variables are looked up from innermost scope outward.
/// `define` always creates in the current (innermost) scope.
/// `set` updates the first scope where the variable exists.
#[derive(Debug, Clone)]
pub struct Environment {
    scopes: Vec<Scope>,
}

impl Environment {
    /// Create a new environment with one global scope.
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::new()],
        }
    }

    /// Push a new scope (for repeat bodies, function bodies, branches).
    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::new());
    }

    /// Pop the innermost scope.
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Define a variable in the current (innermost) scope.
    pub fn define(&mut self, name: &str, value: i64) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.bindings.insert(name.to_string(), value);
        }
    }

    /// Look up a variable, searching from innermost to outermost scope.
    pub fn get(&self, name: &str) -> Option<i64> {
        for scope in self.scopes.iter().rev() {
            if let Some(&v) = scope.bindings.get(name) {
                return Some(v);
            }
        }
        None
    }

    /// Update a variable in the first scope where it exists.
    /// Returns `true` if found and updated, `false` if not found.
    pub fn set(&mut self, name: &str, value: i64) -> bool {
        for scope in self.scopes.iter_mut().rev() {
            if scope.bindings.contains_key(name) {
                scope.bindings.insert(name.to_string(), value);
                return true;
            }
        }
        false
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_and_get() {
        let mut env = Environment::new();
        env.define("steps", 3);
        assert_eq!(env.get("steps"), Some(3));
        assert_eq!(env.get("missing"), None);
    }

    #[test]
    fn test_inner_scope_shadows() {
        let mut env = Environment::new();
        env.define("x", 1);
        env.push_scope();
        env.define("x", 2);
        assert_eq!(env.get("x"), Some(2));
        env.pop_scope();
        assert_eq!(env.get("x"), Some(1));
    }

    #[test]
    fn test_set_updates_outer_scope() {
        let mut env = Environment::new();
        env.define("x", 1);
        env.push_scope();
        assert!(env.set("x", 9));
        env.pop_scope();
        assert_eq!(env.get("x"), Some(9));
    }

    #[test]
    fn test_set_missing_returns_false() {
        let mut env = Environment::new();
        assert!(!env.set("nope", 1));
    }

    #[test]
    fn test_global_scope_never_popped() {
        let mut env = Environment::new();
        env.define("x", 5);
        env.pop_scope();
        assert_eq!(env.get("x"), Some(5));
    }
}
