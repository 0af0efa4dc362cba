//! Fake destination environment
//!
//! Stands in for the page's global object so that behaviors can be
//! installed and exercised without a browser. Patching goes through
//! [`Environment::install`]: a wrapper receives the original slot value and
//! returns its replacement.

use std::cell::RefCell;

use super::value::{Function, ObjectRef, Value};

/// Global object plus the page state behaviors observe
#[derive(Debug, Default)]
pub struct Environment {
    global: ObjectRef,
    stack: RefCell<String>,
    console: RefCell<Vec<String>>,
}

impl Environment {
    /// Create an empty environment
    pub fn new() -> Self {
        Self::default()
    }

    /// The global object (`window`)
    pub fn global(&self) -> &ObjectRef {
        &self.global
    }

    /// Resolve the object owning the last segment of a dotted path.
    ///
    /// Intermediate segments must already hold objects or functions, whose
    /// own properties are followed. Nothing is created.
    pub fn resolve_owner(&self, path: &str) -> Option<(ObjectRef, String)> {
        let mut parts: Vec<&str> = path.split('.').collect();
        let last = parts.pop()?;
        let mut owner = self.global.clone();

        for part in parts {
            let next = match owner.get(part) {
                Value::Object(object) => object,
                Value::Function(function) => function.properties().clone(),
                _ => return None,
            };
            owner = next;
        }

        Some((owner, last.to_string()))
    }

    /// Read a dotted path; `Undefined` when any segment is missing
    pub fn get(&self, path: &str) -> Value {
        self.resolve_owner(path)
            .map(|(owner, prop)| owner.get(&prop))
            .unwrap_or(Value::Undefined)
    }

    /// Define a plain property at a dotted path, as page setup code would
    pub fn define(&self, path: &str, value: Value) -> bool {
        match self.resolve_owner(path) {
            Some((owner, prop)) => {
                owner.set(&prop, value);
                true
            }
            None => false,
        }
    }

    /// Assignment from page code, subject to constant guards
    pub fn assign(&self, path: &str, value: Value) -> bool {
        match self.resolve_owner(path) {
            Some((owner, prop)) => owner.assign(&prop, value),
            None => false,
        }
    }

    /// Swap the slot at `path` for `wrapper(original)`.
    ///
    /// No-op returning `false` when an intermediate segment is missing.
    pub fn install<W>(&self, path: &str, wrapper: W) -> bool
    where
        W: FnOnce(Value) -> Value,
    {
        let Some((owner, prop)) = self.resolve_owner(path) else {
            return false;
        };
        let original = owner.get(&prop);
        owner.set(&prop, wrapper(original));
        true
    }

    /// Call a function value
    pub fn call(&self, function: &Function, args: &[Value]) -> Value {
        function.invoke(self, args)
    }

    /// Call the function stored at `path`, if there is one
    pub fn call_path(&self, path: &str, args: &[Value]) -> Option<Value> {
        match self.get(path) {
            Value::Function(function) => Some(self.call(&function, args)),
            _ => None,
        }
    }

    /// Set the text `new Error().stack` reports
    pub fn set_stack<S: Into<String>>(&self, stack: S) {
        *self.stack.borrow_mut() = stack.into();
    }

    /// Current call stack text
    pub fn stack(&self) -> String {
        self.stack.borrow().clone()
    }

    /// Append a console line
    pub fn log<S: Into<String>>(&self, line: S) {
        self.console.borrow_mut().push(line.into());
    }

    /// Lines written to the console so far
    pub fn console(&self) -> Vec<String> {
        self.console.borrow().clone()
    }
}
