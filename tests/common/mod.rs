//! Common test utilities
//!
//! This module provides shared fixtures for all integration tests.

#![allow(dead_code)]

use scriptlet_oxide::engine::Registry;
use scriptlet_oxide::runtime::{hook, Environment, Function, ObjectRef, Value};
use std::cell::RefCell;
use std::rc::Rc;

/// Built-in registry
pub fn registry() -> Registry {
    Registry::builtin().expect("built-in catalogue is consistent")
}

/// Records every call a fake page function receives
#[derive(Debug, Clone, Default)]
pub struct CallLog(Rc<RefCell<Vec<Vec<Value>>>>);

impl CallLog {
    pub fn count(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn calls(&self) -> Vec<Vec<Value>> {
        self.0.borrow().clone()
    }

    /// Function value that appends its arguments to this log
    pub fn function(&self, name: &str) -> Value {
        let log = self.clone();
        Value::Function(Function::new(name, "function () { [native code] }", move |_, args| {
            log.0.borrow_mut().push(args.to_vec());
            Value::Undefined
        }))
    }
}

/// Install a debug channel and return the log of hook invocations
pub fn watch_hits(env: &Environment) -> CallLog {
    let hits = CallLog::default();
    env.define(hook::DEBUG_CHANNEL, hits.function("__debug"));
    hits
}

/// Environment with `EventTarget.prototype.addEventListener` and `setTimeout`
/// recording what reaches the originals
pub fn browser_environment() -> (Environment, CallLog, CallLog) {
    let env = Environment::new();
    let listeners = CallLog::default();
    let timers = CallLog::default();

    let prototype = ObjectRef::new();
    prototype.set("addEventListener", listeners.function("addEventListener"));
    let event_target = ObjectRef::new();
    event_target.set("prototype", Value::Object(prototype));
    env.define("EventTarget", Value::Object(event_target));
    env.define("setTimeout", timers.function("setTimeout"));

    (env, listeners, timers)
}

/// Function value whose source text is `source`
pub fn callback(source: &str) -> Value {
    Value::Function(Function::new("callback", source, |_, _| Value::Undefined))
}
