//! Native behavior models
//!
//! Each function mirrors the body of the scriptlet with the same name and
//! installs itself into an [`Environment`]. None of them fail: anything
//! unexpected in the environment means the behavior does nothing.

use regex::Regex;
use std::sync::OnceLock;

use super::coerce::coerce_constant;
use super::env::Environment;
use super::hook;
use super::pattern::Pattern;
use super::value::{Function, Value};
use crate::engine::SourceRecord;

const ADD_EVENT_LISTENER: &str = "EventTarget.prototype.addEventListener";
const SET_TIMEOUT: &str = "setTimeout";
const EVAL: &str = "eval";

const DEFAULT_BOOST_TIMEOUT: f64 = 1000.0;
const DEFAULT_BOOST_RATIO: f64 = 0.05;

fn arg(args: &[Value], index: usize) -> Value {
    args.get(index).cloned().unwrap_or(Value::Undefined)
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Undefined | Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => *n != 0.0 && !n.is_nan(),
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// Pattern for an optional argument, as `toRegExp` builds it
fn pattern_arg(args: &[Value], index: usize) -> Result<Pattern, regex::Error> {
    match arg(args, index) {
        Value::Undefined | Value::Null => Pattern::compile(None),
        value => Pattern::compile(Some(&value.to_js_string())),
    }
}

fn match_stack_trace(stack_match: &str, stack: &str) -> bool {
    Pattern::compile(Some(stack_match))
        .map(|pattern| pattern.matches(stack))
        .unwrap_or(false)
}

/// JavaScript `parseInt(text, 10)`; `None` stands for `NaN`
fn parse_int(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    digits[..end].parse::<f64>().ok().map(|n| sign * n)
}

/// JavaScript `parseFloat(text)`; `None` stands for `NaN`
fn parse_float(text: &str) -> Option<f64> {
    static PREFIX: OnceLock<Regex> = OnceLock::new();
    let prefix = PREFIX.get_or_init(|| {
        Regex::new(r"^[+-]?(Infinity|\d+\.?\d*([eE][+-]?\d+)?|\.\d+([eE][+-]?\d+)?)")
            .expect("float prefix pattern is valid")
    });

    let found = prefix.find(text.trim_start())?;
    let literal = found.as_str();
    match literal.trim_start_matches(['+', '-']) {
        "Infinity" if literal.starts_with('-') => Some(f64::NEG_INFINITY),
        "Infinity" => Some(f64::INFINITY),
        _ => literal.parse::<f64>().ok(),
    }
}

fn noop() -> Value {
    Value::Function(Function::new("noop", "function () {}", |_, _| Value::Undefined))
}

// ============================================================================
// set-constant
// ============================================================================

/// `set-constant(property, value[, stack])`
pub fn set_constant(env: &Environment, record: &SourceRecord, args: &[Value]) {
    let property = arg(args, 0);
    if !truthy(&property) {
        return;
    }

    let stack = arg(args, 2);
    if truthy(&stack) && !match_stack_trace(&stack.to_js_string(), &env.stack()) {
        return;
    }

    let Some(constant) = coerce_constant(&arg(args, 1).to_js_string()) else {
        return;
    };
    let Some((owner, prop)) = env.resolve_owner(&property.to_js_string()) else {
        return;
    };

    let current = owner.get(&prop);
    if !current.is_undefined() && current.type_tag() != constant.type_tag() {
        return;
    }

    owner.define_constant(&prop, constant);
    hook::report(env, record, None);
}

// ============================================================================
// noeval
// ============================================================================

/// `noeval()`
pub fn noeval(env: &Environment, record: &SourceRecord, _args: &[Value]) {
    let record = record.clone();
    env.install(EVAL, move |_original| {
        Value::Function(Function::new(
            "evalWrapper",
            "function evalWrapper(s) { [native code] }",
            move |env, args| {
                let code = arg(args, 0).to_js_string();
                hook::report(env, &record, Some(&format!("prevented eval:\n{}", code)));
                Value::Undefined
            },
        ))
    });
}

// ============================================================================
// addEventListener
// ============================================================================

/// `prevent-addEventListener([eventSearch[, funcSearch]])`
pub fn prevent_add_event_listener(env: &Environment, record: &SourceRecord, args: &[Value]) {
    let (Ok(event_pattern), Ok(func_pattern)) = (pattern_arg(args, 0), pattern_arg(args, 1)) else {
        return;
    };
    let Value::Function(native) = env.get(ADD_EVENT_LISTENER) else {
        return;
    };

    let record = record.clone();
    env.install(ADD_EVENT_LISTENER, move |_original| {
        Value::Function(Function::new(
            "addEventListenerWrapper",
            "function addEventListenerWrapper(type, listener) { [native code] }",
            move |env, call_args| {
                let event = arg(call_args, 0).to_js_string();
                let listener = arg(call_args, 1).to_js_string();
                if event_pattern.matches(&event) && func_pattern.matches(&listener) {
                    hook::report(env, &record, None);
                    return Value::Undefined;
                }
                env.call(&native, call_args)
            },
        ))
    });
}

// ============================================================================
// setTimeout
// ============================================================================

/// `adjust-setTimeout([match[, timeout[, boost]]])`
pub fn adjust_set_timeout(env: &Environment, record: &SourceRecord, args: &[Value]) {
    let Value::Function(native) = env.get(SET_TIMEOUT) else {
        return;
    };
    let Ok(pattern) = pattern_arg(args, 0) else {
        return;
    };
    let timeout_value = parse_int(&arg(args, 1).to_js_string()).unwrap_or(DEFAULT_BOOST_TIMEOUT);
    let boost_ratio = parse_float(&arg(args, 2).to_js_string())
        .filter(|ratio| ratio.is_finite())
        .unwrap_or(DEFAULT_BOOST_RATIO);

    let record = record.clone();
    env.install(SET_TIMEOUT, move |_original| {
        Value::Function(Function::new(
            "setTimeoutWrapper",
            "function setTimeoutWrapper(callback, delay) { [native code] }",
            move |env, call_args| {
                let mut forwarded = call_args.to_vec();
                let delay = arg(call_args, 1).as_number();
                if delay == Some(timeout_value)
                    && pattern.matches(&arg(call_args, 0).to_js_string())
                {
                    forwarded[1] = Value::Number(timeout_value * boost_ratio);
                    hook::report(env, &record, None);
                }
                env.call(&native, &forwarded)
            },
        ))
    });
}

/// `prevent-setTimeout([match[, delay]])`
pub fn prevent_set_timeout(env: &Environment, record: &SourceRecord, args: &[Value]) {
    let Value::Function(native) = env.get(SET_TIMEOUT) else {
        return;
    };
    let Ok(pattern) = pattern_arg(args, 0) else {
        return;
    };
    let delay_value = parse_int(&arg(args, 1).to_js_string());

    let record = record.clone();
    env.install(SET_TIMEOUT, move |_original| {
        Value::Function(Function::new(
            "setTimeoutWrapper",
            "function setTimeoutWrapper(callback, timeout) { [native code] }",
            move |env, call_args| {
                let delay = arg(call_args, 1);
                let delay_matches =
                    delay_value.map_or(true, |expected| delay.as_number() == Some(expected));
                if pattern.matches(&arg(call_args, 0).to_js_string()) && delay_matches {
                    hook::report(env, &record, None);
                    return env.call(&native, &[noop(), delay]);
                }
                env.call(&native, call_args)
            },
        ))
    });
}
