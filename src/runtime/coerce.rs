//! Value coercion grammar
//!
//! Only text crosses into the page, so typed constants are spelled as plain
//! words. Lookup order: keyword table, numeric text, then the literal string.

use phf::phf_map;
use regex::Regex;
use std::sync::OnceLock;

use super::value::{Function, Value};

/// Largest magnitude a numeric constant may have
pub const MAX_CONSTANT_MAGNITUDE: f64 = 32767.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keyword {
    True,
    False,
    Null,
    Undefined,
    EmptyArr,
    EmptyObj,
    NoopFunc,
    TrueFunc,
    FalseFunc,
}

static KEYWORDS: phf::Map<&'static str, Keyword> = phf_map! {
    "true" => Keyword::True,
    "false" => Keyword::False,
    "null" => Keyword::Null,
    "undefined" => Keyword::Undefined,
    "emptyArr" => Keyword::EmptyArr,
    "emptyObj" => Keyword::EmptyObj,
    "noopFunc" => Keyword::NoopFunc,
    "trueFunc" => Keyword::TrueFunc,
    "falseFunc" => Keyword::FalseFunc,
};

impl Keyword {
    fn to_value(self) -> Value {
        match self {
            Keyword::True => Value::Bool(true),
            Keyword::False => Value::Bool(false),
            Keyword::Null => Value::Null,
            Keyword::Undefined => Value::Undefined,
            Keyword::EmptyArr => Value::empty_array(),
            Keyword::EmptyObj => Value::empty_object(),
            Keyword::NoopFunc => {
                Value::Function(Function::new("noopFunc", "function () {}", |_, _| Value::Undefined))
            }
            Keyword::TrueFunc => Value::Function(Function::constant("trueFunc", Value::Bool(true))),
            Keyword::FalseFunc => Value::Function(Function::constant("falseFunc", Value::Bool(false))),
        }
    }
}

fn numeric_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^-?\d+(\.\d+)?$").expect("numeric pattern is valid"))
}

/// Interpret `text` as a typed value
pub fn coerce(text: &str) -> Value {
    if let Some(keyword) = KEYWORDS.get(text) {
        return keyword.to_value();
    }
    if numeric_pattern().is_match(text) {
        if let Ok(number) = text.parse::<f64>() {
            return Value::Number(number);
        }
    }
    Value::String(text.to_string())
}

/// Interpret `text` as a constant for property overrides.
///
/// Numbers whose magnitude exceeds [`MAX_CONSTANT_MAGNITUDE`] are rejected.
pub fn coerce_constant(text: &str) -> Option<Value> {
    match coerce(text) {
        Value::Number(n) if n.is_nan() || n.abs() > MAX_CONSTANT_MAGNITUDE => None,
        value => Some(value),
    }
}

/// Grammar spelling of a value, when it has one.
///
/// Strings that would read back as something else have no spelling.
pub fn canonical_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::Bool(true) => "true".to_string(),
        Value::Bool(false) => "false".to_string(),
        Value::Null => "null".to_string(),
        Value::Undefined => "undefined".to_string(),
        Value::Array(items) if items.borrow().is_empty() => "emptyArr".to_string(),
        Value::Object(object) if object.is_empty() => "emptyObj".to_string(),
        Value::Function(function) => match function.name() {
            name @ ("noopFunc" | "trueFunc" | "falseFunc") => name.to_string(),
            _ => return None,
        },
        Value::Number(_) => {
            let text = value.to_js_string();
            if !numeric_pattern().is_match(&text) {
                return None;
            }
            text
        }
        Value::String(s) => {
            if KEYWORDS.contains_key(s.as_str()) || numeric_pattern().is_match(s) {
                return None;
            }
            s.clone()
        }
        _ => return None,
    };
    Some(text)
}
