//! Destination value model

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use super::env::Environment;
use crate::engine::serialize::format_number;

/// Type discriminant of the coercion grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Boolean,
    Number,
    String,
    Null,
    Undefined,
    Function,
    Array,
    Object,
}

impl TypeTag {
    /// Name as reported by the destination-side `typeTag` helper
    pub const fn as_str(&self) -> &'static str {
        match self {
            TypeTag::Boolean => "boolean",
            TypeTag::Number => "number",
            TypeTag::String => "string",
            TypeTag::Null => "null",
            TypeTag::Undefined => "undefined",
            TypeTag::Function => "function",
            TypeTag::Array => "array",
            TypeTag::Object => "object",
        }
    }
}

type Callable = dyn Fn(&Environment, &[Value]) -> Value;

/// Callable destination function
#[derive(Clone)]
pub struct Function {
    name: Rc<str>,
    source: Rc<str>,
    call: Rc<Callable>,
    properties: ObjectRef,
}

impl Function {
    /// Create a function; `source` is what `toString()` reports
    pub fn new<F>(name: &str, source: &str, call: F) -> Self
    where
        F: Fn(&Environment, &[Value]) -> Value + 'static,
    {
        Self {
            name: Rc::from(name),
            source: Rc::from(source),
            call: Rc::new(call),
            properties: ObjectRef::new(),
        }
    }

    /// Function returning a fixed value
    pub fn constant(name: &str, value: Value) -> Self {
        let source = format!("function {}() {{ return {}; }}", name, value.to_js_string());
        Self::new(name, &source, move |_, _| value.clone())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Source text, as `Function.prototype.toString` would report
    pub fn source_text(&self) -> &str {
        &self.source
    }

    /// Own properties, such as a constructor's `prototype`
    pub fn properties(&self) -> &ObjectRef {
        &self.properties
    }

    /// Invoke with the given environment
    pub fn invoke(&self, env: &Environment, args: &[Value]) -> Value {
        (self.call)(env, args)
    }

    /// Identity comparison
    pub fn ptr_eq(&self, other: &Function) -> bool {
        Rc::ptr_eq(&self.call, &other.call)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function").field("name", &self.name).finish()
    }
}

#[derive(Debug, Clone)]
struct Property {
    value: Value,
    /// Type a guarded constant keeps; writes of this type are rejected
    guard: Option<TypeTag>,
}

/// Shared, mutable destination object
#[derive(Debug, Clone, Default)]
pub struct ObjectRef(Rc<RefCell<BTreeMap<String, Property>>>);

impl ObjectRef {
    /// Create an empty object
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a property; `Undefined` when absent
    pub fn get(&self, key: &str) -> Value {
        self.0
            .borrow()
            .get(key)
            .map(|p| p.value.clone())
            .unwrap_or(Value::Undefined)
    }

    /// Whether the property exists
    pub fn has(&self, key: &str) -> bool {
        self.0.borrow().contains_key(key)
    }

    /// Define a plain data property, dropping any guard
    pub fn set(&self, key: &str, value: Value) {
        self.0
            .borrow_mut()
            .insert(key.to_string(), Property { value, guard: None });
    }

    /// Define a constant that keeps its type against later writes
    pub fn define_constant(&self, key: &str, value: Value) {
        let guard = Some(value.type_tag());
        self.0
            .borrow_mut()
            .insert(key.to_string(), Property { value, guard });
    }

    /// Ordinary assignment from page code.
    ///
    /// A guarded constant rejects writes of its own type. A write of any
    /// other type lands and turns the property back into plain data.
    /// Returns whether the write took effect.
    pub fn assign(&self, key: &str, value: Value) -> bool {
        let mut props = self.0.borrow_mut();
        if let Some(Property { guard: Some(tag), .. }) = props.get(key) {
            if value.type_tag() == *tag {
                return false;
            }
        }
        props.insert(key.to_string(), Property { value, guard: None });
        true
    }

    /// Whether the property is a guarded constant
    pub fn is_guarded(&self, key: &str) -> bool {
        self.0
            .borrow()
            .get(key)
            .is_some_and(|p| p.guard.is_some())
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Identity comparison
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Destination value
#[derive(Debug, Clone)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Rc<RefCell<Vec<Value>>>),
    Object(ObjectRef),
    Function(Function),
}

impl Value {
    /// Fresh empty array
    pub fn empty_array() -> Self {
        Value::Array(Rc::new(RefCell::new(Vec::new())))
    }

    /// Fresh empty object
    pub fn empty_object() -> Self {
        Value::Object(ObjectRef::new())
    }

    pub fn type_tag(&self) -> TypeTag {
        match self {
            Value::Undefined => TypeTag::Undefined,
            Value::Null => TypeTag::Null,
            Value::Bool(_) => TypeTag::Boolean,
            Value::Number(_) => TypeTag::Number,
            Value::String(_) => TypeTag::String,
            Value::Array(_) => TypeTag::Array,
            Value::Object(_) => TypeTag::Object,
            Value::Function(_) => TypeTag::Function,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(function) => Some(function),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// JavaScript `String(value)`
    pub fn to_js_string(&self) -> String {
        match self {
            Value::Undefined => "undefined".to_string(),
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => format_number(*n),
            Value::String(s) => s.clone(),
            Value::Array(items) => items
                .borrow()
                .iter()
                .map(|item| match item {
                    Value::Undefined | Value::Null => String::new(),
                    other => other.to_js_string(),
                })
                .collect::<Vec<_>>()
                .join(","),
            Value::Object(_) => "[object Object]".to_string(),
            Value::Function(function) => function.source_text().to_string(),
        }
    }

    /// JavaScript `===`
    pub fn strict_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.strict_equals(other)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<ObjectRef> for Value {
    fn from(value: ObjectRef) -> Self {
        Value::Object(value)
    }
}

impl From<Function> for Value {
    fn from(value: Function) -> Self {
        Value::Function(value)
    }
}
