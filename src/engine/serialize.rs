//! Argument serialization
//!
//! Arguments cross into the page as literal text. Nothing is evaluated or
//! coerced here; interpretation belongs to the behavior body.

use super::source::Arg;
use crate::{Error, Result};

/// Render a number the way JavaScript's `String(n)` does
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }

    let magnitude = n.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return format!("{}", n);
    }

    let exponential = format!("{:e}", n);
    match exponential.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => exponential,
    }
}

/// Render a string as a literal safe to embed in a script
pub fn string_literal(s: &str) -> Result<String> {
    let json = serde_json::to_string(s)?;
    Ok(json
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
        .replace("</", "<\\/"))
}

/// Render one argument as literal text
pub fn serialize_arg(arg: &Arg) -> Result<String> {
    match arg {
        Arg::Undefined => Ok("undefined".to_string()),
        Arg::Null => Ok("null".to_string()),
        Arg::Bool(b) => Ok(b.to_string()),
        Arg::Number(n) => Ok(format_number(*n)),
        Arg::String(s) => string_literal(s),
        Arg::Structured(json) => Err(Error::serialization(format!(
            "structured argument is not supported: {}",
            json
        ))),
        Arg::Callable(name) => Err(Error::serialization(format!(
            "function reference `{}` cannot be rendered as text",
            name
        ))),
    }
}

/// Render the argument list as an array literal
pub fn serialize_args(args: &[Arg]) -> Result<String> {
    let rendered = args
        .iter()
        .map(serialize_arg)
        .collect::<Result<Vec<_>>>()?;
    Ok(format!("[{}]", rendered.join(", ")))
}
