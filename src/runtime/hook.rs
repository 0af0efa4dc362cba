//! Reporting hook
//!
//! Signals that a behavior fired. Channels are tried in order and a missing
//! channel is never an error.

use super::env::Environment;
use super::value::Value;
use crate::engine::SourceRecord;

/// Global holding the destination-side debug callback
pub const DEBUG_CHANNEL: &str = "__debug";

/// Global holding the host integration object
pub const HOST_CHANNEL: &str = "__scriptletsHost";

/// Report a hit for `record`.
///
/// Verbose records also log a trace line to the console. Then the debug
/// channel receives the record, or failing that the host channel's `hit`
/// receives the name and message.
pub fn report(env: &Environment, record: &SourceRecord, message: Option<&str>) {
    if record.verbose {
        match message {
            Some(message) => env.log(format!("{}\n{}", record.name, message)),
            None => env.log(record.name),
        }
    }

    if let Value::Function(debug) = env.global().get(DEBUG_CHANNEL) {
        env.call(&debug, &[record.to_value()]);
        return;
    }

    if let Value::Object(host) = env.global().get(HOST_CHANNEL) {
        if let Value::Function(hit) = host.get("hit") {
            let message = message.map(Value::from).unwrap_or(Value::Undefined);
            env.call(&hit, &[Value::from(record.name), message]);
        }
    }
}
