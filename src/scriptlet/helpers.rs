//! Destination-side helper functions
//!
//! Each helper is a standalone function declaration. Helpers never read
//! module state; anything they need arrives as a parameter or as another
//! helper listed in their dependencies.

use super::definition::{HelperFunction, HelperId};

/// Escapes regular expression metacharacters
pub const ESCAPE_REG_EXP: HelperId = HelperId::new("escapeRegExp");
/// Compiles plain or `/regex/` text into a RegExp
pub const TO_REG_EXP: HelperId = HelperId::new("toRegExp");
/// Tests the current call stack against a pattern
pub const MATCH_STACK_TRACE: HelperId = HelperId::new("matchStackTrace");
/// Discriminant used by the coercion grammar
pub const TYPE_TAG: HelperId = HelperId::new("typeTag");
/// Turns plain text into a typed constant
pub const COERCE_CONSTANT: HelperId = HelperId::new("coerceConstant");
/// Resolves the owner object of a dotted property path
pub const GET_PROPERTY_IN_CHAIN: HelperId = HelperId::new("getPropertyInChain");

pub const ESCAPE_REG_EXP_CODE: &str = r#"function escapeRegExp(text) {
    return String(text).replace(/[.*+?^${}()|[\]\\]/g, '\\$&');
}"#;

pub const TO_REG_EXP_CODE: &str = r#"function toRegExp(input) {
    if (input === undefined || input === null || input === '') {
        return /.?/;
    }
    var text = String(input);
    if (text.length > 1 && text[0] === '/' && text[text.length - 1] === '/') {
        return new RegExp(text.slice(1, -1));
    }
    return new RegExp(escapeRegExp(text));
}"#;

pub const MATCH_STACK_TRACE_CODE: &str = r#"function matchStackTrace(stackMatch, stackTrace) {
    if (!stackMatch) {
        return true;
    }
    try {
        return toRegExp(stackMatch).test(String(stackTrace));
    } catch (e) {
        return false;
    }
}"#;

pub const TYPE_TAG_CODE: &str = r#"function typeTag(value) {
    if (value === null) {
        return 'null';
    }
    if (Array.isArray(value)) {
        return 'array';
    }
    return typeof value;
}"#;

pub const COERCE_CONSTANT_CODE: &str = r#"function coerceConstant(raw) {
    var text = String(raw);
    switch (text) {
        case 'true': return { value: true };
        case 'false': return { value: false };
        case 'null': return { value: null };
        case 'undefined': return { value: undefined };
        case 'emptyArr': return { value: [] };
        case 'emptyObj': return { value: {} };
        case 'noopFunc': return { value: function () {} };
        case 'trueFunc': return { value: function () { return true; } };
        case 'falseFunc': return { value: function () { return false; } };
        default: break;
    }
    if (/^-?\d+(\.\d+)?$/.test(text)) {
        var number = parseFloat(text);
        if (Number.isNaN(number) || Math.abs(number) > 0x7FFF) {
            return null;
        }
        return { value: number };
    }
    return { value: text };
}"#;

pub const GET_PROPERTY_IN_CHAIN_CODE: &str = r#"function getPropertyInChain(base, chain) {
    var parts = String(chain).split('.');
    var owner = base;
    for (var i = 0; i < parts.length - 1; i += 1) {
        var next = owner[parts[i]];
        if (next === null || (typeof next !== 'object' && typeof next !== 'function')) {
            return null;
        }
        owner = next;
    }
    return { base: owner, prop: parts[parts.length - 1] };
}"#;

/// Every helper shipped with the crate
pub static BUILTIN_HELPERS: &[HelperFunction] = &[
    HelperFunction::new(ESCAPE_REG_EXP, &[], ESCAPE_REG_EXP_CODE),
    HelperFunction::new(TO_REG_EXP, &[ESCAPE_REG_EXP], TO_REG_EXP_CODE),
    HelperFunction::new(MATCH_STACK_TRACE, &[TO_REG_EXP], MATCH_STACK_TRACE_CODE),
    HelperFunction::new(TYPE_TAG, &[], TYPE_TAG_CODE),
    HelperFunction::new(COERCE_CONSTANT, &[], COERCE_CONSTANT_CODE),
    HelperFunction::new(GET_PROPERTY_IN_CHAIN, &[], GET_PROPERTY_IN_CHAIN_CODE),
];

/// Name of the reporting hook function
pub const HOOK_NAME: &str = "hit";

/// Reporting hook inlined into every bundle.
///
/// Tries the debug channel, then the host channel. Never throws.
pub const HOOK_CODE: &str = r#"function hit(source, message) {
    try {
        if (source.verbose === true && typeof console !== 'undefined' && console.log) {
            var log = console.log.bind(console);
            log(message ? source.name + '\n' + message : source.name);
        }
    } catch (e) {}
    try {
        if (typeof window.__debug === 'function') {
            window.__debug(source);
            return;
        }
        var host = window.__scriptletsHost;
        if (host && typeof host.hit === 'function') {
            host.hit(source.name, message);
        }
    } catch (e) {}
}"#;
