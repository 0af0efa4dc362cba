//! Built-in scriptlet catalogue
//!
//! Each body saves the implementation it replaces and delegates any traffic
//! it does not handle, so installing twice wraps rather than corrupts.

use super::definition::ScriptletDefinition;
use super::helpers::{COERCE_CONSTANT, GET_PROPERTY_IN_CHAIN, MATCH_STACK_TRACE, TO_REG_EXP, TYPE_TAG};
use crate::runtime::behaviors;

// ============================================================================
// set-constant
// ============================================================================

const SET_CONSTANT_BODY: &str = r#"function setConstant(source, property, value, stack) {
    if (!property) {
        return;
    }
    if (stack && !matchStackTrace(stack, new Error().stack)) {
        return;
    }
    var coerced = coerceConstant(value);
    if (coerced === null) {
        return;
    }
    var constantValue = coerced.value;
    var chain = getPropertyInChain(window, property);
    if (chain === null) {
        return;
    }
    var base = chain.base;
    var prop = chain.prop;
    try {
        var current = base[prop];
        if (current !== undefined && typeTag(current) !== typeTag(constantValue)) {
            return;
        }
        Object.defineProperty(base, prop, {
            configurable: true,
            get: function () {
                return constantValue;
            },
            set: function (next) {
                if (typeTag(next) === typeTag(constantValue)) {
                    return;
                }
                Object.defineProperty(base, prop, {
                    configurable: true,
                    enumerable: true,
                    writable: true,
                    value: next,
                });
            },
        });
    } catch (e) {
        return;
    }
    hit(source);
}"#;

pub static SET_CONSTANT: ScriptletDefinition = ScriptletDefinition::new(
    "set-constant",
    &[
        "set-constant.js",
        "ubo-set-constant.js",
        "set.js",
        "ubo-set.js",
    ],
    "setConstant",
    &[MATCH_STACK_TRACE, COERCE_CONSTANT, GET_PROPERTY_IN_CHAIN, TYPE_TAG],
    SET_CONSTANT_BODY,
)
.with_native(behaviors::set_constant);

// ============================================================================
// noeval
// ============================================================================

const NOEVAL_BODY: &str = r#"function noeval(source) {
    var evalWrapper = function evalWrapper(s) {
        hit(source, 'prevented eval:\n' + s);
    };
    try {
        window.eval = evalWrapper.bind();
    } catch (e) {}
}"#;

pub static NOEVAL: ScriptletDefinition = ScriptletDefinition::new(
    "noeval",
    &[
        "noeval.js",
        "silent-noeval.js",
        "ubo-noeval.js",
        "ubo-silent-noeval.js",
    ],
    "noeval",
    &[],
    NOEVAL_BODY,
)
.with_native(behaviors::noeval);

// ============================================================================
// addEventListener
// ============================================================================

const PREVENT_ADD_EVENT_LISTENER_BODY: &str = r#"function preventAddEventListener(source, eventSearch, funcSearch) {
    var eventPattern;
    var funcPattern;
    try {
        eventPattern = toRegExp(eventSearch);
        funcPattern = toRegExp(funcSearch);
    } catch (e) {
        return;
    }
    var target = window.EventTarget && window.EventTarget.prototype;
    if (!target || typeof target.addEventListener !== 'function') {
        return;
    }
    var nativeAddEventListener = target.addEventListener;
    function addEventListenerWrapper(type, listener) {
        try {
            var listenerText = typeof listener === 'function' ? listener.toString() : String(listener);
            if (eventPattern.test(String(type)) && funcPattern.test(listenerText)) {
                hit(source);
                return undefined;
            }
        } catch (e) {}
        return nativeAddEventListener.apply(this, arguments);
    }
    target.addEventListener = addEventListenerWrapper;
}"#;

pub static PREVENT_ADD_EVENT_LISTENER: ScriptletDefinition = ScriptletDefinition::new(
    "prevent-addEventListener",
    &[
        "addEventListener-defuser.js",
        "ubo-addEventListener-defuser.js",
        "aeld.js",
        "ubo-aeld.js",
    ],
    "preventAddEventListener",
    &[TO_REG_EXP],
    PREVENT_ADD_EVENT_LISTENER_BODY,
)
.with_native(behaviors::prevent_add_event_listener);

const LOG_ADD_EVENT_LISTENER_BODY: &str = r#"function logAddEventListener(source) {
    var target = window.EventTarget && window.EventTarget.prototype;
    if (!target || typeof target.addEventListener !== 'function') {
        return;
    }
    var nativeAddEventListener = target.addEventListener;
    function addEventListenerWrapper(type, listener) {
        try {
            hit(source, 'addEventListener("' + type + '", ' + String(listener) + ')');
        } catch (e) {}
        return nativeAddEventListener.apply(this, arguments);
    }
    target.addEventListener = addEventListenerWrapper;
}"#;

pub static LOG_ADD_EVENT_LISTENER: ScriptletDefinition = ScriptletDefinition::new(
    "log-addEventListener",
    &["addEventListener-logger.js", "ubo-addEventListener-logger.js", "aell.js", "ubo-aell.js"],
    "logAddEventListener",
    &[],
    LOG_ADD_EVENT_LISTENER_BODY,
);

// ============================================================================
// disable-newtab-links
// ============================================================================

const DISABLE_NEWTAB_LINKS_BODY: &str = r#"function disableNewtabLinks(source) {
    try {
        document.addEventListener('click', function (ev) {
            var target = ev.target;
            while (target) {
                if (target.localName === 'a' && target.hasAttribute('target')) {
                    ev.stopPropagation();
                    ev.preventDefault();
                    hit(source);
                    break;
                }
                target = target.parentNode;
            }
        });
    } catch (e) {}
}"#;

pub static DISABLE_NEWTAB_LINKS: ScriptletDefinition = ScriptletDefinition::new(
    "disable-newtab-links",
    &["disable-newtab-links.js", "ubo-disable-newtab-links.js"],
    "disableNewtabLinks",
    &[],
    DISABLE_NEWTAB_LINKS_BODY,
);

// ============================================================================
// setTimeout
// ============================================================================

const LOG_SET_TIMEOUT_BODY: &str = r#"function logSetTimeout(source) {
    var nativeSetTimeout = window.setTimeout;
    if (typeof nativeSetTimeout !== 'function') {
        return;
    }
    function setTimeoutWrapper(callback, timeout) {
        try {
            hit(source, 'setTimeout("' + String(callback) + '", ' + timeout + ')');
        } catch (e) {}
        return nativeSetTimeout.apply(window, arguments);
    }
    window.setTimeout = setTimeoutWrapper;
}"#;

pub static LOG_SET_TIMEOUT: ScriptletDefinition = ScriptletDefinition::new(
    "log-setTimeout",
    &["setTimeout-logger.js", "ubo-setTimeout-logger.js", "stl.js", "ubo-stl.js"],
    "logSetTimeout",
    &[],
    LOG_SET_TIMEOUT_BODY,
);

const ADJUST_SET_TIMEOUT_BODY: &str = r#"function adjustSetTimeout(source, match, timeout, boost) {
    var nativeSetTimeout = window.setTimeout;
    if (typeof nativeSetTimeout !== 'function') {
        return;
    }
    var nativeIsNaN = Number.isNaN || window.isNaN;
    var pattern;
    try {
        pattern = toRegExp(match);
    } catch (e) {
        return;
    }
    var timeoutValue = parseInt(timeout, 10);
    timeoutValue = nativeIsNaN(timeoutValue) ? 1000 : timeoutValue;
    var boostRatio = parseFloat(boost);
    boostRatio = nativeIsNaN(boostRatio) || !isFinite(boostRatio) ? 0.05 : boostRatio;
    function setTimeoutWrapper(callback, delay) {
        var args = Array.prototype.slice.call(arguments);
        try {
            if (delay === timeoutValue && pattern.test(String(callback))) {
                args[1] = delay * boostRatio;
                hit(source);
            }
        } catch (e) {}
        return nativeSetTimeout.apply(window, args);
    }
    window.setTimeout = setTimeoutWrapper;
}"#;

pub static ADJUST_SET_TIMEOUT: ScriptletDefinition = ScriptletDefinition::new(
    "adjust-setTimeout",
    &[
        "nano-setTimeout-booster.js",
        "ubo-nano-setTimeout-booster.js",
        "nano-stb.js",
        "ubo-nano-stb.js",
    ],
    "adjustSetTimeout",
    &[TO_REG_EXP],
    ADJUST_SET_TIMEOUT_BODY,
)
.with_native(behaviors::adjust_set_timeout);

const PREVENT_SET_TIMEOUT_BODY: &str = r#"function preventSetTimeout(source, match, delay) {
    var nativeSetTimeout = window.setTimeout;
    if (typeof nativeSetTimeout !== 'function') {
        return;
    }
    var nativeIsNaN = Number.isNaN || window.isNaN;
    var pattern;
    try {
        pattern = toRegExp(match);
    } catch (e) {
        return;
    }
    var delayValue = parseInt(delay, 10);
    delayValue = nativeIsNaN(delayValue) ? null : delayValue;
    function setTimeoutWrapper(callback, timeout) {
        try {
            if (pattern.test(String(callback)) && (delayValue === null || timeout === delayValue)) {
                hit(source);
                return nativeSetTimeout.call(window, function () {}, timeout);
            }
        } catch (e) {}
        return nativeSetTimeout.apply(window, arguments);
    }
    window.setTimeout = setTimeoutWrapper;
}"#;

pub static PREVENT_SET_TIMEOUT: ScriptletDefinition = ScriptletDefinition::new(
    "prevent-setTimeout",
    &[
        "setTimeout-defuser.js",
        "ubo-setTimeout-defuser.js",
        "nostif.js",
        "ubo-nostif.js",
    ],
    "preventSetTimeout",
    &[TO_REG_EXP],
    PREVENT_SET_TIMEOUT_BODY,
)
.with_native(behaviors::prevent_set_timeout);

/// Every scriptlet shipped with the crate
pub static BUILTIN: &[&ScriptletDefinition] = &[
    &SET_CONSTANT,
    &NOEVAL,
    &PREVENT_ADD_EVENT_LISTENER,
    &LOG_ADD_EVENT_LISTENER,
    &DISABLE_NEWTAB_LINKS,
    &LOG_SET_TIMEOUT,
    &ADJUST_SET_TIMEOUT,
    &PREVENT_SET_TIMEOUT,
];
