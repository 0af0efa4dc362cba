//! Generation integration tests
//!
//! These tests validate the public generation surface: requests in, source
//! text out.

mod common;

use common::registry;
use scriptlet_oxide::engine::{Compiler, Engine, ScriptletRule, Source};
use scriptlet_oxide::scriptlet::{BUILTIN, BUILTIN_HELPERS};
use scriptlet_oxide::{invoke, Error};

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

/// Test 1: Every name of every scriptlet generates the same text
#[test]
fn test_alias_transparency_across_catalogue() {
    let registry = registry();
    let compiler = Compiler::new(&registry);

    for definition in BUILTIN {
        let expected = compiler
            .generate(&Source::new(definition.name()).with_args(["x", "1"]).verbose(true))
            .unwrap();
        for alias in definition.aliases() {
            let generated = compiler
                .generate(&Source::new(*alias).with_args(["x", "1"]).verbose(true))
                .unwrap();
            assert_eq!(generated, expected, "{} differs from {}", alias, definition.name());
        }
    }
}

/// Test 2: Helpers appear once, dependencies first
#[test]
fn test_helper_definitions_appear_once_in_order() {
    let code = invoke(&Source::new("set-constant").with_args(["a", "1"])).unwrap();

    for helper in BUILTIN_HELPERS {
        let declaration = format!("function {}(", helper.id);
        if code.contains(&declaration) {
            assert_eq!(count(&code, &declaration), 1, "{} emitted twice", helper.id);
        }
    }

    let escape = code.find("function escapeRegExp(").unwrap();
    let to_reg_exp = code.find("function toRegExp(").unwrap();
    let stack = code.find("function matchStackTrace(").unwrap();
    let hook = code.find("function hit(").unwrap();
    let body = code.find("function setConstant(").unwrap();
    assert!(escape < to_reg_exp && to_reg_exp < stack && stack < hook && hook < body);
}

/// Test 3: Unused helpers are not emitted
#[test]
fn test_only_needed_helpers_emitted() {
    let code = invoke(&Source::new("noeval")).unwrap();
    for helper in BUILTIN_HELPERS {
        assert!(!code.contains(&format!("function {}(", helper.id)));
    }
    assert_eq!(count(&code, "function hit("), 1);
}

/// Test 4: Unknown names and unrepresentable arguments fail
#[test]
fn test_generation_errors() {
    let registry = registry();
    let compiler = Compiler::new(&registry);

    assert!(matches!(
        compiler.generate(&Source::new("set-constant.JS")),
        Err(Error::NotFound(_))
    ));

    let request = Source::from_json(r#"{"name": "set-constant", "args": ["a", {"nested": true}]}"#).unwrap();
    assert!(matches!(compiler.generate(&request), Err(Error::Serialization(_))));
}

/// Test 5: Argument text is escaped for script context
#[test]
fn test_hostile_arguments_are_escaped() {
    let code = invoke(&Source::new("set-constant").with_args(["a", "</script><script>alert(1)</script>"])).unwrap();

    assert!(!code.contains("</script>"));
    assert!(code.contains(r#""<\/script><script>alert(1)<\/script>""#));
}

/// Test 6: JSON requests generate like builder requests
#[test]
fn test_json_request() {
    let from_json = Source::from_json(
        r#"{"name": "ubo-nostif.js", "args": ["ads", 300], "engine": "corelibs", "verbose": false}"#,
    )
    .unwrap();
    let built = Source::new("prevent-setTimeout")
        .arg("ads")
        .arg(300)
        .engine(Engine::Corelibs);

    assert_eq!(invoke(&from_json).unwrap(), invoke(&built).unwrap());
}

/// Test 7: Extension bundles embed the record and arguments
#[test]
fn test_extension_bundle_shape() {
    let code = invoke(&Source::new("aeld.js").with_args(["click"]).verbose(true)).unwrap();

    assert!(code.starts_with("(function(source, args) {\n"));
    assert!(code.ends_with(
        r#"})({"name":"prevent-addEventListener","engine":"extension","verbose":true}, ["click"]);"#
    ));
    assert!(code.contains("preventAddEventListener.apply(this, updatedArgs);"));
}

/// Test 8: Rule text round trip through generation
#[test]
fn test_rule_to_bundle() {
    let ublock: ScriptletRule = "example.org##+js(set, ads.enabled, false)".parse().unwrap();
    let adguard: ScriptletRule = ublock.to_adguard().parse().unwrap();

    assert_eq!(adguard.name, "ubo-set.js");
    assert_eq!(
        invoke(&ublock.to_source(Engine::Extension, false)).unwrap(),
        invoke(&adguard.to_source(Engine::Extension, false)).unwrap()
    );
}

/// Test 9: Concurrent generation over a shared registry
#[tokio::test]
async fn test_concurrent_generation() {
    let registry = std::sync::Arc::new(registry());
    let expected = Compiler::new(&registry)
        .generate(&Source::new("set-constant").with_args(["a", "true"]))
        .unwrap();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let registry = registry.clone();
            let name = ["set-constant", "set.js", "ubo-set.js", "set-constant.js"][i % 4];
            tokio::spawn(async move {
                Compiler::new(&registry).generate(&Source::new(name).with_args(["a", "true"]))
            })
        })
        .collect();

    for result in futures::future::join_all(handles).await {
        assert_eq!(result.unwrap().unwrap(), expected);
    }
}
