//! Injector integration tests
//!
//! These tests validate delivery of filter-list rules to a recording sink.

use scriptlet_oxide::engine::Registry;
use scriptlet_oxide::injector::{RecordingSink, ScriptletInjector, ScriptletInjectorImpl};
use scriptlet_oxide::Config;
use std::sync::Arc;

const RULES: &[&str] = &[
    "example.org#%#//scriptlet('set-constant', 'ads.enabled', 'false')",
    "example.org##+js(nostif, ads, 300)",
    "example.org##+js(aeld, click)",
];

/// Test 1: A filter list lands on the page in order
#[tokio::test]
async fn test_filter_list_injection() {
    let registry = Arc::new(Registry::builtin().unwrap());
    let sink = Arc::new(RecordingSink::new());
    let injector = ScriptletInjectorImpl::new(registry, sink.clone());

    for rule in RULES {
        injector.inject_rule("tab-7", rule).await.unwrap();
    }

    let names: Vec<_> = injector
        .get_injected("tab-7")
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names, vec!["set-constant", "prevent-setTimeout", "prevent-addEventListener"]);

    let deliveries = sink.deliveries().await;
    assert_eq!(deliveries.len(), 3);
    assert!(deliveries.iter().all(|(target, _)| target == "tab-7"));
    assert!(deliveries[0].1.contains(r#"["ads.enabled", "false"]"#));
}

/// Test 2: Injection timestamps are ordered
#[tokio::test]
async fn test_injection_timestamps() {
    let registry = Arc::new(Registry::builtin().unwrap());
    let injector = ScriptletInjectorImpl::with_config(
        registry,
        Arc::new(RecordingSink::new()),
        Config::from_toml("engine = \"corelibs\"").unwrap(),
    );

    let first = injector.inject_rule("tab-1", RULES[0]).await.unwrap();
    let second = injector.inject_rule("tab-1", RULES[1]).await.unwrap();

    assert!(first.injected_at <= second.injected_at);
    assert_ne!(first.script_id, second.script_id);
    assert!(first.content.starts_with("function(source, args) {"));
}

/// Test 3: Injected records serialize for host reporting
#[tokio::test]
async fn test_injected_scriptlet_serializes() {
    let registry = Arc::new(Registry::builtin().unwrap());
    let injector = ScriptletInjectorImpl::new(registry, Arc::new(RecordingSink::new()));

    let injected = injector.inject_rule("tab-1", RULES[2]).await.unwrap();
    let json = serde_json::to_value(&injected).unwrap();

    assert_eq!(json["name"], "prevent-addEventListener");
    assert_eq!(json["script_id"], injected.script_id.as_str());
    assert!(json["injected_at"].is_string());
}
