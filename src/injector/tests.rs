//! Injector tests

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::config::Config;
    use crate::engine::{Arg, Engine, Registry, Source};
    use crate::Error;
    use std::sync::Arc;

    fn setup() -> (Arc<RecordingSink>, ScriptletInjectorImpl) {
        let registry = Arc::new(Registry::builtin().unwrap());
        let sink = Arc::new(RecordingSink::new());
        let injector = ScriptletInjectorImpl::new(registry, sink.clone());
        (sink, injector)
    }

    #[tokio::test]
    async fn test_inject_delivers_and_tracks() {
        let (sink, injector) = setup();
        let source = Source::new("ubo-noeval.js");

        let injected = injector.inject("page-1", &source).await.unwrap();

        assert_eq!(injected.name, "noeval");
        assert!(uuid::Uuid::parse_str(&injected.script_id).is_ok());

        let deliveries = sink.deliveries().await;
        assert_eq!(deliveries.len(), 1);
        assert_eq!(deliveries[0].0, "page-1");
        assert_eq!(deliveries[0].1, injected.content);

        let tracked = injector.get_injected("page-1").await.unwrap();
        assert_eq!(tracked, vec![injected]);
    }

    #[tokio::test]
    async fn test_inject_names_match_generated_bundle() {
        let (_sink, injector) = setup();
        let registry = Registry::builtin().unwrap();

        for alias in ["nostif.js", "ubo-set.js", "aeld.js"] {
            let source = Source::new(alias).with_args(["x"]);
            let injected = injector.inject("page-1", &source).await.unwrap();
            let bundle = crate::engine::Compiler::new(&registry).plan(&source).unwrap();

            assert_eq!(injected.name, bundle.name());
            assert_eq!(injected.content, bundle.render());
        }
    }

    #[tokio::test]
    async fn test_generation_failure_never_reaches_sink() {
        let (sink, injector) = setup();

        let unknown = injector.inject("page-1", &Source::new("nonexistent")).await;
        assert!(matches!(unknown, Err(Error::NotFound(_))));

        let structured = Source::new("set-constant").arg(Arg::Structured(serde_json::json!({})));
        let result = injector.inject("page-1", &structured).await;
        assert!(matches!(result, Err(Error::Serialization(_))));

        assert!(sink.deliveries().await.is_empty());
        assert!(matches!(
            injector.get_injected("page-1").await,
            Err(Error::ScriptNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_sink_failure_is_injection_error() {
        let (sink, injector) = setup();
        sink.set_failing(true);

        let result = injector.inject("page-1", &Source::new("noeval")).await;

        assert!(matches!(result, Err(Error::Injection(_))));
        assert!(injector.get_injected("page-1").await.is_err());
    }

    #[tokio::test]
    async fn test_inject_rule_uses_config_defaults() {
        let registry = Arc::new(Registry::builtin().unwrap());
        let sink = Arc::new(RecordingSink::new());
        let config = Config {
            engine: Engine::Corelibs,
            verbose: true,
            ..Config::default()
        };
        let injector = ScriptletInjectorImpl::with_config(registry, sink.clone(), config);

        let injected = injector
            .inject_rule("page-1", "example.org##+js(nostif, ads, 300)")
            .await
            .unwrap();

        assert_eq!(injected.name, "prevent-setTimeout");
        assert!(injected.content.starts_with("function(source, args) {\n"));
    }

    #[tokio::test]
    async fn test_inject_rule_rejects_exceptions_and_garbage() {
        let (sink, injector) = setup();

        let exception = injector.inject_rule("page-1", "example.org#@#+js(noeval)").await;
        assert!(matches!(exception, Err(Error::Unsupported(_))));

        let garbage = injector.inject_rule("page-1", "example.org##.banner").await;
        assert!(matches!(garbage, Err(Error::InvalidRule(_))));

        assert!(sink.deliveries().await.is_empty());
    }

    #[tokio::test]
    async fn test_inject_all_keeps_input_order() {
        let (sink, injector) = setup();
        let sources = vec![
            Source::new("noeval"),
            Source::new("nonexistent"),
            Source::new("aeld.js").with_args(["click"]),
        ];

        let results = injector.inject_all("page-1", &sources).await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().name, "noeval");
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().name, "prevent-addEventListener");
        assert_eq!(sink.deliveries().await.len(), 2);
        assert_eq!(injector.get_injected("page-1").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_request_errors_are_told_apart_from_delivery_errors() {
        let (sink, injector) = setup();

        let sources = [
            Source::new("nonexistent"),
            Source::new("set-constant").arg(Arg::Callable("f".into())),
        ];
        let results = injector.inject_all("page-1", &sources).await;
        assert!(results.iter().all(|r| r.as_ref().unwrap_err().is_request_error()));

        let rule = injector.inject_rule("page-1", "example.org##.banner").await;
        assert!(rule.unwrap_err().is_request_error());

        sink.set_failing(true);
        let delivery = injector.inject("page-1", &Source::new("noeval")).await;
        assert!(!delivery.unwrap_err().is_request_error());

        let exception = injector.inject_rule("page-1", "example.org#@#+js(noeval)").await;
        assert!(!exception.unwrap_err().is_request_error());
    }

    #[tokio::test]
    async fn test_remove_and_clear() {
        let (_sink, injector) = setup();
        let first = injector.inject("page-1", &Source::new("noeval")).await.unwrap();
        let second = injector.inject("page-1", &Source::new("log-setTimeout")).await.unwrap();
        injector.inject("page-2", &Source::new("noeval")).await.unwrap();

        injector.remove("page-1", &first.script_id).await.unwrap();
        let remaining = injector.get_injected("page-1").await.unwrap();
        assert_eq!(remaining, vec![second]);

        let missing = injector.remove("page-1", &first.script_id).await;
        assert!(matches!(missing, Err(Error::ScriptNotFound(_))));

        injector.clear_all("page-1").await.unwrap();
        assert!(injector.get_injected("page-1").await.is_err());
        assert_eq!(injector.get_injected("page-2").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_injector_as_trait_object() {
        let (_sink, injector) = setup();
        let injector: Arc<dyn ScriptletInjector> = Arc::new(injector);

        let injected = injector
            .inject_rule("page-1", "example.org#%#//scriptlet('set-constant', 'a', 'true')")
            .await
            .unwrap();

        assert_eq!(injected.name, "set-constant");
        assert!(injected.content.starts_with("(function(source, args) {\n"));
    }
}
