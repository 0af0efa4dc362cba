//! Scriptlet injector implementation
//!
//! Generates bundles against a shared registry and delivers them through a
//! host sink.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::traits::*;
use crate::config::Config;
use crate::engine::{Compiler, Registry, ScriptletRule, Source};
use crate::Error;

/// Scriptlet injector implementation
pub struct ScriptletInjectorImpl {
    registry: Arc<Registry>,
    sink: Arc<dyn ScriptSink>,
    /// Engine and verbose defaults for rule-text injections
    config: Config,
    /// Injected scriptlets tracking
    injected: Arc<RwLock<HashMap<String, Vec<InjectedScriptlet>>>>,
}

impl ScriptletInjectorImpl {
    /// Create a new scriptlet injector
    pub fn new(registry: Arc<Registry>, sink: Arc<dyn ScriptSink>) -> Self {
        Self::with_config(registry, sink, Config::default())
    }

    /// Create a new scriptlet injector with explicit defaults
    pub fn with_config(registry: Arc<Registry>, sink: Arc<dyn ScriptSink>, config: Config) -> Self {
        Self {
            registry,
            sink,
            config,
            injected: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Generate script ID
    fn generate_script_id(&self) -> String {
        Uuid::new_v4().to_string()
    }

    /// Track injected scriptlet
    async fn track(&self, target_id: &str, injected: InjectedScriptlet) {
        let mut tracker = self.injected.write().await;
        tracker
            .entry(target_id.to_string())
            .or_insert_with(Vec::new)
            .push(injected);
    }
}

#[async_trait]
impl ScriptletInjector for ScriptletInjectorImpl {
    async fn inject(&self, target_id: &str, source: &Source) -> Result<InjectedScriptlet, Error> {
        let bundle = Compiler::new(&self.registry).plan(source)?;
        let name = bundle.name().to_string();
        let content = bundle.render();

        if let Err(e) = self.sink.deliver(target_id, &content).await {
            tracing::error!(target_id, scriptlet = %name, "Failed to deliver scriptlet: {}", e);
            return Err(Error::injection(format!("{} on {}: {}", name, target_id, e)));
        }

        let injected = InjectedScriptlet {
            script_id: self.generate_script_id(),
            name,
            content,
            injected_at: Utc::now(),
        };
        tracing::debug!(
            target_id,
            script_id = %injected.script_id,
            scriptlet = %injected.name,
            bytes = injected.content.len(),
            "Scriptlet injected"
        );

        self.track(target_id, injected.clone()).await;
        Ok(injected)
    }

    async fn inject_rule(&self, target_id: &str, rule_text: &str) -> Result<InjectedScriptlet, Error> {
        let rule = ScriptletRule::parse(rule_text)?;
        if rule.exception {
            return Err(Error::unsupported(format!(
                "exception rule cannot be injected: {}",
                rule_text
            )));
        }

        let source = rule.to_source(self.config.engine, self.config.verbose);
        self.inject(target_id, &source).await
    }

    async fn inject_all(&self, target_id: &str, sources: &[Source]) -> Vec<Result<InjectedScriptlet, Error>> {
        let results =
            futures::future::join_all(sources.iter().map(|source| self.inject(target_id, source))).await;

        let (rejected, failed) = results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .fold((0, 0), |(rejected, failed), e| {
                if e.is_request_error() {
                    (rejected + 1, failed)
                } else {
                    (rejected, failed + 1)
                }
            });
        if rejected > 0 {
            tracing::warn!(target_id, rejected, total = results.len(), "Some scriptlet requests were rejected");
        }
        if failed > 0 {
            tracing::error!(target_id, failed, total = results.len(), "Some scriptlets failed to inject");
        }

        results
    }

    async fn get_injected(&self, target_id: &str) -> Result<Vec<InjectedScriptlet>, Error> {
        let tracker = self.injected.read().await;
        tracker
            .get(target_id)
            .cloned()
            .ok_or_else(|| Error::script_not_found(format!("No scriptlets injected into: {}", target_id)))
    }

    async fn remove(&self, target_id: &str, script_id: &str) -> Result<(), Error> {
        let mut tracker = self.injected.write().await;

        let scripts = tracker
            .get_mut(target_id)
            .ok_or_else(|| Error::script_not_found(format!("No scriptlets injected into: {}", target_id)))?;
        let before = scripts.len();
        scripts.retain(|s| s.script_id != script_id);

        if scripts.len() == before {
            return Err(Error::script_not_found(script_id));
        }
        Ok(())
    }

    async fn clear_all(&self, target_id: &str) -> Result<(), Error> {
        let mut tracker = self.injected.write().await;
        tracker.remove(target_id);

        Ok(())
    }
}
