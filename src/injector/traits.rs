//! Injector traits
//!
//! This module defines the delivery seam between generated bundles and the
//! host that actually places them into a page.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::engine::Source;

// ============================================================================
// Script Sink
// ============================================================================

/// Script sink trait
///
/// Host-provided delivery mechanism (content-script bridge, user-script
/// manager, devtools session). Receives finished source text only.
#[async_trait]
pub trait ScriptSink: Send + Sync {
    /// Deliver a script to the given target
    async fn deliver(&self, target_id: &str, script: &str) -> Result<(), crate::Error>;
}

// ============================================================================
// Scriptlet Injector
// ============================================================================

/// Scriptlet injector trait
///
/// Generates bundles and hands them to a [`ScriptSink`], tracking what was
/// injected per target.
#[async_trait]
pub trait ScriptletInjector: Send + Sync {
    /// Generate and deliver one request
    async fn inject(&self, target_id: &str, source: &Source) -> Result<InjectedScriptlet, crate::Error>;

    /// Parse a filter-list rule, then generate and deliver it
    async fn inject_rule(&self, target_id: &str, rule_text: &str) -> Result<InjectedScriptlet, crate::Error>;

    /// Inject several requests; one result per request, in input order
    async fn inject_all(
        &self,
        target_id: &str,
        sources: &[Source],
    ) -> Vec<Result<InjectedScriptlet, crate::Error>>;

    /// Get all scriptlets injected into a target
    async fn get_injected(&self, target_id: &str) -> Result<Vec<InjectedScriptlet>, crate::Error>;

    /// Forget one injected scriptlet
    async fn remove(&self, target_id: &str, script_id: &str) -> Result<(), crate::Error>;

    /// Forget every scriptlet injected into a target
    async fn clear_all(&self, target_id: &str) -> Result<(), crate::Error>;
}

/// Injected scriptlet information
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InjectedScriptlet {
    pub script_id: String,
    /// Canonical scriptlet name
    pub name: String,
    pub content: String,
    pub injected_at: DateTime<Utc>,
}
