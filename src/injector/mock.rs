//! Mock script sink for testing
//!
//! Records every delivery instead of placing it into a page.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

use super::traits::ScriptSink;
use crate::Error;

/// Sink that records deliveries
#[derive(Debug, Default)]
pub struct RecordingSink {
    deliveries: Arc<Mutex<Vec<(String, String)>>>,
    failing: AtomicBool,
}

impl RecordingSink {
    /// Create a new recording sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following delivery fail
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::Relaxed);
    }

    /// Deliveries so far as `(target_id, script)`
    pub async fn deliveries(&self) -> Vec<(String, String)> {
        self.deliveries.lock().await.clone()
    }
}

#[async_trait]
impl ScriptSink for RecordingSink {
    async fn deliver(&self, target_id: &str, script: &str) -> Result<(), Error> {
        if self.failing.load(Ordering::Relaxed) {
            return Err(Error::injection("Sink is closed"));
        }

        self.deliveries
            .lock()
            .await
            .push((target_id.to_string(), script.to_string()));
        Ok(())
    }
}
