// ============================================================================
// CMS Template - Page Renderer
// File: crates/cms-template/src/renderer.rs
// ============================================================================
//! Bounded page rendering.
//!
//! Helpers block on repository reads, so every render runs on the blocking
//! pool and is raced against the render deadline.

use std::sync::Arc;
use std::time::Duration;

use handlebars::Handlebars;
use serde_json::Value;
use tracing::{debug, error};

use crate::error::RenderFailure;

#[derive(Clone)]
pub struct PageRenderer {
    engine: Arc<Handlebars<'static>>,
    render_timeout: Duration,
}

impl PageRenderer {
    pub fn new(engine: Handlebars<'static>, render_timeout: Duration) -> Self {
        Self { engine: Arc::new(engine), render_timeout }
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.engine.has_template(name)
    }

    pub async fn render(&self, name: &str, data: Value) -> Result<String, RenderFailure> {
        if !self.has_template(name) {
            return Err(RenderFailure::TemplateNotFound(name.to_string()));
        }

        let engine = self.engine.clone();
        let template = name.to_string();
        let task = tokio::task::spawn_blocking(move || engine.render(&template, &data));

        match tokio::time::timeout(self.render_timeout, task).await {
            Ok(Ok(Ok(html))) => {
                debug!(template = name, bytes = html.len(), "Rendered page");
                Ok(html)
            }
            Ok(Ok(Err(e))) => {
                error!(template = name, "Render failed: {}", e);
                Err(RenderFailure::Render(e.to_string()))
            }
            Ok(Err(e)) => Err(RenderFailure::Join(e.to_string())),
            Err(_) => {
                let timeout_ms = self.render_timeout.as_millis() as u64;
                error!(template = name, timeout_ms, "Render timed out");
                Err(RenderFailure::Timeout(timeout_ms))
            }
        }
    }
}
