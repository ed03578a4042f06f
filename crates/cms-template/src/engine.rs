//! Handlebars engine setup.
//!
//! Registry entries become handlebars helpers that return JSON, so they work
//! both inline (`{{getMenuCount}}`) and as sub-expressions
//! (`{{#each (listMenuAsTree)}}`).

use std::path::Path;

use handlebars::{
    Context, Handlebars, Helper, HelperDef, RenderContext, RenderError, RenderErrorReason, ScopedJson,
};
use serde_json::Value;
use tracing::{info, warn};

use crate::registry::{HelperFn, HelperRegistry};

pub const TEMPLATE_EXTENSION: &str = "hbs";

struct BoundHelper {
    name: String,
    helper: HelperFn,
}

impl HelperDef for BoundHelper {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'rc>, RenderError> {
        let args: Vec<Value> = h.params().iter().map(|param| param.value().clone()).collect();
        self.helper
            .invoke(&self.name, &args)
            .map(ScopedJson::Derived)
            .map_err(|e| RenderErrorReason::Other(e.to_string()).into())
    }
}

/// Install every registry entry as a handlebars helper.
pub fn install_helpers(handlebars: &mut Handlebars<'static>, registry: HelperRegistry) {
    for (name, helper) in registry.into_entries() {
        let key = name.clone();
        handlebars.register_helper(&key, Box::new(BoundHelper { name, helper }));
    }
}

/// Engine with helpers installed and every `*.hbs` file of `template_dir`
/// registered under its file stem.
pub fn build_engine(
    template_dir: impl AsRef<Path>,
    registry: HelperRegistry,
) -> Result<Handlebars<'static>, handlebars::TemplateError> {
    let mut handlebars = Handlebars::new();
    install_helpers(&mut handlebars, registry);

    let dir = template_dir.as_ref();
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Template directory {} not readable: {}", dir.display(), e);
            return Ok(handlebars);
        }
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some(TEMPLATE_EXTENSION) {
            continue;
        }
        if let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) {
            handlebars.register_template_file(name, &path)?;
            info!(template = name, "Registered template");
        }
    }
    Ok(handlebars)
}
