// ============================================================================
// CMS Template - Helper Registry
// File: crates/cms-template/src/registry.rs
// ============================================================================
//! Typed helper registry.
//!
//! Every helper belongs to one signature class, fixed at registration:
//! - `Nullary`: no arguments (`listMenu`, `getMenuCount`, ...)
//! - `Team`: one team label (`listMenuByTeam`, `listMenuAsTreeByTeam`)
//! - `Translate`: locale, key, then any number of extra arguments (`t`)
//!
//! The page-author facing names below are pinned to their class, so a
//! mis-wired helper fails at startup rather than in the middle of a render.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use cms_core::error::DomainError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::error::RegistryError;

pub type NullaryFn = Arc<dyn Fn() -> Result<Value, DomainError> + Send + Sync>;
pub type TeamFn = Arc<dyn Fn(&str) -> Result<Value, DomainError> + Send + Sync>;
pub type TranslateFn = Arc<dyn Fn(&str, &str, &[Value]) -> String + Send + Sync>;

static HELPER_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid regex"));

/// Helper names templates rely on, with their fixed signature class.
pub const STABLE_HELPERS: &[(&str, Signature)] = &[
    ("listMenu", Signature::Nullary),
    ("listMenuAsTree", Signature::Nullary),
    ("listMenuTeams", Signature::Nullary),
    ("listMenuByTeam", Signature::Team),
    ("listMenuAsTreeByTeam", Signature::Team),
    ("getMenuCount", Signature::Nullary),
    ("t", Signature::Translate),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signature {
    Nullary,
    Team,
    Translate,
}

impl Signature {
    fn describe(&self) -> &'static str {
        match self {
            Signature::Nullary => "no",
            Signature::Team => "exactly 1",
            Signature::Translate => "at least 2",
        }
    }

    fn accepts(&self, count: usize) -> bool {
        match self {
            Signature::Nullary => count == 0,
            Signature::Team => count == 1,
            Signature::Translate => count >= 2,
        }
    }
}

#[derive(Clone)]
pub enum HelperFn {
    Nullary(NullaryFn),
    Team(TeamFn),
    Translate(TranslateFn),
}

impl HelperFn {
    pub fn nullary<F>(f: F) -> Self
    where
        F: Fn() -> Result<Value, DomainError> + Send + Sync + 'static,
    {
        HelperFn::Nullary(Arc::new(f))
    }

    pub fn team<F>(f: F) -> Self
    where
        F: Fn(&str) -> Result<Value, DomainError> + Send + Sync + 'static,
    {
        HelperFn::Team(Arc::new(f))
    }

    pub fn translate<F>(f: F) -> Self
    where
        F: Fn(&str, &str, &[Value]) -> String + Send + Sync + 'static,
    {
        HelperFn::Translate(Arc::new(f))
    }

    pub fn signature(&self) -> Signature {
        match self {
            HelperFn::Nullary(_) => Signature::Nullary,
            HelperFn::Team(_) => Signature::Team,
            HelperFn::Translate(_) => Signature::Translate,
        }
    }

    /// Invoke with template arguments, checking arity and argument types.
    pub fn invoke(&self, name: &str, args: &[Value]) -> Result<Value, RegistryError> {
        let signature = self.signature();
        if !signature.accepts(args.len()) {
            return Err(RegistryError::Arity {
                name: name.to_string(),
                expected: signature.describe(),
                actual: args.len(),
            });
        }
        let failed = |e: DomainError| RegistryError::Failed { name: name.to_string(), message: e.to_string() };
        match self {
            HelperFn::Nullary(f) => f().map_err(failed),
            HelperFn::Team(f) => f(string_arg(name, args, 0)?).map_err(failed),
            HelperFn::Translate(f) => {
                let locale = string_arg(name, args, 0)?;
                let key = string_arg(name, args, 1)?;
                Ok(Value::String(f(locale, key, &args[2..])))
            }
        }
    }
}

impl fmt::Debug for HelperFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HelperFn::{:?}", self.signature())
    }
}

/// Strings pass through; a missing template value reads as the empty string.
fn string_arg<'a>(name: &str, args: &'a [Value], index: usize) -> Result<&'a str, RegistryError> {
    match &args[index] {
        Value::String(s) => Ok(s.as_str()),
        Value::Null => Ok(""),
        _ => Err(RegistryError::ArgumentType { name: name.to_string(), index }),
    }
}

#[derive(Debug, Default, Clone)]
pub struct HelperRegistry {
    helpers: BTreeMap<String, HelperFn>,
}

impl HelperRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: &str, helper: HelperFn) -> Result<(), RegistryError> {
        if !HELPER_NAME.is_match(name) {
            return Err(RegistryError::InvalidName(name.to_string()));
        }
        if self.helpers.contains_key(name) {
            return Err(RegistryError::Duplicate(name.to_string()));
        }
        if let Some((_, expected)) = STABLE_HELPERS.iter().find(|(stable, _)| *stable == name) {
            if *expected != helper.signature() {
                return Err(RegistryError::SignatureMismatch {
                    name: name.to_string(),
                    expected: *expected,
                    actual: helper.signature(),
                });
            }
        }
        self.helpers.insert(name.to_string(), helper);
        Ok(())
    }

    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value, RegistryError> {
        self.helpers
            .get(name)
            .ok_or_else(|| RegistryError::Unknown(name.to_string()))?
            .invoke(name, args)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.helpers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.helpers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.helpers.is_empty()
    }

    pub fn into_entries(self) -> impl Iterator<Item = (String, HelperFn)> {
        self.helpers.into_iter()
    }
}
