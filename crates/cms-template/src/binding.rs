// ============================================================================
// CMS Template - Helper Bindings
// File: crates/cms-template/src/binding.rs
// ============================================================================
//! The standard helper set.
//!
//! Helpers are synchronous: they run on the blocking render thread and wait
//! on the async repositories through the runtime handle. They must never be
//! called from an async worker thread, see [`crate::PageRenderer`].

use std::future::Future;
use std::sync::Arc;

use cms_core::error::DomainError;
use cms_core::i18n::translate;
use cms_core::repositories::{MenuRepository, OptionRepository};
use cms_core::services::MenuService;
use serde::Serialize;
use serde_json::Value;
use tokio::runtime::Handle;

use crate::error::RegistryError;
use crate::registry::{HelperFn, HelperRegistry};

fn to_value<T: Serialize>(value: T) -> Result<Value, DomainError> {
    serde_json::to_value(value).map_err(|e| DomainError::InternalError(e.to_string()))
}

fn blocking<T, F>(handle: &Handle, read: F) -> Result<Value, DomainError>
where
    T: Serialize,
    F: Future<Output = Result<T, DomainError>>,
{
    to_value(handle.block_on(read)?)
}

/// Register `listMenu`, `listMenuAsTree`, `listMenuTeams`, `listMenuByTeam`,
/// `listMenuAsTreeByTeam` and `getMenuCount`.
pub fn register_menu_helpers<M, O>(
    registry: &mut HelperRegistry,
    service: Arc<MenuService<M, O>>,
    handle: Handle,
) -> Result<(), RegistryError>
where
    M: MenuRepository + ?Sized + 'static,
    O: OptionRepository + ?Sized + 'static,
{
    let (s, h) = (service.clone(), handle.clone());
    registry.register("listMenu", HelperFn::nullary(move || blocking(&h, s.list_menu())))?;

    let (s, h) = (service.clone(), handle.clone());
    registry.register("listMenuAsTree", HelperFn::nullary(move || blocking(&h, s.list_menu_as_tree())))?;

    let (s, h) = (service.clone(), handle.clone());
    registry.register("listMenuTeams", HelperFn::nullary(move || blocking(&h, s.list_teams())))?;

    let (s, h) = (service.clone(), handle.clone());
    registry.register("listMenuByTeam", HelperFn::team(move |team| blocking(&h, s.list_by_team(team))))?;

    let (s, h) = (service.clone(), handle.clone());
    registry.register(
        "listMenuAsTreeByTeam",
        HelperFn::team(move |team| blocking(&h, s.list_as_tree_by_team(team))),
    )?;

    registry.register("getMenuCount", HelperFn::nullary(move || blocking(&handle, service.count())))?;
    Ok(())
}

/// Register `t`: `{{t lang "landing.download_now"}}`,
/// `{{t lang "key" "fallback"}}`, `{{t lang "key" a b}}`.
pub fn register_i18n_helpers(registry: &mut HelperRegistry) -> Result<(), RegistryError> {
    registry.register("t", HelperFn::translate(translate))
}
