//! Which team's menus a page shows when the template does not name one.
//!
//! Two levels: pick a team (configured default, else the first non-blank
//! known team), then, if an explicitly configured team turns out empty,
//! rescue with the first other team that has menus. Operators rename teams
//! without migrating rows, and a page must still get a navigation.

use std::future::Future;

use tracing::{debug, warn};

use crate::error::DomainError;

/// Configured team if set, otherwise the first non-blank known team,
/// otherwise the empty label.
pub fn resolve_default_team(configured: &str, known_teams: &[String]) -> String {
    if !configured.is_empty() {
        return configured.to_string();
    }
    known_teams
        .iter()
        .find(|team| !team.is_empty())
        .cloned()
        .unwrap_or_default()
}

/// Fetch the default team's items, with cross-team rescue.
///
/// Only `lookup` failures for the chosen team propagate. The team listing and
/// rescue lookups are best effort: their failures are logged and skipped.
pub async fn resolve_with_fallback<T, L, LFut, K, KFut>(
    configured: &str,
    lookup: L,
    known_teams: K,
) -> Result<Vec<T>, DomainError>
where
    L: Fn(String) -> LFut,
    LFut: Future<Output = Result<Vec<T>, DomainError>>,
    K: FnOnce() -> KFut,
    KFut: Future<Output = Result<Vec<String>, DomainError>>,
{
    let mut known_teams = Some(known_teams);
    let mut teams = || {
        let fetch = known_teams.take();
        async move {
            match fetch {
                Some(fetch) => fetch().await.unwrap_or_else(|e| {
                    warn!("Failed to list menu teams: {}", e);
                    Vec::new()
                }),
                None => Vec::new(),
            }
        }
    };

    let team = if configured.is_empty() {
        resolve_default_team(configured, &teams().await)
    } else {
        configured.to_string()
    };

    let items = lookup(team.clone()).await?;
    if !items.is_empty() || configured.is_empty() {
        return Ok(items);
    }

    debug!(team = %configured, "configured menu team is empty, scanning other teams");
    for candidate in teams().await {
        if candidate.is_empty() || candidate == configured {
            continue;
        }
        match lookup(candidate.clone()).await {
            Ok(found) if !found.is_empty() => {
                debug!(team = %candidate, "using fallback menu team");
                return Ok(found);
            }
            Ok(_) => {}
            Err(e) => warn!(team = %candidate, "Fallback menu lookup failed: {}", e),
        }
    }
    Ok(items)
}
