//! Locale negotiation.
//!
//! Signals are consulted in a fixed order and the first non-blank one wins:
//! explicit `?lang=` override, sticky cookie, `Accept-Language`, the site
//! default option, then [`DEFAULT_LOCALE`]. Whatever wins is normalized to a
//! bare 2–3 letter language code; anything unparseable becomes `zh`.

use std::fmt;

use cms_shared::constants::{DEFAULT_LOCALE, LOCALE_COOKIE_MAX_AGE};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static BASE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z]{2,3}$").expect("valid regex"));

/// Normalized lowercase language code, e.g. `zh`, `en`, `fr`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LocaleTag(String);

impl LocaleTag {
    pub fn normalize(raw: &str) -> Self {
        let mut value = raw.trim();
        if let Some(idx) = value.find(',') {
            value = &value[..idx];
        }
        if let Some(idx) = value.find(';') {
            value = &value[..idx];
        }
        let lowered = value.trim().to_lowercase();
        let base = match lowered.find(['-', '_']) {
            Some(idx) => &lowered[..idx],
            None => lowered.as_str(),
        };
        match base {
            "zh" => Self::default(),
            "en" => Self("en".to_string()),
            code if BASE_CODE.is_match(code) => Self(code.to_string()),
            _ => Self::default(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LocaleTag {
    fn default() -> Self {
        Self(DEFAULT_LOCALE.to_string())
    }
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LocaleTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Which signal produced the negotiated locale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaleSource {
    Explicit,
    Sticky,
    AcceptLanguage,
    SiteDefault,
    Fallback,
}

/// Instruction for the boundary layer to remember the choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StickyPreference {
    pub tag: LocaleTag,
    pub max_age_secs: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleResolution {
    pub tag: LocaleTag,
    pub source: LocaleSource,
    /// Set only when an explicit override was present.
    pub persist: Option<StickyPreference>,
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// True when any client-side signal is present, i.e. the site default will
/// not be consulted.
pub fn has_client_signal(explicit: Option<&str>, sticky: Option<&str>, accept_language: Option<&str>) -> bool {
    present(explicit).or(present(sticky)).or(present(accept_language)).is_some()
}

/// Negotiate the request locale. Never fails.
///
/// `site_default` is only invoked when no client signal is present.
pub fn resolve_locale<F>(
    explicit: Option<&str>,
    sticky: Option<&str>,
    accept_language: Option<&str>,
    site_default: F,
) -> LocaleResolution
where
    F: FnOnce() -> Option<String>,
{
    if let Some(raw) = present(explicit) {
        let tag = LocaleTag::normalize(raw);
        return LocaleResolution {
            persist: Some(StickyPreference { tag: tag.clone(), max_age_secs: LOCALE_COOKIE_MAX_AGE }),
            tag,
            source: LocaleSource::Explicit,
        };
    }

    let chosen = present(sticky)
        .map(|raw| (raw.to_string(), LocaleSource::Sticky))
        .or_else(|| present(accept_language).map(|raw| (raw.to_string(), LocaleSource::AcceptLanguage)))
        .or_else(|| {
            site_default()
                .filter(|raw| !raw.trim().is_empty())
                .map(|raw| (raw, LocaleSource::SiteDefault))
        });

    match chosen {
        Some((raw, source)) => LocaleResolution { tag: LocaleTag::normalize(&raw), source, persist: None },
        None => LocaleResolution { tag: LocaleTag::default(), source: LocaleSource::Fallback, persist: None },
    }
}
