//! Locale negotiation and the translation helper used by templates.

pub mod catalog;
pub mod format;
pub mod locale;

pub use catalog::{catalog, Catalog};
pub use locale::{has_client_signal, resolve_locale, LocaleResolution, LocaleSource, LocaleTag, StickyPreference};

use serde_json::Value;

/// Translate `key` for `locale`.
///
/// Lookup order: requested locale, base locale, the first argument as a
/// literal fallback, then the key itself. A found string is interpolated
/// only when more than one argument is given; a lone argument is the
/// fallback slot and leaves the string untouched.
pub fn translate(locale: &str, key: &str, args: &[Value]) -> String {
    translate_with(catalog(), locale, key, args)
}

pub fn translate_with(catalog: &Catalog, locale: &str, key: &str, args: &[Value]) -> String {
    let tag = LocaleTag::normalize(locale);
    match catalog.resolve(tag.as_str(), key) {
        Some(found) if args.len() > 1 => format::format_args(found, args),
        Some(found) => found.to_string(),
        None => match args.first() {
            Some(fallback) if !fallback.is_null() => format::display(fallback),
            _ => {
                tracing::debug!(locale = %tag, key, "missing translation");
                key.to_string()
            }
        },
    }
}
