//! Static translation catalog.
//!
//! Built once on first use and never mutated afterwards, so concurrent
//! renders read it without locking.

use std::collections::HashMap;

use cms_shared::constants::DEFAULT_LOCALE;
use once_cell::sync::Lazy;

type Table = HashMap<&'static str, &'static str>;

const ZH: &[(&str, &str)] = &[
    ("landing.download_windows", "下载 Windows"),
    ("landing.download_macos", "下载 macOS"),
    ("landing.download_now", "立即下载"),
    ("landing.clone_source", "克隆源码"),
    ("landing.available_for", "支持 macOS、Linux、Windows"),
];

const EN: &[(&str, &str)] = &[
    ("landing.download_windows", "Download for Windows"),
    ("landing.download_macos", "Download for macOS"),
    ("landing.download_now", "Download now"),
    ("landing.clone_source", "Clone source"),
    ("landing.available_for", "Available for macOS, Linux, and Windows"),
];

static CATALOG: Lazy<Catalog> = Lazy::new(|| Catalog::from_entries(&[("zh", ZH), ("en", EN)], DEFAULT_LOCALE));

pub fn catalog() -> &'static Catalog {
    &CATALOG
}

/// Layered (locale, key) lookup with a base locale behind every locale.
#[derive(Debug)]
pub struct Catalog {
    base_locale: &'static str,
    tables: HashMap<&'static str, Table>,
}

impl Catalog {
    pub fn from_entries(locales: &[(&'static str, &[(&'static str, &'static str)])], base_locale: &'static str) -> Self {
        let tables = locales
            .iter()
            .map(|(locale, entries)| (*locale, entries.iter().copied().collect::<Table>()))
            .collect();
        Self { base_locale, tables }
    }

    pub fn locales(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.tables.keys().copied()
    }

    /// Exact entry only. Empty strings count as missing.
    pub fn get(&self, locale: &str, key: &str) -> Option<&'static str> {
        self.tables
            .get(locale)
            .and_then(|table| table.get(key))
            .copied()
            .filter(|value| !value.is_empty())
    }

    /// Requested locale first, then the base locale.
    pub fn resolve(&self, locale: &str, key: &str) -> Option<&'static str> {
        self.get(locale, key).or_else(|| self.get(self.base_locale, key))
    }
}
