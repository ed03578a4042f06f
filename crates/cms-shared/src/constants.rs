//! Application-wide constants

/// System default locale, also the base locale of the translation catalog.
pub const DEFAULT_LOCALE: &str = "zh";

/// Cookie holding the sticky locale preference.
pub const LOCALE_COOKIE: &str = "sonic_lang";

/// One year, in seconds.
pub const LOCALE_COOKIE_MAX_AGE: i64 = 60 * 60 * 24 * 365;

pub const DEFAULT_RENDER_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 1_000;
