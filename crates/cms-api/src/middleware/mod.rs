//! Request middleware

pub mod locale;

pub use locale::negotiate_locale;
