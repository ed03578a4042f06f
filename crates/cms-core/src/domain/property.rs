//! Site option keys with their built-in defaults

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyDefault {
    Str(&'static str),
    Bool(bool),
}

/// A site option key and the value used when the store has none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Property {
    pub key: &'static str,
    pub default: PropertyDefault,
}

impl Property {
    pub const fn string(key: &'static str, default: &'static str) -> Self {
        Self { key, default: PropertyDefault::Str(default) }
    }

    pub const fn boolean(key: &'static str, default: bool) -> Self {
        Self { key, default: PropertyDefault::Bool(default) }
    }
}

pub const DEFAULT_MENU_TEAM: Property = Property::string("default_menu_team", "");
pub const BLOG_LOCALE: Property = Property::string("blog_locale", "zh");
pub const COMMENT_API_ENABLED: Property = Property::boolean("comment_api_enabled", false);
pub const COMMENT_GRAVATAR_SOURCE: Property =
    Property::string("comment_gravatar_source", "//gravatar.com/avatar/");
pub const COMMENT_GRAVATAR_DEFAULT: Property = Property::string("comment_gravatar_default", "mm");
pub const COMMENT_CONTENT_PLACEHOLDER: Property = Property::string("comment_content_placeholder", "");
