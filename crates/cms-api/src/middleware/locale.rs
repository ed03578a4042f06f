// ============================================================================
// CMS API - Locale Middleware
// File: crates/cms-api/src/middleware/locale.rs
// ============================================================================
//! Locale negotiation for every request.
//!
//! Signals, highest first: `?lang=`, the locale cookie, `Accept-Language`,
//! then the `blog_locale` site option. The negotiated `LocaleTag` is
//! inserted as a request extension and echoed in `Content-Language`. An
//! explicit `?lang=` is remembered in the cookie for a year.

use axum::{
    extract::{Query, Request, State},
    http::{
        header::{ACCEPT_LANGUAGE, CONTENT_LANGUAGE, COOKIE, SET_COOKIE},
        HeaderMap, HeaderValue,
    },
    middleware::Next,
    response::Response,
};
use cms_core::domain::property::BLOG_LOCALE;
use cms_core::i18n::{has_client_signal, resolve_locale, LocaleResolution};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct LocaleQuery {
    lang: Option<String>,
}

fn explicit_locale(request: &Request) -> Option<String> {
    Query::<LocaleQuery>::try_from_uri(request.uri()).ok().and_then(|Query(q)| q.lang)
}

/// Value of cookie `name`, if the request carries it.
fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_string())
}

fn header_str(headers: &HeaderMap, name: axum::http::HeaderName) -> Option<String> {
    headers.get(name).and_then(|value| value.to_str().ok()).map(str::to_string)
}

pub async fn negotiate_locale(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let cookie_name = state.config.site.locale_cookie.as_str();
    let explicit = explicit_locale(&request);
    let sticky = cookie_value(request.headers(), cookie_name);
    let accept = header_str(request.headers(), ACCEPT_LANGUAGE);

    let site_default = if has_client_signal(explicit.as_deref(), sticky.as_deref(), accept.as_deref()) {
        None
    } else {
        Some(state.options.get_string(&BLOG_LOCALE).await)
    };

    let LocaleResolution { tag, source, persist } =
        resolve_locale(explicit.as_deref(), sticky.as_deref(), accept.as_deref(), || site_default);
    debug!(locale = %tag, ?source, "Negotiated locale");

    request.extensions_mut().insert(tag.clone());
    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(tag.as_str()) {
        response.headers_mut().insert(CONTENT_LANGUAGE, value);
    }
    if let Some(preference) = persist {
        let cookie = format!("{}={}; Max-Age={}; Path=/", cookie_name, preference.tag, preference.max_age_secs);
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
            }
            Err(e) => warn!("Locale cookie not set: {}", e),
        }
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_value() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("theme=dark; sonic_lang=en ; other=1"));
        assert_eq!(cookie_value(&headers, "sonic_lang").as_deref(), Some("en"));
        assert_eq!(cookie_value(&headers, "lang"), None);
        assert_eq!(cookie_value(&HeaderMap::new(), "sonic_lang"), None);
    }

    #[test]
    fn test_explicit_locale_from_query() {
        let request = axum::http::Request::builder().uri("/docs?lang=en-US&x=1").body(axum::body::Body::empty()).unwrap();
        assert_eq!(explicit_locale(&request).as_deref(), Some("en-US"));
        let request = axum::http::Request::builder().uri("/docs").body(axum::body::Body::empty()).unwrap();
        assert_eq!(explicit_locale(&request), None);
    }
}
