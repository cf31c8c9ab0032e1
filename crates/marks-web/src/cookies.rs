//! Session cookie encoding and extraction.
//!
//! The cookie is HttpOnly, SameSite=Lax, path `/`, with no expiry: it lasts
//! until logout or browser close, and the server forgets it on restart.

use axum::http::{HeaderMap, header};
use cookie::{Cookie, SameSite};
use marks_config::SessionConfig;

/// `Set-Cookie` value carrying a fresh session token.
#[must_use]
pub fn session_cookie(config: &SessionConfig, token: &str) -> String {
    let mut c = Cookie::build((config.cookie_name.clone(), token.to_string()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .build();
    if config.cookie_secure {
        c.set_secure(true);
    }
    c.to_string()
}

/// `Set-Cookie` value that makes the browser drop the session cookie.
#[must_use]
pub fn clear_session_cookie(config: &SessionConfig) -> String {
    let mut c = Cookie::build((config.cookie_name.clone(), String::new()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .expires(time::OffsetDateTime::UNIX_EPOCH)
        .build();
    if config.cookie_secure {
        c.set_secure(true);
    }
    c.to_string()
}

/// Find the session token among the request's `Cookie` headers.
#[must_use]
pub fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|c| c.name() == cookie_name && !c.value().is_empty())
        .map(|c| c.value().to_string())
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn session_cookie_attributes() {
        let value = session_cookie(&SessionConfig::default(), "abc123");
        assert!(value.starts_with("session_token=abc123"));
        assert!(value.contains("HttpOnly"));
        assert!(value.contains("SameSite=Lax"));
        assert!(value.contains("Path=/"));
        assert!(!value.contains("Secure"));
        assert!(!value.contains("Expires"));
        assert!(!value.contains("Max-Age"));
    }

    #[test]
    fn secure_flag_follows_config() {
        let config = SessionConfig {
            cookie_secure: true,
            ..SessionConfig::default()
        };
        assert!(session_cookie(&config, "abc").contains("Secure"));
    }

    #[test]
    fn clearing_cookie_expires_in_the_past() {
        let value = clear_session_cookie(&SessionConfig::default());
        assert!(value.starts_with("session_token="));
        assert!(value.contains("1970"));
    }

    #[test]
    fn token_is_found_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("theme=dark"));
        headers.append(
            header::COOKIE,
            HeaderValue::from_static("lang=en; session_token=feed; x=1"),
        );
        assert_eq!(
            session_token(&headers, "session_token").as_deref(),
            Some("feed")
        );
        assert_eq!(session_token(&headers, "other"), None);
    }

    #[test]
    fn empty_token_counts_as_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("session_token="));
        assert_eq!(session_token(&headers, "session_token"), None);
    }
}
