//! The `auth-token` session cookie.
//!
//! HTTP-only, `SameSite=Lax`, `Secure` when configured, path `/`, max-age
//! equal to the session lifetime. Logout simply clears the cookie; there is
//! no server-side revocation, so a leaked token stays valid until expiry.

use axum_extra::extract::cookie::{Cookie, SameSite};

use crate::config::ServerConfig;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "auth-token";

/// Build the session cookie carrying a freshly issued token.
pub fn session_cookie(token: String, config: &ServerConfig) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.cookie_secure)
        .max_age(time::Duration::hours(config.jwt.session_expiry_hours))
        .build()
}

/// Build an expired cookie that clears the session client-side.
pub fn clear_session_cookie(config: &ServerConfig) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.cookie_secure)
        .max_age(time::Duration::ZERO)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::JwtConfig;

    fn test_config() -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec![],
            request_timeout_secs: 30,
            cookie_secure: false,
            portal_base_url: "http://localhost:5173".to_string(),
            jwt: JwtConfig {
                secret: "test-secret".to_string(),
                session_expiry_hours: 24,
            },
        }
    }

    #[test]
    fn session_cookie_attributes() {
        let cookie = session_cookie("tok".to_string(), &test_config());
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.value(), "tok");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.max_age(), Some(time::Duration::hours(24)));
        assert_eq!(cookie.path(), Some("/"));
    }

    #[test]
    fn clear_cookie_zeroes_max_age() {
        let cookie = clear_session_cookie(&test_config());
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
    }
}
