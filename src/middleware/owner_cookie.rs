//! Ownership cookie handling.
//!
//! A browser proves it owns a flower by presenting the flower's owner token
//! in the `flower_owner` cookie. There are no accounts; the token is the
//! whole credential.
//!
//! # Cookie policy
//!
//! - Set only when a new flower is planted, never refreshed on re-entry
//! - HttpOnly, SameSite=Strict, Path=/
//! - One year lifetime by default (`OWNER_COOKIE_MAX_AGE_DAYS`)
//! - Secure when the public URL is https

use axum::{
    body::Body,
    extract::Request,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;

use crate::config::Config;

/// Ownership cookie name.
pub const OWNER_COOKIE_NAME: &str = "flower_owner";

/// Owner token presented by the browser, injected into request extensions.
#[derive(Clone, Debug, Default)]
pub struct OwnerCookie(pub Option<String>);

impl OwnerCookie {
    pub fn token(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

/// Middleware that reads the ownership cookie.
///
/// Never rejects: an absent or empty cookie becomes `OwnerCookie(None)`.
pub async fn read_owner_cookie(jar: CookieJar, mut req: Request<Body>, next: Next) -> Response {
    req.extensions_mut()
        .insert(OwnerCookie(owner_token_from_jar(&jar)));

    next.run(req).await
}

/// The cookie value exactly as sent. Tokens are compared verbatim, so no
/// trimming happens here.
fn owner_token_from_jar(jar: &CookieJar) -> Option<String> {
    jar.get(OWNER_COOKIE_NAME)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

/// Build the cookie handed out with a freshly planted flower.
pub fn owner_cookie(owner_token: String, config: &Config) -> Cookie<'static> {
    let mut cookie = Cookie::build((OWNER_COOKIE_NAME, owner_token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .max_age(time::Duration::days(config.owner_cookie.max_age_days))
        .build();

    if config.server.is_https() {
        cookie.set_secure(true);
    }

    cookie
}
