//! Auth cookie construction
//!
//! Both cookies are HttpOnly, `SameSite=None` and `Secure`. Browsers refuse
//! `SameSite=None` without `Secure`, so the insecure development policy falls
//! back to `SameSite=Lax`.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use super::jwt::TokenPair;

pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

#[derive(Debug, Clone, Copy)]
pub struct CookiePolicy {
    pub secure: bool,
}

impl Default for CookiePolicy {
    fn default() -> Self {
        Self { secure: true }
    }
}

impl CookiePolicy {
    pub fn build(&self, name: &'static str, value: String) -> Cookie<'static> {
        let same_site = if self.secure {
            SameSite::None
        } else {
            SameSite::Lax
        };

        Cookie::build((name, value))
            .http_only(true)
            .secure(self.secure)
            .same_site(same_site)
            .path("/")
            .build()
    }

    /// Set both token cookies
    pub fn set_tokens(&self, jar: CookieJar, tokens: &TokenPair) -> CookieJar {
        jar.add(self.build(ACCESS_TOKEN_COOKIE, tokens.access_token.clone()))
            .add(self.build(REFRESH_TOKEN_COOKIE, tokens.refresh_token.clone()))
    }

    /// Set only the rotated refresh cookie
    pub fn set_refresh(&self, jar: CookieJar, tokens: &TokenPair) -> CookieJar {
        jar.add(self.build(REFRESH_TOKEN_COOKIE, tokens.refresh_token.clone()))
    }

    /// Expire both token cookies
    ///
    /// Removal cookies are always sent, whether or not the request carried
    /// the cookies.
    pub fn clear(&self, jar: CookieJar) -> CookieJar {
        jar.add(self.removal(REFRESH_TOKEN_COOKIE))
            .add(self.removal(ACCESS_TOKEN_COOKIE))
    }

    fn removal(&self, name: &'static str) -> Cookie<'static> {
        let mut cookie = self.build(name, String::new());
        cookie.make_removal();
        cookie
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_attributes() {
        let cookie = CookiePolicy::default().build(REFRESH_TOKEN_COOKIE, "abc".to_string());
        let rendered = cookie.to_string();

        assert!(rendered.starts_with("refresh_token=abc"));
        assert!(rendered.contains("HttpOnly"));
        assert!(rendered.contains("Secure"));
        assert!(rendered.contains("SameSite=None"));
        assert!(rendered.contains("Path=/"));
    }

    #[test]
    fn test_insecure_policy_for_local_http() {
        let cookie = CookiePolicy { secure: false }.build(ACCESS_TOKEN_COOKIE, "abc".to_string());
        let rendered = cookie.to_string();
        assert!(!rendered.contains("Secure"));
        assert!(rendered.contains("SameSite=Lax"));
    }

    #[test]
    fn test_clear_emits_removal_cookies_on_empty_jar() {
        let jar = CookiePolicy::default().clear(CookieJar::new());

        for name in [ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE] {
            let cookie = jar.get(name).unwrap();
            assert_eq!(cookie.value(), "");
            assert!(cookie.to_string().contains("Max-Age=0"));
        }
    }
}
