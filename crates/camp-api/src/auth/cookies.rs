use axum_extra::extract::cookie::{Cookie, SameSite};

use crate::state::CookieConfig;

pub const AUTH_COOKIE: &str = "auth_token";
pub const REFRESH_COOKIE: &str = "refresh_token";

/// HttpOnly, path `/`, secure outside development, optional shared domain
fn base_cookie(name: &'static str, value: String, config: &CookieConfig) -> Cookie<'static> {
    let mut cookie = Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .secure(!config.environment.is_development())
        .build();

    if let Some(domain) = &config.domain {
        cookie.set_domain(domain.clone());
    }
    cookie
}

pub fn create_auth_cookie(token: String, config: &CookieConfig) -> Cookie<'static> {
    let mut cookie = base_cookie(AUTH_COOKIE, token, config);
    cookie.set_max_age(time::Duration::minutes(config.access_expiry_minutes));
    cookie.set_same_site(SameSite::Lax);
    cookie
}

pub fn create_refresh_token_cookie(token: String, config: &CookieConfig) -> Cookie<'static> {
    let mut cookie = base_cookie(REFRESH_COOKIE, token, config);
    cookie.set_max_age(time::Duration::days(config.refresh_expiry_days));
    cookie.set_same_site(SameSite::Strict);
    cookie
}

/// Cookie matching `name`'s path and domain, for `PrivateCookieJar::remove`
pub fn removal_cookie(name: &'static str, config: &CookieConfig) -> Cookie<'static> {
    base_cookie(name, String::new(), config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;

    fn config(environment: Environment, domain: Option<&str>) -> CookieConfig {
        CookieConfig {
            environment,
            domain: domain.map(String::from),
            access_expiry_minutes: 15,
            refresh_expiry_days: 7,
        }
    }

    #[test]
    fn test_create_auth_cookie_development() {
        let cookie = create_auth_cookie("token".to_string(), &config(Environment::Development, None));

        assert_eq!(cookie.name(), "auth_token");
        assert_eq!(cookie.value(), "token");
        assert_eq!(cookie.path(), Some("/"));
        assert!(cookie.http_only().unwrap_or(false));
        assert!(!cookie.secure().unwrap_or(true), "Should not be secure in development");
        assert_eq!(cookie.max_age(), Some(time::Duration::minutes(15)));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.domain(), None);
    }

    #[test]
    fn test_create_refresh_cookie_production() {
        let cookie = create_refresh_token_cookie(
            "refresh".to_string(),
            &config(Environment::Production, Some("camps.example.org")),
        );

        assert_eq!(cookie.name(), "refresh_token");
        assert!(cookie.secure().unwrap_or(false), "Should be secure in production");
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.max_age(), Some(time::Duration::days(7)));
        assert_eq!(cookie.domain(), Some("camps.example.org"));
    }

    #[test]
    fn test_removal_cookie_matches_path_and_domain() {
        let cookie = removal_cookie(
            AUTH_COOKIE,
            &config(Environment::Production, Some("camps.example.org")),
        );
        assert_eq!(cookie.name(), AUTH_COOKIE);
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.domain(), Some("camps.example.org"));
    }
}
