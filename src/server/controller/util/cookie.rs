use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Utc;

use crate::server::model::db::SessionModel;

/// Name of the cookie carrying the login session token.
pub const SESSION_COOKIE_NAME: &str = "auth_session";

/// Derives the cookies that carry a login session to the client.
///
/// Cookies are scoped to `/` and expire together with the session.
pub fn session_cookies(session: &SessionModel) -> Vec<Cookie<'static>> {
    let remaining = (session.expires_at - Utc::now().naive_utc())
        .num_seconds()
        .max(0);

    let cookie = Cookie::build((SESSION_COOKIE_NAME, session.id.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(!cfg!(debug_assertions))
        .max_age(time::Duration::seconds(remaining))
        .build();

    vec![cookie]
}

/// Adds the session cookies to the jar.
pub fn set_session_cookies(jar: CookieJar, session: &SessionModel) -> CookieJar {
    session_cookies(session)
        .into_iter()
        .fold(jar, |jar, cookie| jar.add(cookie))
}

/// Instructs the client to drop its session cookie.
pub fn remove_session_cookie(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE_NAME).path("/"))
}

/// Session token sent with the request, if any.
pub fn session_token(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
}
