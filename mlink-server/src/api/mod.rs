pub mod files;
pub mod home;
pub mod login;
pub mod register;
pub mod users;

use crate::state::AppState;

use tower_cookies::{Cookie, Cookies};

/// Set the httpOnly session cookie carrying the raw token string.
pub(crate) fn set_session_cookie(state: &AppState, cookies: &Cookies, token: &str) {
    let cookie = Cookie::build((state.cookie_name.clone(), token.to_string()))
        .http_only(true)
        .path("/")
        .build();
    cookies.add(cookie);
}

/// Clear the session cookie (empty value, already expired).
pub(crate) fn clear_session_cookie(state: &AppState, cookies: &Cookies) {
    let cookie = Cookie::build((state.cookie_name.clone(), ""))
        .http_only(true)
        .path("/")
        .build();
    cookies.remove(cookie);
}

/// Current session token from the request cookies, if any.
pub(crate) fn session_token(state: &AppState, cookies: &Cookies) -> Option<String> {
    cookies
        .get(&state.cookie_name)
        .map(|cookie| cookie.value().to_string())
}
