//! One-shot flash messages carried across a redirect in a private cookie.

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, PrivateCookieJar, SameSite};
use time::Duration;

pub const FLASH_COOKIE: &str = "vaxbook_flash";

/// Queue `message` for the next page render.
pub fn push(jar: PrivateCookieJar, message: impl Into<String>) -> PrivateCookieJar {
    jar.add(
        Cookie::build(Cookie::new(FLASH_COOKIE, message.into()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(Duration::minutes(5))
            .build(),
    )
}

/// Read and clear the pending message, if any.
pub fn take(jar: PrivateCookieJar) -> (PrivateCookieJar, Option<String>) {
    let Some(message) = jar.get(FLASH_COOKIE).map(|c| c.value().to_owned()) else {
        return (jar, None);
    };
    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/").build());
    (jar, Some(message))
}

/// `303 See Other` to `to`, with `message` flashed on arrival.
pub fn redirect(jar: PrivateCookieJar, message: impl Into<String>, to: &str) -> Response {
    (push(jar, message), Redirect::to(to)).into_response()
}
