//! Carries a one-shot status message across a redirect.
//!
//! The message is stored as JSON in an encrypted private cookie by the POST
//! handler and removed by the next page render that reads it.

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};

use crate::{Error, alert::Alert};

pub(crate) const COOKIE_FLASH: &str = "flash";

/// Store `alert` in the cookie jar so the next page load can display it.
///
/// # Errors
/// Returns [Error::FlashSerializationError] if the alert cannot be encoded.
pub(crate) fn set_flash(jar: PrivateCookieJar, alert: &Alert) -> Result<PrivateCookieJar, Error> {
    let value = serde_json::to_string(alert)
        .map_err(|error| Error::FlashSerializationError(error.to_string()))?;

    Ok(jar.add(
        Cookie::build((COOKIE_FLASH, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax),
    ))
}

/// Remove the pending alert from the cookie jar and return it.
///
/// A cookie that cannot be decoded is discarded.
pub(crate) fn take_flash(jar: PrivateCookieJar) -> (PrivateCookieJar, Option<Alert>) {
    let Some(cookie) = jar.get(COOKIE_FLASH) else {
        return (jar, None);
    };

    let alert = serde_json::from_str(cookie.value())
        .inspect_err(|error| tracing::warn!("Discarding malformed flash cookie: {error}"))
        .ok();

    (jar.remove(Cookie::build(COOKIE_FLASH).path("/")), alert)
}
