//! One-shot flash messages, carried in a signed cookie across a redirect.
//!
//! The cookie value is `base64url(message).hex(hmac-sha256)`. A redirect sets it, and the next
//! rendered page shows the message and clears the cookie again.

use std::sync::Arc;

use anyhow::{format_err, Result};
use axum::{
    async_trait,
    extract::{Extension, FromRequestParts},
    http::{header, request::Parts, HeaderValue},
    response::{IntoResponse, Redirect, Response},
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use cookie::{Cookie, SameSite};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::{constants::FLASH_COOKIE_NAME, error::ServerError, server::State};

type HmacSha256 = Hmac<Sha256>;

/// Signs and verifies flash cookie values with the configured secret key.
#[derive(Clone)]
pub(crate) struct FlashSigner {
    mac: HmacSha256,
}

impl FlashSigner {
    pub(crate) fn new(secret_key: &[u8]) -> Result<Self> {
        let mac = HmacSha256::new_from_slice(secret_key)
            .map_err(|e| format_err!("invalid secret key: {}", e))?;
        Ok(FlashSigner { mac })
    }

    fn tag(&self, payload: &str) -> HmacSha256 {
        let mut mac = self.mac.clone();
        mac.update(payload.as_bytes());
        mac
    }

    pub(crate) fn sign(&self, message: &str) -> String {
        let payload = URL_SAFE_NO_PAD.encode(message);
        let tag = hex::encode(self.tag(&payload).finalize().into_bytes());
        format!("{}.{}", payload, tag)
    }

    /// The message inside `value`, or `None` if it is malformed or was not signed by us.
    pub(crate) fn verify(&self, value: &str) -> Option<String> {
        let (payload, tag) = value.rsplit_once('.')?;
        let tag = hex::decode(tag).ok()?;
        self.tag(payload).verify_slice(&tag).ok()?;
        let message = URL_SAFE_NO_PAD.decode(payload).ok()?;
        String::from_utf8(message).ok()
    }

    fn cookie(&self, message: &str) -> Cookie<'static> {
        Cookie::build((FLASH_COOKIE_NAME, self.sign(message)))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build()
    }
}

/// The flash message sent with the current request, if any.
#[derive(Debug)]
pub(crate) struct Flash(pub(crate) Option<String>);

#[async_trait]
impl<S> FromRequestParts<S> for Flash
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Extension(app) = Extension::<Arc<State>>::from_request_parts(parts, state).await?;

        let message = parts
            .headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(Cookie::split_parse)
            .filter_map(|cookie| cookie.ok())
            .find(|cookie| cookie.name() == FLASH_COOKIE_NAME)
            .and_then(|cookie| app.flash.verify(cookie.value()));

        Ok(Flash(message))
    }
}

/// Redirect to `to`, leaving `message` for the next rendered page.
pub(crate) fn redirect(state: &State, to: &str, message: &str) -> Result<Response, ServerError> {
    let cookie = state.flash.cookie(message);
    let mut res = Redirect::to(to).into_response();
    res.headers_mut()
        .append(header::SET_COOKIE, HeaderValue::try_from(cookie.to_string())?);
    Ok(res)
}

/// Clear a flash message that has just been shown.
pub(crate) fn consume(res: &mut Response) -> Result<(), ServerError> {
    let mut cookie = Cookie::build((FLASH_COOKIE_NAME, "")).path("/").build();
    cookie.make_removal();
    res.headers_mut()
        .append(header::SET_COOKIE, HeaderValue::try_from(cookie.to_string())?);
    Ok(())
}
