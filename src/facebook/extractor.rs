//! Request extractors for Facebook cookie values.
//!
//! A bare extractor argument is required: if the cookie, the configuration,
//! or the requested field is missing the request fails with an illegal-state
//! error (HTTP 500), mirroring how the host would treat any other broken
//! precondition. Wrapping the extractor in `Option<_>` makes it optional -
//! any failure resolves to `None`.
//!
//! The host application registers [`FacebookConfig`] as app data:
//!
//! ```ignore
//! App::new()
//!     .app_data(web::Data::new(FacebookConfig::new(app_key, app_secret)))
//!     .route("/me", web::get().to(|uid: FacebookUserId| async move { ... }))
//! ```

use actix_web::{dev::Payload, error::ErrorInternalServerError, web, Error, FromRequest, HttpRequest};
use std::future::{ready, Ready};
use std::ops::Deref;

use super::cookie::{
    extract_cookie_data, CookieError, FacebookConfig, FacebookCookieData, ACCESS_TOKEN_KEY,
    USER_ID_KEY,
};

/// Extractor for the whole verified cookie payload.
#[derive(Debug, Clone)]
pub struct FacebookCookie(FacebookCookieData);

impl FacebookCookie {
    #[must_use]
    pub fn into_inner(self) -> FacebookCookieData {
        self.0
    }
}

impl Deref for FacebookCookie {
    type Target = FacebookCookieData;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for FacebookCookie {
    type Error = Error;
    type Future = Ready<Result<Self, Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(resolve_cookie(req).map(FacebookCookie))
    }
}

/// Extractor for the `uid` field of the cookie payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacebookUserId(String);

impl FacebookUserId {
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Deref for FacebookUserId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for FacebookUserId {
    type Error = Error;
    type Future = Ready<Result<Self, Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(resolve_field(req, USER_ID_KEY).map(FacebookUserId))
    }
}

/// Extractor for the `access_token` field of the cookie payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacebookAccessToken(String);

impl FacebookAccessToken {
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Deref for FacebookAccessToken {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for FacebookAccessToken {
    type Error = Error;
    type Future = Ready<Result<Self, Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(resolve_field(req, ACCESS_TOKEN_KEY).map(FacebookAccessToken))
    }
}

fn resolve_cookie(req: &HttpRequest) -> Result<FacebookCookieData, Error> {
    let Some(config) = req.app_data::<web::Data<FacebookConfig>>() else {
        log::error!("FacebookConfig is not registered as app data");
        return Err(ErrorInternalServerError(
            "Facebook authentication is not configured",
        ));
    };
    extract_cookie_data(req, config).map_err(|err| {
        log::debug!("Facebook cookie rejected: {err}");
        ErrorInternalServerError(err)
    })
}

fn resolve_field(req: &HttpRequest, key: &str) -> Result<String, Error> {
    let data = resolve_cookie(req)?;
    match data.get(key) {
        Some(value) => Ok(value.to_owned()),
        None => Err(ErrorInternalServerError(CookieError::MissingField(
            key.to_owned(),
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{facebook_config, signed_cookie_value};
    use actix_web::cookie::Cookie;
    use actix_web::test::TestRequest;

    fn request_with_cookie(fields: &[(&str, &str)]) -> HttpRequest {
        let config = facebook_config();
        TestRequest::default()
            .app_data(web::Data::new(config.clone()))
            .cookie(Cookie::new(config.cookie_name(), signed_cookie_value(fields)))
            .to_http_request()
    }

    #[test]
    fn resolves_the_verified_payload() {
        let req = request_with_cookie(&[("uid", "24500"), ("access_token", "tok")]);
        let data = resolve_cookie(&req).unwrap();
        assert_eq!(data.user_id(), Some("24500"));
    }

    #[test]
    fn resolves_a_single_field() {
        let req = request_with_cookie(&[("uid", "24500")]);
        assert_eq!(resolve_field(&req, USER_ID_KEY).unwrap(), "24500");
    }

    #[test]
    fn missing_field_reads_like_an_illegal_state() {
        let req = request_with_cookie(&[("uid", "24500")]);
        let err = resolve_field(&req, ACCESS_TOKEN_KEY).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing Facebook cookie value 'access_token'"
        );
    }

    #[test]
    fn missing_cookie_is_an_error() {
        let req = TestRequest::default()
            .app_data(web::Data::new(facebook_config()))
            .to_http_request();
        assert!(resolve_cookie(&req).is_err());
    }

    #[test]
    fn unregistered_config_is_an_error() {
        let req = TestRequest::default().to_http_request();
        assert!(resolve_cookie(&req).is_err());
    }
}
