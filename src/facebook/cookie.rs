//! Parsing and verification of the Facebook auth cookie.
//!
//! Wire format (owned by the platform): a cookie named `fbs_{app_key}` whose
//! value, optionally surrounded by double quotes, is a set of URL-encoded
//! `key=value` pairs joined by `&`. One pair, `sig`, carries the signature:
//! the base64url (unpadded) HMAC-SHA256 of the canonical payload - all other
//! pairs, percent-decoded, sorted by key and rendered as `key=value` joined
//! by `&` - keyed with the application secret.
//!
//! The payload map is only handed to callers after the signature validates.

use actix_web::HttpRequest;
use anyhow::{anyhow, Context, Result};
use base64::{engine::general_purpose, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::collections::HashMap;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Payload field carrying the signature.
const SIG_KEY: &str = "sig";

/// Conventional payload field holding the Facebook user id.
pub const USER_ID_KEY: &str = "uid";

/// Conventional payload field holding the access token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Application credentials needed to locate and verify the auth cookie.
#[derive(Clone)]
pub struct FacebookConfig {
    pub app_key: String,
    pub app_secret: String,
}

impl FacebookConfig {
    #[must_use]
    pub fn new(app_key: impl Into<String>, app_secret: impl Into<String>) -> Self {
        Self {
            app_key: app_key.into(),
            app_secret: app_secret.into(),
        }
    }

    /// Name of the auth cookie for this application.
    #[must_use]
    pub fn cookie_name(&self) -> String {
        cookie_name(&self.app_key)
    }
}

impl std::fmt::Debug for FacebookConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FacebookConfig")
            .field("app_key", &self.app_key)
            .field("app_secret", &"<redacted>")
            .finish()
    }
}

/// Name of the auth cookie the login widget sets for the given application
/// key.
#[must_use]
pub fn cookie_name(app_key: &str) -> String {
    format!("fbs_{app_key}")
}

/// Facebook cookie errors
#[derive(Debug, Error)]
pub enum CookieError {
    /// The auth cookie is not present on the request.
    #[error("Facebook auth cookie '{0}' not found")]
    Missing(String),

    /// The cookie value could not be decoded into a signed payload.
    #[error("malformed Facebook cookie payload: {0}")]
    Malformed(String),

    /// The payload signature did not validate against the app secret.
    #[error("Facebook cookie signature mismatch")]
    SignatureMismatch,

    /// A payload field a handler requires is absent.
    #[error("Missing Facebook cookie value '{0}'")]
    MissingField(String),
}

/// Verified payload of the Facebook auth cookie.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacebookCookieData {
    fields: HashMap<String, String>,
}

impl FacebookCookieData {
    /// Look up a payload field by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Look up a payload field a caller cannot proceed without.
    ///
    /// # Errors
    ///
    /// Returns [`CookieError::MissingField`] if the field is absent.
    pub fn require(&self, key: &str) -> Result<&str, CookieError> {
        self.get(key)
            .ok_or_else(|| CookieError::MissingField(key.to_owned()))
    }

    /// The Facebook user id, if the widget stored one.
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.get(USER_ID_KEY)
    }

    /// The access token, if the widget stored one.
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.get(ACCESS_TOKEN_KEY)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Decode and verify a raw cookie value.
///
/// # Errors
///
/// Returns [`CookieError::Malformed`] when the value does not decode into
/// signed `key=value` pairs, and [`CookieError::SignatureMismatch`] when the
/// signature does not validate against the app secret.
pub fn parse_cookie_value(raw: &str, app_secret: &str) -> Result<FacebookCookieData, CookieError> {
    // Some user agents hand the value back surrounded by double quotes
    let payload = raw.trim().trim_matches('"');

    let mut fields = HashMap::new();
    let mut signature = None;
    for pair in payload.split('&').filter(|pair| !pair.is_empty()) {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| CookieError::Malformed(format!("field '{pair}' has no value")))?;
        let key = urlencoding::decode(key)
            .map_err(|_| CookieError::Malformed(format!("field name '{key}' is not UTF-8")))?;
        let value = urlencoding::decode(value)
            .map_err(|_| CookieError::Malformed(format!("value of '{key}' is not UTF-8")))?;
        if key == SIG_KEY {
            signature = Some(value.into_owned());
        } else {
            fields.insert(key.into_owned(), value.into_owned());
        }
    }

    let signature =
        signature.ok_or_else(|| CookieError::Malformed("no 'sig' field".to_owned()))?;
    verify_signature(&fields, &signature, app_secret)?;

    Ok(FacebookCookieData { fields })
}

/// Look up and verify the auth cookie on an incoming request.
///
/// # Errors
///
/// Returns [`CookieError::Missing`] when the cookie is absent, otherwise
/// propagates [`parse_cookie_value`] errors.
pub fn extract_cookie_data(
    req: &HttpRequest,
    config: &FacebookConfig,
) -> Result<FacebookCookieData, CookieError> {
    let name = config.cookie_name();
    let cookie = req.cookie(&name).ok_or(CookieError::Missing(name))?;
    parse_cookie_value(cookie.value(), &config.app_secret)
}

fn verify_signature(
    fields: &HashMap<String, String>,
    signature: &str,
    app_secret: &str,
) -> Result<(), CookieError> {
    let tag = general_purpose::URL_SAFE_NO_PAD
        .decode(signature)
        .map_err(|_| CookieError::SignatureMismatch)?;
    let mut mac = HmacSha256::new_from_slice(app_secret.as_bytes())
        .map_err(|_| CookieError::SignatureMismatch)?;
    mac.update(canonical_payload(fields).as_bytes());
    // Constant-time comparison
    mac.verify_slice(&tag)
        .map_err(|_| CookieError::SignatureMismatch)
}

fn canonical_payload(fields: &HashMap<String, String>) -> String {
    let mut pairs: Vec<(&str, &str)> = fields
        .iter()
        .map(|(key, value)| (key.as_str(), value.as_str()))
        .collect();
    pairs.sort_unstable();
    pairs
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Sign a payload the way the login widget does.
///
/// The inverse of [`verify_signature`]; used by test fixtures and tooling to
/// mint cookies.
///
/// # Errors
///
/// Returns an error if the HMAC cannot be initialized.
pub fn sign_payload(fields: &HashMap<String, String>, app_secret: &str) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(app_secret.as_bytes())
        .map_err(|e| anyhow!("failed to initialize HMAC-SHA256: {e}"))?;
    mac.update(canonical_payload(fields).as_bytes());
    Ok(general_purpose::URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes()))
}

/// Render a full cookie value - URL-encoded pairs plus the `sig` field - for
/// the given payload.
///
/// # Errors
///
/// Returns an error if signing fails.
pub fn encode_cookie_value(fields: &HashMap<String, String>, app_secret: &str) -> Result<String> {
    let signature = sign_payload(fields, app_secret).context("failed to sign cookie payload")?;

    let mut pairs: Vec<(&str, &str)> = fields
        .iter()
        .map(|(key, value)| (key.as_str(), value.as_str()))
        .collect();
    pairs.sort_unstable();
    pairs.push((SIG_KEY, &signature));

    Ok(pairs
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&"))
}
