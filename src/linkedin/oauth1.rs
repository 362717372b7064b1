//! OAuth1 request signing for LinkedIn API calls.
//!
//! Covers exactly what the client needs: RFC 3986 percent-encoding, the
//! signature base string, an HMAC-SHA1 signature, and the `Authorization`
//! header. The core is deterministic - nonce and timestamp are explicit
//! parameters - so signing is testable; the public path fills in fresh
//! values.

use anyhow::{anyhow, Result};
use base64::{engine::general_purpose, Engine as _};
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha1::Sha1;
use std::borrow::Cow;
use url::Url;

use crate::models::{ApiCredentials, OAuthToken};

type HmacSha1 = Hmac<Sha1>;

const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const OAUTH_VERSION: &str = "1.0";

/// Signs outgoing requests with the application credentials and an access
/// token.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credentials: ApiCredentials,
    token: OAuthToken,
}

impl RequestSigner {
    #[must_use]
    pub fn new(credentials: ApiCredentials, token: OAuthToken) -> Self {
        Self { credentials, token }
    }

    /// Build the `Authorization` header value for a request.
    ///
    /// # Errors
    ///
    /// Returns an error if the signature cannot be computed.
    pub fn authorization_header(&self, method: &str, url: &Url) -> Result<String> {
        let nonce = generate_nonce();
        let timestamp = chrono::Utc::now().timestamp();
        self.authorization_header_at(method, url, &nonce, timestamp)
    }

    pub(crate) fn authorization_header_at(
        &self,
        method: &str,
        url: &Url,
        nonce: &str,
        timestamp: i64,
    ) -> Result<String> {
        let oauth_params = self.oauth_params(nonce, timestamp);
        let base_string = signature_base_string(method, url, &oauth_params);
        let signature = self.sign(&base_string)?;

        let mut header_params = oauth_params;
        header_params.push(("oauth_signature".to_owned(), signature));

        let rendered = header_params
            .iter()
            .map(|(key, value)| format!("{key}=\"{}\"", percent_encode(value)))
            .collect::<Vec<_>>()
            .join(", ");
        Ok(format!("OAuth {rendered}"))
    }

    fn oauth_params(&self, nonce: &str, timestamp: i64) -> Vec<(String, String)> {
        vec![
            (
                "oauth_consumer_key".to_owned(),
                self.credentials.consumer_key.clone(),
            ),
            ("oauth_nonce".to_owned(), nonce.to_owned()),
            (
                "oauth_signature_method".to_owned(),
                SIGNATURE_METHOD.to_owned(),
            ),
            ("oauth_timestamp".to_owned(), timestamp.to_string()),
            ("oauth_token".to_owned(), self.token.value.clone()),
            ("oauth_version".to_owned(), OAUTH_VERSION.to_owned()),
        ]
    }

    fn sign(&self, base_string: &str) -> Result<String> {
        let key = format!(
            "{}&{}",
            percent_encode(&self.credentials.consumer_secret),
            percent_encode(&self.token.secret)
        );
        let mut mac = HmacSha1::new_from_slice(key.as_bytes())
            .map_err(|e| anyhow!("failed to initialize HMAC-SHA1: {e}"))?;
        mac.update(base_string.as_bytes());
        Ok(general_purpose::STANDARD.encode(mac.finalize().into_bytes()))
    }
}

/// Assemble the signature base string: uppercase method, base URL, and the
/// sorted, encoded parameter string (query parameters plus oauth parameters).
pub(crate) fn signature_base_string(
    method: &str,
    url: &Url,
    oauth_params: &[(String, String)],
) -> String {
    let mut pairs: Vec<(String, String)> = oauth_params
        .iter()
        .map(|(key, value)| {
            (
                percent_encode(key).into_owned(),
                percent_encode(value).into_owned(),
            )
        })
        .collect();
    for (key, value) in url.query_pairs() {
        pairs.push((
            percent_encode(&key).into_owned(),
            percent_encode(&value).into_owned(),
        ));
    }
    pairs.sort_unstable();

    let param_string = pairs
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        percent_encode(&base_url(url)),
        percent_encode(&param_string)
    )
}

/// Base URL for signing: scheme, host and path, default ports elided.
fn base_url(url: &Url) -> String {
    let scheme = url.scheme();
    let host = url.host_str().unwrap_or_default();
    // Url::port() is None for the scheme's default port
    match url.port() {
        Some(port) => format!("{scheme}://{host}:{port}{}", url.path()),
        None => format!("{scheme}://{host}{}", url.path()),
    }
}

/// RFC 3986 percent-encoding over the unreserved set, as OAuth1 requires.
fn percent_encode(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

fn generate_nonce() -> String {
    let mut bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut bytes);
    general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{access_token, api_credentials};

    fn signer() -> RequestSigner {
        RequestSigner::new(api_credentials(), access_token())
    }

    #[test]
    fn base_string_sorts_and_encodes_parameters() {
        let url = Url::parse("https://api.linkedin.com/v1/people/~?format=json").unwrap();
        let oauth_params = vec![
            ("oauth_consumer_key".to_owned(), "key".to_owned()),
            ("oauth_nonce".to_owned(), "abc".to_owned()),
            ("oauth_signature_method".to_owned(), "HMAC-SHA1".to_owned()),
            ("oauth_timestamp".to_owned(), "123".to_owned()),
            ("oauth_token".to_owned(), "tok".to_owned()),
            ("oauth_version".to_owned(), "1.0".to_owned()),
        ];

        let base = signature_base_string("get", &url, &oauth_params);
        assert_eq!(
            base,
            "GET&https%3A%2F%2Fapi.linkedin.com%2Fv1%2Fpeople%2F~&\
             format%3Djson%26oauth_consumer_key%3Dkey%26oauth_nonce%3Dabc%26\
             oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3D123%26\
             oauth_token%3Dtok%26oauth_version%3D1.0"
        );
    }

    #[test]
    fn base_url_elides_default_ports_and_keeps_explicit_ones() {
        let default_port = Url::parse("https://api.linkedin.com:443/v1/people/~").unwrap();
        assert_eq!(base_url(&default_port), "https://api.linkedin.com/v1/people/~");

        let explicit_port = Url::parse("https://api.linkedin.com:8443/v1/people/~").unwrap();
        assert_eq!(
            base_url(&explicit_port),
            "https://api.linkedin.com:8443/v1/people/~"
        );
    }

    #[test]
    fn percent_encoding_uses_the_unreserved_set() {
        assert_eq!(percent_encode("a-b_c.d~e"), "a-b_c.d~e");
        assert_eq!(percent_encode("a b&c=d/e"), "a%20b%26c%3Dd%2Fe");
    }

    #[test]
    fn header_carries_all_oauth_parameters() {
        let url = Url::parse("https://api.linkedin.com/v1/people/~").unwrap();
        let header = signer()
            .authorization_header_at("GET", &url, "fixed-nonce", 1_234_567_890)
            .unwrap();

        assert!(header.starts_with("OAuth "));
        assert!(header.contains("oauth_consumer_key=\"consumer-key\""));
        assert!(header.contains("oauth_nonce=\"fixed-nonce\""));
        assert!(header.contains("oauth_signature_method=\"HMAC-SHA1\""));
        assert!(header.contains("oauth_timestamp=\"1234567890\""));
        assert!(header.contains("oauth_token=\"token-value\""));
        assert!(header.contains("oauth_version=\"1.0\""));
        assert!(header.contains("oauth_signature=\""));
    }

    #[test]
    fn signatures_are_deterministic_for_fixed_inputs() {
        let url = Url::parse("https://api.linkedin.com/v1/people/~").unwrap();
        let first = signer()
            .authorization_header_at("GET", &url, "nonce", 1)
            .unwrap();
        let second = signer()
            .authorization_header_at("GET", &url, "nonce", 1)
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn signature_is_base64_of_an_hmac_sha1_tag() {
        let signed = signer().sign("GET&x&y").unwrap();
        // 20-byte tag -> 28 base64 characters including padding
        assert_eq!(signed.len(), 28);
        assert!(signed.ends_with('='));
    }

    #[test]
    fn fresh_headers_use_distinct_nonces() {
        let url = Url::parse("https://api.linkedin.com/v1/people/~").unwrap();
        let first = signer().authorization_header("GET", &url).unwrap();
        let second = signer().authorization_header("GET", &url).unwrap();
        assert_ne!(first, second);
    }
}
