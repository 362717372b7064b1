//! Test fixtures shared by unit tests and integration tests.

use std::collections::HashMap;

use crate::facebook::cookie::encode_cookie_value;
use crate::facebook::FacebookConfig;
use crate::models::{ApiCredentials, OAuthToken};

/// Fixture application key; the auth cookie is named `fbs_{key}`.
pub const TEST_APP_KEY: &str = "190291501880";

/// Fixture application secret used to sign and verify cookies.
pub const TEST_APP_SECRET: &str = "2siDGBcK7bphqas8QEqKSQ";

#[must_use]
pub fn facebook_config() -> FacebookConfig {
    FacebookConfig::new(TEST_APP_KEY, TEST_APP_SECRET)
}

#[must_use]
pub fn api_credentials() -> ApiCredentials {
    ApiCredentials::new("consumer-key", "consumer-secret")
}

#[must_use]
pub fn access_token() -> OAuthToken {
    OAuthToken::new("token-value", "token-secret")
}

/// Mint a signed cookie value the way the login widget would.
///
/// # Panics
///
/// Panics if signing fails, which cannot happen with the fixture secret.
#[must_use]
pub fn signed_cookie_value(fields: &[(&str, &str)]) -> String {
    let fields: HashMap<String, String> = fields
        .iter()
        .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
        .collect();
    encode_cookie_value(&fields, TEST_APP_SECRET).expect("fixture cookie signing failed")
}

/// A LinkedIn v1 profile document in its JSON representation.
pub const SAMPLE_PROFILE_JSON: &str = r#"{
    "id": "R8j7keGdop",
    "firstName": "Craig",
    "lastName": "Walls",
    "headline": "Software Developer",
    "industry": "Computer Software",
    "publicProfileUrl": "https://www.linkedin.com/in/craig-walls"
}"#;
