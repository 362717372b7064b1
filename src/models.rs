//! Shared data types for the social providers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An OAuth1 access token: a value plus the secret used to sign requests.
///
/// Opaque to this crate beyond signing; host applications persist it however
/// they store account connections.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthToken {
    pub value: String,
    pub secret: String,
}

impl OAuthToken {
    #[must_use]
    pub fn new(value: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for OAuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthToken")
            .field("value", &self.value)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Stored application API credentials for an OAuth1 provider.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiCredentials {
    pub consumer_key: String,
    pub consumer_secret: String,
}

impl ApiCredentials {
    #[must_use]
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
        }
    }
}

impl fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .finish()
    }
}

/// A LinkedIn member profile as returned by the v1 people resource
/// (`x-li-format: json` representation, camelCase keys).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedInProfile {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub public_profile_url: Option<String>,
}
