//! LinkedIn API client authenticated with a stored access token.

use once_cell::sync::Lazy;
use reqwest::header::AUTHORIZATION;
use thiserror::Error;
use url::Url;

use super::oauth1::RequestSigner;
use crate::models::{ApiCredentials, LinkedInProfile, OAuthToken};

/// Profile resource with the field selector this crate consumes.
const PROFILE_RESOURCE: &str =
    "https://api.linkedin.com/v1/people/~:(id,first-name,last-name,headline,industry,public-profile-url)";

/// Request the JSON representation instead of the default XML.
const LI_FORMAT_HEADER: &str = "x-li-format";

/// Shared across clients; connection pooling lives in reqwest.
static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

/// LinkedIn API client errors
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid LinkedIn API URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("failed to sign LinkedIn API request: {0}")]
    Signing(String),

    #[error("LinkedIn API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("LinkedIn API returned {status}")]
    Status { status: reqwest::StatusCode },

    #[error("failed to decode LinkedIn API response: {0}")]
    Decode(String),
}

/// An authenticated LinkedIn API client bound to one access token.
#[derive(Debug, Clone)]
pub struct LinkedInClient {
    signer: RequestSigner,
}

impl LinkedInClient {
    /// Build a client from application credentials and an access token.
    #[must_use]
    pub fn new(credentials: ApiCredentials, access_token: OAuthToken) -> Self {
        Self {
            signer: RequestSigner::new(credentials, access_token),
        }
    }

    /// Fetch the profile of the member who owns the access token.
    ///
    /// # Errors
    ///
    /// Returns an error if signing, the HTTP call, or decoding the response
    /// fails, or if the API responds with a non-success status.
    pub async fn get_user_profile(&self) -> Result<LinkedInProfile, ClientError> {
        let url = Url::parse(PROFILE_RESOURCE)?;
        let authorization = self
            .signer
            .authorization_header("GET", &url)
            .map_err(|e| ClientError::Signing(e.to_string()))?;

        log::debug!("Fetching LinkedIn profile from {PROFILE_RESOURCE}");
        let response = HTTP_CLIENT
            .get(url)
            .header(AUTHORIZATION, authorization)
            .header(LI_FORMAT_HEADER, "json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("LinkedIn profile request rejected with status {status}");
            return Err(ClientError::Status { status });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Fetch the member id of the access token's owner.
    ///
    /// # Errors
    ///
    /// Propagates [`get_user_profile`](Self::get_user_profile) errors.
    pub async fn get_profile_id(&self) -> Result<String, ClientError> {
        Ok(self.get_user_profile().await?.id)
    }

    /// Fetch the public profile URL of the access token's owner, if the
    /// member exposes one.
    ///
    /// # Errors
    ///
    /// Propagates [`get_user_profile`](Self::get_user_profile) errors.
    pub async fn get_profile_url(&self) -> Result<Option<String>, ClientError> {
        Ok(self.get_user_profile().await?.public_profile_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{access_token, api_credentials, SAMPLE_PROFILE_JSON};

    #[test]
    fn profile_resource_parses_and_keeps_the_field_selector() {
        let url = Url::parse(PROFILE_RESOURCE).unwrap();
        assert_eq!(url.host_str(), Some("api.linkedin.com"));
        assert!(url.path().contains("public-profile-url"));
        assert!(url.query().is_none());
    }

    #[test]
    fn sample_profile_document_decodes() {
        let profile: LinkedInProfile = serde_json::from_str(SAMPLE_PROFILE_JSON).unwrap();
        assert_eq!(profile.id, "R8j7keGdop");
        assert_eq!(
            profile.public_profile_url.as_deref(),
            Some("https://www.linkedin.com/in/craig-walls")
        );
    }

    #[test]
    fn client_construction_is_cheap_and_offline() {
        let client = LinkedInClient::new(api_credentials(), access_token());
        // Debug output must not leak the token secret
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("token-secret"));
    }
}
