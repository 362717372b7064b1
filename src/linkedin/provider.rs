//! LinkedIn service-provider adapter.

use async_trait::async_trait;

use super::client::LinkedInClient;
use crate::models::{ApiCredentials, LinkedInProfile, OAuthToken};
use crate::provider::{OAuth1ServiceProvider, ProviderError};

const PROVIDER_NAME: &str = "LinkedIn";

/// Turns a stored access token into an authenticated [`LinkedInClient`] and
/// resolves the remote account behind it.
#[derive(Debug, Clone)]
pub struct LinkedInServiceProvider {
    credentials: ApiCredentials,
}

impl LinkedInServiceProvider {
    #[must_use]
    pub fn new(credentials: ApiCredentials) -> Self {
        Self { credentials }
    }

    /// Fetch the full profile document for the token's owner.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is present or the API call fails.
    pub async fn fetch_user_profile(
        &self,
        access_token: Option<&OAuthToken>,
    ) -> Result<LinkedInProfile, ProviderError> {
        Ok(self.service_api(access_token)?.get_user_profile().await?)
    }
}

#[async_trait]
impl OAuth1ServiceProvider for LinkedInServiceProvider {
    type Api = LinkedInClient;

    fn service_api(
        &self,
        access_token: Option<&OAuthToken>,
    ) -> Result<LinkedInClient, ProviderError> {
        let token = access_token.ok_or(ProviderError::MissingAccessToken {
            provider: PROVIDER_NAME,
        })?;
        Ok(LinkedInClient::new(self.credentials.clone(), token.clone()))
    }

    async fn fetch_account_id(
        &self,
        access_token: Option<&OAuthToken>,
    ) -> Result<String, ProviderError> {
        Ok(self.service_api(access_token)?.get_profile_id().await?)
    }

    async fn fetch_profile_url(
        &self,
        access_token: Option<&OAuthToken>,
    ) -> Result<Option<String>, ProviderError> {
        Ok(self.service_api(access_token)?.get_profile_url().await?)
    }
}
