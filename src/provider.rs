//! Service-provider adapter seam for OAuth1 APIs.
//!
//! A provider turns a stored access token into an authenticated API client
//! and resolves the remote account behind that token. Each operation is a
//! single synchronous call against the provider API - no caching, no retry.

use async_trait::async_trait;
use thiserror::Error;

use crate::linkedin::ClientError;
use crate::models::OAuthToken;

/// Provider adapter errors
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No access token is stored for the account being accessed.
    #[error("Cannot access {provider} without an access token")]
    MissingAccessToken { provider: &'static str },

    /// The underlying API client call failed.
    #[error(transparent)]
    Client(#[from] ClientError),
}

/// An OAuth1 service provider: stored API credentials plus the operations
/// needed to connect a local account to the remote one.
#[async_trait]
pub trait OAuth1ServiceProvider {
    /// The authenticated API client produced for a connected account.
    type Api;

    /// Build an API client authenticated with the given stored access token.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::MissingAccessToken`] when no token is present.
    fn service_api(&self, access_token: Option<&OAuthToken>) -> Result<Self::Api, ProviderError>;

    /// Fetch the provider-assigned account id for the token's owner.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is present or the API call fails.
    async fn fetch_account_id(
        &self,
        access_token: Option<&OAuthToken>,
    ) -> Result<String, ProviderError>;

    /// Fetch the public profile URL for the token's owner, if the provider
    /// exposes one.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is present or the API call fails.
    async fn fetch_profile_url(
        &self,
        access_token: Option<&OAuthToken>,
    ) -> Result<Option<String>, ProviderError>;
}
