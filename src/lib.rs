#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![deny(warnings)]
#![allow(clippy::multiple_crate_versions)]

//! Social sign-in glue for actix-web applications.
//!
//! Two independent pieces:
//!
//! - [`facebook`] - parsing and signature verification of the `fbs_{app_key}`
//!   cookie set by Facebook's client-side login widget, exposed to handlers
//!   through typed request extractors.
//! - [`linkedin`] - a LinkedIn API client authenticated with a stored OAuth1
//!   access token, wrapped in a service-provider adapter that resolves the
//!   remote account id and profile.

/// Version of the actix-social crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod facebook;
pub mod linkedin;
pub mod models;
pub mod provider;
pub mod settings;

// Test fixtures, available to unit tests and to integration tests via the
// `testing` feature
#[cfg(any(test, feature = "testing"))]
pub mod testing;

/// Re-export commonly used items
pub use facebook::{
    CookieError, FacebookAccessToken, FacebookConfig, FacebookCookie, FacebookUserId,
};
pub use linkedin::{ClientError, LinkedInClient, LinkedInServiceProvider};
pub use models::{ApiCredentials, LinkedInProfile, OAuthToken};
pub use provider::{OAuth1ServiceProvider, ProviderError};
pub use settings::SocialSettings;
