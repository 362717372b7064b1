//! LinkedIn OAuth1 API access.
//!
//! # Modules
//!
//! - [`client`] - API client authenticated with a stored access token
//! - [`provider`] - service-provider adapter resolving account id and profile
//!
//! Request signing lives in a private `oauth1` module scoped to what the
//! client needs; it is not a general OAuth1 implementation.

pub mod client;
mod oauth1;
pub mod provider;

// Re-export commonly used items for convenience
pub use client::{ClientError, LinkedInClient};
pub use provider::LinkedInServiceProvider;
