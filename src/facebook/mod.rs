//! Facebook cookie authentication.
//!
//! After a user signs in through Facebook's client-side login button, the
//! widget stores the user id and an access token in a signed cookie named
//! `fbs_{app_key}`. This module verifies and parses that cookie and exposes
//! its fields to handlers through typed request extractors.
//!
//! # Modules
//!
//! - [`cookie`] - wire format, signature verification and payload parsing
//! - [`extractor`] - `FromRequest` extractors for handler arguments

pub mod cookie;
pub mod extractor;

// Re-export commonly used items for convenience
pub use cookie::{cookie_name, parse_cookie_value, CookieError, FacebookConfig, FacebookCookieData};
pub use extractor::{FacebookAccessToken, FacebookCookie, FacebookUserId};
