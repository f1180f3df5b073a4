//! Simulated third-party services.
//!
//! Each simulation owns a mockito server standing in for one upstream API. Rules
//! are registered before the test runs; any request without a matching rule gets
//! mockito's `501 Not Implemented`, which the webservice stand-in reports as an
//! upstream failure, so a missing fixture fails the test instead of reaching the
//! real network.
//!
//! - `github` - GitHub REST v3 and GitHub OAuth
//! - `google` - Google OAuth2

pub mod github;
pub mod google;
