//! One module per supported provider.
//!
//! The webhook-style providers (GitHub, Bitbucket) are descriptors fed to
//! the shared pipeline; the dummy validator is a reduced GET pipeline kept
//! as a reference for writing new providers.

pub mod bitbucket;
pub mod dummy;
pub mod github;

pub use bitbucket::BITBUCKET;
pub use github::GITHUB;
