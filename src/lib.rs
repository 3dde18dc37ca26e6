//! Webhook validators for CI build triggering.
//!
//! Each provider module decides whether an inbound webhook notification
//! is authentic and relevant before it may trigger a build: the HTTP
//! method and remote IP are gated first, then the payload's owner and
//! repository are matched against configuration, then the pushed
//! branches are filtered against the configured allow-set. A successful
//! validation yields one param set per matched branch so the host can
//! fan out one build per branch.
//!
//! Validation calls are pure and synchronous: config and trusted-range
//! tables are built once and read-only afterwards, so calls are safe to
//! run concurrently.

pub mod authorize;
pub mod config;
pub mod error;
pub mod extract;
pub mod net;
pub mod outcome;
pub mod pipeline;
pub mod providers;
pub mod request;

pub use config::{DummyConfig, ProviderConfig, ValidatorsConfig, load_config};
pub use error::{ConfigError, ExtractError};
pub use outcome::{ParamSet, ValidationOutcome};
pub use pipeline::ProviderSpec;
pub use request::IncomingRequest;
