//! Bitbucket push webhook validation.
//!
//! A Bitbucket push can carry several changed refs at once
//! (`push.changes[].new.name`); each distinct branch yields one param set
//! downstream. The owner sits at `repository.owner.username`.

use axum::http::Method;
use serde::Deserialize;
use std::collections::BTreeSet;

use crate::config::ProviderConfig;
use crate::error::ExtractError;
use crate::extract::Extraction;
use crate::net::TrustedRange;
use crate::outcome::ValidationOutcome;
use crate::pipeline::{self, ProviderSpec};
use crate::request::IncomingRequest;

/// Bitbucket's published webhook origin blocks.
static TRUSTED_RANGES: &[TrustedRange] = &[
    TrustedRange::v4(131, 103, 20, 160, 27),
    TrustedRange::v4(165, 254, 145, 0, 26),
    TrustedRange::v4(104, 192, 143, 0, 24),
];

pub static BITBUCKET: ProviderSpec = ProviderSpec {
    name: "bitbucket",
    expected_method: Method::POST,
    trusted_ranges: TRUSTED_RANGES,
    extract,
};

/// Validate one request as a Bitbucket webhook delivery.
pub fn validate(request: &IncomingRequest, config: &ProviderConfig) -> ValidationOutcome {
    pipeline::validate(&BITBUCKET, request, config)
}

#[derive(Debug, Deserialize)]
struct Payload {
    repository: Repository,
    push: Push,
}

#[derive(Debug, Deserialize)]
struct Repository {
    name: String,
    owner: Owner,
}

#[derive(Debug, Deserialize)]
struct Owner {
    username: String,
}

#[derive(Debug, Deserialize)]
struct Push {
    changes: Vec<Change>,
}

#[derive(Debug, Deserialize)]
struct Change {
    new: NewRef,
}

#[derive(Debug, Deserialize)]
struct NewRef {
    name: String,
}

fn extract(body: &[u8]) -> Result<Extraction, ExtractError> {
    let payload: Payload = serde_json::from_slice(body)?;
    let branches: BTreeSet<String> = payload
        .push
        .changes
        .into_iter()
        .map(|change| change.new.name)
        .collect();
    Ok(Extraction::push(
        payload.repository.owner.username,
        payload.repository.name,
        branches,
    ))
}
