//! GitHub push and ping webhook validation.
//!
//! Push payloads carry a single `ref` of the form `refs/heads/<branch>`;
//! ping payloads are recognized by the presence of a `zen` field and
//! carry no branch data. The owner sits at `repository.owner.name` for a
//! push but `repository.owner.login` for a ping.

use axum::http::Method;
use serde::Deserialize;

use crate::config::ProviderConfig;
use crate::error::ExtractError;
use crate::extract::{Extraction, branch_from_ref};
use crate::net::TrustedRange;
use crate::outcome::ValidationOutcome;
use crate::pipeline::{self, ProviderSpec};
use crate::request::IncomingRequest;

/// GitHub's published webhook origin block.
static TRUSTED_RANGES: &[TrustedRange] = &[TrustedRange::v4(192, 30, 252, 0, 22)];

pub static GITHUB: ProviderSpec = ProviderSpec {
    name: "github",
    expected_method: Method::POST,
    trusted_ranges: TRUSTED_RANGES,
    extract,
};

/// Validate one request as a GitHub webhook delivery.
pub fn validate(request: &IncomingRequest, config: &ProviderConfig) -> ValidationOutcome {
    pipeline::validate(&GITHUB, request, config)
}

#[derive(Debug, Deserialize)]
struct Payload {
    #[serde(default)]
    zen: Option<serde_json::Value>,
    repository: Repository,
    #[serde(rename = "ref", default)]
    git_ref: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Repository {
    name: String,
    owner: Owner,
}

#[derive(Debug, Deserialize)]
struct Owner {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    login: Option<String>,
}

fn extract(body: &[u8]) -> Result<Extraction, ExtractError> {
    let payload: Payload = serde_json::from_slice(body)?;
    let repo = payload.repository.name;

    if payload.zen.is_some() {
        let owner = payload
            .repository
            .owner
            .login
            .ok_or(ExtractError::MissingField("repository.owner.login"))?;
        return Ok(Extraction::ping(owner, repo));
    }

    let owner = payload
        .repository
        .owner
        .name
        .ok_or(ExtractError::MissingField("repository.owner.name"))?;
    let git_ref = payload.git_ref.ok_or(ExtractError::MissingField("ref"))?;
    let branches = [branch_from_ref(&git_ref).to_string()].into_iter().collect();
    Ok(Extraction::push(owner, repo, branches))
}
