//! The generic validation pipeline shared by all webhook-style providers.
//!
//! Each stage can terminate the call early with a failure outcome; only
//! when every stage passes does the pipeline produce a success outcome
//! carrying one param set per matched branch.

use axum::http::{Method, StatusCode};
use std::net::IpAddr;
use tracing::{debug, info, warn};

use crate::authorize::{MatchResult, authorize};
use crate::config::ProviderConfig;
use crate::error::ExtractError;
use crate::extract::{EventKind, Extraction};
use crate::net::{TrustedRange, is_trusted};
use crate::outcome::{ValidationOutcome, param};
use crate::request::IncomingRequest;

/// Everything that differs between webhook providers: the method they
/// deliver with, the IP ranges they deliver from, and how their payload
/// shape maps onto an [`Extraction`].
pub struct ProviderSpec {
    pub name: &'static str,
    pub expected_method: Method,
    /// Empty means the provider publishes no stable ranges and the IP
    /// check is skipped.
    pub trusted_ranges: &'static [TrustedRange],
    pub extract: fn(&[u8]) -> Result<Extraction, ExtractError>,
}

/// Runs one request through the short-circuit pipeline:
/// method → remote IP → payload parse → owner/repo → event kind →
/// branch filter.
///
/// Every failure mode comes back as a normal outcome; extraction errors
/// are folded into a status-400 outcome here and nowhere else.
pub fn validate(
    provider: &ProviderSpec,
    request: &IncomingRequest,
    config: &ProviderConfig,
) -> ValidationOutcome {
    if request.method != provider.expected_method {
        warn!(
            provider = provider.name,
            "wrong method: expected {}, got {}", provider.expected_method, request.method
        );
        return ValidationOutcome::failure(
            StatusCode::METHOD_NOT_ALLOWED,
            format!(
                "Payload validation failed: Wrong method, {} expected, got {}.",
                provider.expected_method, request.method
            ),
        );
    }

    if !provider.trusted_ranges.is_empty() {
        // An unparseable remote address is untrusted, not a hard error.
        let trusted = request
            .remote_ip
            .parse::<IpAddr>()
            .map(|ip| is_trusted(ip, provider.trusted_ranges))
            .unwrap_or(false);
        if !trusted {
            warn!(
                provider = provider.name,
                remote_ip = %request.remote_ip,
                "remote IP outside trusted ranges"
            );
            return ValidationOutcome::failure(
                StatusCode::FORBIDDEN,
                format!(
                    "Payload validation failed: Unverified remote IP: {}.",
                    request.remote_ip
                ),
            );
        }
    }

    let extraction = match (provider.extract)(&request.body) {
        Ok(extraction) => extraction,
        Err(e) => {
            debug!(provider = provider.name, "payload extraction failed: {}", e);
            return ValidationOutcome::failure(
                StatusCode::BAD_REQUEST,
                format!("Payload validation failed: {}", e),
            );
        }
    };

    match authorize(&extraction, config) {
        MatchResult::OwnerMismatch(owner) => {
            warn!(provider = provider.name, "wrong owner: {}", owner);
            ValidationOutcome::failure(
                StatusCode::FORBIDDEN,
                format!("Payload validation failed: wrong owner: {}", owner),
            )
        }
        MatchResult::RepoMismatch(repo) => {
            warn!(provider = provider.name, "wrong repository: {}", repo);
            ValidationOutcome::failure(
                StatusCode::FORBIDDEN,
                format!("Payload validation failed: wrong repository: {}", repo),
            )
        }
        MatchResult::NoBranchOverlap(extracted) => {
            let listed = join(extracted.iter());
            warn!(provider = provider.name, "no allowed branch in push: {}", listed);
            ValidationOutcome::failure(
                StatusCode::FORBIDDEN,
                format!("Payload validation failed: wrong branches: {}", listed),
            )
        }
        MatchResult::Matched(matched) => {
            if extraction.kind == EventKind::Ping {
                info!(provider = provider.name, "ping validated");
                return ValidationOutcome::success("Ping payload validated", Vec::new());
            }
            let listed = join(matched.iter());
            info!(provider = provider.name, "payload validated for branches: {}", listed);
            let params = matched
                .iter()
                .map(|branch| param("branch", branch))
                .collect();
            ValidationOutcome::success(
                format!("Payload validated. Branches: {}", listed),
                params,
            )
        }
    }
}

fn join<'a>(items: impl Iterator<Item = &'a String>) -> String {
    items.cloned().collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;
    use std::collections::HashMap;

    // A throwaway provider: POST-only, one /24, owner/repo/branch fields
    // taken from a flat JSON object.
    fn test_extract(body: &[u8]) -> Result<Extraction, ExtractError> {
        #[derive(serde::Deserialize)]
        struct Flat {
            owner: String,
            repo: String,
            branch: String,
        }
        let flat: Flat = serde_json::from_slice(body)?;
        Ok(Extraction::push(
            flat.owner,
            flat.repo,
            [flat.branch].into_iter().collect(),
        ))
    }

    static RANGES: &[TrustedRange] = &[TrustedRange::v4(10, 1, 2, 0, 24)];

    static PROVIDER: ProviderSpec = ProviderSpec {
        name: "test",
        expected_method: Method::POST,
        trusted_ranges: RANGES,
        extract: test_extract,
    };

    static OPEN_PROVIDER: ProviderSpec = ProviderSpec {
        name: "test-open",
        expected_method: Method::POST,
        trusted_ranges: &[],
        extract: test_extract,
    };

    fn request(method: Method, ip: &str, body: &str) -> IncomingRequest {
        IncomingRequest::new(method, ip, HashMap::new(), Bytes::from(body.to_string()))
    }

    fn config() -> ProviderConfig {
        ProviderConfig::new("acme", "widget")
    }

    const GOOD_BODY: &str = r#"{"owner":"acme","repo":"widget","branch":"main"}"#;

    #[test]
    fn wrong_method_is_405_and_names_both_methods() {
        let outcome = validate(&PROVIDER, &request(Method::GET, "10.1.2.3", GOOD_BODY), &config());
        assert_eq!(outcome.status, StatusCode::METHOD_NOT_ALLOWED);
        assert!(outcome.message.contains("POST expected"));
        assert!(outcome.message.contains("GET"));
        assert!(outcome.params.is_empty());
    }

    #[test]
    fn untrusted_ip_is_403_regardless_of_payload() {
        let outcome = validate(&PROVIDER, &request(Method::POST, "8.8.8.8", GOOD_BODY), &config());
        assert_eq!(outcome.status, StatusCode::FORBIDDEN);
        assert!(outcome.message.contains("8.8.8.8"));
        assert!(outcome.params.is_empty());

        let garbage = validate(&PROVIDER, &request(Method::POST, "8.8.8.8", "not json"), &config());
        assert_eq!(garbage.status, StatusCode::FORBIDDEN);
    }

    #[test]
    fn unparseable_remote_ip_is_untrusted() {
        let outcome = validate(
            &PROVIDER,
            &request(Method::POST, "not-an-address", GOOD_BODY),
            &config(),
        );
        assert_eq!(outcome.status, StatusCode::FORBIDDEN);
        assert!(outcome.message.contains("not-an-address"));
    }

    #[test]
    fn empty_range_table_skips_the_ip_check() {
        let outcome = validate(
            &OPEN_PROVIDER,
            &request(Method::POST, "8.8.8.8", GOOD_BODY),
            &config(),
        );
        assert_eq!(outcome.status, StatusCode::OK);
    }

    #[test]
    fn malformed_payload_is_400_with_parse_detail() {
        let outcome = validate(&PROVIDER, &request(Method::POST, "10.1.2.3", "{"), &config());
        assert_eq!(outcome.status, StatusCode::BAD_REQUEST);
        assert!(outcome.message.starts_with("Payload validation failed:"));
        assert!(outcome.params.is_empty());
    }

    #[test]
    fn success_carries_one_param_set_per_branch() {
        let outcome = validate(&PROVIDER, &request(Method::POST, "10.1.2.3", GOOD_BODY), &config());
        assert_eq!(outcome.status, StatusCode::OK);
        assert!(outcome.message.contains("main"));
        assert_eq!(outcome.params, vec![param("branch", "main")]);
    }

    #[test]
    fn identical_inputs_yield_identical_outcomes() {
        let req = request(Method::POST, "10.1.2.3", GOOD_BODY);
        let cfg = config();
        assert_eq!(validate(&PROVIDER, &req, &cfg), validate(&PROVIDER, &req, &cfg));
    }
}
