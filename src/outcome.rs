//! The result of one validation call.

use axum::http::StatusCode;
use std::collections::BTreeMap;

/// One bundle of extracted key/value data handed downstream, one entry
/// per matched branch (key `branch`), used to fan out one build trigger
/// per branch.
pub type ParamSet = BTreeMap<String, String>;

/// What the validator decided about a single request.
///
/// Status codes follow HTTP semantics: 200 validated, 400 malformed
/// payload, 403 unauthorized origin or identity, 405 wrong method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub status: StatusCode,
    pub message: String,
    pub params: Vec<ParamSet>,
}

impl ValidationOutcome {
    pub fn success(message: impl Into<String>, params: Vec<ParamSet>) -> Self {
        Self {
            status: StatusCode::OK,
            message: message.into(),
            params,
        }
    }

    /// A failure outcome. Webhook providers never attach params to a
    /// failure; the reference validator echoes its extracted message
    /// param and builds the struct directly instead.
    pub fn failure(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            params: Vec::new(),
        }
    }
}

/// A single-entry param set, e.g. `param("branch", "main")`.
pub fn param(key: &str, value: &str) -> ParamSet {
    let mut set = ParamSet::new();
    set.insert(key.to_string(), value.to_string());
    set
}
