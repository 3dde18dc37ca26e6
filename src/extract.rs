//! Shared types produced by per-provider payload extraction.

use std::collections::BTreeSet;

/// What kind of delivery a payload turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A push notification carrying one or more branch refs.
    Push,
    /// A connectivity test with no actionable branch data.
    Ping,
}

/// The fields a validator needs out of a payload, regardless of which
/// provider shape they came from.
///
/// `branches` is a set: duplicate refs in the payload collapse, and the
/// ordered `BTreeSet` keeps message text and param order in agreement
/// within a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub owner: String,
    pub repo: String,
    pub kind: EventKind,
    pub branches: BTreeSet<String>,
}

impl Extraction {
    pub fn push(owner: String, repo: String, branches: BTreeSet<String>) -> Self {
        Self {
            owner,
            repo,
            kind: EventKind::Push,
            branches,
        }
    }

    pub fn ping(owner: String, repo: String) -> Self {
        Self {
            owner,
            repo,
            kind: EventKind::Ping,
            branches: BTreeSet::new(),
        }
    }
}

/// Takes the final path segment of a ref string such as
/// `refs/heads/main`. A ref with no slashes is returned as-is.
pub fn branch_from_ref(git_ref: &str) -> &str {
    git_ref.rsplit('/').next().unwrap_or(git_ref)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn branch_is_final_ref_segment() {
        assert_eq!(branch_from_ref("refs/heads/main"), "main");
        assert_eq!(branch_from_ref("refs/heads/feature/login"), "login");
        assert_eq!(branch_from_ref("main"), "main");
    }

    #[test]
    fn ping_extraction_has_no_branches() {
        let e = Extraction::ping("acme".into(), "widget".into());
        assert_eq!(e.kind, EventKind::Ping);
        assert!(e.branches.is_empty());
    }
}
