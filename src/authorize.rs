//! Matching extracted payload data against configured expectations.

use std::collections::BTreeSet;

use crate::config::ProviderConfig;
use crate::extract::{EventKind, Extraction};

/// The verdict of comparing an extraction against a provider config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    /// The payload's owner is not the configured owner.
    OwnerMismatch(String),
    /// The payload's repository is not the configured repository.
    RepoMismatch(String),
    /// No extracted branch survived the configured branch filter.
    /// Carries the branches that were extracted.
    NoBranchOverlap(BTreeSet<String>),
    /// Identity checks passed; carries the matched branches in sorted
    /// order (empty for a ping, which has no branch data to filter).
    Matched(Vec<String>),
}

/// Compares owner and repo by exact, case-sensitive equality, then
/// intersects the extracted branches with the configured allow-set.
///
/// An absent or empty `branches` config means no filter: every extracted
/// branch matches. The filter only ever constrains, never expands, the
/// extracted set. Pings skip branch filtering entirely.
pub fn authorize(extraction: &Extraction, config: &ProviderConfig) -> MatchResult {
    if extraction.owner != config.owner {
        return MatchResult::OwnerMismatch(extraction.owner.clone());
    }

    if extraction.repo != config.repo {
        return MatchResult::RepoMismatch(extraction.repo.clone());
    }

    if extraction.kind == EventKind::Ping {
        return MatchResult::Matched(Vec::new());
    }

    let allowed = config.branches.as_deref().filter(|b| !b.is_empty());
    let matched: Vec<String> = match allowed {
        Some(allowed) => extraction
            .branches
            .iter()
            .filter(|branch| allowed.iter().any(|a| a == *branch))
            .cloned()
            .collect(),
        None => extraction.branches.iter().cloned().collect(),
    };

    if matched.is_empty() {
        return MatchResult::NoBranchOverlap(extraction.branches.clone());
    }

    MatchResult::Matched(matched)
}
