use regex::Regex;
use std::sync::LazyLock;

use super::types::{BranchRef, BranchTarget};

static TREE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(?:www\.)?github\.com/[\w.-]+/([\w.-]+)/tree/(\S+?)/?$").unwrap()
});

static PULL_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(?:www\.)?github\.com/[\w.-]+/([\w.-]+)/pull/(\d+)(?:[/?#]\S*)?$")
        .unwrap()
});

/// Parse a branch reference URL.
///
/// Expected formats:
///   https://github.com/{owner}/{repo}/tree/{branch}
///   https://github.com/{owner}/{repo}/pull/{number}
/// Returns None for anything else.
pub fn parse_branch_ref(url: &str) -> Option<BranchRef> {
    let url = url.trim();

    if let Some(caps) = PULL_URL.captures(url) {
        let number = caps[2].parse::<u64>().ok()?;
        return Some(BranchRef {
            repo: caps[1].to_string(),
            target: BranchTarget::PullRequest(number),
        });
    }

    let caps = TREE_URL.captures(url)?;
    Some(BranchRef {
        repo: caps[1].to_string(),
        target: BranchTarget::Branch(caps[2].to_string()),
    })
}
