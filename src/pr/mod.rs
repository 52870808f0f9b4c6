pub mod review;
pub mod types;

pub use review::review_label;
pub use types::{BranchEntry, PullRequestRef, ReviewStatus};

use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, instrument};

use crate::input::{load_json, InputError};

/// Review statuses keyed by `repo#number`.
pub type ReviewMap = HashMap<String, ReviewStatus>;

/// Code-host branches keyed by ticket key.
pub type BranchMap = HashMap<String, Vec<BranchEntry>>;

/// Load the pull request export (array of records).
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_pull_requests(path: &Path) -> Result<Vec<PullRequestRef>, InputError> {
    let prs: Vec<PullRequestRef> = load_json(path)?;
    debug!(pull_requests = prs.len(), "loaded pull requests");
    Ok(prs)
}

/// Load the review-status map.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_reviews(path: &Path) -> Result<ReviewMap, InputError> {
    let reviews: ReviewMap = load_json(path)?;
    debug!(reviews = reviews.len(), "loaded review statuses");
    Ok(reviews)
}

/// Load the branch-list map.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_branches(path: &Path) -> Result<BranchMap, InputError> {
    let branches: BranchMap = load_json(path)?;
    debug!(tickets = branches.len(), "loaded branch lists");
    Ok(branches)
}

/// Look up the review status of a PR by `repo#number`, trying the full repo
/// string first and the bare repo name second.
pub fn find_review<'a>(reviews: &'a ReviewMap, pr: &PullRequestRef) -> Option<&'a ReviewStatus> {
    reviews
        .get(&format!("{}#{}", pr.repo, pr.number))
        .or_else(|| reviews.get(&pr.review_key()))
}

/// Strip the first matching organisational prefix from a repository name.
///
/// `humand-main-api` -> `main-api`. An owner segment is dropped first.
pub fn short_repo_name<'a>(repo: &'a str, prefixes: &[String]) -> &'a str {
    let name = repo.rsplit('/').next().unwrap_or(repo);
    prefixes
        .iter()
        .find_map(|prefix| name.strip_prefix(prefix.as_str()))
        .filter(|rest| !rest.is_empty())
        .unwrap_or(name)
}
