use crate::pr::{find_review, review_label, short_repo_name, BranchMap, PullRequestRef, ReviewMap};
use crate::tracker::{BranchRef, BranchTarget, DevState, Ticket};

/// Placeholder for empty summary cells.
pub const PLACEHOLDER: &str = "-";

/// Describe the code behind a ticket.
///
/// Matched PRs win over tracker dev info, which wins over the branch link,
/// then the code-host branch list, then the tracker status.
pub fn code_activity(ticket: &Ticket, branches: &BranchMap, prefixes: &[String]) -> String {
    if !ticket.pull_requests.is_empty() {
        return pr_activity(&ticket.pull_requests, prefixes);
    }

    match ticket.dev.state {
        Some(DevState::Merged) => return tracker_pr("Merged", ticket.branch.as_ref(), prefixes),
        Some(DevState::Open) => return tracker_pr("Open PR", ticket.branch.as_ref(), prefixes),
        _ => {}
    }

    if let Some(branch) = &ticket.branch {
        let repo = short_repo_name(&branch.repo, prefixes);
        return match branch.target {
            BranchTarget::Branch(_) => format!("Branch in {repo}, no PR yet"),
            BranchTarget::PullRequest(number) => format!("PR #{number} in {repo}"),
        };
    }

    if ticket.has_no_pr_evidence() {
        if let Some(entries) = branches.get(&ticket.key).filter(|e| !e.is_empty()) {
            let mut repos: Vec<&str> = entries
                .iter()
                .map(|e| short_repo_name(&e.repo, prefixes))
                .collect();
            repos.sort_unstable();
            repos.dedup();
            return format!("Branch in {}, no PR yet", repos.join(", "));
        }
    }

    if ticket.status_category_is("Done") {
        return "No code (tracker done)".to_string();
    }

    PLACEHOLDER.to_string()
}

/// Merged repos first, then each open PR, then each draft, joined by "; ".
fn pr_activity(prs: &[PullRequestRef], prefixes: &[String]) -> String {
    let mut merged: Vec<&str> = prs
        .iter()
        .filter(|pr| pr.is_merged())
        .map(|pr| short_repo_name(&pr.repo, prefixes))
        .collect();
    merged.sort_unstable();
    merged.dedup();

    let mut parts = Vec::new();
    if !merged.is_empty() {
        parts.push(format!("Merged in {}", merged.join(", ")));
    }
    parts.extend(
        prs.iter()
            .filter(|pr| pr.is_open() && !pr.draft)
            .map(|pr| pr_ref(pr, prefixes)),
    );
    parts.extend(
        prs.iter()
            .filter(|pr| pr.is_open() && pr.draft)
            .map(|pr| format!("Draft {}", pr_ref(pr, prefixes))),
    );

    if parts.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        parts.join("; ")
    }
}

fn tracker_pr(label: &str, branch: Option<&BranchRef>, prefixes: &[String]) -> String {
    let Some(branch) = branch else {
        return format!("{label} (repo unknown)");
    };
    let repo = short_repo_name(&branch.repo, prefixes);
    match branch.target {
        BranchTarget::PullRequest(number) => format!("{label} in {repo} (PR #{number})"),
        BranchTarget::Branch(_) => format!("{label} in {repo}"),
    }
}

/// `web#42 https://...`, or just `web#42` when the export had no URL.
fn pr_ref(pr: &PullRequestRef, prefixes: &[String]) -> String {
    let short = short_repo_name(&pr.repo, prefixes);
    if pr.url.is_empty() {
        format!("{short}#{}", pr.number)
    } else {
        format!("{short}#{} {}", pr.number, pr.url)
    }
}

/// Open, non-draft PRs of a ticket under review. Without matched PRs an open
/// tracker PR is described through the branch link.
pub fn pr_summary(ticket: &Ticket, prefixes: &[String]) -> String {
    let open: Vec<String> = ticket
        .pull_requests
        .iter()
        .filter(|pr| pr.is_open() && !pr.draft)
        .map(|pr| pr_ref(pr, prefixes))
        .collect();
    if !open.is_empty() {
        return open.join(", ");
    }

    if let (Some(DevState::Open), Some(branch)) = (&ticket.dev.state, &ticket.branch) {
        let repo = short_repo_name(&branch.repo, prefixes);
        return match &branch.target {
            BranchTarget::Branch(name) => format!("Open PR in {repo} (branch: {name})"),
            BranchTarget::PullRequest(number) => format!("Open PR in {repo} (PR #{number})"),
        };
    }

    PLACEHOLDER.to_string()
}

/// Review outcome for each open, non-draft matched PR.
pub fn review_summary(ticket: &Ticket, reviews: &ReviewMap, prefixes: &[String]) -> String {
    let open: Vec<&PullRequestRef> = ticket
        .pull_requests
        .iter()
        .filter(|pr| pr.is_open() && !pr.draft)
        .collect();

    match open.as_slice() {
        [] => PLACEHOLDER.to_string(),
        [pr] => review_label(find_review(reviews, pr)).to_string(),
        many => many
            .iter()
            .map(|pr| {
                format!(
                    "{}#{}: {}",
                    short_repo_name(&pr.repo, prefixes),
                    pr.number,
                    review_label(find_review(reviews, pr))
                )
            })
            .collect::<Vec<_>>()
            .join("; "),
    }
}
