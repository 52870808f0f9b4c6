use std::collections::BTreeMap;
use tracing::debug;

use super::ClassifiedTicket;
use crate::pr::BranchMap;

/// Per-repository activity counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepoCounts {
    pub merged: usize,
    pub open: usize,
    pub wip: usize,
}

/// Counters keyed by repository name (owner stripped).
#[derive(Debug, Clone, Default)]
pub struct RepoStats {
    repos: BTreeMap<String, RepoCounts>,
}

impl RepoStats {
    /// Accumulate counters over every ticket, independent of its category.
    ///
    /// - each matched PR bumps `merged`, or `open` when open and not a draft
    /// - with no matched PRs, the tracker's PR count goes to the branch repo,
    ///   as `merged` when the tracker reports merged and `open` otherwise
    /// - a branch reference with no PR evidence bumps `wip`
    /// - each branch-list entry of a ticket in this run bumps `wip`
    pub fn collect(tickets: &[ClassifiedTicket], branches: &BranchMap) -> Self {
        let mut stats = RepoStats::default();

        for ClassifiedTicket { ticket, .. } in tickets {
            for pr in &ticket.pull_requests {
                if pr.is_merged() {
                    stats.entry(pr.repo_name()).merged += 1;
                } else if pr.is_open() && !pr.draft {
                    stats.entry(pr.repo_name()).open += 1;
                }
            }

            if let Some(branch) = &ticket.branch {
                let dev = &ticket.dev;
                if ticket.has_no_pr_evidence() {
                    stats.entry(&branch.repo).wip += 1;
                } else if ticket.pull_requests.is_empty() {
                    let counts = stats.entry(&branch.repo);
                    if dev.reports_merged() {
                        counts.merged += dev.pr_count as usize;
                    } else {
                        counts.open += dev.pr_count as usize;
                    }
                }
            }

            for entry in branches.get(&ticket.key).into_iter().flatten() {
                debug!(ticket = %ticket.key, repo = %entry.repo, branch = %entry.branch, "branch without tracker link");
                let repo = entry.repo.rsplit('/').next().unwrap_or(&entry.repo);
                stats.entry(repo).wip += 1;
            }
        }

        stats
    }

    fn entry(&mut self, repo: &str) -> &mut RepoCounts {
        self.repos.entry(repo.to_string()).or_default()
    }

    /// Counters for a repository; zeros when it saw no activity.
    pub fn get(&self, repo: &str) -> RepoCounts {
        self.repos.get(repo).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify_all;
    use crate::pr::BranchEntry;
    use crate::testutil::{closed_pr, draft_pr, merged_pr, pr, ticket};
    use crate::tracker::{BranchRef, BranchTarget, DevInfo, DevState};

    fn web_branch() -> Option<BranchRef> {
        Some(BranchRef {
            repo: "humand-web".to_string(),
            target: BranchTarget::Branch("HUM-3".to_string()),
        })
    }

    #[test]
    fn test_pr_counters() {
        let mut t = ticket("HUM-1", "x");
        t.pull_requests = vec![
            merged_pr("humand-main-api", 1, "HUM-1"),
            pr("humand-main-api", 2, "HUM-1", ""),
            draft_pr("humand-web", 3, "HUM-1"),
            closed_pr("humand-web", 4, "HUM-1"),
        ];
        let stats = RepoStats::collect(&classify_all(vec![t]), &BranchMap::new());
        assert_eq!(stats.get("humand-main-api"), RepoCounts { merged: 1, open: 1, wip: 0 });
        assert_eq!(stats.get("humand-web"), RepoCounts { merged: 0, open: 0, wip: 0 });
    }

    #[test]
    fn test_draft_only_ticket_counts_nothing() {
        let mut t = ticket("HUM-2", "x");
        t.pull_requests = vec![draft_pr("humand-web", 5, "HUM-2")];
        let stats = RepoStats::collect(&classify_all(vec![t]), &BranchMap::new());
        assert_eq!(stats.get("humand-web"), RepoCounts::default());
    }

    #[test]
    fn test_tracker_pr_count_goes_to_branch_repo() {
        let mut merged = ticket("HUM-3", "x");
        merged.branch = web_branch();
        merged.dev = DevInfo { pr_count: 2, state: Some(DevState::Merged), open: false };

        let mut open = ticket("HUM-4", "y");
        open.branch = web_branch();
        open.dev = DevInfo { pr_count: 1, state: Some(DevState::Open), open: true };

        let stats = RepoStats::collect(&classify_all(vec![merged, open]), &BranchMap::new());
        assert_eq!(stats.get("humand-web"), RepoCounts { merged: 2, open: 1, wip: 0 });
    }

    #[test]
    fn test_tracker_pr_count_ignored_when_prs_matched() {
        let mut t = ticket("HUM-5", "x");
        t.branch = web_branch();
        t.dev = DevInfo { pr_count: 3, state: Some(DevState::Merged), open: false };
        t.pull_requests = vec![merged_pr("humand-web", 9, "HUM-5")];
        let stats = RepoStats::collect(&classify_all(vec![t]), &BranchMap::new());
        assert_eq!(stats.get("humand-web"), RepoCounts { merged: 1, open: 0, wip: 0 });
    }

    #[test]
    fn test_branch_without_pr_evidence_is_wip() {
        let mut t = ticket("HUM-3", "x");
        t.branch = web_branch();
        let stats = RepoStats::collect(&classify_all(vec![t]), &BranchMap::new());
        assert_eq!(stats.get("humand-web").wip, 1);
    }

    #[test]
    fn test_branch_with_dev_prs_is_not_wip() {
        let mut t = ticket("HUM-3", "x");
        t.branch = web_branch();
        t.dev = DevInfo { pr_count: 1, state: Some(DevState::Open), open: true };
        let stats = RepoStats::collect(&classify_all(vec![t]), &BranchMap::new());
        assert_eq!(stats.get("humand-web").wip, 0);
    }

    #[test]
    fn test_branch_list_adds_wip_for_known_tickets_only() {
        let mut branches = BranchMap::new();
        branches.insert(
            "HUM-4".to_string(),
            vec![
                BranchEntry { repo: "humand-mobile".to_string(), branch: "HUM-4-a".to_string() },
                BranchEntry { repo: "humand-co/humand-mobile".to_string(), branch: "HUM-4-b".to_string() },
            ],
        );
        branches.insert(
            "OTHER-1".to_string(),
            vec![BranchEntry { repo: "humand-web".to_string(), branch: "x".to_string() }],
        );
        let stats = RepoStats::collect(&classify_all(vec![ticket("HUM-4", "x")]), &branches);
        assert_eq!(stats.get("humand-mobile").wip, 2);
        assert_eq!(stats.get("humand-web").wip, 0);
    }

    #[test]
    fn test_unknown_repo_is_zero() {
        assert_eq!(RepoStats::default().get("nope"), RepoCounts::default());
    }
}
