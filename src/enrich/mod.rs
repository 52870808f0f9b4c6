pub mod team;

pub use team::infer_team;

use tracing::{debug, instrument};

use crate::config::TeamConfig;
use crate::pr::PullRequestRef;
use crate::tracker::Ticket;

/// Attach every PR whose title or branch name contains a ticket key
/// (case-insensitive) to that ticket.
///
/// Plain substring search: `HUM-1` also matches `HUM-12`.
pub fn attach_pull_requests(tickets: &mut [Ticket], prs: &[PullRequestRef]) {
    let keys: Vec<String> = tickets.iter().map(|t| t.key.to_lowercase()).collect();

    for pr in prs {
        let title = pr.title.to_lowercase();
        let branch = pr.branch.to_lowercase();
        for (ticket, key) in tickets.iter_mut().zip(&keys) {
            if key.is_empty() {
                continue;
            }
            if title.contains(key.as_str()) || branch.contains(key.as_str()) {
                debug!(ticket = %ticket.key, repo = %pr.repo, pr = pr.number, "matched pull request");
                ticket.pull_requests.push(pr.clone());
            }
        }
    }
}

/// Attach pull requests, then tag each ticket with its owning team.
#[instrument(skip_all, fields(tickets = tickets.len(), pull_requests = prs.len()))]
pub fn enrich(tickets: &mut [Ticket], prs: &[PullRequestRef], teams: &TeamConfig) {
    attach_pull_requests(tickets, prs);
    for ticket in tickets.iter_mut() {
        ticket.team = infer_team(ticket, teams);
    }
}
