use super::{keys, Heuristic, ObservationContext};
use crate::classify::{Category, ClassifiedTicket};

/// Shipped tickets without any PR, tracker dev info or branch link.
pub struct ShippedWithoutCode;

impl Heuristic for ShippedWithoutCode {
    fn name(&self) -> &str {
        "shipped-without-code"
    }

    fn observe(&self, ctx: &ObservationContext<'_>) -> Option<String> {
        let hits: Vec<&ClassifiedTicket> = ctx
            .tickets
            .iter()
            .filter(|t| {
                t.category == Category::Shipped
                    && t.ticket.has_no_pr_evidence()
                    && t.ticket.branch.is_none()
            })
            .collect();
        (!hits.is_empty()).then(|| {
            format!(
                "{} shipped ticket(s) have no linked code (verify they needed none): {}",
                hits.len(),
                keys(hits)
            )
        })
    }
}

/// Tracker status reads "Done" while the code still looks in flight.
pub struct StatusMismatch;

impl Heuristic for StatusMismatch {
    fn name(&self) -> &str {
        "status-mismatch"
    }

    fn observe(&self, ctx: &ObservationContext<'_>) -> Option<String> {
        let hits: Vec<&ClassifiedTicket> = ctx
            .tickets
            .iter()
            .filter(|t| {
                t.ticket.status.eq_ignore_ascii_case("done")
                    && matches!(t.category, Category::InReview | Category::InProgress)
            })
            .collect();
        (!hits.is_empty()).then(|| {
            format!(
                "{} ticket(s) are marked Done in the tracker but their code is still in review or progress: {}",
                hits.len(),
                keys(hits)
            )
        })
    }
}

/// Every matched PR is merged but the tracker was never moved to Done.
pub struct MergedNotDone;

impl Heuristic for MergedNotDone {
    fn name(&self) -> &str {
        "merged-not-done"
    }

    fn observe(&self, ctx: &ObservationContext<'_>) -> Option<String> {
        let hits: Vec<&ClassifiedTicket> = ctx
            .tickets
            .iter()
            .filter(|t| {
                !t.ticket.pull_requests.is_empty()
                    && t.ticket.pull_requests.iter().all(|pr| pr.is_merged())
                    && !t.ticket.status_category_is("Done")
            })
            .collect();
        (!hits.is_empty()).then(|| {
            format!(
                "{} ticket(s) have all PRs merged but are not Done in the tracker: {}",
                hits.len(),
                keys(hits)
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify_all;
    use crate::testutil::{merged_pr, pr, ticket};
    use crate::tracker::Ticket;

    fn context(tickets: &[ClassifiedTicket]) -> ObservationContext<'_> {
        ObservationContext {
            tickets,
            delivered_pct: 100,
            elapsed_pct: 0,
            lag_threshold: 20,
        }
    }

    fn done(key: &str) -> Ticket {
        let mut t = ticket(key, "x");
        t.status = "Done".to_string();
        t.status_category = "Done".to_string();
        t
    }

    #[test]
    fn test_shipped_without_code() {
        let mut with_pr = done("HUM-2");
        with_pr.pull_requests.push(merged_pr("humand-web", 1, "HUM-2"));
        let tickets = classify_all(vec![done("HUM-1"), with_pr]);
        let line = ShippedWithoutCode.observe(&context(&tickets)).unwrap();
        assert!(line.starts_with("1 shipped ticket(s)"));
        assert!(line.ends_with("HUM-1"));
    }

    #[test]
    fn test_status_mismatch() {
        let mut t = ticket("HUM-3", "x");
        t.status = "Done".to_string();
        t.status_category = "In Progress".to_string();
        let tickets = classify_all(vec![t, done("HUM-4")]);
        let line = StatusMismatch.observe(&context(&tickets)).unwrap();
        assert!(line.ends_with("HUM-3"));
    }

    #[test]
    fn test_merged_not_done() {
        let mut merged = ticket("HUM-5", "x");
        merged.status_category = "In Progress".to_string();
        merged.pull_requests.push(merged_pr("humand-web", 1, "HUM-5"));
        let mut mixed = ticket("HUM-6", "x");
        mixed.pull_requests.push(merged_pr("humand-web", 2, "HUM-6"));
        mixed.pull_requests.push(pr("humand-web", 3, "HUM-6", ""));
        let mut closed_out = done("HUM-7");
        closed_out.pull_requests.push(merged_pr("humand-web", 4, "HUM-7"));

        let tickets = classify_all(vec![merged, mixed, closed_out]);
        let line = MergedNotDone.observe(&context(&tickets)).unwrap();
        assert_eq!(line, "1 ticket(s) have all PRs merged but are not Done in the tracker: HUM-5");
    }

    #[test]
    fn test_quiet_on_clean_set() {
        let tickets = classify_all(vec![ticket("HUM-8", "x")]);
        let ctx = context(&tickets);
        assert!(ShippedWithoutCode.observe(&ctx).is_none());
        assert!(StatusMismatch.observe(&ctx).is_none());
        assert!(MergedNotDone.observe(&ctx).is_none());
    }
}
