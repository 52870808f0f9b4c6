use crate::config::TeamConfig;
use crate::tracker::{Team, Ticket};

/// Infer the owning team of a ticket.
///
/// Summary prefixes are checked first (frontend, backend, mobile), then the
/// repositories the ticket touches (frontend > backend > mobile > translations).
pub fn infer_team(ticket: &Ticket, teams: &TeamConfig) -> Team {
    let summary = ticket.summary.trim().to_lowercase();
    let by_prefix = [
        (Team::Frontend, &teams.frontend_prefixes),
        (Team::Backend, &teams.backend_prefixes),
        (Team::Mobile, &teams.mobile_prefixes),
    ];
    for (team, prefixes) in by_prefix {
        if prefixes
            .iter()
            .any(|p| !p.is_empty() && summary.starts_with(&p.to_lowercase()))
        {
            return team;
        }
    }

    let repos: Vec<&str> = ticket.repositories().collect();
    let by_repo = [
        (Team::Frontend, &teams.frontend_repos),
        (Team::Backend, &teams.backend_repos),
        (Team::Mobile, &teams.mobile_repos),
        (Team::Translations, &teams.translations_repos),
    ];
    for (team, set) in by_repo {
        if repos.iter().any(|repo| set.iter().any(|r| r == repo)) {
            return team;
        }
    }

    Team::Other
}
