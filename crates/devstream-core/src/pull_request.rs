//! Pull request lifecycle emission: opened -> optional review -> terminal.

use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::clock::sample_between;
use crate::events::{Event, EventKind, PrState, ReviewStatus};
use crate::vocab;

const REVIEW_PROBABILITY: f64 = 0.8;
const MERGE_PROBABILITY: f64 = 0.9;

/// Identity of one pull request lifecycle, chosen by the orchestrator.
#[derive(Debug, Clone)]
pub struct PullRequestSpec {
    pub pr_id: String,
    pub author: String,
    pub repo: String,
    pub target_branch: String,
    pub source_branch: String,
    pub title: String,
}

/// Emit the ordered event sequence for one pull request.
///
/// The opened event lands within one hour of `window_start`. A review
/// follows with probability 0.8, one to three days later, from a reviewer
/// who is never the PR author. Exactly one terminal event (merged with
/// probability 0.9, otherwise closed) lands between the previous event and
/// `now`. The sequence length is 2 or 3 and timestamps never decrease.
pub fn pr_lifecycle<R: Rng + ?Sized>(
    rng: &mut R,
    spec: &PullRequestSpec,
    window_start: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Vec<Event> {
    let mut events = Vec::with_capacity(3);

    let opened_at = sample_between(rng, window_start, window_start + Duration::hours(1));
    let label_count = rng.gen_range(0..=3);
    let labels = vocab::PR_LABELS
        .choose_multiple(rng, label_count)
        .map(|label| label.to_string())
        .collect();
    events.push(Event::new(
        opened_at,
        EventKind::PullRequestOpened {
            pr_id: spec.pr_id.clone(),
            repo_name: spec.repo.clone(),
            author_username: spec.author.clone(),
            target_branch: spec.target_branch.clone(),
            source_branch: spec.source_branch.clone(),
            title: spec.title.clone(),
            labels,
            state: PrState::Open,
        },
    ));

    let mut last_at = opened_at;
    if rng.gen_bool(REVIEW_PROBABILITY) {
        let horizon = last_at + Duration::days(rng.gen_range(1..=3));
        // Reviews never land past the generation instant.
        let reviewed_at = sample_between(rng, last_at, horizon.min(now));
        events.push(Event::new(
            reviewed_at,
            EventKind::PullRequestReviewed {
                pr_id: spec.pr_id.clone(),
                reviewer_username: reviewer(rng, &spec.author),
                repo_name: spec.repo.clone(),
                review_status: review_status(rng),
                state: PrState::Open,
            },
        ));
        last_at = reviewed_at;
    }

    let terminal_at = sample_between(rng, last_at, now);
    if rng.gen_bool(MERGE_PROBABILITY) {
        events.push(Event::new(
            terminal_at,
            EventKind::PullRequestMerged {
                pr_id: spec.pr_id.clone(),
                repo_name: spec.repo.clone(),
                merger_username: vocab::pick(rng, vocab::AUTHORS).to_string(),
                state: PrState::Merged,
            },
        ));
    } else {
        events.push(Event::new(
            terminal_at,
            EventKind::PullRequestClosed {
                pr_id: spec.pr_id.clone(),
                repo_name: spec.repo.clone(),
                state: PrState::Closed,
            },
        ));
    }

    events
}

/// Reviewer drawn from the author pool, excluding the PR author.
fn reviewer<R: Rng + ?Sized>(rng: &mut R, author: &str) -> String {
    let candidates: Vec<&str> = vocab::AUTHORS
        .iter()
        .copied()
        .filter(|candidate| *candidate != author)
        .collect();
    candidates[rng.gen_range(0..candidates.len())].to_string()
}

fn review_status<R: Rng + ?Sized>(rng: &mut R) -> ReviewStatus {
    match rng.gen_range(0..3) {
        0 => ReviewStatus::Approved,
        1 => ReviewStatus::ChangesRequested,
        _ => ReviewStatus::Commented,
    }
}
