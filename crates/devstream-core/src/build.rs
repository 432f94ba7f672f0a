//! CI build lifecycle emission: started -> test report -> finished.

use chrono::Duration;
use rand::Rng;

use crate::clock::sample_between;
use crate::commit::CommitRecord;
use crate::events::{BuildStatus, Event, EventKind};
use crate::vocab;

const PASS_PROBABILITY: f64 = 0.9;

/// Emit the ordered three-event sequence for one CI build anchored to a
/// previously emitted commit.
///
/// The build starts within one minute of the commit's timestamp and runs
/// for 120-1800 seconds. A test report is sampled inside the build window;
/// 90% of builds report zero failures, the rest fail at most 10% of their
/// tests, and pass/fail counts always sum to the total. `build_finished`
/// lands at exactly start + duration, mirrors the report outcome and
/// reproduces the duration verbatim.
pub fn build_lifecycle<R: Rng + ?Sized>(
    rng: &mut R,
    build_id: &str,
    commit: &CommitRecord,
) -> Vec<Event> {
    let started_at = sample_between(
        rng,
        commit.timestamp,
        commit.timestamp + Duration::minutes(1),
    );
    let duration_seconds: u32 = rng.gen_range(120..=1800);
    let finished_at = started_at + Duration::seconds(i64::from(duration_seconds));

    let mut events = Vec::with_capacity(3);
    events.push(Event::new(
        started_at,
        EventKind::BuildStarted {
            build_id: build_id.to_string(),
            ci_tool: vocab::pick(rng, vocab::CI_TOOLS).to_string(),
            repo_name: commit.repo_name.clone(),
            commit_hash: commit.commit_hash.clone(),
            branch: commit.branch.clone(),
            triggered_by: commit.author_username.clone(),
            status: BuildStatus::InProgress,
        },
    ));

    let reported_at = sample_between(rng, started_at, finished_at);
    let total_tests: u32 = rng.gen_range(50..=500);
    let failed_tests = if rng.gen_bool(PASS_PROBABILITY) {
        0
    } else {
        rng.gen_range(1..=total_tests / 10)
    };
    events.push(Event::new(
        reported_at,
        EventKind::TestReport {
            build_id: build_id.to_string(),
            repo_name: commit.repo_name.clone(),
            test_suite: vocab::TEST_SUITE.to_string(),
            total_tests,
            passed_tests: total_tests - failed_tests,
            failed_tests,
            status: "completed".to_string(),
        },
    ));

    let status = if failed_tests == 0 {
        BuildStatus::Success
    } else {
        BuildStatus::Failed
    };
    events.push(Event::new(
        finished_at,
        EventKind::BuildFinished {
            build_id: build_id.to_string(),
            repo_name: commit.repo_name.clone(),
            status,
            duration_seconds,
        },
    ));

    events
}
