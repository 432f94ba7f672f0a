//! End-to-end structural and referential invariants of the event stream.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use devstream_core::{
    BuildStatus, DeploymentStatus, Event, EventKind, EventStream, StreamConfig,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn config(pull_requests: usize, commits: usize, builds: usize) -> StreamConfig {
    StreamConfig {
        pull_requests,
        commits,
        builds,
        time_span_days: 90,
    }
}

/// Collect a full run along with its window bounds.
fn run(cfg: StreamConfig, seed: u64) -> (Vec<Event>, DateTime<Utc>, DateTime<Utc>) {
    let mut stream = EventStream::with_rng(cfg, StdRng::seed_from_u64(seed)).expect("valid config");
    let events: Vec<Event> = stream.by_ref().collect();
    (events, stream.window_start(), stream.generated_at())
}

#[test]
fn test_events_stay_inside_generation_window() {
    let (events, window_start, generated_at) = run(config(40, 80, 40), 1);
    assert!(!events.is_empty());
    for event in &events {
        assert!(
            event.timestamp >= window_start,
            "{} at {} precedes the window",
            event.event_type(),
            event.timestamp
        );
        assert!(
            event.timestamp <= generated_at,
            "{} at {} is later than the generation instant",
            event.event_type(),
            event.timestamp
        );
    }
}

#[test]
fn test_phases_arrive_in_macro_order() {
    let (events, _, _) = run(config(30, 50, 25), 2);

    fn phase_rank(event: &Event) -> u8 {
        match event.kind {
            EventKind::PullRequestOpened { .. }
            | EventKind::PullRequestReviewed { .. }
            | EventKind::PullRequestMerged { .. }
            | EventKind::PullRequestClosed { .. } => 0,
            EventKind::CommitPushed { .. } => 1,
            _ => 2,
        }
    }

    let mut last_rank = 0;
    for event in &events {
        let rank = phase_rank(event);
        assert!(
            rank >= last_rank,
            "{} arrived after a later phase had begun",
            event.event_type()
        );
        last_rank = rank;
    }
}

#[test]
fn test_builds_reference_emitted_commits() {
    let (events, _, _) = run(config(0, 60, 40), 3);

    let mut commits: HashMap<&str, (&str, &str, &str, DateTime<Utc>)> = HashMap::new();
    for event in &events {
        if let EventKind::CommitPushed {
            ref commit_hash,
            ref repo_name,
            ref branch,
            ref author_username,
            ..
        } = event.kind
        {
            commits.insert(
                commit_hash.as_str(),
                (
                    repo_name.as_str(),
                    branch.as_str(),
                    author_username.as_str(),
                    event.timestamp,
                ),
            );
        }
    }

    let mut seen_builds = 0;
    for event in &events {
        if let EventKind::BuildStarted {
            ref commit_hash,
            ref repo_name,
            ref branch,
            ref triggered_by,
            ..
        } = event.kind
        {
            seen_builds += 1;
            let (repo, br, author, committed_at) = commits
                .get(commit_hash.as_str())
                .unwrap_or_else(|| panic!("build references unknown commit {commit_hash}"));
            assert_eq!(repo_name, repo);
            assert_eq!(branch, br);
            assert_eq!(triggered_by, author);
            assert!(event.timestamp >= *committed_at);
            assert!((event.timestamp - *committed_at).num_seconds() <= 60);
        }
    }
    assert_eq!(seen_builds, 40, "every requested build should be anchored");
}

#[test]
fn test_deployments_follow_successful_builds() {
    let (events, _, _) = run(config(0, 40, 120), 4);

    let mut finished: HashMap<String, (BuildStatus, DateTime<Utc>)> = HashMap::new();
    for event in &events {
        match event.kind {
            EventKind::BuildFinished {
                ref build_id,
                status,
                ..
            } => {
                finished.insert(build_id.clone(), (status, event.timestamp));
            }
            EventKind::DeploymentStarted { ref build_id, .. } => {
                let (status, finished_at) = finished
                    .get(build_id)
                    .unwrap_or_else(|| panic!("deployment for unknown build {build_id}"));
                assert_eq!(
                    *status,
                    BuildStatus::Success,
                    "deployment must follow a successful build"
                );
                assert!(event.timestamp >= *finished_at);
                assert!((event.timestamp - *finished_at).num_seconds() <= 600);
            }
            _ => {}
        }
    }
}

#[test]
fn test_pull_request_lifecycles_are_well_formed() {
    let (events, _, _) = run(config(150, 0, 0), 5);

    // Lifecycles are contiguous in the stream, so a sequential walk is
    // collision-proof even when two PRs draw the same id.
    let mut open: Option<(String, DateTime<Utc>, usize)> = None;
    let mut lifecycles = 0;
    for event in &events {
        match event.kind {
            EventKind::PullRequestOpened { ref pr_id, .. } => {
                assert!(open.is_none(), "previous lifecycle left unterminated");
                open = Some((pr_id.clone(), event.timestamp, 1));
            }
            EventKind::PullRequestReviewed { ref pr_id, .. } => {
                let (id, last_at, len) = open.as_mut().expect("review outside a lifecycle");
                assert_eq!(id, pr_id);
                assert!(event.timestamp >= *last_at);
                *last_at = event.timestamp;
                *len += 1;
                assert_eq!(*len, 2, "at most one review per lifecycle");
            }
            EventKind::PullRequestMerged { ref pr_id, .. }
            | EventKind::PullRequestClosed { ref pr_id, .. } => {
                let (id, last_at, len) = open.take().expect("terminal outside a lifecycle");
                assert_eq!(&id, pr_id);
                assert!(event.timestamp >= last_at);
                assert!((2..=3).contains(&(len + 1)));
                lifecycles += 1;
            }
            _ => panic!("unexpected {} in a PR-only run", event.event_type()),
        }
    }
    assert!(open.is_none(), "stream ended mid-lifecycle");
    assert_eq!(lifecycles, 150);
}

#[test]
fn test_build_lifecycles_are_well_formed() {
    let (events, _, _) = run(config(0, 30, 100), 6);

    let chained: Vec<&Event> = events
        .iter()
        .filter(|event| !matches!(event.kind, EventKind::CommitPushed { .. }))
        .collect();

    let mut i = 0;
    let mut builds = 0;
    while i < chained.len() {
        assert!(chained.len() - i >= 3, "truncated build lifecycle");
        let (started, report, finished) = (chained[i], chained[i + 1], chained[i + 2]);

        let (build_id, commit_hash) = match started.kind {
            EventKind::BuildStarted {
                ref build_id,
                ref commit_hash,
                status,
                ..
            } => {
                assert_eq!(status, BuildStatus::InProgress);
                (build_id.clone(), commit_hash.clone())
            }
            _ => panic!("expected build_started, got {}", started.event_type()),
        };

        let failed = match report.kind {
            EventKind::TestReport {
                build_id: ref report_build,
                total_tests,
                passed_tests,
                failed_tests,
                ..
            } => {
                assert_eq!(report_build, &build_id);
                assert_eq!(passed_tests + failed_tests, total_tests);
                assert!(report.timestamp >= started.timestamp);
                failed_tests
            }
            _ => panic!("expected test_report, got {}", report.event_type()),
        };

        let (status, finished_at) = match finished.kind {
            EventKind::BuildFinished {
                build_id: ref finished_build,
                status,
                duration_seconds,
                ..
            } => {
                assert_eq!(finished_build, &build_id);
                assert!(report.timestamp <= finished.timestamp);
                assert_eq!(
                    (finished.timestamp - started.timestamp).num_seconds(),
                    i64::from(duration_seconds)
                );
                if failed == 0 {
                    assert_eq!(status, BuildStatus::Success);
                } else {
                    assert_eq!(status, BuildStatus::Failed);
                }
                (status, finished.timestamp)
            }
            _ => panic!("expected build_finished, got {}", finished.event_type()),
        };

        i += 3;
        builds += 1;

        if i < chained.len() {
            if let EventKind::DeploymentStarted {
                build_id: ref deploy_build,
                commit_hash: ref deploy_commit,
                ..
            } = chained[i].kind
            {
                assert_eq!(status, BuildStatus::Success);
                assert_eq!(deploy_build, &build_id);
                assert_eq!(deploy_commit, &commit_hash);
                assert!(chained[i].timestamp >= finished_at);
                match chained[i + 1].kind {
                    EventKind::DeploymentFinished {
                        status: deploy_status,
                        duration_seconds,
                        ..
                    } => {
                        assert_ne!(deploy_status, DeploymentStatus::InProgress);
                        assert_eq!(
                            (chained[i + 1].timestamp - chained[i].timestamp).num_seconds(),
                            i64::from(duration_seconds)
                        );
                    }
                    _ => panic!("deployment_started without deployment_finished"),
                }
                i += 2;
            }
        }
    }
    assert_eq!(builds, 100);
}

#[test]
fn test_same_seed_reproduces_branch_structure() {
    // Event ids and commit hashes come from v4 UUIDs, and absolute
    // timestamps from the wall clock; everything else is a function of
    // the seed. Compare runs on that deterministic skeleton.
    fn fingerprint(events: &[Event], origin: DateTime<Utc>) -> Vec<serde_json::Value> {
        events
            .iter()
            .map(|event| {
                let mut value = serde_json::to_value(event).expect("event serializes");
                let object = value.as_object_mut().expect("event is an object");
                object.remove("event_id");
                object.remove("commit_hash");
                let offset = (event.timestamp - origin).num_seconds();
                object.insert("timestamp".to_string(), serde_json::json!(offset));
                value
            })
            .collect()
    }

    let (first, _, first_origin) = run(config(25, 40, 30), 42);
    let (second, _, second_origin) = run(config(25, 40, 30), 42);
    assert_eq!(
        fingerprint(&first, first_origin),
        fingerprint(&second, second_origin)
    );
}

#[test]
fn test_single_lifecycle_scenario() {
    let (events, _, _) = run(config(1, 1, 1), 7);

    let hashes: Vec<&String> = events
        .iter()
        .filter_map(|event| match event.kind {
            EventKind::CommitPushed { ref commit_hash, .. } => Some(commit_hash),
            _ => None,
        })
        .collect();
    assert_eq!(hashes.len(), 1);
    let the_hash = hashes[0];

    let mut build_events = 0;
    for event in &events {
        if let EventKind::BuildStarted { ref commit_hash, .. } = event.kind {
            assert_eq!(commit_hash, the_hash, "the only build must anchor to the only commit");
        }
        if matches!(
            event.kind,
            EventKind::BuildStarted { .. }
                | EventKind::TestReport { .. }
                | EventKind::BuildFinished { .. }
        ) {
            build_events += 1;
        }
    }
    assert_eq!(build_events, 3, "one full build lifecycle expected");
}

#[test]
fn test_missing_commits_shorten_stream() {
    let mut stream =
        EventStream::with_rng(config(3, 0, 10), StdRng::seed_from_u64(8)).expect("valid config");
    let events: Vec<Event> = stream.by_ref().collect();

    assert!(events.iter().all(|event| matches!(
        event.kind,
        EventKind::PullRequestOpened { .. }
            | EventKind::PullRequestReviewed { .. }
            | EventKind::PullRequestMerged { .. }
            | EventKind::PullRequestClosed { .. }
    )));
    assert_eq!(stream.builds_skipped(), 10);
}
