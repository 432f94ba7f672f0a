//! Stream orchestration: the only component with cross-entity state.
//!
//! [`EventStream`] drives the lifecycle emitters in a fixed macro-order
//! (all pull requests, then all commits, then all builds with conditional
//! deployments), owns the commit linkage pool and yields one flattened,
//! arrival-ordered sequence of events. Generation is lazy: one lifecycle
//! is materialized at a time, so consumers may stop early without draining
//! the rest.

use std::collections::VecDeque;

use chrono::{DateTime, Duration, SubsecRound, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::build::build_lifecycle;
use crate::clock::sample_between;
use crate::commit::{push_commit, CommitRecord};
use crate::config::StreamConfig;
use crate::deployment::deployment_lifecycle;
use crate::error::Result;
use crate::events::{BuildStatus, Event, EventKind};
use crate::pull_request::{pr_lifecycle, PullRequestSpec};
use crate::vocab;

/// Pull request start times stay this far clear of the window's end so the
/// whole lifecycle (review horizon plus terminal sampling) completes
/// inside it.
const PR_MARGIN_DAYS: i64 = 7;

/// Worst case from a commit's timestamp to the last event a build can
/// cause: build start offset (60s) + build duration (1800s) + deployment
/// start offset (600s) + deployment duration (300s). Commit timestamps
/// stay this far clear of the generation instant so every derived event
/// lands at or before it.
const COMMIT_HEADROOM_SECS: i64 = 60 + 1800 + 600 + 300;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    PullRequests,
    Commits,
    Builds,
    Done,
}

/// Lazy, arrival-ordered stream of causally linked delivery events.
///
/// Every probabilistic choice flows through the supplied [`Rng`], so a
/// seeded source reproduces the full branch structure of a run.
pub struct EventStream<R: Rng> {
    rng: R,
    config: StreamConfig,
    /// Generation instant, captured once at construction and truncated to
    /// whole seconds. No emitted event is later than this.
    now: DateTime<Utc>,
    window_start: DateTime<Utc>,
    phase: Phase,
    /// Lifecycles still to generate in the current phase.
    remaining: usize,
    /// Linkage records for every commit emitted so far. Owned here; build
    /// emission samples it uniformly with replacement and never mutates it.
    commit_pool: Vec<CommitRecord>,
    /// Events of the current lifecycle not yet handed to the caller.
    pending: VecDeque<Event>,
    builds_skipped: usize,
}

impl EventStream<StdRng> {
    /// Build a stream over `config`, seeded from OS entropy.
    pub fn new(config: StreamConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl<R: Rng> EventStream<R> {
    /// Build a stream with a caller-supplied randomness source.
    pub fn with_rng(config: StreamConfig, rng: R) -> Result<Self> {
        config.validate()?;
        let now = Utc::now().trunc_subsecs(0);
        let window_start = now - Duration::days(i64::from(config.time_span_days));

        info!(
            pull_requests = config.pull_requests,
            commits = config.commits,
            builds = config.builds,
            time_span_days = config.time_span_days,
            "starting event stream generation"
        );

        Ok(EventStream {
            rng,
            remaining: config.pull_requests,
            config,
            now,
            window_start,
            phase: Phase::PullRequests,
            commit_pool: Vec::new(),
            pending: VecDeque::new(),
            builds_skipped: 0,
        })
    }

    /// Instant captured at construction; no emitted event is later.
    pub fn generated_at(&self) -> DateTime<Utc> {
        self.now
    }

    /// Start of the generation window; no emitted event is earlier.
    pub fn window_start(&self) -> DateTime<Utc> {
        self.window_start
    }

    /// Number of requested builds that could not be generated because the
    /// commit pool was empty. A run with zero commits legitimately
    /// produces zero builds; the shortfall is reported here and via a
    /// warning, never as an error.
    pub fn builds_skipped(&self) -> usize {
        self.builds_skipped
    }

    fn advance_phase(&mut self) {
        self.phase = match self.phase {
            Phase::PullRequests => {
                debug!(count = self.config.commits, "generating commit events");
                self.remaining = self.config.commits;
                Phase::Commits
            }
            Phase::Commits => {
                debug!(
                    pool = self.commit_pool.len(),
                    count = self.config.builds,
                    "generating build lifecycles"
                );
                self.remaining = self.config.builds;
                Phase::Builds
            }
            Phase::Builds | Phase::Done => Phase::Done,
        };
    }

    fn next_pull_request(&mut self) {
        let spec = PullRequestSpec {
            pr_id: format!("PR-{}", self.rng.gen_range(1000..=9999)),
            author: vocab::pick(&mut self.rng, vocab::AUTHORS).to_string(),
            repo: vocab::pick(&mut self.rng, vocab::REPOS).to_string(),
            target_branch: "main".to_string(),
            source_branch: vocab::pick(&mut self.rng, vocab::BRANCHES).to_string(),
            title: vocab::pick(&mut self.rng, vocab::PR_TITLES).to_string(),
        };
        let latest_start = self.now - Duration::days(PR_MARGIN_DAYS);
        let start = sample_between(&mut self.rng, self.window_start, latest_start);
        self.pending
            .extend(pr_lifecycle(&mut self.rng, &spec, start, self.now));
    }

    fn next_commit(&mut self) {
        let author = vocab::pick(&mut self.rng, vocab::AUTHORS);
        let repo = vocab::pick(&mut self.rng, vocab::REPOS);
        let branch = vocab::pick(&mut self.rng, vocab::BRANCHES);
        let latest = self.now - Duration::seconds(COMMIT_HEADROOM_SECS);
        let timestamp = sample_between(&mut self.rng, self.window_start, latest);

        let (event, record) = push_commit(&mut self.rng, author, repo, branch, timestamp);
        self.commit_pool.push(record);
        self.pending.push_back(event);
    }

    fn next_build(&mut self) {
        // Uniform with replacement: the same commit may back several builds.
        let commit =
            self.commit_pool[self.rng.gen_range(0..self.commit_pool.len())].clone();
        let build_id = format!("BUILD-{}", self.rng.gen_range(10_000..=99_999));
        let events = build_lifecycle(&mut self.rng, &build_id, &commit);

        let succeeded_at = events.last().and_then(|event| match event.kind {
            EventKind::BuildFinished {
                status: BuildStatus::Success,
                ..
            } => Some(event.timestamp),
            _ => None,
        });

        self.pending.extend(events);
        if let Some(finished_at) = succeeded_at {
            self.pending.extend(deployment_lifecycle(
                &mut self.rng,
                &build_id,
                &commit.repo_name,
                &commit.commit_hash,
                finished_at,
            ));
        }
    }
}

impl<R: Rng> Iterator for EventStream<R> {
    type Item = Event;

    fn next(&mut self) -> Option<Event> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(event);
            }
            if self.remaining == 0 {
                if self.phase == Phase::Done {
                    return None;
                }
                self.advance_phase();
                continue;
            }
            self.remaining -= 1;
            match self.phase {
                Phase::PullRequests => self.next_pull_request(),
                Phase::Commits => self.next_commit(),
                Phase::Builds => {
                    if self.commit_pool.is_empty() {
                        // Benign: a run with zero commits produces zero
                        // builds, just a shorter stream than requested.
                        self.builds_skipped = self.remaining + 1;
                        self.remaining = 0;
                        self.phase = Phase::Done;
                        warn!(
                            requested = self.config.builds,
                            skipped = self.builds_skipped,
                            "commit pool is empty; skipping remaining builds"
                        );
                        return None;
                    }
                    self.next_build();
                }
                Phase::Done => return None,
            }
        }
    }
}
