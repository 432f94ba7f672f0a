//! Event model for the generated stream.
//!
//! Every record serializes flat: `event_id`, `timestamp`, an `event_type`
//! tag and the type-specific fields for that tag. The stream is
//! write-once; no event is mutated after emission.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A short unique event token (first 8 hex chars of a v4 UUID).
///
/// Collisions are accepted as negligible; no uniqueness check is
/// performed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(String);

impl EventId {
    pub fn new() -> Self {
        let hex = Uuid::new_v4().simple().to_string();
        EventId(hex[..8].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// STATUS VOCABULARY
// ============================================================================

/// Pull request state as carried on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrState {
    Open,
    Merged,
    Closed,
}

/// Outcome of a pull request review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewStatus {
    Approved,
    ChangesRequested,
    Commented,
}

/// CI build status across its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildStatus {
    InProgress,
    Success,
    Failed,
}

/// Deployment status across its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentStatus {
    InProgress,
    Succeeded,
    Failed,
}

// ============================================================================
// EVENT TYPES
// ============================================================================

/// The type-specific body of a generated event, tagged on the wire as
/// `event_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum EventKind {
    /// A pull request has been opened.
    PullRequestOpened {
        pr_id: String,
        repo_name: String,
        author_username: String,
        target_branch: String,
        source_branch: String,
        title: String,
        labels: Vec<String>,
        state: PrState,
    },

    /// An open pull request has received a review.
    PullRequestReviewed {
        pr_id: String,
        reviewer_username: String,
        repo_name: String,
        review_status: ReviewStatus,
        state: PrState,
    },

    /// Terminal: the pull request was merged.
    PullRequestMerged {
        pr_id: String,
        repo_name: String,
        merger_username: String,
        state: PrState,
    },

    /// Terminal: the pull request was closed without merging.
    PullRequestClosed {
        pr_id: String,
        repo_name: String,
        state: PrState,
    },

    /// A commit has been pushed to a branch.
    CommitPushed {
        repo_name: String,
        author_username: String,
        commit_hash: String,
        branch: String,
        message: String,
        lines_added: u32,
        lines_removed: u32,
    },

    /// A CI build has started against a pushed commit.
    BuildStarted {
        build_id: String,
        ci_tool: String,
        repo_name: String,
        commit_hash: String,
        branch: String,
        triggered_by: String,
        status: BuildStatus,
    },

    /// Test results produced while the build was running.
    TestReport {
        build_id: String,
        repo_name: String,
        test_suite: String,
        total_tests: u32,
        passed_tests: u32,
        failed_tests: u32,
        status: String,
    },

    /// Terminal: the build finished, mirroring the test outcome.
    BuildFinished {
        build_id: String,
        repo_name: String,
        status: BuildStatus,
        duration_seconds: u32,
    },

    /// A deployment has started for a successfully built commit.
    DeploymentStarted {
        deployment_id: String,
        service_name: String,
        commit_hash: String,
        build_id: String,
        environment: String,
        status: DeploymentStatus,
    },

    /// Terminal: the deployment finished.
    DeploymentFinished {
        deployment_id: String,
        service_name: String,
        environment: String,
        status: DeploymentStatus,
        duration_seconds: u32,
    },
}

impl EventKind {
    /// Wire tag for this event.
    pub fn event_type(&self) -> &'static str {
        match self {
            EventKind::PullRequestOpened { .. } => "pull_request_opened",
            EventKind::PullRequestReviewed { .. } => "pull_request_reviewed",
            EventKind::PullRequestMerged { .. } => "pull_request_merged",
            EventKind::PullRequestClosed { .. } => "pull_request_closed",
            EventKind::CommitPushed { .. } => "commit_pushed",
            EventKind::BuildStarted { .. } => "build_started",
            EventKind::TestReport { .. } => "test_report",
            EventKind::BuildFinished { .. } => "build_finished",
            EventKind::DeploymentStarted { .. } => "deployment_started",
            EventKind::DeploymentFinished { .. } => "deployment_finished",
        }
    }
}

// ============================================================================
// EVENT ENVELOPE
// ============================================================================

/// One generated record: a unique id, the instant it occurred and the
/// type-specific body, flattened into a single JSON object on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub event_id: EventId,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: EventKind,
}

impl Event {
    /// Stamp a new event at `timestamp` with a fresh id.
    pub fn new(timestamp: DateTime<Utc>, kind: EventKind) -> Self {
        Event {
            event_id: EventId::new(),
            timestamp,
            kind,
        }
    }

    /// Wire tag of the contained event.
    pub fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }
}
