//! Commit emission and the linkage projection retained for later stages.

use chrono::{DateTime, Utc};
use rand::Rng;
use uuid::Uuid;

use crate::events::{Event, EventKind};
use crate::vocab;

/// Compact projection of an emitted commit, kept alive for the duration of
/// a stream run so builds can anchor to commits that really exist in the
/// stream. Read-only once created; discarded when the run completes.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitRecord {
    pub commit_hash: String,
    pub repo_name: String,
    pub branch: String,
    pub author_username: String,
    pub timestamp: DateTime<Utc>,
}

/// Synthetic short commit hash (first 7 hex chars of a v4 UUID).
/// Collision probability is accepted; no uniqueness check is performed.
fn short_hash() -> String {
    Uuid::new_v4().simple().to_string()[..7].to_string()
}

/// Emit one `commit_pushed` event together with its linkage record.
///
/// Pure generation: no failure modes. Line-change magnitudes are
/// randomized (1-200 added, 0-100 removed).
pub fn push_commit<R: Rng + ?Sized>(
    rng: &mut R,
    author: &str,
    repo: &str,
    branch: &str,
    timestamp: DateTime<Utc>,
) -> (Event, CommitRecord) {
    let commit_hash = short_hash();

    let event = Event::new(
        timestamp,
        EventKind::CommitPushed {
            repo_name: repo.to_string(),
            author_username: author.to_string(),
            commit_hash: commit_hash.clone(),
            branch: branch.to_string(),
            message: vocab::pick(rng, vocab::COMMIT_MESSAGES).to_string(),
            lines_added: rng.gen_range(1..=200),
            lines_removed: rng.gen_range(0..=100),
        },
    );

    let record = CommitRecord {
        commit_hash,
        repo_name: repo.to_string(),
        branch: branch.to_string(),
        author_username: author.to_string(),
        timestamp,
    };

    (event, record)
}
