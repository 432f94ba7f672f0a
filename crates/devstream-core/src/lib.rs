//! DevStream core - causal software-delivery event generation.
//!
//! Produces a single time-ordered, cross-referenced stream of lifecycle
//! events for downstream ingestion and analytics pipelines:
//! - Pull request lifecycles: opened -> optional review -> merged or closed
//! - Commits, each retained as a compact linkage record for later stages
//! - CI build lifecycles anchored to real commits: started -> test report -> finished
//! - Deployments, conditionally trailing successful builds
//!
//! The stream is lazy: [`EventStream`] implements [`Iterator`] and
//! materializes one lifecycle at a time, so a consumer may stop early
//! without draining the rest. All randomness flows through a
//! caller-supplied [`rand::Rng`], which makes every probabilistic branch
//! forceable in tests.
//!
//! Persistence is the caller's concern; this crate only produces the
//! ordered sequence of serializable records.

pub mod build;
pub mod clock;
pub mod commit;
pub mod config;
pub mod deployment;
pub mod error;
pub mod events;
pub mod pull_request;
pub mod stream;
pub mod telemetry;
pub mod vocab;

pub use commit::CommitRecord;
pub use config::StreamConfig;
pub use error::{Result, StreamError};
pub use events::{
    BuildStatus, DeploymentStatus, Event, EventId, EventKind, PrState, ReviewStatus,
};
pub use stream::EventStream;
pub use telemetry::init_tracing;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
