//! Independent single-entity record generators.
//!
//! Unlike the causal stream in `devstream-core`, each record here is drawn
//! on its own: no cross-record references, no lifecycle state. These feed
//! pipelines that only need one entity kind at a time.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::Serialize;
use uuid::Uuid;

use devstream_core::vocab::pick;

const AUTHORS: &[&str] = &["Alex", "Vanessa", "John", "Peter", "Krish", "Lee"];

const MODULES: &[&str] = &[
    "auth", "billing", "catalog", "checkout", "inventory",
    "notifications", "payments", "reporting", "search", "shipping",
];

/// Window the independent feeds cover, counting back from now.
const SPAN_DAYS: i64 = 60;

fn random_instant<R: Rng + ?Sized>(rng: &mut R, base: DateTime<Utc>) -> DateTime<Utc> {
    base + Duration::seconds(rng.gen_range(0..=SPAN_DAYS * 24 * 60 * 60))
}

// ---------------------------------------------------------------------------
// Deployments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct DeploymentRecord {
    pub id: usize,
    pub author: String,
    pub deployment_time: DateTime<Utc>,
    pub environment: String,
    pub status: String,
}

pub fn deployments<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<DeploymentRecord> {
    let base = Utc::now() - Duration::days(SPAN_DAYS);
    (0..count)
        .map(|id| DeploymentRecord {
            id,
            author: pick(rng, AUTHORS).to_string(),
            deployment_time: random_instant(rng, base),
            environment: pick(rng, &["staging", "production"]).to_string(),
            status: pick(rng, &["success", "failure"]).to_string(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Repository activity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ActivityRecord {
    pub id: String,
    pub author: String,
    pub event_time: DateTime<Utc>,
    pub event_type: String,
    pub message: String,
}

pub fn github_activity<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<ActivityRecord> {
    let base = Utc::now() - Duration::days(SPAN_DAYS);
    (0..count)
        .map(|_| {
            let author = pick(rng, AUTHORS);
            let module = pick(rng, MODULES);
            let (event_type, message) = match rng.gen_range(0..4) {
                0 => ("push", format!("{author} pushed to {module}")),
                1 => ("pull_request", format!("{author} created a pull request for {module}")),
                2 => ("issue", format!("{author} created an issue for {module}")),
                _ => ("commit", format!("{author} committed to {module}")),
            };
            ActivityRecord {
                id: Uuid::new_v4().simple().to_string()[..8].to_string(),
                author: author.to_string(),
                event_time: random_instant(rng, base),
                event_type: event_type.to_string(),
                message,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// CI jobs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct JobRecord {
    pub id: usize,
    pub author: String,
    pub event_time: DateTime<Utc>,
    pub event_type: String,
    pub message: String,
    pub duration: u32,
    pub status: String,
}

pub fn jenkins_jobs<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<JobRecord> {
    let base = Utc::now() - Duration::days(SPAN_DAYS);
    (0..count)
        .map(|id| {
            let author = pick(rng, AUTHORS);
            let (event_type, message) = match rng.gen_range(0..4) {
                0 => ("build", format!("{author} built the project")),
                1 => ("deploy", format!("{author} deployed the project")),
                2 => ("test", format!("{author} tested the project")),
                _ => ("release", format!("{author} released the project")),
            };
            JobRecord {
                id,
                author: author.to_string(),
                event_time: random_instant(rng, base),
                event_type: event_type.to_string(),
                message,
                duration: rng.gen_range(1..=20),
                status: pick(rng, &["success", "failure"]).to_string(),
            }
        })
        .collect()
}
