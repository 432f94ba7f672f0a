//! Deployment lifecycle emission, trailing successful builds.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::clock::sample_between;
use crate::events::{DeploymentStatus, Event, EventKind};
use crate::vocab;

const DEPLOY_PROBABILITY: f64 = 0.8;
const SUCCEED_PROBABILITY: f64 = 0.95;

/// Emit the deployment lifecycle for one successful build.
///
/// Not every successful build ships: with probability 0.2 this returns an
/// empty sequence. Otherwise exactly two events are produced; the start
/// lands within ten minutes of `build_finished_at` and the finish at
/// exactly start + duration (30-300 seconds), succeeding with probability
/// 0.95.
pub fn deployment_lifecycle<R: Rng + ?Sized>(
    rng: &mut R,
    build_id: &str,
    repo: &str,
    commit_hash: &str,
    build_finished_at: DateTime<Utc>,
) -> Vec<Event> {
    if !rng.gen_bool(DEPLOY_PROBABILITY) {
        return Vec::new();
    }

    let deployment_id = format!("DEPLOY-{}", rng.gen_range(1000..=9999));
    let environment = vocab::pick(rng, vocab::ENVIRONMENTS).to_string();
    let started_at = sample_between(
        rng,
        build_finished_at,
        build_finished_at + Duration::minutes(10),
    );
    let duration_seconds: u32 = rng.gen_range(30..=300);
    let finished_at = started_at + Duration::seconds(i64::from(duration_seconds));
    let status = if rng.gen_bool(SUCCEED_PROBABILITY) {
        DeploymentStatus::Succeeded
    } else {
        DeploymentStatus::Failed
    };

    vec![
        Event::new(
            started_at,
            EventKind::DeploymentStarted {
                deployment_id: deployment_id.clone(),
                service_name: repo.to_string(),
                commit_hash: commit_hash.to_string(),
                build_id: build_id.to_string(),
                environment: environment.clone(),
                status: DeploymentStatus::InProgress,
            },
        ),
        Event::new(
            finished_at,
            EventKind::DeploymentFinished {
                deployment_id,
                service_name: repo.to_string(),
                environment,
                status,
                duration_seconds,
            },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_forced_path_deploys_and_succeeds() {
        // Constant-zero randomness: deployment happens, starts immediately,
        // shortest duration, succeeds.
        let mut rng = StepRng::new(0, 0);
        let build_end = Utc::now();
        let events =
            deployment_lifecycle(&mut rng, "BUILD-77777", "web-dashboard", "a1b2c3d", build_end);

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].timestamp, build_end);
        assert_eq!(events[1].timestamp, build_end + Duration::seconds(30));
        match &events[1].kind {
            EventKind::DeploymentFinished {
                status,
                duration_seconds,
                ..
            } => {
                assert_eq!(*status, DeploymentStatus::Succeeded);
                assert_eq!(*duration_seconds, 30);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_lifecycle_shape_invariants() {
        let mut rng = StdRng::seed_from_u64(101);
        let build_end = Utc::now();
        let mut saw_skip = false;
        let mut saw_succeeded = false;
        let mut saw_failed = false;

        for _ in 0..500 {
            let events =
                deployment_lifecycle(&mut rng, "BUILD-12345", "service-search", "f00ba77", build_end);
            if events.is_empty() {
                saw_skip = true;
                continue;
            }

            assert_eq!(events.len(), 2);
            let started_at = events[0].timestamp;
            assert!(started_at >= build_end);
            assert!(started_at <= build_end + Duration::minutes(10));

            match (&events[0].kind, &events[1].kind) {
                (
                    EventKind::DeploymentStarted {
                        deployment_id: started_id,
                        environment: started_env,
                        status: started_status,
                        ..
                    },
                    EventKind::DeploymentFinished {
                        deployment_id: finished_id,
                        environment: finished_env,
                        status,
                        duration_seconds,
                        ..
                    },
                ) => {
                    assert_eq!(started_id, finished_id);
                    assert_eq!(started_env, finished_env);
                    assert_eq!(*started_status, DeploymentStatus::InProgress);
                    assert!((30..=300).contains(duration_seconds));
                    assert_eq!(
                        events[1].timestamp,
                        started_at + Duration::seconds(i64::from(*duration_seconds))
                    );
                    match status {
                        DeploymentStatus::Succeeded => saw_succeeded = true,
                        DeploymentStatus::Failed => saw_failed = true,
                        DeploymentStatus::InProgress => {
                            panic!("finished event cannot be in progress")
                        }
                    }
                }
                _ => panic!("deployment lifecycle must be started then finished"),
            }
        }

        assert!(saw_skip, "skip branch never taken in 500 attempts");
        assert!(saw_succeeded, "succeeded branch never taken in 500 attempts");
        assert!(saw_failed, "failed branch never taken in 500 attempts");
    }
}
