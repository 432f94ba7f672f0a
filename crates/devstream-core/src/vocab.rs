//! Identity and vocabulary pools.
//!
//! Pure data: every name the generator can mention lives here. Pools are
//! process-wide constants, initialized before any generation begins and
//! never mutated.

use rand::Rng;

/// Usernames that author commits, open pull requests and trigger builds.
pub const AUTHORS: &[&str] = &[
    "mgarcia", "jchen", "skowalski", "priyap", "tnguyen", "lwright",
    "dmorales", "abakker", "kfernandez", "rsingh", "ehall", "yko",
    "fabdulla", "cmazur", "novak84", "bjornstad", "hliu", "mrossi",
    "opetrova", "wkim",
];

/// Repository names, also used as service names for deployments.
pub const REPOS: &[&str] = &[
    "api-order-gateway", "api-identity", "api-catalog",
    "web-checkout", "web-dashboard", "web-support-portal",
    "service-billing", "service-notifications", "service-search",
    "service-ledger", "platform-ingest", "platform-scheduler",
];

pub const BRANCHES: &[&str] = &[
    "main",
    "develop",
    "feature/login-flow",
    "feature/payment-integration",
    "bugfix/db-connection-leak",
    "release/v1.2.0",
];

pub const CI_TOOLS: &[&str] = &["Jenkins", "GitHub Actions", "GitLab CI/CD", "CircleCI"];

pub const PR_TITLES: &[&str] = &[
    "feat: Add new API endpoint",
    "fix: Resolve bug in user authentication",
    "docs: Update README with new instructions",
    "refactor: Improve code readability",
    "chore: Update dependencies",
    "feat: Implement new caching strategy",
    "test: Add unit tests for component X",
];

pub const ENVIRONMENTS: &[&str] = &["development", "staging", "production"];

/// Labels sampled onto opened pull requests (0-3 distinct per PR).
pub const PR_LABELS: &[&str] = &["bug", "enhancement", "docs", "backend", "frontend"];

pub const COMMIT_MESSAGES: &[&str] = &[
    "handle empty response body from upstream",
    "bump connection pool size for peak traffic",
    "extract shared pagination helper",
    "fix off-by-one in retry backoff",
    "add index on created_at for audit queries",
    "tighten input validation on signup form",
    "remove dead feature flag plumbing",
    "cache tenant settings per request",
    "log request id on every error path",
    "migrate settings endpoint to v2 schema",
    "reduce allocation churn in hot loop",
    "align timeout defaults across clients",
];

/// Name of the synthetic suite reported by every CI test report.
pub const TEST_SUITE: &str = "unit_and_integration";

/// Pick one entry from a non-empty pool.
pub fn pick<'a, R: Rng + ?Sized>(rng: &mut R, pool: &[&'a str]) -> &'a str {
    pool[rng.gen_range(0..pool.len())]
}
