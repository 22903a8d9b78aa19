//! Decision context — the configuration one decision-task run receives
//! from the CI environment, passed explicitly into the task builder.

use crate::error::ConfigError;

/// Default base URL of the queue service (the in-cluster taskcluster proxy).
pub const DEFAULT_QUEUE_URL: &str = "http://taskcluster/queue/v1";

/// Inputs the CI environment provides for one pull-request decision run.
#[derive(Debug, Clone)]
pub struct DecisionContext {
    /// Id of the decision task itself (also used as the task group id).
    pub task_id: String,
    /// Head repository URL of the pull request.
    pub repo_url: String,
    /// Head branch name.
    pub branch: String,
    /// Head commit sha.
    pub commit: String,
    /// Base URL of the queue service.
    pub queue_url: String,
}

impl DecisionContext {
    /// Read the context from the process environment.
    ///
    /// A missing required variable is an explicit error, not a silent
    /// empty substitution into the build command.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Read the context from an arbitrary variable source.
    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
        };

        Ok(Self {
            task_id: require("TASK_ID")?,
            repo_url: require("GITHUB_HEAD_REPO_URL")?,
            branch: require("GITHUB_HEAD_BRANCH")?,
            commit: require("GITHUB_HEAD_SHA")?,
            queue_url: lookup("TASKCLUSTER_QUEUE_URL")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_QUEUE_URL.to_string()),
        })
    }
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn vars() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("TASK_ID", "abc123"),
            ("GITHUB_HEAD_REPO_URL", "https://github.com/x/y"),
            ("GITHUB_HEAD_BRANCH", "main"),
            ("GITHUB_HEAD_SHA", "deadbeef"),
        ])
    }

    fn from_map(map: &HashMap<&str, &str>) -> Result<DecisionContext, ConfigError> {
        DecisionContext::from_source(|key| map.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn context_reads_all_four_variables() {
        let ctx = from_map(&vars()).unwrap();
        assert_eq!(ctx.task_id, "abc123");
        assert_eq!(ctx.repo_url, "https://github.com/x/y");
        assert_eq!(ctx.branch, "main");
        assert_eq!(ctx.commit, "deadbeef");
    }

    #[test]
    fn context_defaults_queue_url() {
        let ctx = from_map(&vars()).unwrap();
        assert_eq!(ctx.queue_url, DEFAULT_QUEUE_URL);
    }

    #[test]
    fn context_honors_queue_url_override() {
        let mut map = vars();
        map.insert("TASKCLUSTER_QUEUE_URL", "http://localhost:8080/queue/v1");
        let ctx = from_map(&map).unwrap();
        assert_eq!(ctx.queue_url, "http://localhost:8080/queue/v1");
    }

    #[test]
    fn missing_variable_names_the_variable() {
        let mut map = vars();
        map.remove("GITHUB_HEAD_SHA");
        let err = from_map(&map).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref key) if key == "GITHUB_HEAD_SHA"));
    }

    #[test]
    fn empty_variable_is_treated_as_missing() {
        let mut map = vars();
        map.insert("GITHUB_HEAD_BRANCH", "");
        let err = from_map(&map).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref key) if key == "GITHUB_HEAD_BRANCH"));
    }
}
