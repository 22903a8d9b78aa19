//! Task description model and the pull-request task builder.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::config::DecisionContext;

/// Worker pool the built task runs on.
const WORKER_TYPE: &str = "github-worker";
/// Scheduler that owns github-triggered tasks.
const SCHEDULER_ID: &str = "taskcluster-github";
/// Provisioner the worker type belongs to.
const PROVISIONER_ID: &str = "aws-provisioner-v1";
/// Container image with the Android buildtools, NDK and rust toolchains baked in.
const BUILD_IMAGE: &str = "mozillamobile/rust-component:buildtools-27.0.3-ndk-r15c-ndk-version-21-rust-stable-1.28.0-rust-beta-1.29.0-beta.15";
/// Maximum wall-clock runtime of the build, in seconds.
const MAX_RUN_TIME_SECS: u32 = 7200;
/// Queue-side re-execution budget for the scheduled task (not this submission).
const TASK_RETRIES: u32 = 5;

// ── Wire model ──────────────────────────────────────────────────────

/// A task definition as the queue's createTask endpoint expects it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDefinition {
    pub worker_type: String,
    pub task_group_id: String,
    #[serde(with = "string_date")]
    pub expires: DateTime<Utc>,
    pub retries: u32,
    #[serde(with = "string_date")]
    pub created: DateTime<Utc>,
    pub tags: BTreeMap<String, String>,
    pub priority: Priority,
    pub scheduler_id: String,
    #[serde(with = "string_date")]
    pub deadline: DateTime<Utc>,
    pub dependencies: Vec<String>,
    pub routes: Vec<String>,
    pub scopes: Vec<String>,
    pub requires: Requires,
    pub payload: Payload,
    pub provisioner_id: String,
    pub metadata: TaskMetadata,
}

/// Scheduling priority of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    Highest,
    VeryHigh,
    High,
    Medium,
    Low,
    VeryLow,
    Lowest,
    Normal,
}

/// How dependency resolution gates a task becoming pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Requires {
    /// All dependencies must complete successfully.
    AllCompleted,
    /// All dependencies must resolve, successfully or not.
    AllResolved,
}

/// Docker-worker payload: what to run and what to publish.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payload {
    pub features: BTreeMap<String, bool>,
    pub max_run_time: u32,
    pub image: String,
    pub command: Vec<String>,
    pub artifacts: BTreeMap<String, Artifact>,
}

/// An artifact to publish from the task container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    #[serde(rename = "type")]
    pub kind: ArtifactKind,
    /// Source path inside the task container.
    pub path: String,
}

/// Artifact source kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    File,
    Directory,
}

/// Human-facing task metadata shown in the task inspector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskMetadata {
    pub name: String,
    pub description: String,
    pub owner: String,
    pub source: String,
}

// ── Builder ─────────────────────────────────────────────────────────

/// Build the FxA client library task for a pull request.
///
/// Pure: given the context and the current time, returns the definition
/// with created = now, deadline = now + 1 day, expires = now + 365 days.
pub fn build_fxaclient_task(ctx: &DecisionContext, now: DateTime<Utc>) -> TaskDefinition {
    TaskDefinition {
        worker_type: WORKER_TYPE.to_string(),
        task_group_id: ctx.task_id.clone(),
        expires: now + Duration::days(365),
        retries: TASK_RETRIES,
        created: now,
        tags: BTreeMap::new(),
        priority: Priority::Lowest,
        scheduler_id: SCHEDULER_ID.to_string(),
        deadline: now + Duration::days(1),
        dependencies: vec![ctx.task_id.clone()],
        routes: Vec::new(),
        scopes: Vec::new(),
        requires: Requires::AllCompleted,
        payload: Payload {
            features: BTreeMap::new(),
            max_run_time: MAX_RUN_TIME_SECS,
            image: BUILD_IMAGE.to_string(),
            command: vec![
                "/bin/bash".to_string(),
                "--login".to_string(),
                "-cx".to_string(),
                build_command(ctx),
            ],
            artifacts: artifacts(),
        },
        provisioner_id: PROVISIONER_ID.to_string(),
        metadata: TaskMetadata {
            name: "application-services - FxA client library".to_string(),
            description: "Builds the FxA client and the Logins API for Android architectures."
                .to_string(),
            owner: "nalexander@mozilla.com".to_string(),
            source: "https://github.com/mozilla/application-services".to_string(),
        },
    }
}

/// The shell pipeline the worker runs: clone the PR head, check out the
/// commit, run the taskcluster build script and assemble both libraries.
fn build_command(ctx: &DecisionContext) -> String {
    format!(
        "export TERM=dumb \
         && git clone {repo} \
         && cd application-services \
         && git fetch {repo} {branch} \
         && git config advice.detachedHead false \
         && git checkout {commit} \
         && ./scripts/taskcluster-android.sh \
         && ./gradlew --no-daemon clean :fxa-client-library:assembleRelease :logins-library:assembleRelease",
        repo = ctx.repo_url,
        branch = ctx.branch,
        commit = ctx.commit,
    )
}

/// The two AARs the build publishes, keyed by public artifact name.
fn artifacts() -> BTreeMap<String, Artifact> {
    BTreeMap::from([
        (
            "public/bin/mozilla/fxa_client-release.aar".to_string(),
            Artifact {
                kind: ArtifactKind::File,
                path: "/build/application-services/fxa-client/sdks/android/library/build/outputs/aar/fxa_client-release.aar".to_string(),
            },
        ),
        (
            "public/bin/mozilla/logins-release.aar".to_string(),
            Artifact {
                kind: ArtifactKind::File,
                path: "/build/application-services/logins-api/android/library/build/outputs/aar/logins-release.aar".to_string(),
            },
        ),
    ])
}

// ── Timestamp format ────────────────────────────────────────────────

/// Queue string-date format: ISO 8601 with millisecond precision and a
/// literal trailing `Z` (e.g. `2018-09-01T12:00:00.000Z`).
pub mod string_date {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, FORMAT)
            .map(|ndt| ndt.and_utc())
            .map_err(de::Error::custom)
    }
}

// ── Tests ───────────────────────────────────────────────────────────
