//! Queue service client — submits task definitions over HTTP.

use serde::Serialize;
use serde_json::Value;

use crate::error::QueueError;
use crate::task::TaskDefinition;

/// Client for the queue service's createTask endpoint.
pub struct Queue {
    base_url: String,
    client: reqwest::Client,
}

impl Queue {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn task_url(&self, task_id: &str) -> String {
        format!("{}/task/{task_id}", self.base_url)
    }

    /// Submit a task definition under the given id (`PUT /task/<taskId>`).
    ///
    /// Non-success statuses become [`QueueError::Api`] with the response
    /// body; nothing is retried here.
    pub async fn create_task(
        &self,
        task_id: &str,
        task: &TaskDefinition,
    ) -> Result<Value, QueueError> {
        tracing::info!(task_id, url = %self.task_url(task_id), "Submitting task to queue");

        let resp = self
            .client
            .put(self.task_url(task_id))
            .json(task)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(QueueError::Api { status, body });
        }

        let result: Value = resp.json().await?;
        tracing::info!(task_id, "Queue accepted task");
        Ok(result)
    }
}

// ── Submitter ───────────────────────────────────────────────────────

/// Submit one task and trace both sides of the exchange on stdout:
/// `TASK <id>` with the definition, then `RESULT <id>` with the queue's
/// response. A failed call returns before any `RESULT` line is printed.
pub async fn schedule_task(
    queue: &Queue,
    task_id: &str,
    task: &TaskDefinition,
) -> Result<Value, QueueError> {
    println!("TASK {task_id}");
    println!("{}", to_pretty_json(task)?);

    let result = queue.create_task(task_id, task).await?;

    println!("RESULT {task_id}");
    println!("{}", to_pretty_json(&result)?);

    Ok(result)
}

/// 4-space-indented JSON, matching the trace format CI log scrapers expect.
fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

// ── Tests ───────────────────────────────────────────────────────────
