use decision_task::config::DecisionContext;
use decision_task::queue::{Queue, schedule_task};
use decision_task::slug::slug_id;
use decision_task::task::build_fxaclient_task;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let ctx = DecisionContext::from_env()?;
    tracing::info!(
        repo = %ctx.repo_url,
        branch = %ctx.branch,
        commit = %ctx.commit,
        "Decision task for pull request"
    );

    let queue = Queue::new(ctx.queue_url.clone());
    let task = build_fxaclient_task(&ctx, chrono::Utc::now());

    schedule_task(&queue, &slug_id(), &task).await?;

    Ok(())
}
