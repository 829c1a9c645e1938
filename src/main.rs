// Stride - goal tracking backend
// Entry point and application setup

use chrono::Duration;
use stride::app::AppState;
use stride::services::NotificationRequest;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stride=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Stride");

    let data_dir = dirs::data_dir()
        .ok_or_else(|| anyhow::anyhow!("No data directory available"))?
        .join("stride");

    let state = AppState::setup(&data_dir).await?;

    // One-time permission grant, requested before any scheduling call
    state.notifications.request_authorization().await;

    // Register a reminder for every subtask that asks for one
    for goal in state.goals.all_goals() {
        for sub_task in &goal.sub_tasks {
            if !sub_task.reminder_enabled {
                continue;
            }

            let trigger_time =
                sub_task.end_date + Duration::seconds(sub_task.reminder_offset_secs);
            let request = NotificationRequest::new(
                format!("Reminder: {}", sub_task.title),
                goal.title.clone(),
                trigger_time,
            );

            if let Err(e) = state.notifications.add_request(request).await {
                tracing::warn!("Failed to register reminder for {}: {}", sub_task.title, e);
            }
        }
    }

    state.notifications.clone().start_dispatcher();

    tracing::info!(
        "Tracking {} goals, overall progress {:.0}%",
        state.goals.all_goals().len(),
        state.goals.calculate_overall_progress() * 100.0
    );

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down");

    Ok(())
}
