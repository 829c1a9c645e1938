//! Application state and initialization
//!
//! All services are initialized here and handed out through AppState.
//! Services are constructed once at process start and passed by
//! reference to whatever needs them; there is no ambient global state.

use crate::database::{create_pool, Repository};
use crate::error::Result;
use crate::services::{GoalsService, NotificationCenter, SettingsService, ThemeService};
use std::path::Path;

/// Central application state holding all services
pub struct AppState {
    pub repo: Repository,
    pub notifications: NotificationCenter,
    pub goals: GoalsService,
    pub theme: ThemeService,
    pub settings: SettingsService,
}

impl AppState {
    /// Application setup - called once on startup
    pub async fn setup(data_dir: &Path) -> Result<Self> {
        tracing::info!("Initializing application, data directory: {:?}", data_dir);

        std::fs::create_dir_all(data_dir)?;

        let pool = create_pool(&data_dir.join("stride.db")).await?;
        let repo = Repository::new(pool);

        let notifications = NotificationCenter::new();
        let goals = GoalsService::load(repo.clone(), notifications.clone()).await;
        let theme = ThemeService::load(repo.clone()).await;
        let settings = SettingsService::load(repo.clone()).await;

        tracing::info!("Application initialized successfully");

        Ok(Self {
            repo,
            notifications,
            goals,
            theme,
            settings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{Goal, SubTask};
    use chrono::Utc;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_setup_creates_database_and_loads_empty_state() {
        let temp_dir = TempDir::new().unwrap();

        let state = AppState::setup(temp_dir.path()).await.unwrap();

        assert!(temp_dir.path().join("stride.db").exists());
        assert!(state.goals.all_goals().is_empty());
        assert_eq!(state.goals.calculate_overall_progress(), 0.0);
    }

    #[tokio::test]
    async fn test_state_survives_restart() {
        let temp_dir = TempDir::new().unwrap();

        let goal = Goal::new(
            "Learn Rust",
            "one chapter a week",
            Utc::now(),
            vec![SubTask::new("Ownership"), SubTask::new("Lifetimes")],
        );

        {
            let mut state = AppState::setup(temp_dir.path()).await.unwrap();
            state.goals.add_goal(goal.clone()).await;
        }

        let state = AppState::setup(temp_dir.path()).await.unwrap();
        assert_eq!(state.goals.all_goals().len(), 1);
        assert_eq!(state.goals.all_goals()[0], goal);
    }
}
