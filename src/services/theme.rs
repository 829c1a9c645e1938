//! Theme service
//!
//! Holds the two user-selected theme colors and the fixed progress
//! background gradient. Colors load once at construction, falling back
//! to presets, and both are re-persisted whenever either setter runs.

use crate::config;
use crate::database::{Color, LinearGradient, Repository};

/// Service managing the user-selected theme colors
pub struct ThemeService {
    repo: Repository,
    accent_color: Color,
    progress_color: Color,
    progress_background: LinearGradient,
}

impl ThemeService {
    /// Load persisted colors, falling back to the preset defaults
    pub async fn load(repo: Repository) -> Self {
        let accent_color = match repo.get_json::<Color>(config::KEY_ACCENT_COLOR).await {
            Ok(Some(color)) => color,
            Ok(None) => Color::default_accent(),
            Err(e) => {
                tracing::error!("Failed to load accent color: {}", e);
                Color::default_accent()
            }
        };

        let progress_color = match repo.get_json::<Color>(config::KEY_PROGRESS_COLOR).await {
            Ok(Some(color)) => color,
            Ok(None) => Color::default_progress(),
            Err(e) => {
                tracing::error!("Failed to load progress color: {}", e);
                Color::default_progress()
            }
        };

        Self {
            repo,
            accent_color,
            progress_color,
            progress_background: LinearGradient::progress_background(),
        }
    }

    pub fn accent_color(&self) -> Color {
        self.accent_color
    }

    pub fn progress_color(&self) -> Color {
        self.progress_color
    }

    pub fn progress_background(&self) -> LinearGradient {
        self.progress_background
    }

    /// Set the accent color and persist
    pub async fn set_accent_color(&mut self, color: Color) {
        self.accent_color = color;
        self.save_colors().await;
    }

    /// Set the progress color and persist
    pub async fn set_progress_color(&mut self, color: Color) {
        self.progress_color = color;
        self.save_colors().await;
    }

    async fn save_colors(&self) {
        if let Err(e) = self
            .repo
            .set_json(config::KEY_ACCENT_COLOR, &self.accent_color)
            .await
        {
            tracing::error!("Failed to persist accent color: {}", e);
        }
        if let Err(e) = self
            .repo
            .set_json(config::KEY_PROGRESS_COLOR, &self.progress_color)
            .await
        {
            tracing::error!("Failed to persist progress color: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::initialize_database;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn create_test_repo() -> Repository {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        initialize_database(&pool).await.unwrap();

        Repository::new(pool)
    }

    #[tokio::test]
    async fn test_defaults_when_nothing_persisted() {
        let service = ThemeService::load(create_test_repo().await).await;

        assert_eq!(service.accent_color(), Color::default_accent());
        assert_eq!(service.progress_color(), Color::default_progress());
        assert_eq!(
            service.progress_background(),
            LinearGradient::progress_background()
        );
    }

    #[tokio::test]
    async fn test_colors_persist_across_reload() {
        let repo = create_test_repo().await;

        let accent = Color::rgba(0.9, 0.1, 0.1, 1.0);
        let progress = Color::rgba(0.1, 0.1, 0.9, 0.5);

        {
            let mut service = ThemeService::load(repo.clone()).await;
            service.set_accent_color(accent).await;
            service.set_progress_color(progress).await;
        }

        let service = ThemeService::load(repo).await;
        assert_eq!(service.accent_color(), accent);
        assert_eq!(service.progress_color(), progress);
    }

    #[tokio::test]
    async fn test_undecodable_color_falls_back_to_default() {
        let repo = create_test_repo().await;
        repo.set(config::KEY_ACCENT_COLOR, "garbage").await.unwrap();

        let service = ThemeService::load(repo).await;
        assert_eq!(service.accent_color(), Color::default_accent());
    }
}
