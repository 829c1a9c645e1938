//! Settings service
//!
//! Holds the light/dark scheme preference. Loaded once at
//! construction; persisted only on an explicit save call.

use crate::config;
use crate::database::{ColorSchemeOption, Repository};

/// Service managing the color scheme preference
pub struct SettingsService {
    repo: Repository,
    selected_color_scheme: ColorSchemeOption,
}

impl SettingsService {
    /// Load the persisted scheme; absent or unrecognized values fall
    /// back to dark.
    pub async fn load(repo: Repository) -> Self {
        let selected_color_scheme = match repo
            .get_json::<ColorSchemeOption>(config::KEY_COLOR_SCHEME)
            .await
        {
            Ok(Some(option)) => option,
            Ok(None) => ColorSchemeOption::Dark,
            Err(e) => {
                tracing::error!("Failed to load color scheme: {}", e);
                ColorSchemeOption::Dark
            }
        };

        Self {
            repo,
            selected_color_scheme,
        }
    }

    pub fn selected_color_scheme(&self) -> ColorSchemeOption {
        self.selected_color_scheme
    }

    /// Change the in-memory selection; not persisted until
    /// `save_selected_color_scheme` is called.
    pub fn set_selected_color_scheme(&mut self, option: ColorSchemeOption) {
        self.selected_color_scheme = option;
    }

    /// Persist the current selection
    pub async fn save_selected_color_scheme(&self) {
        if let Err(e) = self
            .repo
            .set_json(config::KEY_COLOR_SCHEME, &self.selected_color_scheme)
            .await
        {
            tracing::error!("Failed to persist color scheme: {}", e);
        }
    }
}
