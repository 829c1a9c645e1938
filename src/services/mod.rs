//! Services module
//!
//! Business logic services that coordinate between callers and the
//! repository.

pub mod goals;
pub mod notifications;
pub mod settings;
pub mod theme;

pub use goals::GoalsService;
pub use notifications::{NotificationCenter, NotificationRequest};
pub use settings::SettingsService;
pub use theme::ThemeService;
