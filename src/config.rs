//! Application configuration constants
//!
//! Central location for storage keys, default values and timing
//! constants used throughout the backend.

// ===== Storage Keys =====

/// Key holding the serialized goal list (full snapshot, replaced on save)
pub const KEY_SAVED_GOALS: &str = "savedGoals";
/// Key holding the user-selected accent color
pub const KEY_ACCENT_COLOR: &str = "accentColor";
/// Key holding the user-selected progress bar color
pub const KEY_PROGRESS_COLOR: &str = "progressColor";
/// Key holding the light/dark scheme preference
pub const KEY_COLOR_SCHEME: &str = "colorSchemeOption";

// ===== Reminder Defaults =====

/// Default reminder offset in seconds: one hour before the due time
pub const DEFAULT_REMINDER_OFFSET_SECS: i64 = -3600;

/// Notification body used when a goal has no comment
pub const DEFAULT_REMINDER_BODY: &str = "Time to work on your goal!";

// ===== Notification Timing =====

/// How often the dispatcher checks for due notifications, in seconds
pub const DISPATCH_INTERVAL_SECS: u64 = 60;

/// Maximum time to wait for a notification registration to complete.
/// The registration is a boundary call; without a bound a wedged
/// facility would stall the caller indefinitely.
pub const REGISTRATION_TIMEOUT_SECS: u64 = 5;
