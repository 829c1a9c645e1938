//! Model definitions
//!
//! Rust structs representing persisted entities. All models use serde
//! for serialization into the key-value store. A goal's completion and
//! progress are derived from its subtasks and are never stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config;

/// A trackable goal with a due date and a list of subtasks
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    pub id: String,
    pub title: String,
    /// May be empty
    pub comment: String,
    pub end_date: DateTime<Utc>,
    pub sub_tasks: Vec<SubTask>,
    #[serde(default)]
    pub favorite: bool,
    #[serde(default)]
    pub archived: bool,
}

impl Goal {
    pub fn new(
        title: impl Into<String>,
        comment: impl Into<String>,
        end_date: DateTime<Utc>,
        sub_tasks: Vec<SubTask>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            comment: comment.into(),
            end_date,
            sub_tasks,
            favorite: false,
            archived: false,
        }
    }

    /// A goal is completed when every subtask is completed.
    /// Vacuously true for an empty subtask list.
    pub fn completed(&self) -> bool {
        self.sub_tasks.iter().all(|s| s.completed)
    }

    /// Fraction of completed subtasks, 0.0 when there are none.
    pub fn progress(&self) -> f64 {
        if self.sub_tasks.is_empty() {
            return 0.0;
        }
        let done = self.sub_tasks.iter().filter(|s| s.completed).count();
        done as f64 / self.sub_tasks.len() as f64
    }

    /// Append a subtask to the end of the list.
    pub fn push_sub_task(&mut self, sub_task: SubTask) {
        self.sub_tasks.push(sub_task);
    }

    /// Replace the subtask at `index`. Out-of-range indices are ignored.
    pub fn replace_sub_task(&mut self, index: usize, sub_task: SubTask) {
        match self.sub_tasks.get_mut(index) {
            Some(slot) => *slot = sub_task,
            None => tracing::debug!("replace_sub_task: index {} out of range", index),
        }
    }

    /// Remove the subtask at `index`. Out-of-range indices are ignored.
    pub fn remove_sub_task(&mut self, index: usize) {
        if index < self.sub_tasks.len() {
            self.sub_tasks.remove(index);
        } else {
            tracing::debug!("remove_sub_task: index {} out of range", index);
        }
    }

    /// Flip the completion flag of the subtask at `index`.
    /// Out-of-range indices are ignored.
    pub fn toggle_sub_task(&mut self, index: usize) {
        match self.sub_tasks.get_mut(index) {
            Some(sub_task) => sub_task.completed = !sub_task.completed,
            None => tracing::debug!("toggle_sub_task: index {} out of range", index),
        }
    }
}

/// A single checkable item contributing to a goal's progress
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubTask {
    pub id: String,
    pub title: String,
    pub completed: bool,
    #[serde(default)]
    pub comment: String,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub reminder_enabled: bool,
    /// Signed offset in seconds relative to the due time; negative = before
    #[serde(default = "default_reminder_offset")]
    pub reminder_offset_secs: i64,
}

fn default_reminder_offset() -> i64 {
    config::DEFAULT_REMINDER_OFFSET_SECS
}

impl SubTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            completed: false,
            comment: String::new(),
            end_date: Utc::now(),
            reminder_enabled: false,
            reminder_offset_secs: config::DEFAULT_REMINDER_OFFSET_SECS,
        }
    }
}

/// Named predicate selecting which goals are displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterOption {
    #[default]
    All,
    Favorites,
    Archived,
    Incomplete,
}

/// Named comparator ordering displayed goals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOption {
    #[default]
    Alphabetical,
    Progress,
    DueDate,
    Favorites,
}

/// Light/dark scheme preference, stored under its raw string value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorSchemeOption {
    Light,
    Dark,
}

/// An RGBA color with channels in [0, 1]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Default accent color: green at 0.8 opacity
    pub const fn default_accent() -> Self {
        Self::rgba(0.0, 0.8, 0.2, 0.8)
    }

    /// Default progress color: teal at 0.8 opacity
    pub const fn default_progress() -> Self {
        Self::rgba(0.0, 0.7, 0.7, 0.8)
    }
}

/// A two-stop gradient used as the progress bar background
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearGradient {
    pub start: Color,
    pub end: Color,
}

impl LinearGradient {
    /// Fixed progress background: half-opaque black into half-opaque white
    pub const fn progress_background() -> Self {
        Self {
            start: Color::rgba(0.0, 0.0, 0.0, 0.5),
            end: Color::rgba(1.0, 1.0, 1.0, 0.5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn done(title: &str) -> SubTask {
        SubTask {
            completed: true,
            ..SubTask::new(title)
        }
    }

    #[test]
    fn progress_is_zero_for_empty_subtask_list() {
        let goal = Goal::new("Read more", "", Utc::now(), vec![]);
        assert_eq!(goal.progress(), 0.0);
    }

    #[test]
    fn progress_is_ratio_of_completed_subtasks() {
        let goal = Goal::new(
            "Learn piano",
            "",
            Utc::now(),
            vec![done("Scales"), SubTask::new("Chords"), SubTask::new("Song")],
        );
        let p = goal.progress();
        assert!((p - 1.0 / 3.0).abs() < f64::EPSILON);
        assert!((0.0..=1.0).contains(&p));
    }

    #[test]
    fn completed_is_vacuously_true_for_empty_list() {
        let goal = Goal::new("Empty", "", Utc::now(), vec![]);
        assert!(goal.completed());
        assert_eq!(goal.progress(), 0.0);
    }

    #[test]
    fn completed_iff_progress_is_one_for_nonempty_list() {
        let mut goal = Goal::new("Two steps", "", Utc::now(), vec![done("a"), done("b")]);
        assert!(goal.completed());
        assert_eq!(goal.progress(), 1.0);

        goal.toggle_sub_task(1);
        assert!(!goal.completed());
        assert!(goal.progress() < 1.0);
    }

    #[test]
    fn subtask_index_mutations_ignore_out_of_range() {
        let mut goal = Goal::new("One step", "", Utc::now(), vec![SubTask::new("only")]);

        goal.replace_sub_task(5, SubTask::new("nope"));
        goal.remove_sub_task(5);
        goal.toggle_sub_task(5);

        assert_eq!(goal.sub_tasks.len(), 1);
        assert_eq!(goal.sub_tasks[0].title, "only");
        assert!(!goal.sub_tasks[0].completed);
    }

    #[test]
    fn subtask_defaults() {
        let sub = SubTask::new("Water plants");
        assert!(!sub.completed);
        assert!(!sub.reminder_enabled);
        assert_eq!(sub.reminder_offset_secs, -3600);
        assert!(sub.comment.is_empty());
    }

    #[test]
    fn color_scheme_serializes_as_raw_string() {
        assert_eq!(
            serde_json::to_string(&ColorSchemeOption::Light).unwrap(),
            "\"Light\""
        );
        assert_eq!(
            serde_json::from_str::<ColorSchemeOption>("\"Dark\"").unwrap(),
            ColorSchemeOption::Dark
        );
    }
}
