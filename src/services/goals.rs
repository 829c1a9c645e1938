//! Goal collection service
//!
//! Holds the authoritative goal list and a derived display list
//! (filtered then sorted). Every mutation persists the full list;
//! persistence failures are logged and swallowed so in-memory state
//! always stands. Only reminder scheduling returns a `Result`.

use crate::config;
use crate::database::{FilterOption, Goal, Repository, SortOption};
use crate::error::{AppError, Result};
use crate::services::notifications::{NotificationCenter, NotificationRequest};
use std::cmp::Ordering;

/// Service managing the goal collection and its displayed projection
pub struct GoalsService {
    repo: Repository,
    notifications: NotificationCenter,
    all_goals: Vec<Goal>,
    filter_option: FilterOption,
    sort_option: SortOption,
    sort_ascending: bool,
    goals: Vec<Goal>,
}

impl GoalsService {
    /// Load persisted goals and run the initial filter pass.
    /// An absent or undecodable snapshot yields an empty collection.
    pub async fn load(repo: Repository, notifications: NotificationCenter) -> Self {
        let all_goals = match repo.get_json::<Vec<Goal>>(config::KEY_SAVED_GOALS).await {
            Ok(Some(goals)) => goals,
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::error!("Failed to load goals: {}", e);
                Vec::new()
            }
        };

        tracing::info!("Loaded {} goals", all_goals.len());

        let mut service = Self {
            repo,
            notifications,
            all_goals,
            filter_option: FilterOption::default(),
            sort_option: SortOption::default(),
            sort_ascending: true,
            goals: Vec::new(),
        };
        service.filter_goals();
        service
    }

    /// Displayed goals: the filtered-then-sorted projection
    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    /// Authoritative goal list
    pub fn all_goals(&self) -> &[Goal] {
        &self.all_goals
    }

    pub fn filter_option(&self) -> FilterOption {
        self.filter_option
    }

    pub fn sort_option(&self) -> SortOption {
        self.sort_option
    }

    pub fn sort_ascending(&self) -> bool {
        self.sort_ascending
    }

    /// Add a goal. The displayed list is updated incrementally: the
    /// goal is appended only when it satisfies the current filter.
    pub async fn add_goal(&mut self, goal: Goal) {
        tracing::info!("Adding goal: {}", goal.title);

        self.all_goals.push(goal.clone());

        if self.matches_current_filter(&goal) {
            self.goals.push(goal);
        }

        self.save_goals().await;
    }

    /// Delete goals by their indices into the displayed list. Each
    /// index resolves to an identity which is removed from both the
    /// displayed and the authoritative collection.
    pub async fn delete_goals(&mut self, indices: &[usize]) {
        let ids: Vec<String> = indices
            .iter()
            .filter_map(|&i| self.goals.get(i))
            .map(|g| g.id.clone())
            .collect();

        let mut positions: Vec<usize> = indices
            .iter()
            .copied()
            .filter(|&i| i < self.goals.len())
            .collect();
        positions.sort_unstable();
        positions.dedup();

        for &i in positions.iter().rev() {
            self.goals.remove(i);
        }

        for id in &ids {
            if let Some(pos) = self.all_goals.iter().position(|g| &g.id == id) {
                self.all_goals.remove(pos);
            }
        }

        tracing::info!("Deleted {} goals", ids.len());

        self.save_goals().await;
    }

    /// Replace the goal with the same id in the authoritative list and,
    /// if present, in the displayed list. The displayed list is patched
    /// in place and not re-filtered: an update that moves the goal out
    /// of the active filter's criteria stays visible until the next
    /// `filter_goals` call.
    pub async fn update_goal(&mut self, goal: Goal) {
        if let Some(slot) = self.all_goals.iter_mut().find(|g| g.id == goal.id) {
            *slot = goal.clone();
        }

        if let Some(slot) = self.goals.iter_mut().find(|g| g.id == goal.id) {
            *slot = goal;
        }

        self.save_goals().await;
    }

    /// Flip the favorite flag of the goal with the given id
    pub async fn toggle_favorite(&mut self, id: &str) {
        match self.all_goals.iter().find(|g| g.id == id) {
            Some(goal) => {
                let mut updated = goal.clone();
                updated.favorite = !updated.favorite;
                self.update_goal(updated).await;
            }
            None => tracing::debug!("toggle_favorite: no goal with id {}", id),
        }
    }

    /// Flip the archived flag of the goal with the given id
    pub async fn toggle_archived(&mut self, id: &str) {
        match self.all_goals.iter().find(|g| g.id == id) {
            Some(goal) => {
                let mut updated = goal.clone();
                updated.archived = !updated.archived;
                self.update_goal(updated).await;
            }
            None => tracing::debug!("toggle_archived: no goal with id {}", id),
        }
    }

    /// Select a filter and recompute the displayed list
    pub fn set_filter_option(&mut self, option: FilterOption) {
        self.filter_option = option;
        self.filter_goals();
    }

    /// Select a sort comparator and re-sort the displayed list
    pub fn set_sort_option(&mut self, option: SortOption) {
        self.sort_option = option;
        self.sort_goals();
    }

    /// Set the sort direction and re-sort the displayed list
    pub fn set_sort_ascending(&mut self, ascending: bool) {
        self.sort_ascending = ascending;
        self.sort_goals();
    }

    /// Recompute the displayed list from the authoritative list.
    ///
    /// Two stages: the archive stage keeps only archived goals when the
    /// archived filter is selected and only non-archived goals
    /// otherwise; the refine stage applies the favorites/incomplete
    /// predicate on top. Always ends with a sort pass.
    pub fn filter_goals(&mut self) {
        let by_archive = self
            .all_goals
            .iter()
            .filter(|g| {
                if self.filter_option == FilterOption::Archived {
                    g.archived
                } else {
                    !g.archived
                }
            })
            .cloned();

        self.goals = match self.filter_option {
            FilterOption::All | FilterOption::Archived => by_archive.collect(),
            FilterOption::Favorites => by_archive.filter(|g| g.favorite).collect(),
            FilterOption::Incomplete => by_archive.filter(|g| g.progress() < 1.0).collect(),
        };

        self.sort_goals();
    }

    /// Stable-sort the displayed list by the selected comparator,
    /// reversed when descending.
    pub fn sort_goals(&mut self) {
        let option = self.sort_option;
        let ascending = self.sort_ascending;

        self.goals.sort_by(|a, b| {
            let ord = Self::compare(a, b, option);
            if ascending { ord } else { ord.reverse() }
        });
    }

    fn compare(a: &Goal, b: &Goal, option: SortOption) -> Ordering {
        match option {
            SortOption::Alphabetical => Self::compare_titles(a, b),
            SortOption::Progress => a
                .progress()
                .partial_cmp(&b.progress())
                .unwrap_or(Ordering::Equal),
            SortOption::DueDate => a.end_date.cmp(&b.end_date),
            SortOption::Favorites => b
                .favorite
                .cmp(&a.favorite)
                .then_with(|| Self::compare_titles(a, b)),
        }
    }

    // Case-insensitive title comparison
    fn compare_titles(a: &Goal, b: &Goal) -> Ordering {
        a.title.to_lowercase().cmp(&b.title.to_lowercase())
    }

    // Predicate for the incremental add; must agree with filter_goals
    fn matches_current_filter(&self, goal: &Goal) -> bool {
        match self.filter_option {
            FilterOption::All => !goal.archived,
            FilterOption::Favorites => !goal.archived && goal.favorite,
            FilterOption::Archived => goal.archived,
            FilterOption::Incomplete => !goal.archived && goal.progress() < 1.0,
        }
    }

    /// Mean progress over all non-archived goals, 0.0 when there are none
    pub fn calculate_overall_progress(&self) -> f64 {
        let active: Vec<&Goal> = self.all_goals.iter().filter(|g| !g.archived).collect();

        if active.is_empty() {
            return 0.0;
        }

        let total: f64 = active.iter().map(|g| g.progress()).sum();
        total / active.len() as f64
    }

    /// Register a one-shot reminder for a goal. The trigger time is the
    /// goal's due time plus the signed offset. The registration is
    /// awaited under an explicit timeout.
    pub async fn schedule_reminder(&self, goal: &Goal, offset: chrono::Duration) -> Result<()> {
        let trigger_time = goal.end_date + offset;

        let body = if goal.comment.is_empty() {
            config::DEFAULT_REMINDER_BODY.to_string()
        } else {
            goal.comment.clone()
        };

        let request =
            NotificationRequest::new(format!("Reminder: {}", goal.title), body, trigger_time);

        tracing::info!("Scheduling reminder for {} at {}", goal.title, trigger_time);

        let registration = self.notifications.add_request(request);
        match tokio::time::timeout(
            std::time::Duration::from_secs(config::REGISTRATION_TIMEOUT_SECS),
            registration,
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(AppError::RegistrationTimeout),
        }
    }

    // Full-snapshot persistence; failure leaves prior state untouched
    async fn save_goals(&self) {
        if let Err(e) = self
            .repo
            .set_json(config::KEY_SAVED_GOALS, &self.all_goals)
            .await
        {
            tracing::error!("Failed to persist goals: {}", e);
        }
    }
}
