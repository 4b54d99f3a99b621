//! Goal store: the single active-goal slot and its mutators.
//!
//! Mutations run against a clone of the current goal; the clone replaces the
//! in-memory goal only after it has been written to storage. Operations that
//! need a goal return `Ok(None)` (or an empty value) when the slot is empty.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use crate::error::{GoalError, Result};
use crate::goals::{validate_plan, DayCompletion, GoalConfig, GoalStatus, NewGoal, WeekPlan};
use crate::progress::{self, ProgressSnapshot};
use crate::storage::{decode_goal, encode_goal, GoalStorage, ACTIVE_GOAL_KEY};
use crate::time::{local_day, Clock};

pub struct GoalStore<S: GoalStorage, C: Clock> {
    storage: S,
    clock: C,
    tz: Tz,
    active: Option<GoalConfig>,
}

impl<S: GoalStorage, C: Clock> GoalStore<S, C> {
    /// Empty store. Call [`GoalStore::load`] to read the persisted goal.
    pub fn new(storage: S, clock: C, tz: Tz) -> Self {
        Self {
            storage,
            clock,
            tz,
            active: None,
        }
    }

    /// Create the store and load whatever goal is persisted. A record that
    /// cannot be decoded is logged and treated as absent.
    pub fn open(storage: S, clock: C, tz: Tz) -> Result<Self> {
        let mut store = Self::new(storage, clock, tz);
        match store.load() {
            Ok(_) => {}
            Err(e @ (GoalError::Corrupt(_) | GoalError::UnsupportedVersion(_))) => {
                warn!(error = %e, "ignoring unreadable active goal record");
            }
            Err(e) => return Err(e),
        }
        Ok(store)
    }

    /// Re-read the active goal from storage.
    pub fn load(&mut self) -> Result<Option<&GoalConfig>> {
        self.active = match self.storage.get(ACTIVE_GOAL_KEY)? {
            Some(raw) => Some(decode_goal(&raw)?),
            None => None,
        };
        Ok(self.active.as_ref())
    }

    fn save(&mut self, goal: &GoalConfig) -> Result<()> {
        let raw = encode_goal(goal)?;
        self.storage.set(ACTIVE_GOAL_KEY, &raw)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn today(&self) -> NaiveDate {
        local_day(self.clock.now(), self.tz)
    }

    pub fn active_goal(&self) -> Option<&GoalConfig> {
        self.active.as_ref()
    }

    /// Start a new goal, replacing any existing one outright.
    pub fn create_goal(&mut self, new: NewGoal, plan: Vec<WeekPlan>) -> Result<GoalConfig> {
        validate_plan(new.timeframe, &plan)?;

        if let Some(old) = &self.active {
            info!(old = %old.goal_id, new = %new.goal_id, "replacing active goal");
        }

        let goal = GoalConfig {
            goal_id: new.goal_id,
            goal_title: new.title,
            goal_icon: new.icon,
            timeframe: new.timeframe,
            level: new.level,
            daily_time: new.daily_time,
            status: GoalStatus::Active,
            start_date: self.clock.now(),
            paused_at: None,
            paused_seconds: 0,
            weekly_plan: plan,
            completions: BTreeMap::new(),
            reflections: BTreeMap::new(),
        };

        self.save(&goal).inspect_err(|e| warn!(error = %e, "failed to persist new goal"))?;
        info!(goal = %goal.goal_id, timeframe = goal.timeframe, level = %goal.level, "goal created");
        self.active = Some(goal.clone());
        Ok(goal)
    }

    /// Apply `f` to a copy of the active goal and persist it.
    fn update<T>(
        &mut self,
        op: &'static str,
        f: impl FnOnce(&mut GoalConfig, DateTime<Utc>, NaiveDate) -> Result<Option<T>>,
    ) -> Result<Option<T>> {
        let Some(current) = self.active.as_ref() else {
            debug!(op, "no active goal; ignoring");
            return Ok(None);
        };

        let now = self.clock.now();
        let today = local_day(now, self.tz);
        let mut next = current.clone();
        let Some(out) = f(&mut next, now, today)? else {
            return Ok(None);
        };

        if &next != current {
            self.save(&next)
                .inspect_err(|e| warn!(op, error = %e, "failed to persist goal update"))?;
            self.active = Some(next);
        }
        Ok(Some(out))
    }

    /// Flip one of today's tasks. Today's record is created on first touch,
    /// sized to the current week's task list.
    pub fn toggle_task_completion(&mut self, task_index: usize) -> Result<Option<DayCompletion>> {
        self.update("toggle_task_completion", |goal, now, today| {
            if goal.is_paused() {
                debug!("goal paused; task toggle ignored");
                return Ok(None);
            }
            let task_count = progress::today_tasks(goal, now).len();
            if task_index >= task_count {
                return Err(GoalError::invalid(format!(
                    "task index {task_index} out of range for {task_count} tasks"
                )));
            }
            let day = today_record(goal, now, today, task_count);
            day.tasks_completed[task_index] = !day.tasks_completed[task_index];
            Ok(Some(day.clone()))
        })
    }

    /// Confirm today as done. Does not look at the task checkboxes.
    pub fn mark_today_complete(&mut self) -> Result<Option<DayCompletion>> {
        self.update("mark_today_complete", |goal, now, today| {
            if goal.is_paused() {
                debug!("goal paused; mark complete ignored");
                return Ok(None);
            }
            let task_count = progress::today_tasks(goal, now).len();
            let day = today_record(goal, now, today, task_count);
            day.completed = true;
            Ok(Some(day.clone()))
        })
    }

    /// Idempotent.
    pub fn pause_goal(&mut self) -> Result<Option<GoalStatus>> {
        self.update("pause_goal", |goal, now, _| {
            if goal.status == GoalStatus::Active {
                goal.status = GoalStatus::Paused;
                goal.paused_at = Some(now);
                info!(goal = %goal.goal_id, "goal paused");
            }
            Ok(Some(goal.status))
        })
    }

    /// Idempotent. Folds the finished pause span into the elapsed-time offset.
    pub fn resume_goal(&mut self) -> Result<Option<GoalStatus>> {
        self.update("resume_goal", |goal, now, _| {
            if goal.status == GoalStatus::Paused {
                if let Some(at) = goal.paused_at.take() {
                    goal.paused_seconds += (now - at).num_seconds().max(0);
                }
                goal.status = GoalStatus::Active;
                info!(goal = %goal.goal_id, paused_seconds = goal.paused_seconds, "goal resumed");
            }
            Ok(Some(goal.status))
        })
    }

    /// Change the advisory daily minutes. The plan is left as generated.
    pub fn update_goal_daily_time(&mut self, minutes: u32) -> Result<Option<u32>> {
        self.update("update_goal_daily_time", |goal, _, _| {
            goal.daily_time = minutes;
            Ok(Some(minutes))
        })
    }

    /// Delete the active goal and everything recorded against it.
    pub fn clear_active_goal(&mut self) -> Result<()> {
        self.storage
            .remove(ACTIVE_GOAL_KEY)
            .inspect_err(|e| warn!(error = %e, "failed to clear active goal"))?;
        if let Some(old) = self.active.take() {
            info!(goal = %old.goal_id, "goal ended");
        }
        Ok(())
    }

    pub fn save_reflection(&mut self, text: &str) -> Result<Option<()>> {
        self.update("save_reflection", |goal, _, today| {
            goal.reflections.insert(today, text.to_string());
            Ok(Some(()))
        })
    }

    /// Today's reflection, or an empty string.
    pub fn today_reflection(&self) -> String {
        self.reflection_on(self.today())
    }

    pub fn reflection_on(&self, date: NaiveDate) -> String {
        self.active
            .as_ref()
            .and_then(|g| g.reflections.get(&date).cloned())
            .unwrap_or_default()
    }

    pub fn current_day_number(&self) -> Option<u32> {
        let goal = self.active.as_ref()?;
        Some(progress::current_day_number(goal, self.clock.now()))
    }

    pub fn current_week_number(&self) -> Option<u32> {
        let goal = self.active.as_ref()?;
        Some(progress::current_week_number(goal, self.clock.now()))
    }

    pub fn today_tasks(&self) -> Vec<String> {
        self.active
            .as_ref()
            .map(|g| progress::today_tasks(g, self.clock.now()).to_vec())
            .unwrap_or_default()
    }

    pub fn today_completion(&self) -> Option<&DayCompletion> {
        let today = self.today();
        self.active.as_ref()?.completions.get(&today)
    }

    pub fn is_week_completed(&self, week: u32) -> bool {
        self.active
            .as_ref()
            .is_some_and(|g| progress::is_week_completed(g, week))
    }

    pub fn goal_streak(&self) -> u32 {
        self.active
            .as_ref()
            .map(|g| progress::goal_streak(g, self.today()))
            .unwrap_or(0)
    }

    pub fn snapshot(&self) -> Option<ProgressSnapshot> {
        let goal = self.active.as_ref()?;
        let now = self.clock.now();
        Some(progress::snapshot(goal, now, local_day(now, self.tz)))
    }
}

/// Today's record, created pre-sized (all false) when missing.
fn today_record<'a>(
    goal: &'a mut GoalConfig,
    now: DateTime<Utc>,
    today: NaiveDate,
    task_count: usize,
) -> &'a mut DayCompletion {
    let day_number = progress::current_day_number(goal, now);
    let day = goal
        .completions
        .entry(today)
        .or_insert_with(|| DayCompletion::new(today, day_number, task_count));
    if day.tasks_completed.len() < task_count {
        day.tasks_completed.resize(task_count, false);
    }
    day
}
