//! Progress calculators: read-only views derived from a goal and the clock.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::goals::{GoalConfig, GoalStatus};

/// Time since start, excluding every span the goal spent paused.
/// While paused, time stops at the moment of pausing.
pub fn effective_elapsed(goal: &GoalConfig, now: DateTime<Utc>) -> Duration {
    let reference = match (goal.status, goal.paused_at) {
        (GoalStatus::Paused, Some(at)) => at,
        _ => now,
    };
    (reference - goal.start_date) - Duration::seconds(goal.paused_seconds)
}

/// 1-based plan day, clamped to `[1, timeframe]`.
pub fn current_day_number(goal: &GoalConfig, now: DateTime<Utc>) -> u32 {
    let days = effective_elapsed(goal, now).num_days().max(0);
    let day = u32::try_from(days).unwrap_or(u32::MAX).saturating_add(1);
    day.clamp(1, goal.timeframe.max(1))
}

/// `ceil(day / 7)`, clamped to the plan's week count.
pub fn current_week_number(goal: &GoalConfig, now: DateTime<Utc>) -> u32 {
    let week = GoalConfig::week_for_day(current_day_number(goal, now));
    week.clamp(1, goal.week_count().max(1))
}

/// Tasks of the current week. Past the end of the plan the last week repeats.
pub fn today_tasks(goal: &GoalConfig, now: DateTime<Utc>) -> &[String] {
    let idx = current_week_number(goal, now) as usize - 1;
    goal.weekly_plan
        .get(idx)
        .or(goal.weekly_plan.last())
        .map(|w| w.tasks.as_slice())
        .unwrap_or(&[])
}

/// The week has as many explicitly completed days as it has plan days.
///
/// Records are keyed by calendar day but stamped with the 24-hour plan day,
/// so two calendar days can share a plan day and another plan day can go
/// unstamped. Counting completed records whose plan day falls in the week
/// keeps every calendar day the user confirmed.
pub fn is_week_completed(goal: &GoalConfig, week: u32) -> bool {
    if week == 0 || week > goal.week_count() {
        return false;
    }
    let first = (week - 1) * 7 + 1;
    let last = (week * 7).min(goal.timeframe);
    if first > last {
        return false;
    }
    let required = (last - first + 1) as usize;
    let done = goal
        .completions
        .values()
        .filter(|c| c.completed && (first..=last).contains(&c.day_number))
        .count();
    done >= required
}

fn completed_on(goal: &GoalConfig, date: NaiveDate) -> bool {
    goal.completions.get(&date).is_some_and(|c| c.completed)
}

/// Consecutive completed calendar days ending today.
///
/// Today only counts once it is marked complete; otherwise the walk starts
/// at yesterday. Any day without a completed record ends the streak, paused
/// days included.
pub fn goal_streak(goal: &GoalConfig, today: NaiveDate) -> u32 {
    let mut day = if completed_on(goal, today) {
        today
    } else {
        match today.pred_opt() {
            Some(d) => d,
            None => return 0,
        }
    };

    let mut streak = 0;
    while completed_on(goal, day) {
        streak += 1;
        match day.pred_opt() {
            Some(prev) => day = prev,
            None => break,
        }
    }
    streak
}

pub fn completed_days(goal: &GoalConfig) -> usize {
    goal.completions.values().filter(|c| c.completed).count()
}

/// Completed days over elapsed plan days, in `[0, 1]`.
pub fn completion_rate(goal: &GoalConfig, now: DateTime<Utc>) -> f64 {
    let day = current_day_number(goal, now) as f64;
    (completed_days(goal) as f64 / day).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskView {
    pub index: usize,
    pub text: String,
    pub done: bool,
}

/// Everything the tracker screen needs in one read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSnapshot {
    pub goal_title: String,
    pub status: GoalStatus,
    pub day_number: u32,
    pub timeframe: u32,
    pub week_number: u32,
    pub week_count: u32,
    pub milestone: String,
    pub tasks: Vec<TaskView>,
    pub today_completed: bool,
    pub streak: u32,
    pub completion_rate: f64,
}

pub fn snapshot(goal: &GoalConfig, now: DateTime<Utc>, today: NaiveDate) -> ProgressSnapshot {
    let week_number = current_week_number(goal, now);
    let record = goal.completions.get(&today);
    let tasks = today_tasks(goal, now)
        .iter()
        .enumerate()
        .map(|(index, text)| TaskView {
            index,
            text: text.clone(),
            done: record
                .and_then(|r| r.tasks_completed.get(index).copied())
                .unwrap_or(false),
        })
        .collect();

    ProgressSnapshot {
        goal_title: goal.goal_title.clone(),
        status: goal.status,
        day_number: current_day_number(goal, now),
        timeframe: goal.timeframe,
        week_number,
        week_count: goal.week_count(),
        milestone: goal
            .weekly_plan
            .get(week_number as usize - 1)
            .map(|w| w.milestone.clone())
            .unwrap_or_default(),
        tasks,
        today_completed: record.is_some_and(|r| r.completed),
        streak: goal_streak(goal, today),
        completion_rate: completion_rate(goal, now),
    }
}
