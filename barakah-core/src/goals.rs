//! Goal model: the persisted active goal, its weekly plan and daily records.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GoalError;

/// Intensity tier. Affects task density per day, never plan length.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum GoalLevel {
    Beginner,
    Moderate,
    Consistent,
}

impl GoalLevel {
    pub const ALL: [GoalLevel; 3] = [GoalLevel::Beginner, GoalLevel::Moderate, GoalLevel::Consistent];

    /// Daily tasks drawn from a phase for this tier.
    pub fn daily_task_count(&self) -> usize {
        match self {
            GoalLevel::Beginner => 2,
            GoalLevel::Moderate => 3,
            GoalLevel::Consistent => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GoalLevel::Beginner => "beginner",
            GoalLevel::Moderate => "moderate",
            GoalLevel::Consistent => "consistent",
        }
    }
}

impl fmt::Display for GoalLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalLevel {
    type Err = GoalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(GoalLevel::Beginner),
            "moderate" => Ok(GoalLevel::Moderate),
            "consistent" => Ok(GoalLevel::Consistent),
            other => Err(GoalError::invalid(format!(
                "unknown level '{other}' (expected beginner, moderate or consistent)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    Active,
    Paused,
}

/// One week of the generated plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekPlan {
    /// 1-based, contiguous.
    pub week: u32,
    pub milestone: String,
    /// Tasks for a representative day of this week.
    pub tasks: Vec<String>,
}

/// Per-day record, keyed by calendar day in [`GoalConfig::completions`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCompletion {
    pub date: NaiveDate,
    /// Plan day that was current when this record was first touched.
    #[serde(default)]
    pub day_number: u32,
    pub tasks_completed: Vec<bool>,
    /// Only set by an explicit "mark today complete".
    pub completed: bool,
}

impl DayCompletion {
    pub fn new(date: NaiveDate, day_number: u32, task_count: usize) -> Self {
        Self {
            date,
            day_number,
            tasks_completed: vec![false; task_count],
            completed: false,
        }
    }

    pub fn tasks_done(&self) -> usize {
        self.tasks_completed.iter().filter(|done| **done).count()
    }

    pub fn all_tasks_done(&self) -> bool {
        !self.tasks_completed.is_empty() && self.tasks_completed.iter().all(|done| *done)
    }
}

/// The single persisted active goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalConfig {
    /// Template id, e.g. "prayer-consistency". Not unique per instance.
    pub goal_id: String,
    /// Localized once at creation, never re-resolved.
    pub goal_title: String,
    pub goal_icon: String,
    /// Plan length in days.
    pub timeframe: u32,
    pub level: GoalLevel,
    /// Advisory minutes per day.
    pub daily_time: u32,
    pub status: GoalStatus,
    pub start_date: DateTime<Utc>,
    /// Set while paused.
    #[serde(default)]
    pub paused_at: Option<DateTime<Utc>>,
    /// Total seconds spent paused across completed pause spans.
    #[serde(default)]
    pub paused_seconds: i64,
    pub weekly_plan: Vec<WeekPlan>,
    #[serde(default)]
    pub completions: BTreeMap<NaiveDate, DayCompletion>,
    #[serde(default)]
    pub reflections: BTreeMap<NaiveDate, String>,
}

impl GoalConfig {
    pub fn week_count(&self) -> u32 {
        self.weekly_plan.len() as u32
    }

    pub fn is_paused(&self) -> bool {
        self.status == GoalStatus::Paused
    }

    /// Week (1-based) a plan day falls into.
    pub fn week_for_day(day: u32) -> u32 {
        day.max(1).div_ceil(7)
    }
}

/// Arguments for creating a goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGoal {
    pub goal_id: String,
    pub title: String,
    pub icon: String,
    pub timeframe: u32,
    pub level: GoalLevel,
    pub daily_time: u32,
}

impl NewGoal {
    pub fn new(
        goal_id: impl Into<String>,
        title: impl Into<String>,
        icon: impl Into<String>,
        timeframe: u32,
        level: GoalLevel,
        daily_time: u32,
    ) -> Self {
        Self {
            goal_id: goal_id.into(),
            title: title.into(),
            icon: icon.into(),
            timeframe,
            level,
            daily_time,
        }
    }
}

/// `ceil(timeframe / 7)`.
pub fn plan_week_count(timeframe: u32) -> u32 {
    timeframe.div_ceil(7)
}

/// Check a plan against its timeframe: right length, weeks numbered 1..=n.
pub fn validate_plan(timeframe: u32, plan: &[WeekPlan]) -> Result<(), GoalError> {
    if timeframe == 0 {
        return Err(GoalError::invalid("timeframe must be at least one day"));
    }
    let expected = plan_week_count(timeframe) as usize;
    if plan.len() != expected {
        return Err(GoalError::invalid(format!(
            "plan has {} weeks, timeframe of {timeframe} days needs {expected}",
            plan.len()
        )));
    }
    for (i, wp) in plan.iter().enumerate() {
        if wp.week as usize != i + 1 {
            return Err(GoalError::invalid(format!(
                "plan week at position {} is numbered {}",
                i + 1,
                wp.week
            )));
        }
        if wp.tasks.is_empty() {
            return Err(GoalError::invalid(format!("week {} has no tasks", wp.week)));
        }
    }
    Ok(())
}
