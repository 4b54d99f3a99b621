//! Plan generator: turns a goal template, timeframe and level into weekly steps.

use crate::catalog::template_for;
use crate::error::GoalError;
use crate::goals::{plan_week_count, GoalLevel, WeekPlan};

/// Generate the weekly plan for a goal.
///
/// Produces `ceil(timeframe_days / 7)` weeks. Template phases are spread
/// evenly over the weeks; each week takes the first `level.daily_task_count()`
/// tasks of its phase. Unknown goal ids use the generic template. The only
/// error is a zero timeframe.
pub fn generate_extended_plan(
    goal_id: &str,
    timeframe_days: u32,
    level: GoalLevel,
) -> Result<Vec<WeekPlan>, GoalError> {
    if timeframe_days == 0 {
        return Err(GoalError::invalid("timeframe must be a positive number of days"));
    }

    let template = template_for(goal_id);
    let weeks = plan_week_count(timeframe_days) as usize;
    let phases = template.phases.len();
    let take = level.daily_task_count();

    let plan = (0..weeks)
        .map(|i| {
            let phase = &template.phases[i * phases / weeks];
            WeekPlan {
                week: i as u32 + 1,
                milestone: phase.milestone.to_string(),
                tasks: phase.tasks.iter().take(take).map(|t| t.to_string()).collect(),
            }
        })
        .collect();

    Ok(plan)
}
