//! barakah-core: goal planning and progress tracking for Barakah

pub mod catalog;
pub mod error;
pub mod goals;
pub mod i18n;
pub mod planner;
pub mod progress;
pub mod storage;
pub mod store;
pub mod time;

pub use catalog::{templates, template_for, is_known_goal, GoalTemplate, Phase, GENERIC_GOAL_ID};
pub use error::{GoalError, Result};
pub use goals::{
    plan_week_count, validate_plan, DayCompletion, GoalConfig, GoalLevel, GoalStatus, NewGoal,
    WeekPlan,
};
pub use i18n::{Catalog, Localizer};
pub use planner::generate_extended_plan;
pub use progress::{ProgressSnapshot, TaskView};
pub use storage::{GoalStorage, MemoryStorage, ACTIVE_GOAL_KEY, GOAL_RECORD_VERSION};
pub use store::GoalStore;
pub use time::{Clock, ManualClock, SystemClock};

/// Build the creation arguments for a catalog goal, resolving its title once.
///
/// Unknown ids use the generic template's icon and title.
pub fn new_goal_from_template(
    goal_id: &str,
    timeframe: u32,
    level: GoalLevel,
    daily_time: u32,
    localizer: &dyn Localizer,
) -> NewGoal {
    let template = template_for(goal_id);
    NewGoal::new(
        goal_id,
        localizer.t(template.title_key, &[]),
        template.icon,
        timeframe,
        level,
        daily_time,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_goal_from_template_freezes_title() {
        let cat = Catalog::english();
        let new = new_goal_from_template("prayer-consistency", 30, GoalLevel::Beginner, 15, &cat);
        assert_eq!(new.title, "Prayer Consistency");
        assert_eq!(new.icon, "Moon");

        let unknown = new_goal_from_template("walk-daily", 7, GoalLevel::Moderate, 10, &cat);
        assert_eq!(unknown.goal_id, "walk-daily");
        assert_eq!(unknown.title, "Personal Goal");
        assert_eq!(unknown.icon, "Target");
    }
}
