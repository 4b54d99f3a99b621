use barakah_core::{
    generate_extended_plan, Catalog, GoalLevel, GoalStatus, GoalStore, ManualClock, MemoryStorage,
    NewGoal, ACTIVE_GOAL_KEY,
};
use barakah_core::storage::GoalStorage;
use chrono::{Duration, TimeZone, Utc};

fn clock() -> ManualClock {
    ManualClock::new(Utc.with_ymd_and_hms(2026, 3, 1, 7, 30, 0).unwrap())
}

fn prayer_goal() -> (NewGoal, Vec<barakah_core::WeekPlan>) {
    let plan = generate_extended_plan("prayer-consistency", 30, GoalLevel::Beginner).unwrap();
    let new = NewGoal::new("prayer-consistency", "Prayer Consistency", "Moon", 30, GoalLevel::Beginner, 15);
    (new, plan)
}

fn fresh_store(clock: &ManualClock) -> GoalStore<MemoryStorage, ManualClock> {
    GoalStore::new(MemoryStorage::new(), clock.clone(), chrono_tz::UTC)
}

/// Create, toggle, pause, end.
#[test]
fn test_end_to_end_scenario() {
    let clock = clock();
    let mut store = fresh_store(&clock);
    let (new, plan) = prayer_goal();
    store.create_goal(new, plan).unwrap();

    let goal = store.active_goal().unwrap();
    assert_eq!(goal.status, GoalStatus::Active);
    assert_eq!(goal.weekly_plan.len(), 5);

    let day = store.toggle_task_completion(0).unwrap().unwrap();
    assert!(day.tasks_completed[0]);
    assert!(day.tasks_completed[1..].iter().all(|d| !d));

    store.pause_goal().unwrap();
    assert_eq!(store.active_goal().unwrap().status, GoalStatus::Paused);

    store.clear_active_goal().unwrap();
    assert!(store.active_goal().is_none());
    assert!(store.storage().get(ACTIVE_GOAL_KEY).unwrap().is_none());
}

#[test]
fn test_day_number_clamps_to_timeframe() {
    let clock = clock();
    let mut store = fresh_store(&clock);
    let (new, plan) = prayer_goal();
    store.create_goal(new, plan).unwrap();
    assert_eq!(store.current_day_number(), Some(1));

    clock.advance_days(30 + 10);
    assert_eq!(store.current_day_number(), Some(30));
    assert_eq!(store.current_week_number(), Some(5));
    assert_eq!(
        store.today_tasks(),
        store.active_goal().unwrap().weekly_plan[4].tasks
    );
}

#[test]
fn test_pause_freezes_day_number() {
    let clock = clock();
    let mut store = fresh_store(&clock);
    let (new, plan) = prayer_goal();
    store.create_goal(new, plan).unwrap();

    clock.advance_days(3);
    assert_eq!(store.current_day_number(), Some(4));

    store.pause_goal().unwrap();
    clock.advance_days(5);
    assert_eq!(store.current_day_number(), Some(4));

    store.resume_goal().unwrap();
    assert_eq!(store.current_day_number(), Some(4));
    clock.advance_days(1);
    assert_eq!(store.current_day_number(), Some(5));
}

#[test]
fn test_streak_breaks_on_skipped_day() {
    let clock = clock();
    let mut store = fresh_store(&clock);
    let (new, plan) = prayer_goal();
    store.create_goal(new, plan).unwrap();

    for _ in 0..3 {
        store.mark_today_complete().unwrap();
        clock.advance_days(1);
    }
    assert_eq!(store.goal_streak(), 3);

    // day 4 skipped
    clock.advance_days(1);
    assert_eq!(store.goal_streak(), 0);
    store.mark_today_complete().unwrap();
    assert_eq!(store.current_day_number(), Some(5));
    assert_eq!(store.goal_streak(), 1);
}

/// Pausing keeps the plan position but not the streak.
#[test]
fn test_paused_day_breaks_streak_but_not_day_number() {
    let clock = clock();
    let mut store = fresh_store(&clock);
    let (new, plan) = prayer_goal();
    store.create_goal(new, plan).unwrap();

    store.mark_today_complete().unwrap();
    clock.advance_days(1);
    store.mark_today_complete().unwrap();
    assert_eq!(store.goal_streak(), 2);

    clock.advance_days(1);
    store.pause_goal().unwrap();
    assert!(store.mark_today_complete().unwrap().is_none());
    clock.advance_days(1);
    store.resume_goal().unwrap();

    store.mark_today_complete().unwrap();
    assert_eq!(store.current_day_number(), Some(3));
    assert_eq!(store.goal_streak(), 1);
}

#[test]
fn test_checking_every_task_does_not_complete_the_day() {
    let clock = clock();
    let mut store = fresh_store(&clock);
    let (new, plan) = prayer_goal();
    store.create_goal(new, plan).unwrap();

    for i in 0..store.today_tasks().len() {
        store.toggle_task_completion(i).unwrap();
    }
    let today = store.today_completion().unwrap();
    assert!(today.all_tasks_done());
    assert!(!today.completed);
    assert_eq!(store.goal_streak(), 0);

    store.mark_today_complete().unwrap();
    assert!(store.today_completion().unwrap().completed);
    assert_eq!(store.goal_streak(), 1);
}

#[test]
fn test_second_goal_replaces_first() {
    let clock = clock();
    let mut store = fresh_store(&clock);
    let (new, plan) = prayer_goal();
    store.create_goal(new, plan).unwrap();
    store.toggle_task_completion(0).unwrap();
    store.save_reflection("first goal notes").unwrap();
    store.pause_goal().unwrap();

    clock.advance(Duration::hours(2));
    let plan = generate_extended_plan("quran-reading", 7, GoalLevel::Consistent).unwrap();
    let second = NewGoal::new("quran-reading", "Daily Quran Reading", "BookOpen", 7, GoalLevel::Consistent, 30);
    let created = store.create_goal(second, plan).unwrap();

    let goal = store.active_goal().unwrap();
    assert_eq!(goal, &created);
    assert_eq!(goal.goal_id, "quran-reading");
    assert_eq!(goal.status, GoalStatus::Active);
    assert_eq!(goal.weekly_plan.len(), 1);
    assert!(goal.completions.is_empty());
    assert!(goal.reflections.is_empty());
    assert_eq!(goal.paused_seconds, 0);
    assert_eq!(store.today_reflection(), "");
}

#[test]
fn test_state_survives_reopen() {
    let clock = clock();
    let mut store = fresh_store(&clock);
    let (new, plan) = prayer_goal();
    store.create_goal(new, plan).unwrap();
    store.toggle_task_completion(1).unwrap();
    store.save_reflection("Alhamdulillah").unwrap();
    store.update_goal_daily_time(25).unwrap();

    let storage = store.storage().clone();
    let reopened = GoalStore::open(storage, clock.clone(), chrono_tz::UTC).unwrap();
    let goal = reopened.active_goal().unwrap();
    assert_eq!(goal.daily_time, 25);
    assert_eq!(reopened.today_reflection(), "Alhamdulillah");
    assert_eq!(reopened.today_completion().unwrap().tasks_completed, vec![false, true]);
}

#[test]
fn test_corrupt_record_opens_empty() {
    let mut storage = MemoryStorage::new();
    storage.set(ACTIVE_GOAL_KEY, "{\"version\": 1, \"goal\": 42}").unwrap();
    let store = GoalStore::open(storage, clock(), chrono_tz::UTC).unwrap();
    assert!(store.active_goal().is_none());
}

#[test]
fn test_title_localized_once() {
    let clock = clock();
    let mut store = fresh_store(&clock);
    let french = Catalog::english()
        .with_overrides(r#""goals.dhikr-daily.title" = "Dhikr quotidien""#)
        .unwrap();
    let new = barakah_core::new_goal_from_template("dhikr-daily", 14, GoalLevel::Moderate, 10, &french);
    let plan = generate_extended_plan("dhikr-daily", 14, GoalLevel::Moderate).unwrap();
    store.create_goal(new, plan).unwrap();

    let reopened = GoalStore::open(store.storage().clone(), clock.clone(), chrono_tz::UTC).unwrap();
    assert_eq!(reopened.active_goal().unwrap().goal_title, "Dhikr quotidien");
}

/// Starting late in the evening puts two calendar days on plan day 1 and
/// never stamps plan day 2; a fully confirmed week must still complete.
#[test]
fn test_week_completes_after_late_evening_start() {
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2026, 3, 1, 23, 0, 0).unwrap());
    let mut store = fresh_store(&clock);
    let (new, plan) = prayer_goal();
    store.create_goal(new, plan).unwrap();

    clock.set(Utc.with_ymd_and_hms(2026, 3, 1, 23, 5, 0).unwrap());
    store.mark_today_complete().unwrap();
    clock.set(Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0).unwrap());
    store.mark_today_complete().unwrap();
    for day in 3..=6 {
        clock.set(Utc.with_ymd_and_hms(2026, 3, day, 23, 30, 0).unwrap());
        store.mark_today_complete().unwrap();
    }

    let stamped: Vec<u32> = store
        .active_goal()
        .unwrap()
        .completions
        .values()
        .map(|c| c.day_number)
        .collect();
    assert_eq!(stamped, vec![1, 1, 3, 4, 5, 6]);
    assert!(!store.is_week_completed(1));

    clock.set(Utc.with_ymd_and_hms(2026, 3, 7, 23, 30, 0).unwrap());
    store.mark_today_complete().unwrap();
    assert!(store.is_week_completed(1));
    assert_eq!(store.goal_streak(), 7);

    clock.set(Utc.with_ymd_and_hms(2026, 3, 8, 23, 30, 0).unwrap());
    store.mark_today_complete().unwrap();
    assert_eq!(store.current_week_number(), Some(2));
    assert!(!store.is_week_completed(2));
}

#[test]
fn test_week_completes_across_a_pause() {
    let clock = clock();
    let mut store = fresh_store(&clock);
    let (new, plan) = prayer_goal();
    store.create_goal(new, plan).unwrap();

    for _ in 0..3 {
        store.mark_today_complete().unwrap();
        clock.advance_days(1);
    }

    // plan day 4: pause for two calendar days before doing anything
    store.pause_goal().unwrap();
    clock.advance_days(2);
    store.resume_goal().unwrap();
    assert_eq!(store.current_day_number(), Some(4));

    for _ in 0..3 {
        store.mark_today_complete().unwrap();
        clock.advance_days(1);
    }
    assert!(!store.is_week_completed(1));

    store.mark_today_complete().unwrap();
    assert_eq!(store.current_day_number(), Some(7));
    assert!(store.is_week_completed(1));
    // the paused days still broke the streak
    assert_eq!(store.goal_streak(), 4);
}

#[test]
fn test_unconfirmed_week_through_store() {
    let clock = clock();
    let mut store = fresh_store(&clock);
    let (new, plan) = prayer_goal();
    store.create_goal(new, plan).unwrap();

    for _ in 0..7 {
        for i in 0..store.today_tasks().len() {
            store.toggle_task_completion(i).unwrap();
        }
        clock.advance_days(1);
    }
    assert!(!store.is_week_completed(1));
}
