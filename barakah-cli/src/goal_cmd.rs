use anyhow::{bail, Context, Result};
use barakah_core::{
    generate_extended_plan, is_known_goal, new_goal_from_template, templates, Catalog, Clock,
    GoalLevel, GoalStatus, GoalStorage, GoalStore, Localizer, ProgressSnapshot,
};
use clap::Subcommand;
use std::fs::File;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::Config;
use crate::export::write_history;

#[derive(Subcommand, Debug)]
pub enum GoalCommand {
    /// List the goals you can start
    Templates,

    /// Generate a plan and make it the active goal
    Start {
        /// Goal template id (see `barakah goal templates`)
        #[arg(long)]
        goal: String,

        /// Plan length in days (default: from config)
        #[arg(long)]
        timeframe: Option<u32>,

        /// beginner | moderate | consistent (default: from config)
        #[arg(long)]
        level: Option<GoalLevel>,

        /// Minutes you can give each day (default: from config)
        #[arg(long)]
        daily_time: Option<u32>,

        /// Replace the current goal without asking
        #[arg(long, default_value_t = false)]
        force: bool,
    },

    /// Show the whole plan and where you are in it
    Show,

    /// Show today's tasks
    Today,

    /// Check or uncheck one of today's tasks (1-based)
    Toggle { task: usize },

    /// Mark today as complete
    Complete,

    Pause,

    Resume,

    /// Change the minutes per day you plan to spend
    Time { minutes: u32 },

    /// Save today's reflection, or print it when no text is given
    Reflect { text: Vec<String> },

    /// Print the current streak
    Streak,

    /// Check whether a week of the plan is complete
    Week { week: u32 },

    /// End the goal and delete its data
    End,

    /// Export the daily history as CSV
    Export {
        #[arg(long)]
        csv: PathBuf,
    },
}

pub fn run<S: GoalStorage, C: Clock>(
    command: GoalCommand,
    store: &mut GoalStore<S, C>,
    catalog: &Catalog,
    cfg: &Config,
) -> Result<()> {
    match command {
        GoalCommand::Templates => {
            for t in templates() {
                println!("{:<20} {:<14} {}", t.id, t.icon, catalog.t(t.title_key, &[]));
            }
        }

        GoalCommand::Start {
            goal,
            timeframe,
            level,
            daily_time,
            force,
        } => {
            if let Some(current) = store.active_goal() {
                if !force {
                    bail!(
                        "'{}' is still active. End it first (`barakah goal end`) or pass --force",
                        current.goal_title
                    );
                }
            }
            if !is_known_goal(&goal) {
                warn!(goal = %goal, "unknown goal id; using the generic plan");
            }

            let timeframe = timeframe.unwrap_or(cfg.goals.default_timeframe);
            let level = level.unwrap_or(cfg.goals.default_level);
            let daily_time = daily_time.unwrap_or(cfg.goals.default_daily_time);

            let plan = generate_extended_plan(&goal, timeframe, level)?;
            let new = new_goal_from_template(&goal, timeframe, level, daily_time, catalog);
            let created = store.create_goal(new, plan).context("start goal")?;
            info!(goal = %created.goal_id, "started");

            println!(
                "Started '{}' ({} days, {}, {} min/day)",
                created.goal_title, created.timeframe, created.level, created.daily_time
            );
            print_plan(store);
        }

        GoalCommand::Show => match store.snapshot() {
            Some(snap) => {
                print_snapshot(&snap, catalog);
                println!();
                print_plan(store);
            }
            None => println!("{}", catalog.t("tracker.noGoal", &[])),
        },

        GoalCommand::Today => match store.snapshot() {
            Some(snap) => print_snapshot(&snap, catalog),
            None => println!("{}", catalog.t("tracker.noGoal", &[])),
        },

        GoalCommand::Toggle { task } => {
            if task == 0 {
                bail!("tasks are numbered from 1");
            }
            match store.toggle_task_completion(task - 1)? {
                Some(_) => print_today(store, catalog),
                None => print_inactive(store, catalog),
            }
        }

        GoalCommand::Complete => match store.mark_today_complete()? {
            Some(_) => println!("{}", catalog.t("tracker.dayComplete", &[])),
            None => print_inactive(store, catalog),
        },

        GoalCommand::Pause => match store.pause_goal()? {
            Some(_) => println!("Paused. Your day count is frozen until you resume."),
            None => print_inactive(store, catalog),
        },

        GoalCommand::Resume => match store.resume_goal()? {
            Some(_) => println!("Resumed."),
            None => print_inactive(store, catalog),
        },

        GoalCommand::Time { minutes } => match store.update_goal_daily_time(minutes)? {
            Some(m) => println!("Daily time set to {m} min"),
            None => print_inactive(store, catalog),
        },

        GoalCommand::Reflect { text } => {
            let text = text.join(" ");
            if text.trim().is_empty() {
                println!("{}", store.today_reflection());
            } else if store.save_reflection(text.trim())?.is_some() {
                println!("Reflection saved.");
            } else {
                print_inactive(store, catalog);
            }
        }

        GoalCommand::Streak => {
            let count = store.goal_streak().to_string();
            println!("{}", catalog.t("tracker.streak", &[("count", &count)]));
        }

        GoalCommand::Week { week } => {
            let Some(goal) = store.active_goal() else {
                println!("{}", catalog.t("tracker.noGoal", &[]));
                return Ok(());
            };
            if week == 0 || week > goal.week_count() {
                bail!("week must be between 1 and {}", goal.week_count());
            }
            let done = store.is_week_completed(week);
            println!("Week {week}: {}", if done { "complete" } else { "not complete" });
        }

        GoalCommand::End => {
            let title = store.active_goal().map(|g| g.goal_title.clone());
            store.clear_active_goal()?;
            match title {
                Some(t) => println!("Ended '{t}'. Its progress has been deleted."),
                None => println!("{}", catalog.t("tracker.noGoal", &[])),
            }
        }

        GoalCommand::Export { csv } => {
            let Some(goal) = store.active_goal() else {
                bail!("no active goal to export");
            };
            let file = File::create(&csv).with_context(|| format!("create {}", csv.display()))?;
            let rows = write_history(goal, file)?;
            println!("Wrote {rows} day(s) to {}", csv.display());
        }
    }

    Ok(())
}

fn print_inactive<S: GoalStorage, C: Clock>(store: &GoalStore<S, C>, catalog: &Catalog) {
    match store.active_goal().map(|g| g.status) {
        Some(GoalStatus::Paused) => println!("{}", catalog.t("tracker.paused", &[])),
        _ => println!("{}", catalog.t("tracker.noGoal", &[])),
    }
}

fn print_today<S: GoalStorage, C: Clock>(store: &GoalStore<S, C>, catalog: &Catalog) {
    if let Some(snap) = store.snapshot() {
        print_snapshot(&snap, catalog);
    }
}

fn print_plan<S: GoalStorage, C: Clock>(store: &GoalStore<S, C>) {
    let Some(goal) = store.active_goal() else {
        return;
    };
    let current = store.current_week_number().unwrap_or(1);
    for w in &goal.weekly_plan {
        let marker = if w.week == current { ">" } else { " " };
        let done = if store.is_week_completed(w.week) { " [done]" } else { "" };
        println!("{marker} Week {:>2}: {}{done}", w.week, w.milestone);
    }
}

pub fn render_snapshot(snap: &ProgressSnapshot, catalog: &Catalog) -> String {
    let day = snap.day_number.to_string();
    let total_days = snap.timeframe.to_string();
    let week = snap.week_number.to_string();
    let total_weeks = snap.week_count.to_string();
    let streak = snap.streak.to_string();

    let mut s = String::new();
    s.push_str(&format!("{}\n", snap.goal_title));
    s.push_str(&format!(
        "{}\n",
        catalog.t("tracker.day", &[("day", &day), ("total", &total_days)])
    ));
    s.push_str(&format!(
        "{}\n",
        catalog.t(
            "tracker.week",
            &[("week", &week), ("total", &total_weeks), ("milestone", &snap.milestone)]
        )
    ));
    s.push_str(&format!("{}\n", catalog.t("tracker.streak", &[("count", &streak)])));

    if snap.status == GoalStatus::Paused {
        s.push_str(&format!("{}\n", catalog.t("tracker.paused", &[])));
        return s;
    }

    s.push('\n');
    for task in &snap.tasks {
        let check = if task.done { "x" } else { " " };
        s.push_str(&format!("[{check}] {}. {}\n", task.index + 1, task.text));
    }

    if snap.today_completed {
        s.push_str(&format!("\n{}\n", catalog.t("tracker.dayComplete", &[])));
    } else if !snap.tasks.is_empty() && snap.tasks.iter().all(|t| t.done) {
        s.push_str(&format!("\n{}\n", catalog.t("tracker.allTasksDone", &[])));
    }
    s
}

fn print_snapshot(snap: &ProgressSnapshot, catalog: &Catalog) {
    print!("{}", render_snapshot(snap, catalog));
}
