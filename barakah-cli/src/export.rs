//! CSV export of the active goal's daily history.

use anyhow::Result;
use barakah_core::time::day_key;
use barakah_core::GoalConfig;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;
use std::io::Write;

#[derive(Debug, Serialize)]
struct HistoryRow<'a> {
    date: String,
    day_number: Option<u32>,
    tasks_done: usize,
    tasks_total: usize,
    completed: bool,
    reflection: &'a str,
}

/// One row per day that has a record or a reflection, oldest first.
pub fn write_history<W: Write>(goal: &GoalConfig, out: W) -> Result<usize> {
    let days: BTreeSet<NaiveDate> = goal
        .completions
        .keys()
        .chain(goal.reflections.keys())
        .copied()
        .collect();

    let mut wtr = csv::Writer::from_writer(out);
    for date in &days {
        let record = goal.completions.get(date);
        wtr.serialize(HistoryRow {
            date: day_key(*date),
            day_number: record.map(|r| r.day_number),
            tasks_done: record.map(|r| r.tasks_done()).unwrap_or(0),
            tasks_total: record.map(|r| r.tasks_completed.len()).unwrap_or(0),
            completed: record.is_some_and(|r| r.completed),
            reflection: goal.reflections.get(date).map(String::as_str).unwrap_or(""),
        })?;
    }
    wtr.flush()?;
    Ok(days.len())
}
