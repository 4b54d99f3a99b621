//! Persistence contract for the active goal slot.
//!
//! Storage is a plain string key-value store (think browser local storage).
//! The goal is written under [`ACTIVE_GOAL_KEY`] as a versioned JSON envelope.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{GoalError, Result};
use crate::goals::GoalConfig;

pub const ACTIVE_GOAL_KEY: &str = "barakah.activeGoal";

/// Current envelope version.
pub const GOAL_RECORD_VERSION: u32 = 1;

pub trait GoalStorage {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory storage for tests and embedding.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    fail_writes: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `set`/`remove` fail, to simulate an unavailable store.
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }
}

impl GoalStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes {
            return Err(GoalError::Storage(format!("write to '{key}' rejected")));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.fail_writes {
            return Err(GoalError::Storage(format!("remove of '{key}' rejected")));
        }
        self.entries.remove(key);
        Ok(())
    }
}

impl<T: GoalStorage + ?Sized> GoalStorage for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// On-disk envelope around the goal record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedGoal {
    pub version: u32,
    pub goal: GoalConfig,
}

#[derive(Deserialize)]
struct VersionHeader {
    version: u32,
}

pub fn encode_goal(goal: &GoalConfig) -> Result<String> {
    let envelope = PersistedGoal {
        version: GOAL_RECORD_VERSION,
        goal: goal.clone(),
    };
    Ok(serde_json::to_string_pretty(&envelope)?)
}

pub fn decode_goal(raw: &str) -> Result<GoalConfig> {
    let header: VersionHeader = serde_json::from_str(raw)?;
    if header.version != GOAL_RECORD_VERSION {
        return Err(GoalError::UnsupportedVersion(header.version));
    }
    let envelope: PersistedGoal = serde_json::from_str(raw)?;
    Ok(envelope.goal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goals::{GoalLevel, GoalStatus};
    use crate::planner::generate_extended_plan;
    use chrono::{NaiveDate, TimeZone, Utc};
    use std::collections::BTreeMap;

    fn sample_goal() -> GoalConfig {
        let mut reflections = BTreeMap::new();
        reflections.insert(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(), "Fajr felt easier".to_string());
        GoalConfig {
            goal_id: "prayer-consistency".into(),
            goal_title: "Prayer Consistency".into(),
            goal_icon: "Moon".into(),
            timeframe: 14,
            level: GoalLevel::Beginner,
            daily_time: 15,
            status: GoalStatus::Active,
            start_date: Utc.with_ymd_and_hms(2026, 3, 1, 6, 0, 0).unwrap(),
            paused_at: None,
            paused_seconds: 0,
            weekly_plan: generate_extended_plan("prayer-consistency", 14, GoalLevel::Beginner).unwrap(),
            completions: BTreeMap::new(),
            reflections,
        }
    }

    #[test]
    fn test_envelope_round_trip() {
        let goal = sample_goal();
        let raw = encode_goal(&goal).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["version"], 1);
        assert_eq!(value["goal"]["goalId"], "prayer-consistency");
        assert_eq!(value["goal"]["reflections"]["2026-03-01"], "Fajr felt easier");
        assert_eq!(decode_goal(&raw).unwrap(), goal);
    }

    #[test]
    fn test_unknown_version_rejected() {
        let raw = encode_goal(&sample_goal()).unwrap().replacen("\"version\": 1", "\"version\": 7", 1);
        assert!(matches!(decode_goal(&raw), Err(GoalError::UnsupportedVersion(7))));
    }

    #[test]
    fn test_garbage_is_corrupt() {
        assert!(matches!(decode_goal("{not json"), Err(GoalError::Corrupt(_))));
    }

    #[test]
    fn test_memory_storage_write_failure() {
        let mut storage = MemoryStorage::new();
        storage.set("k", "v").unwrap();
        storage.fail_writes(true);
        assert!(storage.set("k", "w").is_err());
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
    }
}
