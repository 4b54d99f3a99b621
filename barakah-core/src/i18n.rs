//! String catalog used to localize goal titles and user-facing labels.
//!
//! Keys resolve to templates with `{{name}}` placeholders. A missing key
//! resolves to the key itself so callers always get something printable.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{GoalError, Result};

pub trait Localizer {
    fn t(&self, key: &str, params: &[(&str, &str)]) -> String;
}

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").expect("placeholder pattern is valid")
});

const ENGLISH: &[(&str, &str)] = &[
    ("goals.prayer-consistency.title", "Prayer Consistency"),
    ("goals.quran-reading.title", "Daily Quran Reading"),
    ("goals.dhikr-daily.title", "Daily Dhikr"),
    ("goals.fasting-sunnah.title", "Sunnah Fasting"),
    ("goals.charity-habit.title", "Habit of Giving"),
    ("goals.islamic-knowledge.title", "Seeking Knowledge"),
    ("goals.generic.title", "Personal Goal"),
    ("tracker.day", "Day {{day}} of {{total}}"),
    ("tracker.week", "Week {{week}} of {{total}}: {{milestone}}"),
    ("tracker.streak", "Streak: {{count}} day(s)"),
    ("tracker.paused", "This goal is paused. Resume it to continue."),
    ("tracker.dayComplete", "Today is complete. Well done!"),
    ("tracker.allTasksDone", "All tasks done. Mark today complete to keep your streak."),
    ("tracker.noGoal", "No active goal. Start one with `barakah goal start`."),
];

/// Localization catalog: English defaults plus optional overrides.
#[derive(Debug, Clone)]
pub struct Catalog {
    strings: HashMap<String, String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::english()
    }
}

impl Catalog {
    pub fn english() -> Self {
        Self {
            strings: ENGLISH
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Merge overrides from a flat TOML table of `"key" = "value"` pairs.
    pub fn with_overrides(mut self, toml_src: &str) -> Result<Self> {
        let table: HashMap<String, String> = toml::from_str(toml_src)
            .map_err(|e| GoalError::invalid(format!("invalid strings file: {e}")))?;
        self.strings.extend(table);
        Ok(self)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.strings.get(key).map(String::as_str)
    }
}

impl Localizer for Catalog {
    fn t(&self, key: &str, params: &[(&str, &str)]) -> String {
        let Some(template) = self.get(key) else {
            return key.to_string();
        };
        interpolate(template, params)
    }
}

/// Replace `{{name}}` placeholders. Unknown placeholders are left as written.
pub fn interpolate(template: &str, params: &[(&str, &str)]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &regex::Captures<'_>| {
            let name = &caps[1];
            params
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
