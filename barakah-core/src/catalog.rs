//! Goal templates the planner draws from.
//!
//! Each template is a list of phases. A phase carries a milestone label and
//! four tasks ordered from lightest to heaviest; a level takes a prefix of
//! them, so denser tiers always include the lighter tasks.

/// A stretch of the plan with a shared theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phase {
    pub milestone: &'static str,
    pub tasks: [&'static str; 4],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalTemplate {
    pub id: &'static str,
    /// Symbolic icon name, resolved by the front end.
    pub icon: &'static str,
    /// Localization key for the goal title.
    pub title_key: &'static str,
    pub phases: &'static [Phase],
}

pub const GENERIC_GOAL_ID: &str = "generic";

const PRAYER_CONSISTENCY: GoalTemplate = GoalTemplate {
    id: "prayer-consistency",
    icon: "Moon",
    title_key: "goals.prayer-consistency.title",
    phases: &[
        Phase {
            milestone: "Build the foundation: never miss a fard prayer",
            tasks: [
                "Pray all five fard prayers",
                "Set a reminder before each prayer time",
                "Pray Fajr within its time",
                "Make wudu calmly and fully before each prayer",
            ],
        },
        Phase {
            milestone: "Pray on time",
            tasks: [
                "Pray each prayer within 30 minutes of the adhan",
                "Prepare for Fajr the night before",
                "Read the after-prayer adhkar once today",
                "Pray Dhuhr and Asr at the mosque or with others",
            ],
        },
        Phase {
            milestone: "Add sunnah prayers",
            tasks: [
                "Pray the two sunnah rak'ahs before Fajr",
                "Pray the sunnah after Maghrib",
                "Pray Witr before sleeping",
                "Pray two rak'ahs of Duha",
            ],
        },
        Phase {
            milestone: "Deepen khushu in every prayer",
            tasks: [
                "Learn the meaning of one surah you recite",
                "Pause in sujood for a personal dua",
                "Recite a different surah after al-Fatiha",
                "Pray two rak'ahs of night prayer",
            ],
        },
    ],
};

const QURAN_READING: GoalTemplate = GoalTemplate {
    id: "quran-reading",
    icon: "BookOpen",
    title_key: "goals.quran-reading.title",
    phases: &[
        Phase {
            milestone: "Open the mushaf every day",
            tasks: [
                "Read one page of Quran",
                "Listen to one surah with attention",
                "Read the translation of what you recited",
                "Write down one verse that stood out",
            ],
        },
        Phase {
            milestone: "Read with understanding",
            tasks: [
                "Read two pages of Quran",
                "Read the tafsir of one verse",
                "Reflect on one lesson for five minutes",
                "Share one verse and its meaning with someone",
            ],
        },
        Phase {
            milestone: "Memorize and review",
            tasks: [
                "Read three pages of Quran",
                "Memorize one new verse",
                "Review yesterday's memorized verses",
                "Recite your new verses in a prayer",
            ],
        },
    ],
};

const DHIKR_DAILY: GoalTemplate = GoalTemplate {
    id: "dhikr-daily",
    icon: "Heart",
    title_key: "goals.dhikr-daily.title",
    phases: &[
        Phase {
            milestone: "Morning and evening remembrance",
            tasks: [
                "Say the morning adhkar",
                "Say the evening adhkar",
                "Say SubhanAllah 33 times after a prayer",
                "Send salawat on the Prophet 10 times",
            ],
        },
        Phase {
            milestone: "Remembrance throughout the day",
            tasks: [
                "Say the adhkar after every fard prayer",
                "Make istighfar 100 times",
                "Say the dua before sleeping",
                "Recite Ayat al-Kursi before sleeping",
            ],
        },
        Phase {
            milestone: "A heart attached to dhikr",
            tasks: [
                "Say the morning and evening adhkar without skipping",
                "Learn one new prophetic dua",
                "Say La ilaha illallah 100 times",
                "Spend ten quiet minutes in dhikr after Fajr",
            ],
        },
    ],
};

const FASTING_SUNNAH: GoalTemplate = GoalTemplate {
    id: "fasting-sunnah",
    icon: "Sun",
    title_key: "goals.fasting-sunnah.title",
    phases: &[
        Phase {
            milestone: "Prepare body and intention",
            tasks: [
                "Drink enough water between Maghrib and Fajr",
                "Renew your intention for the next fast",
                "Plan a light suhoor",
                "Read about the virtues of voluntary fasting",
            ],
        },
        Phase {
            milestone: "Fast Mondays and Thursdays",
            tasks: [
                "Eat suhoor before Fajr on fasting days",
                "Break your fast with dates and water",
                "Guard your tongue while fasting",
                "Make dua before iftar",
            ],
        },
        Phase {
            milestone: "Add the white days",
            tasks: [
                "Track the 13th, 14th and 15th of the hijri month",
                "Invite someone to share your iftar",
                "Give a small charity on fasting days",
                "Read Quran for fifteen minutes while fasting",
            ],
        },
    ],
};

const CHARITY_HABIT: GoalTemplate = GoalTemplate {
    id: "charity-habit",
    icon: "HandHeart",
    title_key: "goals.charity-habit.title",
    phases: &[
        Phase {
            milestone: "Give something every day",
            tasks: [
                "Give any amount of sadaqah, however small",
                "Smile at and greet someone with salam",
                "Set aside a daily charity jar",
                "Note one blessing you are grateful for",
            ],
        },
        Phase {
            milestone: "Serve the people around you",
            tasks: [
                "Help a family member with a chore",
                "Check on a neighbour or relative",
                "Donate to a cause you trust",
                "Volunteer thirty minutes of your time",
            ],
        },
        Phase {
            milestone: "Make giving lasting",
            tasks: [
                "Set up a recurring donation",
                "Give away something you no longer use",
                "Calculate or review your zakat",
                "Support a sadaqah jariyah project",
            ],
        },
    ],
};

const ISLAMIC_KNOWLEDGE: GoalTemplate = GoalTemplate {
    id: "islamic-knowledge",
    icon: "GraduationCap",
    title_key: "goals.islamic-knowledge.title",
    phases: &[
        Phase {
            milestone: "Learn the basics",
            tasks: [
                "Read one hadith and its explanation",
                "Learn one of the 99 names of Allah",
                "Watch or listen to a ten minute lesson",
                "Write a summary of what you learned",
            ],
        },
        Phase {
            milestone: "Study the seerah",
            tasks: [
                "Read one chapter of the seerah",
                "Note one quality of the Prophet to practise",
                "Discuss what you read with someone",
                "Take the weekly quiz on what you studied",
            ],
        },
        Phase {
            milestone: "Practise what you learn",
            tasks: [
                "Apply one lesson from this week today",
                "Teach one thing you learned to someone",
                "Review your notes from earlier weeks",
                "Plan your next topic of study",
            ],
        },
    ],
};

const GENERIC: GoalTemplate = GoalTemplate {
    id: GENERIC_GOAL_ID,
    icon: "Target",
    title_key: "goals.generic.title",
    phases: &[
        Phase {
            milestone: "Start small",
            tasks: [
                "Spend a few minutes on your goal",
                "Make dua for help with your goal",
                "Write down why this goal matters to you",
                "Remove one obstacle that slows you down",
            ],
        },
        Phase {
            milestone: "Build the habit",
            tasks: [
                "Work on your goal at the same time each day",
                "Note today's progress in your journal",
                "Increase your effort slightly from last week",
                "Share your progress with a friend",
            ],
        },
        Phase {
            milestone: "Make it last",
            tasks: [
                "Keep your daily routine going",
                "Reflect on how far you have come",
                "Set the next milestone for yourself",
                "Help someone else start the same habit",
            ],
        },
    ],
};

const TEMPLATES: &[GoalTemplate] = &[
    PRAYER_CONSISTENCY,
    QURAN_READING,
    DHIKR_DAILY,
    FASTING_SUNNAH,
    CHARITY_HABIT,
    ISLAMIC_KNOWLEDGE,
];

/// Known templates, in display order. The generic fallback is not listed.
pub fn templates() -> &'static [GoalTemplate] {
    TEMPLATES
}

/// Look up a template by id. Unknown ids get the generic template.
pub fn template_for(goal_id: &str) -> &'static GoalTemplate {
    TEMPLATES
        .iter()
        .find(|t| t.id == goal_id)
        .unwrap_or(&GENERIC)
}

pub fn is_known_goal(goal_id: &str) -> bool {
    TEMPLATES.iter().any(|t| t.id == goal_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_lookup() {
        let t = template_for("prayer-consistency");
        assert_eq!(t.icon, "Moon");
        assert!(is_known_goal("quran-reading"));
    }

    #[test]
    fn test_unknown_falls_back_to_generic() {
        let t = template_for("learn-to-juggle");
        assert_eq!(t.id, GENERIC_GOAL_ID);
        assert!(!is_known_goal("learn-to-juggle"));
        assert!(!is_known_goal(GENERIC_GOAL_ID));
    }

    #[test]
    fn test_every_template_has_content() {
        for t in templates().iter().chain(std::iter::once(&GENERIC)) {
            assert!(!t.phases.is_empty(), "{} has no phases", t.id);
            for p in t.phases {
                assert!(!p.milestone.is_empty());
                assert!(p.tasks.iter().all(|task| !task.is_empty()));
            }
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let mut ids: Vec<&str> = templates().iter().map(|t| t.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), templates().len());
    }
}
