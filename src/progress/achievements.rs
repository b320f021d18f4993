use std::collections::BTreeSet;

use super::stats::{day_completion_count, week_completion_total, MEALS_PER_DAY};
use crate::meals::{DayName, WeekSnapshot};

/// Substrings marking a meal as vegetable-based.
pub const PRODUCE_KEYWORDS: [&str; 9] = [
    "salad",
    "brocc",
    "cauliflower",
    "vegetable",
    "spinach",
    "zucchini",
    "cucumber",
    "tomato",
    "cabbage",
];

pub struct Achievement {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub xp: u64,
    check: fn(&WeekSnapshot) -> bool,
}

impl Achievement {
    pub fn is_satisfied(&self, week: &WeekSnapshot) -> bool {
        (self.check)(week)
    }
}

impl std::fmt::Debug for Achievement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Achievement")
            .field("id", &self.id)
            .field("xp", &self.xp)
            .finish()
    }
}

pub static ACHIEVEMENTS: [Achievement; 6] = [
    Achievement {
        id: "first_mark",
        title: "First step",
        description: "Mark any meal as eaten.",
        xp: 10,
        check: |week| week_completion_total(week) >= 1,
    },
    Achievement {
        id: "five_meals_day",
        title: "Strong day",
        description: "Mark 5 meals in a single day.",
        xp: 20,
        check: |week| any_day(|day| day_completion_count(week, day) >= 5),
    },
    Achievement {
        id: "hydration_day",
        title: "Hydrated",
        description: "Drink 8 glasses of water in a day.",
        xp: 10,
        check: |week| week.days().any(|(_, record)| record.water() >= 8),
    },
    Achievement {
        id: "veg_lover",
        title: "Green hero",
        description: "Have at least 2 vegetable meals in one day.",
        xp: 15,
        check: |week| any_day(|day| produce_meal_count(week, day) >= 2),
    },
    Achievement {
        id: "week_consistency",
        title: "Consistency",
        description: "Mark 24 or more meals in a week.",
        xp: 40,
        check: |week| week_completion_total(week) >= 24,
    },
    Achievement {
        id: "perfect_day",
        title: "Perfect day",
        description: "Mark all 6 meals in a day.",
        xp: 30,
        check: |week| any_day(|day| day_completion_count(week, day) >= MEALS_PER_DAY),
    },
];

fn any_day(pred: impl Fn(DayName) -> bool) -> bool {
    DayName::ALL.into_iter().any(pred)
}

/// Slots of `day` whose shown name matches a produce keyword. Eaten state is ignored.
pub fn produce_meal_count(week: &WeekSnapshot, day: DayName) -> usize {
    week.day(day)
        .entries()
        .filter(|(_, entry)| {
            let name = entry.display_name().to_lowercase();
            PRODUCE_KEYWORDS.iter().any(|k| name.contains(k))
        })
        .count()
}

pub fn find_achievement(id: &str) -> Option<&'static Achievement> {
    ACHIEVEMENTS.iter().find(|a| a.id == id)
}

/// Catalog entries not yet in `unlocked` whose predicate holds for `week`.
pub fn evaluate_achievements(
    week: &WeekSnapshot,
    unlocked: &BTreeSet<String>,
) -> Vec<&'static Achievement> {
    ACHIEVEMENTS
        .iter()
        .filter(|a| !unlocked.contains(a.id))
        .filter(|a| a.is_satisfied(week))
        .collect()
}

/// Whole catalog with an earned flag: unlocked before, or satisfied right now.
pub fn achievement_board(
    week: &WeekSnapshot,
    unlocked: &BTreeSet<String>,
) -> Vec<(&'static Achievement, bool)> {
    ACHIEVEMENTS
        .iter()
        .map(|a| (a, unlocked.contains(a.id) || a.is_satisfied(week)))
        .collect()
}
