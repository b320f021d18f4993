//! Completion stats, achievements, XP and streaks.
//!
//! Progress is an explicit value: every function takes the current
//! [`Progress`] and hands back the next one. Callers own its storage.

mod achievements;
mod stats;
mod streak;

use std::collections::BTreeSet;

use time::Date;
use tracing::info;

use crate::config::RewardsConfig;
use crate::meals::{DayName, WeekSnapshot};

pub use achievements::{
    achievement_board, evaluate_achievements, find_achievement, produce_meal_count, Achievement,
    ACHIEVEMENTS, PRODUCE_KEYWORDS,
};
pub use stats::{day_completion_count, day_counts, week_completion_total, MEALS_PER_DAY};
pub use streak::{update_streak, Streak};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Progress {
    pub xp: u64,
    pub streak: Streak,
    /// Append-only once earned.
    pub unlocked: BTreeSet<String>,
}

/// A meal was just marked eaten on `day` of `week` (the snapshot after the toggle).
pub fn record_meal_eaten(
    progress: Progress,
    week: &WeekSnapshot,
    day: DayName,
    today: Date,
    rewards: &RewardsConfig,
) -> Progress {
    let qualified = day_completion_count(week, day) >= rewards.streak_threshold;
    Progress {
        xp: progress.xp.saturating_add(rewards.meal_xp),
        streak: update_streak(progress.streak, qualified, today),
        ..progress
    }
}

/// Any positive adjustment earns the water award once, whatever its size.
pub fn record_water(progress: Progress, delta: i32, rewards: &RewardsConfig) -> Progress {
    if delta <= 0 {
        return progress;
    }
    Progress {
        xp: progress.xp.saturating_add(rewards.water_xp),
        ..progress
    }
}

/// Unlocks every newly satisfied achievement and credits its XP once.
pub fn apply_achievements(
    mut progress: Progress,
    week: &WeekSnapshot,
) -> (Progress, Vec<&'static Achievement>) {
    let newly = evaluate_achievements(week, &progress.unlocked);
    for achievement in &newly {
        progress.unlocked.insert(achievement.id.to_string());
        progress.xp = progress.xp.saturating_add(achievement.xp);
        info!(id = achievement.id, xp = achievement.xp, week = %week.week_key(), "achievement unlocked");
    }
    (progress, newly)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meals::{adjust_water, new_week, toggle_eaten, MealSlot};
    use time::macros::{date, datetime};

    fn seed() -> WeekSnapshot {
        new_week("2025-W38".parse().unwrap(), datetime!(2025-09-15 08:00 UTC))
    }

    #[test]
    fn meal_award_and_streak_threshold() {
        let rewards = RewardsConfig::default();
        let today = date!(2025 - 09 - 15);
        let mut week = seed();
        let mut progress = Progress::default();

        for (i, slot) in MealSlot::ALL[..4].iter().enumerate() {
            week = toggle_eaten(&week, DayName::Monday, *slot);
            progress = record_meal_eaten(progress, &week, DayName::Monday, today, &rewards);
            let expected_streak = if i == 3 { 1 } else { 0 };
            assert_eq!(progress.streak.count, expected_streak);
        }
        assert_eq!(progress.xp, 4 * rewards.meal_xp);

        // A fifth meal the same day does not extend the streak.
        week = toggle_eaten(&week, DayName::Monday, MealSlot::Dinner);
        progress = record_meal_eaten(progress, &week, DayName::Monday, today, &rewards);
        assert_eq!(progress.streak.count, 1);
    }

    #[test]
    fn water_award_once_per_positive_call() {
        let rewards = RewardsConfig::default();
        let p = record_water(Progress::default(), 3, &rewards);
        assert_eq!(p.xp, rewards.water_xp);
        let p = record_water(p, -1, &rewards);
        assert_eq!(p.xp, rewards.water_xp);
        let p = record_water(p, 0, &rewards);
        assert_eq!(p.xp, rewards.water_xp);
    }

    #[test]
    fn achievements_are_monotonic_and_paid_once() {
        let week = toggle_eaten(&seed(), DayName::Monday, MealSlot::Lunch);
        let (progress, newly) = apply_achievements(Progress::default(), &week);
        let names: Vec<_> = newly.iter().map(|a| a.id).collect();
        assert_eq!(names, vec!["first_mark", "veg_lover"]);
        assert_eq!(progress.xp, 25);

        let (again, newly) = apply_achievements(progress.clone(), &week);
        assert!(newly.is_empty());
        assert_eq!(again, progress);

        // Un-marking keeps the achievement.
        let undone = toggle_eaten(&week, DayName::Monday, MealSlot::Lunch);
        let (after, newly) = apply_achievements(again, &undone);
        assert!(newly.is_empty());
        assert!(after.unlocked.contains("first_mark"));
        assert_eq!(after.xp, 25);

        // Satisfying it again is free.
        let redone = toggle_eaten(&undone, DayName::Monday, MealSlot::Lunch);
        let (last, _) = apply_achievements(after, &redone);
        assert_eq!(last.xp, 25);
    }

    #[test]
    fn hydration_unlocks_through_water() {
        let mut week = seed();
        let mut progress = Progress::default();
        for _ in 0..8 {
            week = adjust_water(&week, DayName::Thursday, 1);
            progress = record_water(progress, 1, &RewardsConfig::default());
        }
        let (progress, newly) = apply_achievements(progress, &week);
        assert!(newly.iter().any(|a| a.id == "hydration_day"));
        assert_eq!(progress.xp, 8 + 10 + 15);
    }
}
