use crate::meals::{DayName, WeekSnapshot};

pub const MEALS_PER_DAY: u8 = 6;

/// Eaten entries for one day, `0..=6`.
pub fn day_completion_count(week: &WeekSnapshot, day: DayName) -> u8 {
    week.day(day)
        .entries()
        .filter(|(_, entry)| entry.eaten)
        .count() as u8
}

/// Eaten entries across the week, `0..=42`.
pub fn week_completion_total(week: &WeekSnapshot) -> u8 {
    DayName::ALL
        .into_iter()
        .map(|day| day_completion_count(week, day))
        .sum()
}

/// Per-day counts in weekday order, the chart series.
pub fn day_counts(week: &WeekSnapshot) -> [(DayName, u8); 7] {
    DayName::ALL.map(|day| (day, day_completion_count(week, day)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meals::{new_week, toggle_eaten, MealSlot};
    use time::macros::datetime;

    #[test]
    fn counts_per_day_and_week() {
        let mut week = new_week("2025-W38".parse().unwrap(), datetime!(2025-09-15 08:00 UTC));
        assert_eq!(week_completion_total(&week), 0);

        for slot in MealSlot::ALL {
            week = toggle_eaten(&week, DayName::Wednesday, slot);
        }
        week = toggle_eaten(&week, DayName::Sunday, MealSlot::Dinner);

        assert_eq!(day_completion_count(&week, DayName::Wednesday), MEALS_PER_DAY);
        assert_eq!(day_completion_count(&week, DayName::Sunday), 1);
        assert_eq!(week_completion_total(&week), 7);

        let counts = day_counts(&week);
        assert_eq!(counts[0], (DayName::Monday, 0));
        assert_eq!(counts[2], (DayName::Wednesday, 6));
        assert_eq!(counts[6], (DayName::Sunday, 1));
    }

    #[test]
    fn full_week_tops_out_at_42() {
        let mut week = new_week("2025-W01".parse().unwrap(), datetime!(2024-12-30 08:00 UTC));
        for day in DayName::ALL {
            for slot in MealSlot::ALL {
                week = toggle_eaten(&week, day, slot);
            }
        }
        assert_eq!(week_completion_total(&week), 42);
    }
}
