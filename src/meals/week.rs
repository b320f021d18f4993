use time::OffsetDateTime;

use super::model::{
    Category, DayName, DayRecord, MealEntry, MealSlot, WeekMeta, WeekSnapshot, MAX_WATER,
};
use super::template::planned_meal;
use crate::calendar::WeekKey;
use crate::error::TrackerError;

/// Fresh week seeded from the template: nothing eaten, no water.
pub fn new_week(week_key: WeekKey, created_at: OffsetDateTime) -> WeekSnapshot {
    let days = DayName::ALL.map(|day| {
        let meals = MealSlot::ALL.map(|slot| MealEntry::planned(planned_meal(day, slot)));
        DayRecord::new(meals, 0)
    });
    WeekSnapshot::from_parts(
        WeekMeta {
            week_key,
            created_at,
        },
        days,
    )
}

/// Discards every choice made for the week. Callers confirm first.
pub fn reset_to_template(week_key: WeekKey, created_at: OffsetDateTime) -> WeekSnapshot {
    new_week(week_key, created_at)
}

pub fn toggle_eaten(snapshot: &WeekSnapshot, day: DayName, slot: MealSlot) -> WeekSnapshot {
    let mut next = snapshot.clone();
    let entry = next.day_mut(day).entry_mut(slot);
    entry.eaten = !entry.eaten;
    next
}

/// Swaps in a meal by name. The name does not have to be in the library.
pub fn choose_alternative(
    snapshot: &WeekSnapshot,
    day: DayName,
    slot: MealSlot,
    name: &str,
    category: Category,
) -> Result<WeekSnapshot, TrackerError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(TrackerError::EmptyName);
    }
    let mut next = snapshot.clone();
    let entry = next.day_mut(day).entry_mut(slot);
    entry.chosen = Some(name.to_string());
    entry.category = Some(category);
    Ok(next)
}

pub fn adjust_water(snapshot: &WeekSnapshot, day: DayName, delta: i32) -> WeekSnapshot {
    let mut next = snapshot.clone();
    let record = next.day_mut(day);
    let water = i32::from(record.water())
        .saturating_add(delta)
        .clamp(0, i32::from(MAX_WATER));
    record.set_water(water as u8);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::day_completion_count;
    use time::macros::datetime;

    fn seed() -> WeekSnapshot {
        new_week("2025-W38".parse().unwrap(), datetime!(2025-09-15 08:00 UTC))
    }

    #[test]
    fn new_week_is_seeded_from_template() {
        let week = seed();
        assert_eq!(week.week_key().to_string(), "2025-W38");
        for (day, record) in week.days() {
            assert_eq!(record.water(), 0);
            for (slot, entry) in record.entries() {
                assert!(!entry.eaten);
                assert!(entry.chosen.is_none());
                assert_eq!(entry.planned.as_deref(), planned_meal(day, slot));
            }
        }
    }

    #[test]
    fn toggle_leaves_original_untouched() {
        let week = seed();
        let next = toggle_eaten(&week, DayName::Monday, MealSlot::Lunch);
        assert!(!week.day(DayName::Monday).entry(MealSlot::Lunch).eaten);
        assert!(next.day(DayName::Monday).entry(MealSlot::Lunch).eaten);
        assert_eq!(day_completion_count(&next, DayName::Monday), 1);
    }

    #[test]
    fn toggling_twice_restores_the_count() {
        let week = seed();
        let once = toggle_eaten(&week, DayName::Friday, MealSlot::Dinner);
        let twice = toggle_eaten(&once, DayName::Friday, MealSlot::Dinner);
        assert_eq!(day_completion_count(&twice, DayName::Friday), 0);
        assert_eq!(twice, week);
    }

    #[test]
    fn choose_alternative_keeps_eaten_flag() {
        let week = toggle_eaten(&seed(), DayName::Monday, MealSlot::Breakfast);
        let next = choose_alternative(
            &week,
            DayName::Monday,
            MealSlot::Breakfast,
            "  Porridge  ",
            Category::Dish,
        )
        .unwrap();
        let entry = next.day(DayName::Monday).entry(MealSlot::Breakfast);
        assert!(entry.eaten);
        assert_eq!(entry.display_name(), "Porridge");
        assert_eq!(entry.category, Some(Category::Dish));
        assert_eq!(entry.planned.as_deref(), Some("Omelette with broccoli and herbs"));
    }

    #[test]
    fn choose_alternative_rejects_blank_name() {
        let err = choose_alternative(&seed(), DayName::Monday, MealSlot::Lunch, "   ", Category::Other)
            .unwrap_err();
        assert!(matches!(err, TrackerError::EmptyName));
    }

    #[test]
    fn water_is_clamped() {
        let mut week = seed();
        for _ in 0..8 {
            week = adjust_water(&week, DayName::Sunday, 1);
        }
        assert_eq!(week.day(DayName::Sunday).water(), 8);
        let week = adjust_water(&week, DayName::Sunday, 1);
        assert_eq!(week.day(DayName::Sunday).water(), 8);

        let empty = adjust_water(&seed(), DayName::Sunday, -1);
        assert_eq!(empty.day(DayName::Sunday).water(), 0);
        assert_eq!(adjust_water(&seed(), DayName::Sunday, 20).day(DayName::Sunday).water(), 8);
    }

    #[test]
    fn extreme_water_deltas_saturate() {
        let one = adjust_water(&seed(), DayName::Monday, 1);
        let full = adjust_water(&one, DayName::Monday, i32::MAX);
        assert_eq!(full.day(DayName::Monday).water(), 8);
        let empty = adjust_water(&full, DayName::Monday, i32::MIN);
        assert_eq!(empty.day(DayName::Monday).water(), 0);
    }

    #[test]
    fn reset_discards_choices() {
        let key = "2025-W38".parse().unwrap();
        let at = datetime!(2025-09-16 10:00 UTC);
        let week = toggle_eaten(&seed(), DayName::Monday, MealSlot::Lunch);
        let week = adjust_water(&week, DayName::Monday, 3);
        let fresh = reset_to_template(key, at);
        assert_ne!(week, fresh);
        assert_eq!(fresh, new_week(key, at));
    }
}
