use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::calendar::WeekKey;
use crate::error::TrackerError;

/// Shown when a slot has neither a planned nor a chosen meal.
pub const PLACEHOLDER: &str = "—";

pub const MAX_WATER: u8 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayName {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayName {
    pub const ALL: [DayName; 7] = [
        DayName::Monday,
        DayName::Tuesday,
        DayName::Wednesday,
        DayName::Thursday,
        DayName::Friday,
        DayName::Saturday,
        DayName::Sunday,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            DayName::Monday => "Monday",
            DayName::Tuesday => "Tuesday",
            DayName::Wednesday => "Wednesday",
            DayName::Thursday => "Thursday",
            DayName::Friday => "Friday",
            DayName::Saturday => "Saturday",
            DayName::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for DayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DayName {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let day = match s.trim().to_lowercase().as_str() {
            "monday" | "mon" => DayName::Monday,
            "tuesday" | "tue" => DayName::Tuesday,
            "wednesday" | "wed" => DayName::Wednesday,
            "thursday" | "thu" => DayName::Thursday,
            "friday" | "fri" => DayName::Friday,
            "saturday" | "sat" => DayName::Saturday,
            "sunday" | "sun" => DayName::Sunday,
            _ => return Err(TrackerError::UnknownDay(s.to_string())),
        };
        Ok(day)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MealSlot {
    #[serde(rename = "breakfast")]
    Breakfast,
    #[serde(rename = "morning-snack", alias = "snack1")]
    MorningSnack,
    #[serde(rename = "lunch")]
    Lunch,
    #[serde(rename = "afternoon-snack", alias = "snack2")]
    AfternoonSnack,
    #[serde(rename = "dinner")]
    Dinner,
    #[serde(rename = "late-snack", alias = "late")]
    LateSnack,
}

impl MealSlot {
    pub const ALL: [MealSlot; 6] = [
        MealSlot::Breakfast,
        MealSlot::MorningSnack,
        MealSlot::Lunch,
        MealSlot::AfternoonSnack,
        MealSlot::Dinner,
        MealSlot::LateSnack,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn id(self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::MorningSnack => "morning-snack",
            MealSlot::Lunch => "lunch",
            MealSlot::AfternoonSnack => "afternoon-snack",
            MealSlot::Dinner => "dinner",
            MealSlot::LateSnack => "late-snack",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MealSlot::Breakfast => "Breakfast",
            MealSlot::MorningSnack => "Snack",
            MealSlot::Lunch => "Lunch",
            MealSlot::AfternoonSnack => "Afternoon snack",
            MealSlot::Dinner => "Dinner",
            MealSlot::LateSnack => "Before bed",
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for MealSlot {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let slot = match s.trim().to_lowercase().as_str() {
            "breakfast" => MealSlot::Breakfast,
            "morning-snack" | "snack1" => MealSlot::MorningSnack,
            "lunch" => MealSlot::Lunch,
            "afternoon-snack" | "snack2" => MealSlot::AfternoonSnack,
            "dinner" => MealSlot::Dinner,
            "late-snack" | "late" => MealSlot::LateSnack,
            _ => return Err(TrackerError::UnknownSlot(s.to_string())),
        };
        Ok(slot)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Dish,
    Drink,
    Produce,
    Other,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Dish,
        Category::Drink,
        Category::Produce,
        Category::Other,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Category::Dish => "dish",
            Category::Drink => "drink",
            Category::Produce => "produce",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Category {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.id() == wanted)
            .ok_or_else(|| TrackerError::UnknownCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealEntry {
    /// From the weekly template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planned: Option<String>,
    /// User override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chosen: Option<String>,
    #[serde(default)]
    pub eaten: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl MealEntry {
    pub fn planned(name: Option<&str>) -> Self {
        Self {
            planned: name.map(str::to_string),
            ..Self::default()
        }
    }

    pub fn display_name(&self) -> &str {
        self.chosen
            .as_deref()
            .or(self.planned.as_deref())
            .unwrap_or(PLACEHOLDER)
    }
}

/// One day: an entry per slot plus glasses of water.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DayRepr", into = "DayRepr")]
pub struct DayRecord {
    meals: [MealEntry; 6],
    water: u8,
}

impl DayRecord {
    pub(crate) fn new(meals: [MealEntry; 6], water: u8) -> Self {
        Self {
            meals,
            water: water.min(MAX_WATER),
        }
    }

    pub fn entry(&self, slot: MealSlot) -> &MealEntry {
        &self.meals[slot.index()]
    }

    pub(crate) fn entry_mut(&mut self, slot: MealSlot) -> &mut MealEntry {
        &mut self.meals[slot.index()]
    }

    pub fn entries(&self) -> impl Iterator<Item = (MealSlot, &MealEntry)> {
        MealSlot::ALL.into_iter().zip(self.meals.iter())
    }

    pub fn water(&self) -> u8 {
        self.water
    }

    pub(crate) fn set_water(&mut self, water: u8) {
        self.water = water.min(MAX_WATER);
    }
}

#[derive(Serialize, Deserialize)]
struct DayRepr {
    #[serde(default)]
    water: u8,
    #[serde(flatten)]
    meals: BTreeMap<MealSlot, MealEntry>,
}

impl TryFrom<DayRepr> for DayRecord {
    type Error = TrackerError;

    fn try_from(mut repr: DayRepr) -> Result<Self, Self::Error> {
        if repr.water > MAX_WATER {
            return Err(TrackerError::InvalidWeek(format!(
                "water {} exceeds {MAX_WATER}",
                repr.water
            )));
        }
        let mut meals: [MealEntry; 6] = Default::default();
        for slot in MealSlot::ALL {
            let entry = repr
                .meals
                .remove(&slot)
                .ok_or_else(|| TrackerError::InvalidWeek(format!("missing slot {slot}")))?;
            if entry.chosen.is_some() && entry.category.is_none() {
                return Err(TrackerError::InvalidWeek(format!(
                    "slot {slot} has a chosen meal without a category"
                )));
            }
            meals[slot.index()] = entry;
        }
        Ok(Self {
            meals,
            water: repr.water,
        })
    }
}

impl From<DayRecord> for DayRepr {
    fn from(day: DayRecord) -> Self {
        Self {
            water: day.water,
            meals: MealSlot::ALL.into_iter().zip(day.meals).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekMeta {
    pub week_key: WeekKey,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Every meal entry and water count of one ISO week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WeekRepr", into = "WeekRepr")]
pub struct WeekSnapshot {
    meta: WeekMeta,
    days: [DayRecord; 7],
}

impl WeekSnapshot {
    pub(crate) fn from_parts(meta: WeekMeta, days: [DayRecord; 7]) -> Self {
        Self { meta, days }
    }

    pub fn week_key(&self) -> WeekKey {
        self.meta.week_key
    }

    pub fn day(&self, day: DayName) -> &DayRecord {
        &self.days[day.index()]
    }

    pub(crate) fn day_mut(&mut self, day: DayName) -> &mut DayRecord {
        &mut self.days[day.index()]
    }

    pub fn days(&self) -> impl Iterator<Item = (DayName, &DayRecord)> {
        DayName::ALL.into_iter().zip(self.days.iter())
    }
}

#[derive(Serialize, Deserialize)]
struct WeekRepr {
    meta: WeekMeta,
    #[serde(flatten)]
    days: BTreeMap<DayName, DayRecord>,
}

impl TryFrom<WeekRepr> for WeekSnapshot {
    type Error = TrackerError;

    fn try_from(mut repr: WeekRepr) -> Result<Self, Self::Error> {
        let mut days = Vec::with_capacity(DayName::ALL.len());
        for day in DayName::ALL {
            let record = repr
                .days
                .remove(&day)
                .ok_or_else(|| TrackerError::InvalidWeek(format!("missing day {day}")))?;
            days.push(record);
        }
        let days: [DayRecord; 7] = days
            .try_into()
            .map_err(|_| TrackerError::InvalidWeek("expected seven days".into()))?;
        Ok(Self {
            meta: repr.meta,
            days,
        })
    }
}

impl From<WeekSnapshot> for WeekRepr {
    fn from(week: WeekSnapshot) -> Self {
        Self {
            meta: week.meta,
            days: DayName::ALL.into_iter().zip(week.days).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meals::week::new_week;
    use time::macros::datetime;

    fn week() -> WeekSnapshot {
        new_week("2025-W38".parse().unwrap(), datetime!(2025-09-15 08:00 UTC))
    }

    #[test]
    fn display_name_prefers_chosen_then_planned() {
        let mut e = MealEntry::planned(Some("Omelette"));
        assert_eq!(e.display_name(), "Omelette");
        e.chosen = Some("Porridge".into());
        e.category = Some(Category::Dish);
        assert_eq!(e.display_name(), "Porridge");
        assert_eq!(MealEntry::default().display_name(), PLACEHOLDER);
    }

    #[test]
    fn parses_days_slots_and_categories() {
        assert_eq!("Mon".parse::<DayName>().unwrap(), DayName::Monday);
        assert_eq!("sunday".parse::<DayName>().unwrap(), DayName::Sunday);
        assert!("someday".parse::<DayName>().is_err());

        assert_eq!("snack1".parse::<MealSlot>().unwrap(), MealSlot::MorningSnack);
        assert_eq!("late-snack".parse::<MealSlot>().unwrap(), MealSlot::LateSnack);
        assert!("brunch".parse::<MealSlot>().is_err());

        assert_eq!("Produce".parse::<Category>().unwrap(), Category::Produce);
        assert!(matches!(
            "vegetables".parse::<Category>(),
            Err(TrackerError::UnknownCategory(_))
        ));
    }

    #[test]
    fn week_json_keeps_day_and_slot_layout() {
        let value = serde_json::to_value(week()).unwrap();
        assert_eq!(value["meta"]["weekKey"], "2025-W38");
        assert_eq!(value["monday"]["water"], 0);
        assert_eq!(value["monday"]["breakfast"]["eaten"], false);
        assert!(value["monday"]["late-snack"].get("planned").is_none());

        let back: WeekSnapshot = serde_json::from_value(value).unwrap();
        assert_eq!(back, week());
    }

    #[test]
    fn accepts_short_slot_ids() {
        let mut value = serde_json::to_value(week()).unwrap();
        let monday = value["monday"].as_object_mut().unwrap();
        let snack = monday.remove("morning-snack").unwrap();
        monday.insert("snack1".into(), snack);
        let back: WeekSnapshot = serde_json::from_value(value).unwrap();
        assert_eq!(back, week());
    }

    #[test]
    fn rejects_incomplete_or_inconsistent_weeks() {
        let mut missing_day = serde_json::to_value(week()).unwrap();
        missing_day.as_object_mut().unwrap().remove("friday");
        assert!(serde_json::from_value::<WeekSnapshot>(missing_day).is_err());

        let mut missing_slot = serde_json::to_value(week()).unwrap();
        missing_slot["tuesday"].as_object_mut().unwrap().remove("dinner");
        assert!(serde_json::from_value::<WeekSnapshot>(missing_slot).is_err());

        let mut flooded = serde_json::to_value(week()).unwrap();
        flooded["monday"]["water"] = 9.into();
        assert!(serde_json::from_value::<WeekSnapshot>(flooded).is_err());

        let mut uncategorized = serde_json::to_value(week()).unwrap();
        uncategorized["monday"]["lunch"]["chosen"] = "Soup".into();
        assert!(serde_json::from_value::<WeekSnapshot>(uncategorized).is_err());
    }
}
