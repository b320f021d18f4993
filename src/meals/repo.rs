use std::collections::BTreeSet;

use anyhow::Context;
use serde::{de::DeserializeOwned, Serialize};

use super::library::LibraryItem;
use super::model::WeekSnapshot;
use crate::calendar::WeekKey;
use crate::progress::Streak;
use crate::storage::KeyValueStore;

pub const WEEK_PREFIX: &str = "mealweek:";
pub const LIBRARY_KEY: &str = "meal-library";
pub const XP_KEY: &str = "meal-xp";
pub const STREAK_KEY: &str = "meal-streak";
pub const ACHIEVEMENTS_KEY: &str = "meal-achievements";

pub fn week_storage_key(week_key: WeekKey) -> String {
    format!("{WEEK_PREFIX}{week_key}")
}

fn read_json<T, S>(store: &S, key: &str) -> anyhow::Result<Option<T>>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(key).with_context(|| format!("read {key}"))? else {
        return Ok(None);
    };
    let value = serde_json::from_str(&raw).with_context(|| format!("decode {key}"))?;
    Ok(Some(value))
}

fn write_json<T, S>(store: &mut S, key: &str, value: &T) -> anyhow::Result<()>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value).with_context(|| format!("encode {key}"))?;
    store.set(key, raw).with_context(|| format!("write {key}"))
}

pub fn find_week<S: KeyValueStore + ?Sized>(
    store: &S,
    week_key: WeekKey,
) -> anyhow::Result<Option<WeekSnapshot>> {
    read_json(store, &week_storage_key(week_key))
}

pub fn save_week<S: KeyValueStore + ?Sized>(store: &mut S, week: &WeekSnapshot) -> anyhow::Result<()> {
    write_json(store, &week_storage_key(week.week_key()), week)
}

/// Keys of every stored week, oldest first.
pub fn stored_week_keys<S: KeyValueStore + ?Sized>(store: &S) -> anyhow::Result<Vec<WeekKey>> {
    let mut keys: Vec<WeekKey> = store
        .keys()?
        .iter()
        .filter_map(|k| k.strip_prefix(WEEK_PREFIX))
        .filter_map(|k| k.parse().ok())
        .collect();
    keys.sort();
    Ok(keys)
}

pub fn load_library<S: KeyValueStore + ?Sized>(
    store: &S,
) -> anyhow::Result<Option<Vec<LibraryItem>>> {
    read_json(store, LIBRARY_KEY)
}

pub fn save_library<S: KeyValueStore + ?Sized>(
    store: &mut S,
    library: &[LibraryItem],
) -> anyhow::Result<()> {
    write_json(store, LIBRARY_KEY, library)
}

pub fn load_xp<S: KeyValueStore + ?Sized>(store: &S) -> anyhow::Result<Option<u64>> {
    read_json(store, XP_KEY)
}

pub fn save_xp<S: KeyValueStore + ?Sized>(store: &mut S, xp: u64) -> anyhow::Result<()> {
    write_json(store, XP_KEY, &xp)
}

pub fn load_streak<S: KeyValueStore + ?Sized>(store: &S) -> anyhow::Result<Option<Streak>> {
    read_json(store, STREAK_KEY)
}

pub fn save_streak<S: KeyValueStore + ?Sized>(store: &mut S, streak: &Streak) -> anyhow::Result<()> {
    write_json(store, STREAK_KEY, streak)
}

pub fn load_unlocked<S: KeyValueStore + ?Sized>(
    store: &S,
) -> anyhow::Result<Option<BTreeSet<String>>> {
    read_json(store, ACHIEVEMENTS_KEY)
}

pub fn save_unlocked<S: KeyValueStore + ?Sized>(
    store: &mut S,
    unlocked: &BTreeSet<String>,
) -> anyhow::Result<()> {
    write_json(store, ACHIEVEMENTS_KEY, unlocked)
}
