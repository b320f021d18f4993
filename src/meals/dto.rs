use std::collections::BTreeSet;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use super::library::LibraryItem;
use super::model::WeekSnapshot;
use crate::calendar::WeekKey;

/// Export file body. `streak` carries the count only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub week: WeekSnapshot,
    pub library: Vec<LibraryItem>,
    pub xp: u64,
    pub streak: u32,
    pub achievements: BTreeSet<String>,
}

/// Same shape as the export, every field optional.
///
/// Fields are decoded one at a time so a bad field does not cost the rest;
/// `skipped` names the ones that were present but unusable.
#[derive(Debug, Default)]
pub struct ImportDocument {
    pub week: Option<WeekSnapshot>,
    pub library: Option<Vec<LibraryItem>>,
    pub xp: Option<u64>,
    pub streak: Option<u32>,
    pub achievements: Option<BTreeSet<String>>,
    pub skipped: Vec<&'static str>,
}

impl ImportDocument {
    /// Fails only when `text` is not a JSON object.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        let mut fields: Map<String, Value> = serde_json::from_str(text)?;
        let mut skipped = Vec::new();
        let week = take_field(&mut fields, "week", &mut skipped);
        let library = take_field(&mut fields, "library", &mut skipped);
        let xp = take_field(&mut fields, "xp", &mut skipped);
        let streak = take_field(&mut fields, "streak", &mut skipped);
        let achievements = take_field(&mut fields, "achievements", &mut skipped);
        Ok(Self {
            week,
            library,
            xp,
            streak,
            achievements,
            skipped,
        })
    }
}

fn take_field<T: DeserializeOwned>(
    fields: &mut Map<String, Value>,
    key: &'static str,
    skipped: &mut Vec<&'static str>,
) -> Option<T> {
    match fields.remove(key)? {
        Value::Null => None,
        value => match serde_json::from_value(value) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!(field = key, error = %e, "import field skipped");
                skipped.push(key);
                None
            }
        },
    }
}

pub fn export_file_name(week_key: WeekKey) -> String {
    format!("meal-tracker-{week_key}.json")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekSummary {
    pub week_key: WeekKey,
    pub eaten: u8,
    pub water: u32,
}
