use serde::{Deserialize, Serialize};
use time::{Date, Duration};

time::serde::format_description!(date_key, Date, "[year]-[month]-[day]");

/// Consecutive days on which enough meals were marked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    #[serde(default, with = "date_key::option")]
    pub last: Option<Date>,
    #[serde(default)]
    pub count: u32,
}

impl Streak {
    /// Count without a known last day, as restored from an import.
    pub fn with_count(count: u32) -> Self {
        Self { last: None, count }
    }
}

/// Half a day of slack over a full day for timezone and DST shifts.
const MAX_GAP: Duration = Duration::hours(36);

pub fn update_streak(current: Streak, qualified: bool, today: Date) -> Streak {
    if !qualified || current.last == Some(today) {
        return current;
    }
    let mut count = current.count;
    if let Some(last) = current.last {
        if today - last > MAX_GAP {
            count = 0;
        }
    }
    Streak {
        last: Some(today),
        count: count.saturating_add(1),
    }
}
