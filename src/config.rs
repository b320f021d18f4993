use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct RewardsConfig {
    /// XP for marking a meal eaten.
    pub meal_xp: u64,
    /// XP for any positive water adjustment.
    pub water_xp: u64,
    /// Eaten meals in a day that count toward the streak.
    pub streak_threshold: u8,
}

impl Default for RewardsConfig {
    fn default() -> Self {
        Self {
            meal_xp: 5,
            water_xp: 1,
            streak_threshold: 4,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub data_file: PathBuf,
    pub rewards: RewardsConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = RewardsConfig::default();
        let data_file = std::env::var("MEALTRACK_DATA_FILE")
            .unwrap_or_else(|_| "mealtrack.json".into())
            .into();
        let rewards = RewardsConfig {
            meal_xp: parsed_var("MEALTRACK_MEAL_XP").unwrap_or(defaults.meal_xp),
            water_xp: parsed_var("MEALTRACK_WATER_XP").unwrap_or(defaults.water_xp),
            streak_threshold: parsed_var("MEALTRACK_STREAK_THRESHOLD")
                .unwrap_or(defaults.streak_threshold),
        };
        anyhow::ensure!(
            usize::from(rewards.streak_threshold) <= crate::meals::MealSlot::ALL.len(),
            "MEALTRACK_STREAK_THRESHOLD must be at most {}",
            crate::meals::MealSlot::ALL.len()
        );
        Ok(Self { data_file, rewards })
    }
}

fn parsed_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse::<T>().ok())
}
