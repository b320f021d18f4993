use crate::calendar::WeekKey;
use crate::config::AppConfig;
use crate::meals::Tracker;
use crate::storage::{FileStore, KeyValueStore, MemoryStore};

pub struct AppState<S: KeyValueStore> {
    pub config: AppConfig,
    pub tracker: Tracker<S>,
}

impl AppState<FileStore> {
    pub fn init(config: AppConfig, week: WeekKey) -> anyhow::Result<Self> {
        let store = FileStore::open(&config.data_file)?;
        let tracker = Tracker::load(store, week, config.rewards.clone());
        Ok(Self { config, tracker })
    }
}

impl AppState<MemoryStore> {
    /// In-memory state with default rewards, for tests.
    pub fn fake(week: WeekKey) -> Self {
        let config = AppConfig {
            data_file: "unused.json".into(),
            rewards: Default::default(),
        };
        let tracker = Tracker::load(MemoryStore::new(), week, config.rewards.clone());
        Self { config, tracker }
    }
}
