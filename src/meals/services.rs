use time::{Date, OffsetDateTime};
use tracing::{debug, info, instrument, warn};

use super::dto::{export_file_name, ExportDocument, ImportDocument, WeekSummary};
use super::library::{add_to_library, default_library, LibraryItem};
use super::model::{Category, DayName, MealSlot, WeekSnapshot};
use super::{repo, week};
use crate::calendar::WeekKey;
use crate::config::RewardsConfig;
use crate::error::TrackerError;
use crate::progress::{self, Achievement, Progress, Streak};
use crate::storage::KeyValueStore;

/// What a single action changed, for the caller to report.
#[derive(Debug, Clone)]
pub struct ActionOutcome {
    pub newly_unlocked: Vec<&'static Achievement>,
    pub xp: u64,
    pub streak: u32,
    /// False when a storage write failed; memory still has the change.
    pub persisted: bool,
}

/// Result of an import: what changed, and which fields were ignored.
#[derive(Debug, Clone)]
pub struct ImportReport {
    pub outcome: ActionOutcome,
    pub skipped: Vec<&'static str>,
}

/// Owns the viewed week, the library and progress, mirrored to `store`.
pub struct Tracker<S: KeyValueStore> {
    store: S,
    rewards: RewardsConfig,
    week: WeekSnapshot,
    library: Vec<LibraryItem>,
    progress: Progress,
}

fn recover<T>(result: anyhow::Result<Option<T>>, key: &str) -> Option<T> {
    match result {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, key, "stored value unreadable; using default");
            None
        }
    }
}

impl<S: KeyValueStore> Tracker<S> {
    /// Reads everything from `store`, falling back to defaults for anything
    /// missing or unreadable, and opens `week_key`.
    #[instrument(skip(store, rewards))]
    pub fn load(store: S, week_key: WeekKey, rewards: RewardsConfig) -> Self {
        let stored_library = recover(repo::load_library(&store), repo::LIBRARY_KEY);
        let library_missing = stored_library.is_none();
        let progress = Progress {
            xp: recover(repo::load_xp(&store), repo::XP_KEY).unwrap_or(0),
            streak: recover(repo::load_streak(&store), repo::STREAK_KEY).unwrap_or_default(),
            unlocked: recover(repo::load_unlocked(&store), repo::ACHIEVEMENTS_KEY)
                .unwrap_or_default(),
        };
        let (week, seeded) = Self::read_or_seed(&store, week_key);

        let mut tracker = Self {
            store,
            rewards,
            week: week.clone(),
            library: stored_library.unwrap_or_else(default_library),
            progress,
        };
        if library_missing {
            tracker.persist_library();
        }
        let outcome = tracker.commit(week, tracker.progress.clone(), seeded);
        debug!(
            week = %week_key,
            xp = outcome.xp,
            streak = outcome.streak,
            unlocked = tracker.progress.unlocked.len(),
            "tracker loaded"
        );
        tracker
    }

    fn read_or_seed(store: &S, week_key: WeekKey) -> (WeekSnapshot, bool) {
        match recover(repo::find_week(store, week_key), &repo::week_storage_key(week_key)) {
            Some(week) => (week, false),
            None => {
                info!(week = %week_key, "seeding week from template");
                (week::new_week(week_key, OffsetDateTime::now_utc()), true)
            }
        }
    }

    pub fn week(&self) -> &WeekSnapshot {
        &self.week
    }

    pub fn week_key(&self) -> WeekKey {
        self.week.week_key()
    }

    pub fn library(&self) -> &[LibraryItem] {
        &self.library
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    // --- navigation ---

    #[instrument(skip(self))]
    pub fn open_week(&mut self, week_key: WeekKey) -> ActionOutcome {
        let (week, seeded) = Self::read_or_seed(&self.store, week_key);
        self.commit(week, self.progress.clone(), seeded)
    }

    pub fn previous_week(&mut self) -> Result<ActionOutcome, TrackerError> {
        let key = self.week_key().previous()?;
        Ok(self.open_week(key))
    }

    pub fn next_week(&mut self) -> Result<ActionOutcome, TrackerError> {
        let key = self.week_key().next()?;
        Ok(self.open_week(key))
    }

    pub fn current_week(&mut self, today: Date) -> ActionOutcome {
        self.open_week(crate::calendar::week_key_of(today))
    }

    // --- week mutations ---

    #[instrument(skip(self))]
    pub fn toggle_eaten(&mut self, day: DayName, slot: MealSlot, today: Date) -> ActionOutcome {
        let next = week::toggle_eaten(&self.week, day, slot);
        let mut progress = self.progress.clone();
        if next.day(day).entry(slot).eaten {
            progress = progress::record_meal_eaten(progress, &next, day, today, &self.rewards);
        }
        info!(
            week = %next.week_key(),
            %day,
            %slot,
            eaten = next.day(day).entry(slot).eaten,
            "meal toggled"
        );
        self.commit(next, progress, true)
    }

    #[instrument(skip(self))]
    pub fn choose_alternative(
        &mut self,
        day: DayName,
        slot: MealSlot,
        name: &str,
        category: Category,
    ) -> Result<ActionOutcome, TrackerError> {
        let next = week::choose_alternative(&self.week, day, slot, name, category)?;
        info!(week = %next.week_key(), %day, %slot, %category, "alternative chosen");
        Ok(self.commit(next, self.progress.clone(), true))
    }

    #[instrument(skip(self))]
    pub fn adjust_water(&mut self, day: DayName, delta: i32) -> ActionOutcome {
        let next = week::adjust_water(&self.week, day, delta);
        let progress = progress::record_water(self.progress.clone(), delta, &self.rewards);
        info!(week = %next.week_key(), %day, water = next.day(day).water(), "water adjusted");
        self.commit(next, progress, true)
    }

    #[instrument(skip(self))]
    pub fn reset_to_template(&mut self) -> ActionOutcome {
        let key = self.week_key();
        warn!(week = %key, "resetting week to template");
        let fresh = week::reset_to_template(key, OffsetDateTime::now_utc());
        self.commit(fresh, self.progress.clone(), true)
    }

    // --- library ---

    /// Returns the new item and whether the library was saved.
    #[instrument(skip(self))]
    pub fn add_library_item(
        &mut self,
        name: &str,
        category: Category,
    ) -> Result<(LibraryItem, bool), TrackerError> {
        let item = LibraryItem::named(name, category)?;
        self.library = add_to_library(&self.library, item.clone());
        let persisted = self.persist_library();
        info!(id = %item.id, items = self.library.len(), "library item added");
        Ok((item, persisted))
    }

    // --- export / import ---

    pub fn export(&self) -> ExportDocument {
        ExportDocument {
            week: self.week.clone(),
            library: self.library.clone(),
            xp: self.progress.xp,
            streak: self.progress.streak.count,
            achievements: self.progress.unlocked.clone(),
        }
    }

    pub fn export_file_name(&self) -> String {
        export_file_name(self.week_key())
    }

    /// Applies whatever usable fields `text` carries. Nothing changes unless
    /// `text` is a JSON object.
    #[instrument(skip(self, text), fields(bytes = text.len()))]
    pub fn import_json(&mut self, text: &str) -> Result<ImportReport, TrackerError> {
        let doc = ImportDocument::parse(text).map_err(|e| {
            warn!(error = %e, "import rejected");
            TrackerError::Import(e)
        })?;
        info!(
            week = doc.week.is_some(),
            library = doc.library.is_some(),
            xp = doc.xp.is_some(),
            streak = doc.streak.is_some(),
            achievements = doc.achievements.is_some(),
            skipped = doc.skipped.len(),
            "importing"
        );

        let mut library_ok = true;
        if let Some(library) = doc.library {
            self.library = library;
            library_ok = self.persist_library();
        }

        let mut progress = self.progress.clone();
        if let Some(xp) = doc.xp {
            progress.xp = xp;
        }
        if let Some(count) = doc.streak {
            progress.streak = Streak::with_count(count);
        }
        if let Some(ids) = doc.achievements {
            progress.unlocked = ids;
        }

        let mut outcome = match doc.week {
            Some(week) => self.commit(week, progress, true),
            None => {
                self.progress = progress;
                let persisted = self.persist_progress();
                ActionOutcome {
                    newly_unlocked: Vec::new(),
                    xp: self.progress.xp,
                    streak: self.progress.streak.count,
                    persisted,
                }
            }
        };
        outcome.persisted &= library_ok;
        Ok(ImportReport {
            outcome,
            skipped: doc.skipped,
        })
    }

    // --- history ---

    /// Every stored week with its totals, oldest first.
    pub fn history(&self) -> Vec<WeekSummary> {
        let keys = recover(repo::stored_week_keys(&self.store).map(Some), "week keys")
            .unwrap_or_default();
        keys.into_iter()
            .filter_map(|key| {
                let week = if key == self.week_key() {
                    Some(self.week.clone())
                } else {
                    recover(repo::find_week(&self.store, key), &repo::week_storage_key(key))
                }?;
                Some(WeekSummary {
                    week_key: key,
                    eaten: progress::week_completion_total(&week),
                    water: week.days().map(|(_, d)| u32::from(d.water())).sum(),
                })
            })
            .collect()
    }

    // --- internals ---

    /// Installs `week` and `progress`, re-evaluates achievements and writes
    /// back. The week is only written when `write_week` is set.
    fn commit(&mut self, week: WeekSnapshot, progress: Progress, write_week: bool) -> ActionOutcome {
        let before = self.progress.clone();
        let (progress, newly) = progress::apply_achievements(progress, &week);
        self.week = week;
        self.progress = progress;

        let week_ok = !write_week || self.persist_week();
        let progress_ok = self.progress == before || self.persist_progress();
        ActionOutcome {
            newly_unlocked: newly,
            xp: self.progress.xp,
            streak: self.progress.streak.count,
            persisted: week_ok && progress_ok,
        }
    }

    fn persist_week(&mut self) -> bool {
        match repo::save_week(&mut self.store, &self.week) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, week = %self.week.week_key(), "week not saved");
                false
            }
        }
    }

    fn persist_library(&mut self) -> bool {
        match repo::save_library(&mut self.store, &self.library) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "library not saved");
                false
            }
        }
    }

    fn persist_progress(&mut self) -> bool {
        let result = repo::save_xp(&mut self.store, self.progress.xp)
            .and_then(|_| repo::save_streak(&mut self.store, &self.progress.streak))
            .and_then(|_| repo::save_unlocked(&mut self.store, &self.progress.unlocked));
        match result {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "progress not saved");
                false
            }
        }
    }
}
