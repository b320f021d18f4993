use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use time::Date;
use tracing::{error, info, instrument};

use super::library::filter_library;
use super::model::{Category, DayName};
use super::services::{ActionOutcome, ImportReport, Tracker};
use crate::cli::{Command, LibraryCommand};
use crate::progress::{achievement_board, day_completion_count, day_counts, week_completion_total};
use crate::storage::KeyValueStore;

/// Runs one command against `tracker`, writing human-readable output to `out`.
#[instrument(skip(tracker, out))]
pub async fn dispatch<S, W>(
    tracker: &mut Tracker<S>,
    command: Command,
    today: Date,
    out: &mut W,
) -> anyhow::Result<()>
where
    S: KeyValueStore,
    W: Write,
{
    match command {
        Command::Show => show_week(tracker, out),
        Command::Toggle { day, slot } => {
            let outcome = tracker.toggle_eaten(day, slot, today);
            let entry = tracker.week().day(day).entry(slot);
            let mark = if entry.eaten { "eaten" } else { "not eaten" };
            writeln!(out, "{day} {slot}: {} marked {mark}", entry.display_name())?;
            writeln!(
                out,
                "{day}: {}/6 eaten",
                day_completion_count(tracker.week(), day)
            )?;
            report(&outcome, out)
        }
        Command::Choose {
            day,
            slot,
            name,
            category,
        } => {
            let outcome = tracker.choose_alternative(day, slot, &name, category)?;
            let entry = tracker.week().day(day).entry(slot);
            writeln!(out, "{day} {slot}: now {} ({category})", entry.display_name())?;
            report(&outcome, out)
        }
        Command::Water { day, delta } => {
            let outcome = tracker.adjust_water(day, delta);
            writeln!(out, "{day}: water {}/8", tracker.week().day(day).water())?;
            report(&outcome, out)
        }
        Command::Reset { yes } => {
            anyhow::ensure!(
                yes,
                "resetting {} discards every change made to it; pass --yes to confirm",
                tracker.week_key()
            );
            let outcome = tracker.reset_to_template();
            writeln!(out, "{} reset to the template", tracker.week_key())?;
            report(&outcome, out)
        }
        Command::Library { command } => match command {
            LibraryCommand::List { category } => list_library(tracker, category, out),
            LibraryCommand::Add { name, category } => {
                let (item, saved) = tracker.add_library_item(&name, category)?;
                writeln!(out, "added {} ({})", item.name, item.category)?;
                if !saved {
                    writeln!(out, "warning: library could not be saved")?;
                }
                Ok(())
            }
        },
        Command::Export { out: path } => {
            let path = path.unwrap_or_else(|| PathBuf::from(tracker.export_file_name()));
            export_to(tracker, &path).await?;
            writeln!(out, "exported {} to {}", tracker.week_key(), path.display())?;
            Ok(())
        }
        Command::Import { path } => {
            let imported = import_from(tracker, &path).await?;
            writeln!(out, "imported {}; viewing {}", path.display(), tracker.week_key())?;
            if !imported.skipped.is_empty() {
                writeln!(
                    out,
                    "warning: ignored unreadable field(s): {}",
                    imported.skipped.join(", ")
                )?;
            }
            report(&imported.outcome, out)
        }
        Command::History => {
            for summary in tracker.history() {
                writeln!(
                    out,
                    "{}  eaten {:>2}/42  water {:>2}",
                    summary.week_key, summary.eaten, summary.water
                )?;
            }
            Ok(())
        }
        Command::Achievements => {
            let progress = tracker.progress();
            for (achievement, earned) in achievement_board(tracker.week(), &progress.unlocked) {
                let mark = if earned { "x" } else { " " };
                writeln!(
                    out,
                    "[{mark}] {:<14} +{:<3} {}",
                    achievement.title, achievement.xp, achievement.description
                )?;
            }
            Ok(())
        }
    }
}

async fn export_to<S: KeyValueStore>(tracker: &Tracker<S>, path: &Path) -> anyhow::Result<()> {
    let body = serde_json::to_string_pretty(&tracker.export()).context("encode export")?;
    tokio::fs::write(path, body)
        .await
        .with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), week = %tracker.week_key(), "exported");
    Ok(())
}

/// The file is read in full before any state is touched.
async fn import_from<S: KeyValueStore>(
    tracker: &mut Tracker<S>,
    path: &Path,
) -> anyhow::Result<ImportReport> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("read {}", path.display()))?;
    tracker.import_json(&text).map_err(|e| {
        error!(error = %e, path = %path.display(), "import failed");
        anyhow::Error::new(e)
    })
}

fn show_week<S: KeyValueStore, W: Write>(tracker: &Tracker<S>, out: &mut W) -> anyhow::Result<()> {
    let week = tracker.week();
    let key = week.week_key();
    let dates = key.days();
    let progress = tracker.progress();
    writeln!(
        out,
        "Week {key} ({} to {})  XP {}  streak {}",
        dates[0], dates[6], progress.xp, progress.streak.count
    )?;
    for (day, record) in week.days() {
        writeln!(out)?;
        writeln!(
            out,
            "{day} {}  eaten {}/6  water {}/8",
            dates[day.index()],
            day_completion_count(week, day),
            record.water()
        )?;
        for (slot, entry) in record.entries() {
            let mark = if entry.eaten { "x" } else { " " };
            writeln!(out, "  [{mark}] {:<16} {}", slot.label(), entry.display_name())?;
        }
    }
    writeln!(out)?;
    let chart: Vec<String> = day_counts(week)
        .iter()
        .map(|(day, n)| format!("{} {n}", short(*day)))
        .collect();
    writeln!(out, "per day: {}", chart.join(" | "))?;
    writeln!(out, "week total: {}/42", week_completion_total(week))?;
    Ok(())
}

fn short(day: DayName) -> &'static str {
    &day.label()[..2]
}

fn list_library<S: KeyValueStore, W: Write>(
    tracker: &Tracker<S>,
    category: Option<Category>,
    out: &mut W,
) -> anyhow::Result<()> {
    for item in filter_library(tracker.library(), category) {
        writeln!(out, "{:<8} {}", item.category, item.name)?;
    }
    Ok(())
}

fn report<W: Write>(outcome: &ActionOutcome, out: &mut W) -> anyhow::Result<()> {
    for achievement in &outcome.newly_unlocked {
        writeln!(
            out,
            "achievement unlocked: {} (+{} XP)",
            achievement.title, achievement.xp
        )?;
    }
    writeln!(out, "XP {}  streak {}", outcome.xp, outcome.streak)?;
    if !outcome.persisted {
        writeln!(out, "warning: changes could not be saved and live only in this session")?;
    }
    Ok(())
}
