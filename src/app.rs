use std::io::Write;

use time::Date;
use tracing::info;

use crate::calendar::{week_key_of, WeekKey};
use crate::cli::Cli;
use crate::config::AppConfig;
use crate::meals::handlers;
use crate::state::AppState;
use crate::storage::KeyValueStore;

/// `--week` (or the week of `today`) moved by `--offset` weeks.
pub fn resolve_week(week: Option<WeekKey>, offset: i64, today: Date) -> anyhow::Result<WeekKey> {
    let base = week.unwrap_or_else(|| week_key_of(today));
    Ok(base.adjacent(offset)?)
}

pub async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    let today = crate::calendar::today();
    let week = resolve_week(cli.week, cli.offset, today)?;
    info!(%week, data_file = %config.data_file.display(), "opening tracker");
    let mut state = AppState::init(config, week)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(&mut state, cli, today, &mut out).await
}

pub async fn execute<S, W>(
    state: &mut AppState<S>,
    cli: Cli,
    today: Date,
    out: &mut W,
) -> anyhow::Result<()>
where
    S: KeyValueStore,
    W: Write,
{
    handlers::dispatch(&mut state.tracker, cli.command, today, out).await?;
    out.flush()?;
    Ok(())
}
