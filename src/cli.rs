use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::calendar::WeekKey;
use crate::meals::{Category, DayName, MealSlot};

#[derive(Parser, Debug)]
#[command(name = "mealtrack")]
#[command(version, about = "Weekly meal tracker with XP, streaks and achievements")]
pub struct Cli {
    /// Week to work on, e.g. 2025-W38. Defaults to the current week.
    #[arg(long, global = true)]
    pub week: Option<WeekKey>,
    /// Weeks to move away from --week (negative goes back).
    #[arg(long, global = true, default_value_t = 0, allow_negative_numbers = true)]
    pub offset: i64,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the week with counts, water, XP and streak.
    Show,
    /// Mark a meal eaten, or un-mark it.
    Toggle { day: DayName, slot: MealSlot },
    /// Replace the planned meal of a slot.
    Choose {
        day: DayName,
        slot: MealSlot,
        name: String,
        #[arg(long)]
        category: Category,
    },
    /// Add or remove glasses of water.
    Water {
        day: DayName,
        #[arg(allow_negative_numbers = true)]
        delta: i32,
    },
    /// Throw away this week's changes and start over from the template.
    Reset {
        #[arg(long)]
        yes: bool,
    },
    /// Browse or extend the meal library.
    Library {
        #[command(subcommand)]
        command: LibraryCommand,
    },
    /// Write week, library, XP, streak and achievements to a JSON file.
    Export {
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Load a previously exported JSON file.
    Import { path: PathBuf },
    /// Totals of every stored week.
    History,
    /// Achievement catalog with what has been earned.
    Achievements,
}

#[derive(Subcommand, Debug)]
pub enum LibraryCommand {
    List {
        #[arg(long)]
        category: Option<Category>,
    },
    Add {
        name: String,
        #[arg(long)]
        category: Category,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_week_and_negative_values() {
        let cli = Cli::try_parse_from([
            "mealtrack", "--week", "2025-W38", "--offset", "-1", "water", "mon", "-2",
        ])
        .unwrap();
        assert_eq!(cli.week.map(|k| k.to_string()).as_deref(), Some("2025-W38"));
        assert_eq!(cli.offset, -1);
        match cli.command {
            Command::Water { day, delta } => {
                assert_eq!(day, DayName::Monday);
                assert_eq!(delta, -2);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_category() {
        let err = Cli::try_parse_from([
            "mealtrack", "choose", "tue", "lunch", "Soup", "--category", "soupish",
        ]);
        assert!(err.is_err());

        let ok = Cli::try_parse_from([
            "mealtrack", "library", "add", "Green tea", "--category", "drink",
        ])
        .unwrap();
        assert!(matches!(
            ok.command,
            Command::Library {
                command: LibraryCommand::Add {
                    category: Category::Drink,
                    ..
                }
            }
        ));
    }

    #[test]
    fn rejects_bad_week_key() {
        assert!(Cli::try_parse_from(["mealtrack", "--week", "2021-W53", "show"]).is_err());
    }
}
