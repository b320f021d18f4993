mod dto;
pub mod handlers;
mod library;
mod model;
pub mod repo;
mod services;
mod template;
pub mod week;

pub use dto::{export_file_name, ExportDocument, ImportDocument, WeekSummary};
pub use library::{add_to_library, default_library, filter_library, LibraryItem, LIBRARY_VIEW_LIMIT};
pub use model::{
    Category, DayName, DayRecord, MealEntry, MealSlot, WeekMeta, WeekSnapshot, MAX_WATER,
    PLACEHOLDER,
};
pub use services::{ActionOutcome, ImportReport, Tracker};
pub use template::planned_meal;
pub use week::{adjust_water, choose_alternative, new_week, reset_to_template, toggle_eaten};
