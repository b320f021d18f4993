use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("invalid week key `{0}`, expected YYYY-Www")]
    InvalidWeekKey(String),

    #[error("week is outside the supported calendar range")]
    WeekOutOfRange,

    #[error("unknown day `{0}`")]
    UnknownDay(String),

    #[error("unknown meal slot `{0}`")]
    UnknownSlot(String),

    #[error("unknown category `{0}`, expected one of: dish, drink, produce, other")]
    UnknownCategory(String),

    #[error("name must not be empty")]
    EmptyName,

    #[error("invalid week data: {0}")]
    InvalidWeek(String),

    #[error("could not import file: {0}")]
    Import(#[source] serde_json::Error),
}
