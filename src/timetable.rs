//! Turns raw timetable cells into per-day departure lists and folds all
//! routes into the stop connection graph.

pub mod assembler;
pub mod day_type;
pub mod graph;
pub mod normalizer;

/// Data-integrity problems in a scraped stop table. These are never coerced
/// away; a table that doesn't line up means the page layout changed.
#[derive(thiserror::Error, Debug)]
pub enum ScheduleError {
    #[error("{minute_cells} minute cells aren't an exact 1-3 multiple of {hour_cells} hour cells")]
    InvalidDayRatio {
        hour_cells: usize,
        minute_cells: usize,
    },

    #[error("thick column has no minute cell for day index {day}")]
    MissingThickColumnDay { day: usize },

    #[error("can't read a minute value out of {token:?}")]
    BadMinuteToken { token: String },
}
