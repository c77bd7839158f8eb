/// The timetable cells extracted from one stop page.
#[derive(Clone, Debug, Default)]
pub struct RawStopTable {
    /// Hour labels, one per table row, in display order.
    pub hours: Vec<u8>,
    /// Minute cell texts, one group of `ratio` cells under every hour row.
    pub minutes: Vec<String>,
    pub thick: Option<ThickColumn>,
}

/// The heavier-bordered column attached to the 22:00 row, marking a departure
/// that happens after local midnight but is printed on the same day's table.
#[derive(Clone, Debug)]
pub struct ThickColumn {
    pub hour: u8,
    /// One minute cell text per day index.
    pub minutes: Vec<String>,
}

/// Link to a stop's own schedule page plus its display name.
#[derive(Clone, Debug)]
pub struct NextStop {
    pub link: String,
    pub name: String,
}

/// What the schedule source hands back for one fetched stop page.
#[derive(Debug)]
pub enum StopPage {
    /// A stop with departures of its own and a link onward.
    Stop { table: RawStopTable, next: NextStop },
    /// The end of the route. Carries the terminal stop's name; the terminus
    /// has no further departures.
    Terminus { name: String },
}
