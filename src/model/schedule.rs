use indexmap::IndexMap;

/// Minutes from midnight.
///
/// Warning: can be larger than 1439. Departures after the overnight rollover
/// keep counting past 24:00 so they sort after the same evening's departures.
pub type DepartureTime = u16;

/// One departure list per service-day variant. Its length always equals the
/// resolved [`ServiceCategory`] count; a terminus gets an empty list.
pub type TimetableByDay = Vec<Vec<DepartureTime>>;

/// Disambiguated stop name → per-day departures, in physical route order.
pub type StopTimetables = IndexMap<String, TimetableByDay>;

/// Route id (`"<line>_<variant>"`) → its ordered stop timetables.
pub type LineTimetables = IndexMap<String, StopTimetables>;

/// Stop → next stop → route ids driving that edge. Duplicates are kept, one
/// entry per traversal.
pub type ConnectionGraph = IndexMap<String, IndexMap<String, Vec<String>>>;

/// How many service-day variants one stop's table encodes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ServiceCategory {
    /// Weekdays only.
    Weekday = 1,
    /// Weekdays and Saturday differ.
    WeekdaySaturday = 2,
    /// Weekdays, Saturday and Sunday all differ.
    AllWeek = 3,
}

impl ServiceCategory {
    pub fn day_count(self) -> usize {
        self as usize
    }
}
