use super::ScheduleError;
use super::day_type::resolve_service_category;
use crate::model::page::RawStopTable;
use crate::model::schedule::{DepartureTime, ServiceCategory, TimetableByDay};

/// Normalizes one stop's table into departure lists, one per service-day
/// variant. The list count always equals the resolved category count.
pub fn generate_timetable(table: &RawStopTable) -> Result<TimetableByDay, ScheduleError> {
    let category = resolve_service_category(table.hours.len(), table.minutes.len())?;

    (0..category.day_count())
        .map(|day| normalize_day(table, category, day))
        .collect()
}

/// Flattens the hour rows of one day column into minutes-from-midnight.
///
/// The thick column is glued to the 22:00 row and marks the first departure
/// after local midnight; from that row on, every hour label belongs to the
/// next calendar day and is offset by 24. Without a thick column no rollover
/// is ever applied and hour labels are taken at face value, even when that is
/// semantically wrong. Correcting it here would only mask scraping defects.
pub fn normalize_day(
    table: &RawStopTable,
    category: ServiceCategory,
    day: usize,
) -> Result<Vec<DepartureTime>, ScheduleError> {
    let ratio = category.day_count();
    let mut times = Vec::new();
    let mut rolled_over = false;

    for (row, &hour) in table.hours.iter().enumerate() {
        let minute_text = table.minutes.get(row * ratio + day).ok_or(
            ScheduleError::InvalidDayRatio {
                hour_cells: table.hours.len(),
                minute_cells: table.minutes.len(),
            },
        )?;

        match &table.thick {
            Some(thick) if hour == 22 => {
                push_times(&mut times, u16::from(hour), minute_text)?;

                let thick_text = thick
                    .minutes
                    .get(day)
                    .ok_or(ScheduleError::MissingThickColumnDay { day })?;
                push_times(&mut times, u16::from(thick.hour) + 24, thick_text)?;

                rolled_over = true;
            }
            _ if rolled_over => push_times(&mut times, u16::from(hour) + 24, minute_text)?,
            _ => push_times(&mut times, u16::from(hour), minute_text)?,
        }
    }

    Ok(times)
}

/// Every whitespace-separated token in a minute cell is one departure. Only
/// the first two characters count; the site appends markers like low-floor
/// flags after the digits.
fn push_times(
    times: &mut Vec<DepartureTime>,
    hour: u16,
    minute_text: &str,
) -> Result<(), ScheduleError> {
    for token in minute_text.split_whitespace() {
        let digits = token.get(..2).unwrap_or(token);
        let minute: u16 = digits
            .parse()
            .map_err(|_| ScheduleError::BadMinuteToken {
                token: token.to_string(),
            })?;

        times.push(hour * 60 + minute);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::page::ThickColumn;

    fn table(hours: &[u8], minutes: &[&str]) -> RawStopTable {
        RawStopTable {
            hours: hours.to_vec(),
            minutes: minutes.iter().map(|m| m.to_string()).collect(),
            thick: None,
        }
    }

    #[test]
    fn thick_column_rolls_the_table_over() {
        let mut table = table(&[6, 7, 22, 0, 1], &["10 40", "05 35", "00", "15", "45"]);
        table.thick = Some(ThickColumn {
            hour: 0,
            minutes: vec!["15".to_string()],
        });

        let times = generate_timetable(&table).unwrap();

        assert_eq!(times.len(), 1);
        assert_eq!(
            times[0],
            vec![
                6 * 60 + 10,
                6 * 60 + 40,
                7 * 60 + 5,
                7 * 60 + 35,
                22 * 60,
                24 * 60 + 15, // the thick cell itself
                24 * 60 + 15, // the 0:00 row, now next-day
                25 * 60 + 45,
            ]
        );
    }

    #[test]
    fn without_thick_column_hours_are_taken_literally() {
        let table = table(&[22, 23, 0], &["10", "20", "30"]);

        let times = generate_timetable(&table).unwrap();

        // the 0:00 row stays at face value; flagged upstream, not fixed here
        assert_eq!(times[0], vec![22 * 60 + 10, 23 * 60 + 20, 30]);
    }

    #[test]
    fn day_index_picks_its_own_column() {
        let table = table(&[5, 6], &["10", "30", "20 50", "40"]);

        let times = generate_timetable(&table).unwrap();

        assert_eq!(times.len(), 2);
        assert_eq!(times[0], vec![5 * 60 + 10, 6 * 60 + 20, 6 * 60 + 50]);
        assert_eq!(times[1], vec![5 * 60 + 30, 6 * 60 + 40]);
    }

    #[test]
    fn doubled_whitespace_yields_no_empty_token() {
        let table = table(&[12], &["10  40"]);

        let times = generate_timetable(&table).unwrap();

        assert_eq!(times[0], vec![12 * 60 + 10, 12 * 60 + 40]);
    }

    #[test]
    fn trailing_markers_after_the_digits_are_ignored() {
        let table = table(&[8], &["05a 30n"]);

        let times = generate_timetable(&table).unwrap();

        assert_eq!(times[0], vec![8 * 60 + 5, 8 * 60 + 30]);
    }

    #[test]
    fn garbage_minute_token_is_an_error() {
        let table = table(&[8], &["x5"]);

        assert!(matches!(
            generate_timetable(&table),
            Err(ScheduleError::BadMinuteToken { .. })
        ));
    }

    #[test]
    fn uneven_cell_counts_are_an_error() {
        let table = table(&[8, 9], &["05", "10", "15"]);

        assert!(matches!(
            generate_timetable(&table),
            Err(ScheduleError::InvalidDayRatio { .. })
        ));
    }
}
