use anyhow::{Context, Result};

use super::normalizer::generate_timetable;
use crate::model::page::{NextStop, StopPage};
use crate::model::schedule::{StopTimetables, TimetableByDay};

/// Hands out one stop page's extracted cells at a time.
///
/// Implementations must only signal a terminus when the route genuinely ends;
/// this layer can't tell a lost link apart from the real end of the line.
pub trait RawScheduleSource {
    fn stop_page(&self, link: &str) -> Result<StopPage>;
}

/// Walks a route's chain of stop links from the first stop to the terminus and
/// produces the per-stop timetables in physical stop order. The walk is a
/// plain loop, so route length doesn't matter.
pub fn assemble_route<S: RawScheduleSource>(
    source: &S,
    first: NextStop,
) -> Result<StopTimetables> {
    let mut stops = StopTimetables::new();
    let mut current = first;

    loop {
        let page = source
            .stop_page(&current.link)
            .with_context(|| format!("fetching the stop page of {}", current.name))?;

        match page {
            StopPage::Stop { table, next } => {
                let timetable = generate_timetable(&table)
                    .with_context(|| format!("normalizing the timetable of {}", current.name))?;

                record_stop(&mut stops, current.name, timetable);
                current = next;
            }
            StopPage::Terminus { name } => {
                // no departures past the end of the line
                record_stop(&mut stops, name, TimetableByDay::new());
                return Ok(stops);
            }
        }
    }
}

/// A name seen again within one route gets " 2" appended to its second
/// occurrence. A third occurrence overwrites the second; files produced so far
/// use exactly these keys, so the single collision level stays.
fn record_stop(stops: &mut StopTimetables, name: String, timetable: TimetableByDay) {
    let key = if stops.contains_key(&name) {
        format!("{name} 2")
    } else {
        name
    };

    stops.insert(key, timetable);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::page::RawStopTable;
    use anyhow::bail;

    fn page(hours: &[u8], minutes: &[&str], next_link: &str, next_name: &str) -> StopPage {
        StopPage::Stop {
            table: RawStopTable {
                hours: hours.to_vec(),
                minutes: minutes.iter().map(|m| m.to_string()).collect(),
                thick: None,
            },
            next: NextStop {
                link: next_link.to_string(),
                name: next_name.to_string(),
            },
        }
    }

    struct ThreeStopRoute;

    impl RawScheduleSource for ThreeStopRoute {
        fn stop_page(&self, link: &str) -> Result<StopPage> {
            Ok(match link {
                "/a" => page(&[5], &["10 20"], "/b", "Rondo"),
                "/b" => page(&[6], &["15"], "/c", "Dworzec"),
                "/c" => StopPage::Terminus {
                    name: "Dworzec".to_string(),
                },
                other => bail!("unexpected link {other}"),
            })
        }
    }

    #[test]
    fn walks_to_the_terminus_in_stop_order() {
        let first = NextStop {
            link: "/a".to_string(),
            name: "Teatr".to_string(),
        };

        let stops = assemble_route(&ThreeStopRoute, first).unwrap();

        assert_eq!(
            stops.keys().collect::<Vec<_>>(),
            vec!["Teatr", "Rondo", "Dworzec"]
        );
        assert_eq!(stops["Teatr"], vec![vec![5 * 60 + 10, 5 * 60 + 20]]);
        assert_eq!(stops["Rondo"], vec![vec![6 * 60 + 15]]);
        assert!(stops["Dworzec"].is_empty());
    }

    struct LoopRoute;

    impl RawScheduleSource for LoopRoute {
        fn stop_page(&self, link: &str) -> Result<StopPage> {
            Ok(match link {
                "/a" => page(&[5], &["10"], "/b", "Most"),
                "/b" => page(&[5], &["20"], "/c", "Teatr"),
                "/c" => StopPage::Terminus {
                    name: "Teatr".to_string(),
                },
                other => bail!("unexpected link {other}"),
            })
        }
    }

    #[test]
    fn repeated_stop_name_gets_a_2_suffix() {
        let first = NextStop {
            link: "/a".to_string(),
            name: "Teatr".to_string(),
        };

        let stops = assemble_route(&LoopRoute, first).unwrap();

        assert_eq!(
            stops.keys().collect::<Vec<_>>(),
            vec!["Teatr", "Most", "Teatr 2"]
        );
        assert_eq!(stops["Teatr"], vec![vec![5 * 60 + 10]]);
        assert!(stops["Teatr 2"].is_empty());
    }
}
