//! Pulls schedule data out of the MPK pages. The site puts no ids or classes
//! on its timetable cells; the only thing telling hour, minute and overnight
//! cells apart is their inline style.

use std::sync::OnceLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::model::page::{NextStop, RawStopTable, StopPage, ThickColumn};
use crate::utils::str_between_str;

#[derive(thiserror::Error, Debug)]
pub enum PageError {
    #[error("no schedule date in the line directory hrefs")]
    MissingScheduleDate,

    #[error("no line links on the directory page")]
    NoLines,

    #[error("no variant table on the line page")]
    MissingVariantTable,

    #[error("no anchor for the first stop of {line}__{variant}")]
    MissingFirstStop { line: String, variant: usize },

    #[error("next stop anchor has no name span")]
    MissingStopName,

    #[error("stop page doesn't link the current stop {link}")]
    CurrentStopMissing { link: String },

    #[error("terminus page has no stop name cell")]
    MissingTerminusName,

    #[error("can't parse hour cell {text:?}")]
    BadHourCell { text: String },
}

/// The front page's line list plus the schedule date its links carry.
#[derive(Clone, Debug)]
pub struct LineDirectory {
    pub date: String,
    pub lines: Vec<String>,
}

// Hour cells have a dotted right border, minute cells a solid one. The thick
// variants close the table with a 2px bottom border instead of 1px and mark
// the post-midnight column.
fn hour_cell_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"border-right:\s*dotted black 1px;\s*font-weight:\s*bold").unwrap())
}

fn minute_cell_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"border-right:\s*solid black 1px;\s*text-align:\s*left").unwrap())
}

fn thick_border_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"border-bottom:\s*solid\s*black 2px").unwrap())
}

// selectors below are literals, parsing them can't fail
fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap()
}

fn cell_text(cell: ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}

/// First text node of the anchor's name span, trimmed.
fn anchor_name(anchor: ElementRef) -> Result<String, PageError> {
    let span = anchor
        .select(&selector("span"))
        .next()
        .ok_or(PageError::MissingStopName)?;

    Ok(span.text().next().unwrap_or_default().trim().to_string())
}

/// Every line link on the front page, plus the schedule date embedded in the
/// first link's href.
pub fn line_directory(html: &str) -> Result<LineDirectory, PageError> {
    let doc = Html::parse_document(html);
    let line_links = selector("a.linia, a.liniaZ, a.liniaO, a.liniaN");

    let mut date = None;
    let mut lines = Vec::new();

    for anchor in doc.select(&line_links) {
        if date.is_none() {
            let href = anchor.value().attr("href").unwrap_or_default();
            date = str_between_str(href, "rozklad=", "&linia=").map(str::to_string);
        }

        lines.push(cell_text(anchor));
    }

    if lines.is_empty() {
        return Err(PageError::NoLines);
    }

    Ok(LineDirectory {
        date: date.ok_or(PageError::MissingScheduleDate)?,
        lines,
    })
}

/// How many route variants a line page lists. The variant links sit in the
/// one table styled `vertical-align: top`.
pub fn route_variant_count(html: &str) -> Result<usize, PageError> {
    let doc = Html::parse_document(html);

    let table = doc
        .select(&selector("table"))
        .find(|t| {
            t.value()
                .attr("style")
                .is_some_and(|s| s.contains("vertical-align: top"))
        })
        .ok_or(PageError::MissingVariantTable)?;

    Ok(table.select(&selector("a")).count())
}

/// The first stop link of one route variant on the route page.
pub fn first_stop(
    html: &str,
    date: &str,
    line: &str,
    variant: usize,
) -> Result<NextStop, PageError> {
    let doc = Html::parse_document(html);
    let needle = format!("/?lang=PL&rozklad={date}&linia={line}__{variant}");

    for anchor in doc.select(&selector("a")) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };

        if href.contains(&needle) {
            return Ok(NextStop {
                link: href.to_string(),
                name: anchor_name(anchor)?,
            });
        }
    }

    Err(PageError::MissingFirstStop {
        line: line.to_string(),
        variant,
    })
}

/// Extracts one stop page: its timetable cells and the link onward, or the
/// terminus signal when the current stop's anchor is the last in the page's
/// stop list.
pub fn stop_page(html: &str, date: &str, current_link: &str) -> Result<StopPage, PageError> {
    let doc = Html::parse_document(html);
    let link_marker = format!("lang=PL&rozklad={date}&linia=");

    let stop_links: Vec<ElementRef> = doc
        .select(&selector("a"))
        .filter(|a| {
            a.value()
                .attr("href")
                .is_some_and(|h| h.contains(&link_marker))
        })
        .collect();

    let position = stop_links
        .iter()
        .position(|a| a.value().attr("href") == Some(current_link))
        .ok_or_else(|| PageError::CurrentStopMissing {
            link: current_link.to_string(),
        })?;

    match stop_links.get(position + 1) {
        Some(next_anchor) => {
            let link = next_anchor
                .value()
                .attr("href")
                .unwrap_or_default()
                .to_string();

            Ok(StopPage::Stop {
                table: stop_table(&doc)?,
                next: NextStop {
                    link,
                    name: anchor_name(*next_anchor)?,
                },
            })
        }
        None => {
            let name_cell = doc
                .select(&selector("td"))
                .find(|t| {
                    t.value()
                        .attr("style")
                        .is_some_and(|s| s.contains("text-align: right;"))
                })
                .ok_or(PageError::MissingTerminusName)?;

            Ok(StopPage::Terminus {
                name: cell_text(name_cell),
            })
        }
    }
}

fn stop_table(doc: &Html) -> Result<RawStopTable, PageError> {
    let mut hours = Vec::new();
    let mut minutes = Vec::new();
    let mut thick_hour = None;
    let mut thick_minutes = Vec::new();

    for cell in doc.select(&selector("td")) {
        let Some(style) = cell.value().attr("style") else {
            continue;
        };
        let thick = thick_border_re().is_match(style);

        if hour_cell_re().is_match(style) {
            let text = cell_text(cell);
            let hour: u8 = text
                .parse()
                .map_err(|_| PageError::BadHourCell { text })?;

            if thick {
                // the site renders at most one thick hour; keep the first
                thick_hour.get_or_insert(hour);
            } else {
                hours.push(hour);
            }
        } else if minute_cell_re().is_match(style) {
            let text = cell_text(cell);

            if thick {
                thick_minutes.push(text);
            } else {
                minutes.push(text);
            }
        }
    }

    Ok(RawStopTable {
        hours,
        minutes,
        thick: thick_hour.map(|hour| ThickColumn {
            hour,
            minutes: thick_minutes,
        }),
    })
}
