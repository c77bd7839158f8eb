//! Blocking HTTP access to the schedule site. All session state (base url,
//! cookie, user agent) lives in an explicit [`ScraperConfig`] value; nothing
//! here is process-global.

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT_LANGUAGE, COOKIE, HeaderMap, HeaderValue, USER_AGENT};
use tracing::info;

use super::page_parser;
use crate::model::page::{NextStop, StopPage};
use crate::scraping::page_parser::LineDirectory;
use crate::timetable::assembler::RawScheduleSource;

const DEFAULT_BASE_URL: &str = "http://rozklady.mpk.krakow.pl";
const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:76.0) Gecko/20100101 Firefox/76.0";
// the site serves a different layout without these
const DEFAULT_COOKIE: &str = "ROZKLADY_JEZYK=PL; ROZKLADY_WIDTH=2000";

#[derive(Clone, Debug)]
pub struct ScraperConfig {
    pub base_url: String,
    pub user_agent: String,
    pub cookie: String,
}

impl ScraperConfig {
    /// Environment overrides on top of the site's known-good defaults.
    pub fn from_env() -> Self {
        Self {
            base_url: dotenvy::var("MPK_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            user_agent: dotenvy::var("MPK_USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),
            cookie: dotenvy::var("MPK_COOKIE").unwrap_or_else(|_| DEFAULT_COOKIE.to_string()),
        }
    }
}

pub struct MpkClient {
    http: Client,
    base_url: String,
}

impl MpkClient {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).context("invalid user agent")?,
        );
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&config.cookie).context("invalid cookie")?,
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .context("building the http client")?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    #[tracing::instrument(err, skip(self))]
    fn get(&self, path: &str) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);

        let html = self
            .http
            .get(&url)
            .send()
            .with_context(|| format!("fetching {url}"))?
            .error_for_status()?
            .text()
            .context("reading the body of the response")?;

        Ok(html)
    }

    /// The front page's line list and the current schedule date.
    pub fn line_directory(&self) -> Result<LineDirectory> {
        let html = self.get("")?;
        let directory = page_parser::line_directory(&html)?;

        info!(
            "got {} lines for schedule date {}",
            directory.lines.len(),
            directory.date
        );

        Ok(directory)
    }

    /// How many route variants (directions) a line has.
    pub fn route_variant_count(&self, date: &str, line: &str) -> Result<usize> {
        let html = self.get(&format!("/?lang=PL&rozklad={date}&linia={line}"))?;

        Ok(page_parser::route_variant_count(&html)?)
    }

    /// The first stop link of one route variant.
    pub fn first_stop(&self, date: &str, line: &str, variant: usize) -> Result<NextStop> {
        let html = self.get(&format!("/?lang=PL&rozklad={date}&linia={line}__{variant}"))?;

        Ok(page_parser::first_stop(&html, date, line, variant)?)
    }

    /// A schedule source for one scrape session, tied to the session's date.
    pub fn schedule_source<'a>(&'a self, date: &str) -> MpkScheduleSource<'a> {
        MpkScheduleSource {
            client: self,
            date: date.to_string(),
        }
    }
}

pub struct MpkScheduleSource<'a> {
    client: &'a MpkClient,
    date: String,
}

impl RawScheduleSource for MpkScheduleSource<'_> {
    fn stop_page(&self, link: &str) -> Result<StopPage> {
        let html = self.client.get(link)?;

        Ok(page_parser::stop_page(&html, &self.date, link)?)
    }
}
