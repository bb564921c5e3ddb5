use std::sync::Arc;

use ::scraper::ElementRef;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use tracing::{debug, instrument, warn};

use crate::adapter::{check_index, Adapter};
use crate::error::Result;
use crate::model::{AtcoderProfile, AtcoderStanding, ContestSummary, Platform};
use crate::scraper::{self, find_nth, inner_text, leading_int, nth, nth_in, Html};
use crate::time::TimeFormatter;
use crate::transport::Transport;

/// Largest index of the upcoming contests table that is served.
pub const MAX_CONTEST_INDEX: usize = 12;

const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%z";

/// Scrapes atcoder.jp.
pub struct AtcoderAdapter {
    transport: Arc<dyn Transport>,
    base_url: String,
    formatter: TimeFormatter,
}

impl AtcoderAdapter {
    pub fn new(
        transport: Arc<dyn Transport>,
        base_url: impl Into<String>,
        formatter: TimeFormatter,
    ) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            formatter,
        }
    }
}

#[async_trait]
impl Adapter for AtcoderAdapter {
    type Profile = AtcoderStanding;

    fn platform(&self) -> Platform {
        Platform::Atcoder
    }

    #[instrument(skip(self))]
    async fn get_contest(&self, index: usize) -> Result<ContestSummary> {
        check_index(index, MAX_CONTEST_INDEX)?;
        let url = format!("{}/contests/?lang=ja", self.base_url);
        let formatter = self.formatter;
        let contest = scraper::scrape(self.transport.as_ref(), &url, |document| {
            parse_contest(document, index, &formatter, &Utc::now())
        })
        .await?;
        debug!(index, name = %contest.name, "parsed atcoder contest");
        Ok(contest)
    }

    #[instrument(skip(self))]
    async fn get_profile(&self, handle: &str) -> Result<AtcoderStanding> {
        let segment: String = url::form_urlencoded::byte_serialize(handle.as_bytes()).collect();
        let url = format!("{}/users/{segment}", self.base_url);
        let standing = scraper::scrape(self.transport.as_ref(), &url, |document| {
            parse_standing(document, handle)
        })
        .await?;
        match &standing {
            AtcoderStanding::Rated(profile) => {
                debug!(handle, rating = profile.rating, "parsed atcoder profile")
            }
            AtcoderStanding::NoRatingData { .. } => {
                warn!(handle, "atcoder user page has no rating table")
            }
        }
        Ok(standing)
    }
}

/// Contract: `#main-container`, its first descendant `div`, the third `div`
/// beneath that, then the first `table` inside it. The table holds one `td`
/// per row: rank, rating, highest rating, rated matches.
///
/// Users who never took part in a rated contest have no such table.
fn parse_standing(document: &Html, handle: &str) -> Result<AtcoderStanding> {
    let main = nth_in(document, "#main-container", 0, "atcoder main container")?;
    let row = nth(main, "div", 0, "atcoder main row")?;
    let column = nth(row, "div", 2, "atcoder profile column")?;

    let Some(table) = find_nth(column, "table", 0)? else {
        return Ok(AtcoderStanding::NoRatingData {
            handle: handle.to_string(),
        });
    };

    let rank = inner_text(nth(table, "td", 0, "atcoder rank")?);
    let rating = rating_cell(nth(table, "td", 1, "atcoder rating")?, "atcoder rating")?;
    let max_rating = rating_cell(
        nth(table, "td", 2, "atcoder highest rating")?,
        "atcoder highest rating",
    )?;
    let contests =
        leading_int(&inner_text(nth(table, "td", 3, "atcoder rated matches")?)).unwrap_or_default();

    Ok(AtcoderStanding::Rated(AtcoderProfile {
        handle: handle.to_string(),
        rating,
        max_rating,
        rank,
        contests,
    }))
}

/// Rating value of a cell: its first `span`, which carries the color class.
fn rating_cell(cell: ElementRef, context: &'static str) -> Result<i64> {
    Ok(leading_int(&inner_text(nth(cell, "span", 0, context)?)).unwrap_or_default())
}

/// Contract: `#contest-table-upcoming`, first `table`, first `tbody`, row
/// `index`. The row's second `a` is the contest name, the `time` inside its
/// first `a` is the start, e.g. `2024-05-04 21:00:00+0900`.
fn parse_contest(
    document: &Html,
    index: usize,
    formatter: &TimeFormatter,
    now: &DateTime<Utc>,
) -> Result<ContestSummary> {
    let upcoming = nth_in(document, "#contest-table-upcoming", 0, "atcoder upcoming contests")?;
    let table = nth(upcoming, "table", 0, "atcoder upcoming table")?;
    let body = nth(table, "tbody", 0, "atcoder upcoming table body")?;
    let row = nth(body, "tr", index, "atcoder upcoming contest row")?;

    let name = inner_text(nth(row, "a", 1, "atcoder contest name")?);
    let time_link = nth(row, "a", 0, "atcoder contest start link")?;
    let start = inner_text(nth(time_link, "time", 0, "atcoder contest start time")?);
    let start_time: DateTime<FixedOffset> = DateTime::parse_from_str(&start, START_TIME_FORMAT)?;

    Ok(ContestSummary {
        name,
        countdown: formatter.format_countdown(&start_time, now),
        start_time: Some(start_time),
    })
}
