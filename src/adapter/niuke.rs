use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::adapter::{check_index, Adapter};
use crate::error::{AcmError, Result};
use crate::model::{ContestSummary, NiukeProfile, Platform};
use crate::scraper::{
    self, find_nth, inner_text, leading_int, nth, nth_in, trailing_segment, Html,
};
use crate::transport::Transport;

/// Largest index the homepage contest list serves.
pub const MAX_CONTEST_INDEX: usize = 2;

const USER_NOT_FOUND: &str = "查无此人，请确认名称输入正确且6个月内参加过至少一场牛客竞赛";

/// Scrapes ac.nowcoder.com.
pub struct NiukeAdapter {
    transport: Arc<dyn Transport>,
    base_url: String,
}

impl NiukeAdapter {
    pub fn new(transport: Arc<dyn Transport>, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
        }
    }

    /// Look up the numeric user id behind a display name.
    #[instrument(skip(self))]
    pub async fn resolve_id(&self, handle: &str) -> Result<String> {
        let query: String = url::form_urlencoded::byte_serialize(handle.as_bytes()).collect();
        let url = format!(
            "{}/acm/contest/rating-index?searchUserName={query}",
            self.base_url
        );
        let id = scraper::scrape(self.transport.as_ref(), &url, |document| {
            parse_user_id(document, handle)
        })
        .await?;
        debug!(handle, id = %id, "resolved niuke user id");
        Ok(id)
    }
}

#[async_trait]
impl Adapter for NiukeAdapter {
    type Profile = NiukeProfile;

    fn platform(&self) -> Platform {
        Platform::Niuke
    }

    #[instrument(skip(self))]
    async fn get_contest(&self, index: usize) -> Result<ContestSummary> {
        check_index(index, MAX_CONTEST_INDEX)?;
        let contest = scraper::scrape(self.transport.as_ref(), &self.base_url, |document| {
            parse_contest(document, index)
        })
        .await?;
        debug!(index, name = %contest.name, "parsed niuke contest");
        Ok(contest)
    }

    #[instrument(skip(self))]
    async fn get_profile(&self, handle: &str) -> Result<NiukeProfile> {
        let user_id = self.resolve_id(handle).await?;

        let url = format!("{}/acm/contest/profile/{user_id}", self.base_url);
        let summary = scraper::scrape(self.transport.as_ref(), &url, parse_contest_summary).await?;

        let url = format!(
            "{}/acm/contest/profile/{user_id}/practice-coding",
            self.base_url
        );
        let solved = scraper::scrape(self.transport.as_ref(), &url, parse_solved).await?;

        debug!(handle, rating = summary.rating, solved, "parsed niuke profile");

        Ok(NiukeProfile {
            handle: handle.to_string(),
            user_id,
            rating: summary.rating,
            rank: summary.rank,
            rated_contests: summary.rated_contests,
            unrated_contests: summary.unrated_contests,
            solved,
        })
    }
}

/// Fields of the profile summary page.
struct SummaryStats {
    rating: i64,
    rank: String,
    rated_contests: i64,
    unrated_contests: i64,
}

/// Id of the user listed by a rating search.
///
/// Contract: first `table`, its second `tr` (the first is the header), that
/// row's second `td`. The cell holds the display name in its first `span`
/// and a link to `/acm/contest/profile/{id}` as its first `a`. No table, no
/// result row, or a name other than `handle` means there is no such user.
fn parse_user_id(document: &Html, handle: &str) -> Result<String> {
    let not_found = AcmError::NotFound {
        message: USER_NOT_FOUND,
    };

    let Some(table) = find_nth(document.root_element(), "table", 0)? else {
        return Err(not_found);
    };
    let Some(row) = find_nth(table, "tr", 1)? else {
        return Err(not_found);
    };
    let cell = nth(row, "td", 1, "niuke search result name cell")?;

    let name = inner_text(nth(cell, "span", 0, "niuke search result name")?);
    if name != handle {
        return Err(not_found);
    }

    nth(cell, "a", 0, "niuke search result link")?
        .value()
        .attr("href")
        .and_then(trailing_segment)
        .map(str::to_string)
        .ok_or(AcmError::ElementNotFound {
            context: "niuke search result link target",
        })
}

/// Text of the `position`th `.my-state-item` in the first `.my-state-main`,
/// taken from its first `div`.
fn state_item(document: &Html, position: usize, context: &'static str) -> Result<String> {
    let main = nth_in(document, ".my-state-main", 0, "niuke state panel")?;
    let item = nth(main, ".my-state-item", position, context)?;
    Ok(inner_text(nth(item, "div", 0, context)?))
}

/// Rating: state item 0. Unrated users show a placeholder, read as 0.
fn parse_rating(document: &Html) -> Result<i64> {
    Ok(leading_int(&state_item(document, 0, "niuke rating")?).unwrap_or_default())
}

/// Rank label: state item 1, kept verbatim.
fn parse_rank(document: &Html) -> Result<String> {
    state_item(document, 1, "niuke rank")
}

/// Rated contest count: state item 2.
fn parse_rated_contests(document: &Html) -> Result<i64> {
    Ok(leading_int(&state_item(document, 2, "niuke rated contests")?).unwrap_or_default())
}

/// Unrated contest count: state item 3.
fn parse_unrated_contests(document: &Html) -> Result<i64> {
    Ok(leading_int(&state_item(document, 3, "niuke unrated contests")?).unwrap_or_default())
}

fn parse_contest_summary(document: &Html) -> Result<SummaryStats> {
    Ok(SummaryStats {
        rating: parse_rating(document)?,
        rank: parse_rank(document)?,
        rated_contests: parse_rated_contests(document)?,
        unrated_contests: parse_unrated_contests(document)?,
    })
}

/// Solved problem count: state item 1 of the practice page.
fn parse_solved(document: &Html) -> Result<i64> {
    Ok(leading_int(&state_item(document, 1, "niuke solved problems")?).unwrap_or_default())
}

/// Contract: first `.acm-list`, its `index`th `.acm-item`; the name is the
/// item's first `a`, the countdown its first `.acm-item-time`, both as
/// rendered by the site.
fn parse_contest(document: &Html, index: usize) -> Result<ContestSummary> {
    let list = nth_in(document, ".acm-list", 0, "niuke contest list")?;
    let item = nth(list, ".acm-item", index, "niuke contest item")?;
    let name = inner_text(nth(item, "a", 0, "niuke contest name")?);
    let countdown = inner_text(nth(item, ".acm-item-time", 0, "niuke contest countdown")?);

    Ok(ContestSummary {
        name,
        start_time: None,
        countdown,
    })
}
