mod api;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

pub use api::CodeforcesApi;
use api::{Contest, ContestPhase, User, USER_NOT_FOUND};

use crate::adapter::Adapter;
use crate::cursor::{find_cursor, select_backward};
use crate::error::{AcmError, Result};
use crate::model::{CodeforcesProfile, ContestSummary, Platform, CODEFORCES_UNRATED};
use crate::text::sanitize_name;
use crate::time::TimeFormatter;
use crate::transport::Transport;

/// Talks to the official Codeforces API.
pub struct CodeforcesAdapter {
    transport: Arc<dyn Transport>,
    api: CodeforcesApi,
    formatter: TimeFormatter,
}

impl CodeforcesAdapter {
    pub fn new(
        transport: Arc<dyn Transport>,
        api: CodeforcesApi,
        formatter: TimeFormatter,
    ) -> Self {
        Self {
            transport,
            api,
            formatter,
        }
    }
}

#[async_trait]
impl Adapter for CodeforcesAdapter {
    type Profile = CodeforcesProfile;

    fn platform(&self) -> Platform {
        Platform::Codeforces
    }

    /// Index 0 is the upcoming contest closest to now; each further index
    /// steps one entry towards the head of the newest-first list.
    #[instrument(skip(self))]
    async fn get_contest(&self, index: usize) -> Result<ContestSummary> {
        let contests: Vec<Contest> = self
            .api
            .call(self.transport.as_ref(), "contest.list", &[("gym", "false")])
            .await?;
        let contest = contest_at(&contests, index, &self.formatter, &Utc::now())?;
        debug!(index, name = %contest.name, "parsed codeforces contest");
        Ok(contest)
    }

    #[instrument(skip(self))]
    async fn get_profile(&self, handle: &str) -> Result<CodeforcesProfile> {
        let users: Vec<User> = self
            .api
            .call(self.transport.as_ref(), "user.info", &[("handles", handle)])
            .await?;
        let profile = profile_from_users(handle, users)?;
        debug!(handle, rating = profile.rating, "parsed codeforces profile");
        Ok(profile)
    }
}

/// The first returned user must carry exactly the queried handle.
fn profile_from_users(handle: &str, users: Vec<User>) -> Result<CodeforcesProfile> {
    let user = users
        .into_iter()
        .next()
        .filter(|user| user.handle == handle)
        .ok_or(AcmError::NotFound {
            message: USER_NOT_FOUND,
        })?;

    Ok(CodeforcesProfile {
        handle: user.handle,
        rating: user.rating.unwrap_or_default(),
        max_rating: user.max_rating.unwrap_or_default(),
        rank: user.rank.unwrap_or_else(|| CODEFORCES_UNRATED.to_string()),
        max_rank: user.max_rank.unwrap_or_else(|| CODEFORCES_UNRATED.to_string()),
        avatar_url: user.title_photo.unwrap_or_default(),
    })
}

fn contest_at(
    contests: &[Contest],
    index: usize,
    formatter: &TimeFormatter,
    wall_clock: &DateTime<Utc>,
) -> Result<ContestSummary> {
    let cursor = find_cursor(contests.iter().map(|c| c.phase == ContestPhase::Finished)).ok_or(
        AcmError::ElementNotFound {
            context: "codeforces finished contest",
        },
    )?;
    let position = select_backward(cursor, index).ok_or(AcmError::IndexOutOfRange {
        index,
        max: cursor,
    })?;
    let contest = &contests[position];
    debug!(cursor, position, phase = %contest.phase, "selected codeforces contest");

    let start_seconds = contest.start_time_seconds.ok_or(AcmError::ElementNotFound {
        context: "codeforces contest start time",
    })?;
    let start = DateTime::<Utc>::from_timestamp(start_seconds, 0).ok_or(
        AcmError::ElementNotFound {
            context: "codeforces contest start time",
        },
    )?;
    // the API's own clock: relative time counts seconds since the start
    let now = contest
        .relative_time_seconds
        .and_then(|relative| start_seconds.checked_add(relative))
        .and_then(|seconds| DateTime::<Utc>::from_timestamp(seconds, 0))
        .unwrap_or(*wall_clock);

    Ok(ContestSummary {
        name: sanitize_name(&contest.name),
        start_time: Some(start.with_timezone(&formatter.zone())),
        countdown: formatter.format_countdown(&start, &now),
    })
}
