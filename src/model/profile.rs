use std::fmt;

use serde::Serialize;

/// Rank labels shown for users the platform has never rated.
pub const ATCODER_NO_RANK: &str = "NaN";
pub const CODEFORCES_UNRATED: &str = "Unrated";

const ATCODER_PRAISE_RATING: i64 = 2000;
const CODEFORCES_PRAISE_RATING: i64 = 2600;
const PRAISE: &str = "大神啊！";

/// Contest and practice statistics of a Niuke user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NiukeProfile {
    pub handle: String,
    pub user_id: String,
    pub rating: i64,
    pub rank: String,
    pub rated_contests: i64,
    pub unrated_contests: i64,
    pub solved: i64,
}

impl fmt::Display for NiukeProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "昵称: {}", self.handle)?;
        writeln!(f, "rating: {}", self.rating)?;
        writeln!(f, "排名: {}名", self.rank)?;
        writeln!(
            f,
            "参与场次：Rated{}场，Unrated{}场",
            self.rated_contests, self.unrated_contests
        )?;
        writeln!(f, "已过题数：{}", self.solved)
    }
}

/// Rating summary of a rated AtCoder user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AtcoderProfile {
    pub handle: String,
    pub rating: i64,
    pub max_rating: i64,
    pub rank: String,
    pub contests: i64,
}

impl AtcoderProfile {
    /// The all-default record shown for users without rating data.
    pub fn unrated(handle: &str) -> Self {
        Self {
            handle: handle.to_string(),
            rating: 0,
            max_rating: 0,
            rank: ATCODER_NO_RANK.to_string(),
            contests: 0,
        }
    }
}

impl fmt::Display for AtcoderProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "用户名：{}", self.handle)?;
        writeln!(f, "当前rating：{}", self.rating)?;
        writeln!(f, "最高rating：{}", self.max_rating)?;
        writeln!(f, "排名：{}", self.rank)?;
        writeln!(f, "参与场次：Rated{}场", self.contests)?;
        if self.rating >= ATCODER_PRAISE_RATING {
            writeln!(f, "{PRAISE}")?;
        }
        Ok(())
    }
}

/// Outcome of an AtCoder profile lookup.
///
/// A user page without the rating table is reported as [`NoRatingData`]
/// rather than an error. The page looks the same for a registered user who
/// never entered a rated contest and for a page whose layout changed, so the
/// two cannot be told apart here.
///
/// [`NoRatingData`]: AtcoderStanding::NoRatingData
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AtcoderStanding {
    Rated(AtcoderProfile),
    NoRatingData { handle: String },
}

impl AtcoderStanding {
    /// The record to display, zero-valued when there is no rating data.
    pub fn profile(&self) -> AtcoderProfile {
        match self {
            AtcoderStanding::Rated(profile) => profile.clone(),
            AtcoderStanding::NoRatingData { handle } => AtcoderProfile::unrated(handle),
        }
    }
}

impl fmt::Display for AtcoderStanding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AtcoderStanding::Rated(profile) => fmt::Display::fmt(profile, f),
            AtcoderStanding::NoRatingData { handle } => {
                fmt::Display::fmt(&AtcoderProfile::unrated(handle), f)
            }
        }
    }
}

/// Rating summary of a Codeforces user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeforcesProfile {
    pub handle: String,
    pub rating: i64,
    pub max_rating: i64,
    pub rank: String,
    pub max_rank: String,
    pub avatar_url: String,
}

impl fmt::Display for CodeforcesProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "昵称: {}", self.handle)?;
        writeln!(f, "rating: {}", self.rating)?;
        writeln!(f, "等级: {}", self.rank)?;
        writeln!(f, "最高rating: {}", self.max_rating)?;
        writeln!(f, "最高等级: {}", self.max_rank)?;
        if self.rating >= CODEFORCES_PRAISE_RATING {
            writeln!(f, "{PRAISE}")?;
        }
        Ok(())
    }
}
