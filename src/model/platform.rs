use serde::{Deserialize, Serialize};
use strum_macros::EnumString;

/// The online judges the client can query.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Platform {
    #[strum(to_string = "niuke", serialize = "nowcoder")]
    Niuke,
    #[strum(to_string = "atcoder", serialize = "atc")]
    Atcoder,
    #[strum(to_string = "codeforces", serialize = "cf")]
    Codeforces,
}

impl Platform {
    /// Header line that prefixes a rendered profile.
    pub fn profile_title(self) -> &'static str {
        match self {
            Platform::Niuke => "Niuke Profile:",
            Platform::Atcoder => "Atcoder Profile:",
            Platform::Codeforces => "Codeforces Profile:",
        }
    }
}
