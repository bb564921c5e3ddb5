//! One adapter per platform, all answering the same two questions.

pub mod atcoder;
pub mod codeforces;
pub mod niuke;

use std::fmt;

use async_trait::async_trait;

pub use atcoder::AtcoderAdapter;
pub use codeforces::CodeforcesAdapter;
pub use niuke::NiukeAdapter;

use crate::error::{AcmError, Result};
use crate::model::{ContestSummary, Platform};

#[async_trait]
pub trait Adapter: Send + Sync {
    /// Profile record produced by [`get_profile`](Adapter::get_profile).
    type Profile: fmt::Display + Send;

    fn platform(&self) -> Platform;

    /// The contest at `index` in the platform's upcoming list.
    async fn get_contest(&self, index: usize) -> Result<ContestSummary>;

    /// Statistics of the user registered as `handle`.
    async fn get_profile(&self, handle: &str) -> Result<Self::Profile>;
}

/// Fail with [`AcmError::IndexOutOfRange`] unless `index <= max`.
pub(crate) fn check_index(index: usize, max: usize) -> Result<()> {
    if index > max {
        return Err(AcmError::IndexOutOfRange { index, max });
    }
    Ok(())
}
