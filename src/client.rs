use std::sync::Arc;

use itertools::Itertools;
use tracing::{error, instrument};

use crate::adapter::codeforces::CodeforcesApi;
use crate::adapter::{Adapter, AtcoderAdapter, CodeforcesAdapter, NiukeAdapter};
use crate::binding::{resolve_handle, HandleBindings};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::model::{ContestSummary, Platform};
use crate::transport::Transport;

/// Number of contests in the Codeforces digest.
const CODEFORCES_DIGEST_LEN: usize = 3;

/// The main entry point: one adapter per platform behind a single handle.
///
/// The `try_*` methods return typed errors; their plain counterparts return
/// the text to show the user, which is the error message on failure.
///
/// # Examples
///
/// ```no_run
/// # async fn example() {
/// use acm_contest::{AcmClient, Platform};
///
/// let client = AcmClient::new();
/// println!("{}", client.get_contest(Platform::Atcoder, 0).await);
/// println!("{}", client.get_profile(Platform::Codeforces, "tourist").await);
/// # }
/// ```
pub struct AcmClient {
    niuke: NiukeAdapter,
    atcoder: AtcoderAdapter,
    codeforces: CodeforcesAdapter,
}

impl AcmClient {
    /// Create a new client with default settings and no Codeforces
    /// credentials.
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a new client using the provided [`reqwest::Client`].
    ///
    /// Use this when you need to configure timeouts, proxies, headers, etc.
    pub fn with_client(client: reqwest::Client, config: ClientConfig) -> Self {
        Self::with_transport(Arc::new(client), config)
    }

    pub fn with_transport(transport: Arc<dyn Transport>, config: ClientConfig) -> Self {
        let formatter = config.time_formatter();
        Self {
            niuke: NiukeAdapter::new(transport.clone(), config.niuke_base_url),
            atcoder: AtcoderAdapter::new(transport.clone(), config.atcoder_base_url, formatter),
            codeforces: CodeforcesAdapter::new(
                transport,
                CodeforcesApi::new(config.codeforces_api_url, config.codeforces),
                formatter,
            ),
        }
    }

    pub fn niuke(&self) -> &NiukeAdapter {
        &self.niuke
    }

    pub fn atcoder(&self) -> &AtcoderAdapter {
        &self.atcoder
    }

    pub fn codeforces(&self) -> &CodeforcesAdapter {
        &self.codeforces
    }

    #[instrument(skip(self))]
    pub async fn try_get_contest(&self, platform: Platform, index: usize) -> Result<ContestSummary> {
        match platform {
            Platform::Niuke => self.niuke.get_contest(index).await,
            Platform::Atcoder => self.atcoder.get_contest(index).await,
            Platform::Codeforces => self.codeforces.get_contest(index).await,
        }
    }

    /// Contest text, or the reason it could not be fetched.
    pub async fn get_contest(&self, platform: Platform, index: usize) -> String {
        message(platform, self.try_get_contest(platform, index).await.map(|c| c.to_string()))
    }

    /// Profile text under its platform header.
    #[instrument(skip(self))]
    pub async fn try_get_profile(&self, platform: Platform, handle: &str) -> Result<String> {
        match platform {
            Platform::Niuke => profile_text(&self.niuke, handle).await,
            Platform::Atcoder => profile_text(&self.atcoder, handle).await,
            Platform::Codeforces => profile_text(&self.codeforces, handle).await,
        }
    }

    /// Profile text, or the reason it could not be fetched.
    pub async fn get_profile(&self, platform: Platform, handle: &str) -> String {
        message(platform, self.try_get_profile(platform, handle).await)
    }

    /// Profile of `handle`, or of the handle `user_id` bound when `handle`
    /// is absent or empty.
    #[instrument(skip(self, bindings))]
    pub async fn get_bound_profile(
        &self,
        platform: Platform,
        handle: Option<&str>,
        user_id: &str,
        bindings: &dyn HandleBindings,
    ) -> String {
        match resolve_handle(handle, user_id, platform, bindings).await {
            Ok(handle) => self.get_profile(platform, &handle).await,
            Err(e) => e.to_string(),
        }
    }

    /// The next contest of every platform. Platforms are queried one after
    /// another; a failing platform shows its error in its slot.
    #[instrument(skip(self))]
    pub async fn recent_contests(&self) -> String {
        let niuke = self.get_contest(Platform::Niuke, 0).await;
        let atcoder = self.get_contest(Platform::Atcoder, 0).await;
        let codeforces = self.get_contest(Platform::Codeforces, 0).await;
        format!("最近的竞赛：\n牛客： \n{niuke}\n\nAtcoder： \n{atcoder}\n\nCodeforces：\n{codeforces}")
    }

    /// The next few Codeforces contests, nearest first.
    #[instrument(skip(self))]
    pub async fn codeforces_contests(&self) -> String {
        let mut contests = Vec::with_capacity(CODEFORCES_DIGEST_LEN);
        for index in 0..CODEFORCES_DIGEST_LEN {
            contests.push(self.get_contest(Platform::Codeforces, index).await);
        }
        format!("最近的Codeforces竞赛：\n{}", contests.iter().join("\n\n"))
    }
}

impl Default for AcmClient {
    fn default() -> Self {
        Self::new()
    }
}

async fn profile_text<A: Adapter>(adapter: &A, handle: &str) -> Result<String> {
    let profile = adapter.get_profile(handle).await?;
    Ok(format!("{}\n{profile}", adapter.platform().profile_title()))
}

fn message(platform: Platform, result: Result<String>) -> String {
    result.unwrap_or_else(|e| {
        error!(%platform, kind = %e.kind(), error = %e, "query failed");
        e.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::MemoryBindings;
    use crate::transport::fake::FakeTransport;

    const NIUKE: &str = "https://niuke.test";
    const ATCODER: &str = "https://atcoder.test";
    const CODEFORCES: &str = "https://cf.test/api";

    const CONTEST_LIST: &str = r#"{"status":"OK","result":[
        {"id":3,"name":"Codeforces Round 3","phase":"BEFORE","startTimeSeconds":1716820500,"relativeTimeSeconds":-604800},
        {"id":2,"name":"Codeforces Round 2","phase":"BEFORE","startTimeSeconds":1716305700,"relativeTimeSeconds":-90000},
        {"id":1,"name":"Codeforces Round 1","phase":"FINISHED","startTimeSeconds":1716215700,"relativeTimeSeconds":0}
    ]}"#;

    fn config() -> ClientConfig {
        ClientConfig {
            niuke_base_url: NIUKE.to_string(),
            atcoder_base_url: ATCODER.to_string(),
            codeforces_api_url: CODEFORCES.to_string(),
            ..ClientConfig::default()
        }
    }

    fn client(transport: FakeTransport) -> AcmClient {
        AcmClient::with_transport(Arc::new(transport), config())
    }

    #[tokio::test]
    async fn test_profile_text_has_header() {
        let transport = FakeTransport::new().page(
            &format!("{CODEFORCES}/user.info?handles=fresh"),
            r#"{"status":"OK","result":[{"handle":"fresh"}]}"#,
        );
        let text = client(transport)
            .get_profile(Platform::Codeforces, "fresh")
            .await;
        assert_eq!(
            text,
            "Codeforces Profile:\n昵称: fresh\nrating: 0\n等级: Unrated\n最高rating: 0\n最高等级: Unrated\n"
        );
    }

    #[tokio::test]
    async fn test_errors_become_messages() {
        let text = client(FakeTransport::new())
            .get_contest(Platform::Niuke, 5)
            .await;
        assert_eq!(text, "下标越界: 5，有效范围为 0-2");

        let text = client(FakeTransport::new())
            .get_profile(Platform::Atcoder, "ghost")
            .await;
        assert_eq!(text, "请求失败: https://atcoder.test/users/ghost (HTTP 404)");
    }

    #[tokio::test]
    async fn test_recent_contests_keeps_every_slot() {
        let transport = FakeTransport::new().page(
            &format!("{CODEFORCES}/contest.list?gym=false"),
            CONTEST_LIST,
        );
        let text = client(transport).recent_contests().await;
        assert_eq!(
            text,
            "最近的竞赛：\n牛客： \n请求失败: https://niuke.test (HTTP 404)\n\n\
             Atcoder： \n请求失败: https://atcoder.test/contests/?lang=ja (HTTP 404)\n\n\
             Codeforces：\nCodeforces Round 2\n1天后     23:35"
        );
    }

    #[tokio::test]
    async fn test_codeforces_digest() {
        let transport = FakeTransport::new().page(
            &format!("{CODEFORCES}/contest.list?gym=false"),
            CONTEST_LIST,
        );
        let text = client(transport).codeforces_contests().await;
        assert_eq!(
            text,
            "最近的Codeforces竞赛：\nCodeforces Round 2\n1天后     23:35\n\n\
             Codeforces Round 3\n7天后     22:35\n\n\
             下标越界: 2，有效范围为 0-1"
        );
    }

    #[tokio::test]
    async fn test_bound_profile() {
        let transport = FakeTransport::new().page(
            &format!("{CODEFORCES}/user.info?handles=fresh"),
            r#"{"status":"OK","result":[{"handle":"fresh"}]}"#,
        );
        let mut bindings = MemoryBindings::new();
        bindings.bind("42", Platform::Codeforces, "fresh");
        let client = client(transport);

        let text = client
            .get_bound_profile(Platform::Codeforces, None, "42", &bindings)
            .await;
        assert!(text.starts_with("Codeforces Profile:\n昵称: fresh\n"));

        let text = client
            .get_bound_profile(Platform::Niuke, None, "42", &bindings)
            .await;
        assert_eq!(text, "给个名字吧朋友，不然我查谁呢");
    }

    #[tokio::test]
    #[ignore = "hits all three sites"]
    async fn test_live_recent_contests() {
        let text = AcmClient::new().recent_contests().await;
        assert!(text.starts_with("最近的竞赛："));
    }
}
