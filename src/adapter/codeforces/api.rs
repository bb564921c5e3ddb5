//! <https://codeforces.com/apiHelp>

use chrono::Utc;
use rand::Rng as _;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use sha2::{Digest as _, Sha512};
use tracing::{debug, warn};
use url::form_urlencoded;

use crate::config::Credentials;
use crate::error::{AcmError, Result};
use crate::transport::Transport;

pub(crate) const USER_NOT_FOUND: &str = "此用户不存在";
const BAD_SECRET: &str = "Codeforces API secret 配置错误，请检查 secret";
const BAD_KEY: &str = "Codeforces API key 配置错误，请检查 key";

/// > Represents a Codeforces user.
///
/// <https://codeforces.com/apiHelp/objects#User>
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct User {
    pub(crate) handle: String,
    /// > Integer.
    pub(crate) rating: Option<i64>,
    /// > Integer.
    pub(crate) max_rating: Option<i64>,
    /// > String.
    pub(crate) rank: Option<String>,
    /// > String.
    pub(crate) max_rank: Option<String>,
    /// > String. User's title photo URL.
    pub(crate) title_photo: Option<String>,
}

/// > Represents a contest on Codeforces.
///
/// <https://codeforces.com/apiHelp/objects#Contest>
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Contest {
    /// > String. Localized.
    pub(crate) name: String,
    pub(crate) phase: ContestPhase,
    /// > Integer. Can be absent. Contest start time in unix format.
    pub(crate) start_time_seconds: Option<i64>,
    /// > Integer. Can be absent. Number of seconds, passed after the start of
    /// > the contest. Can be negative.
    pub(crate) relative_time_seconds: Option<i64>,
}

/// > Enum: BEFORE, CODING, PENDING_SYSTEM_TEST, SYSTEM_TEST, FINISHED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, strum_macros::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub(crate) enum ContestPhase {
    Before,
    Coding,
    PendingSystemTest,
    SystemTest,
    Finished,
}

#[derive(Deserialize)]
#[serde(tag = "status")]
enum Envelope<T> {
    #[serde(rename = "OK")]
    Ok { result: T },
    #[serde(rename = "FAILED")]
    Failed { comment: String },
}

/// Client for the Codeforces method API.
///
/// Calls are signed when credentials are configured and anonymous otherwise.
#[derive(Debug, Clone)]
pub struct CodeforcesApi {
    base_url: String,
    credentials: Option<Credentials>,
}

impl CodeforcesApi {
    pub fn new(base_url: impl Into<String>, credentials: Option<Credentials>) -> Self {
        let credentials = credentials.filter(Credentials::is_complete);
        if credentials.is_none() {
            warn!("Codeforces key或secret为空，相关功能可能无法正常使用。");
        }
        Self {
            base_url: base_url.into(),
            credentials,
        }
    }

    /// Call `method` and decode its `result`.
    ///
    /// Codeforces reports failures with a `FAILED` envelope, usually on a 400
    /// response, so the body is decoded whatever the status is.
    pub async fn call<T: DeserializeOwned>(
        &self,
        transport: &dyn Transport,
        method: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        debug!(method, "calling codeforces api");

        // error messages reach end users, keep the key and signature out
        let public_url = format!("{}/{method}", self.base_url);
        let response = transport.get(&self.method_url(method, params)).await?;

        let envelope = match serde_json::from_str::<Envelope<T>>(&response.body) {
            Ok(envelope) => envelope,
            Err(_) if !response.is_success() => {
                return Err(AcmError::UnexpectedStatus {
                    url: public_url,
                    status: response.status,
                })
            }
            Err(e) => {
                return Err(AcmError::Json {
                    url: public_url,
                    source: e,
                })
            }
        };

        match envelope {
            Envelope::Ok { result } => Ok(result),
            Envelope::Failed { comment } => {
                warn!(method, comment = %comment, "codeforces api call failed");
                Err(comment_error(&comment))
            }
        }
    }

    fn method_url(&self, method: &str, params: &[(&str, &str)]) -> String {
        let mut pairs: Vec<(String, String)> = params
            .iter()
            .map(|&(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let Some(credentials) = &self.credentials else {
            return format!("{}/{method}?{}", self.base_url, encode(&pairs));
        };

        pairs.push(("apiKey".to_string(), credentials.api_key.clone()));
        pairs.push(("time".to_string(), Utc::now().timestamp().to_string()));
        pairs.sort();
        let query = encode(&pairs);

        let nonce = rand::thread_rng().gen_range(100_000u32..1_000_000);
        let api_sig = sign(nonce, method, &query, &credentials.api_secret);
        format!("{}/{method}?{query}&apiSig={api_sig}", self.base_url)
    }
}

fn encode(pairs: &[(String, String)]) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

/// `apiSig` of a call: the six digit nonce followed by the hex SHA-512 of
/// `{nonce}/{method}?{query}#{secret}`, with `query` sorted by parameter.
fn sign(nonce: u32, method: &str, query: &str, secret: &str) -> String {
    let repr = format!("{nonce}/{method}?{query}#{secret}");
    let digest = Sha512::digest(repr.as_bytes());
    format!("{nonce}{}", hex::encode(digest))
}

/// Map a `FAILED` comment to the message shown to the user.
fn comment_error(comment: &str) -> AcmError {
    let lower = comment.to_lowercase();
    if lower.contains("incorrect signature") {
        AcmError::Api {
            message: BAD_SECRET.to_string(),
        }
    } else if lower.contains("incorrect api key") {
        AcmError::Api {
            message: BAD_KEY.to_string(),
        }
    } else if lower.contains("not found") && lower.contains("handle") {
        AcmError::NotFound {
            message: USER_NOT_FOUND,
        }
    } else {
        AcmError::Api {
            message: comment.to_string(),
        }
    }
}
