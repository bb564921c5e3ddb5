use ::scraper::error::SelectorErrorKind;

/// Coarse classification of an [`AcmError`], for callers that branch on the
/// failure instead of only showing its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Transport fault or non-success HTTP status.
    Fetch,
    /// An expected element or field was missing or malformed.
    Parse,
    /// The handle does not resolve to a known user.
    NotFound,
    /// The remote API reported a failure.
    Api,
    /// The contest index is outside the range the platform exposes.
    IndexOutOfRange,
}

/// All errors that can occur while querying a platform.
///
/// The `Display` text is the message shown to the end user.
#[derive(thiserror::Error, Debug)]
pub enum AcmError {
    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("请求失败: {url}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Server returned a non-success HTTP status code.
    #[error("请求失败: {url} (HTTP {status})")]
    UnexpectedStatus { url: String, status: u16 },

    /// Failed to read the response body as text.
    #[error("读取响应失败: {url}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// A JSON body did not match the expected shape.
    #[error("响应解析失败: {url}")]
    Json {
        url: String,
        source: serde_json::Error,
    },

    /// A CSS selector string could not be parsed.
    #[error("选择器无效: {0}")]
    Selector(String),

    /// Failed to parse a date/time from scraped text.
    #[error("时间解析失败: {0}")]
    DateParse(#[from] chrono::ParseError),

    /// An expected element was not found at its documented position.
    #[error("页面解析失败: {context}")]
    ElementNotFound { context: &'static str },

    /// The handle does not belong to any user on the platform.
    #[error("{message}")]
    NotFound { message: &'static str },

    /// No handle was given and none is bound for the chat user.
    #[error("给个名字吧朋友，不然我查谁呢")]
    MissingHandle,

    /// The remote API answered with a failure comment.
    #[error("{message}")]
    Api { message: String },

    /// Contest index beyond what the platform lists.
    #[error("下标越界: {index}，有效范围为 0-{max}")]
    IndexOutOfRange { index: usize, max: usize },
}

impl AcmError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AcmError::Http { .. }
            | AcmError::UnexpectedStatus { .. }
            | AcmError::ResponseBody { .. } => ErrorKind::Fetch,
            AcmError::Json { .. }
            | AcmError::Selector(_)
            | AcmError::DateParse(_)
            | AcmError::ElementNotFound { .. } => ErrorKind::Parse,
            AcmError::NotFound { .. } | AcmError::MissingHandle => ErrorKind::NotFound,
            AcmError::Api { .. } => ErrorKind::Api,
            AcmError::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
        }
    }
}

impl<'a> From<SelectorErrorKind<'a>> for AcmError {
    fn from(err: SelectorErrorKind<'a>) -> Self {
        AcmError::Selector(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AcmError>;
