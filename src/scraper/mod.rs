pub(crate) use ::scraper::Html;
use ::scraper::{ElementRef, Selector};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{AcmError, Result};
use crate::transport::Transport;

async fn get_body(transport: &dyn Transport, url: &str) -> Result<String> {
    debug!(url, "fetching page");

    let response = transport.get(url).await?;
    if !response.is_success() {
        return Err(AcmError::UnexpectedStatus {
            url: url.to_owned(),
            status: response.status,
        });
    }
    Ok(response.body)
}

/// Fetch a URL and parse the response body as an HTML document.
pub async fn get_document(transport: &dyn Transport, url: &str) -> Result<Html> {
    let body = get_body(transport, url).await?;
    Ok(Html::parse_document(&body))
}

/// Fetch a URL and decode the response body as JSON.
pub async fn get_json<T: DeserializeOwned>(transport: &dyn Transport, url: &str) -> Result<T> {
    let body = get_body(transport, url).await?;
    serde_json::from_str(&body).map_err(|e| AcmError::Json {
        url: url.to_owned(),
        source: e,
    })
}

/// Fetch a page and run `parse` on it.
///
/// The document never lives across an await point, which keeps the calling
/// future `Send`.
pub(crate) async fn scrape<T>(
    transport: &dyn Transport,
    url: &str,
    parse: impl FnOnce(&Html) -> Result<T>,
) -> Result<T> {
    let body = get_body(transport, url).await?;
    let document = Html::parse_document(&body);
    parse(&document)
}

/// The `n`th descendant of `element` matching `selector`, in document order.
pub(crate) fn nth<'a>(
    element: ElementRef<'a>,
    selector: &str,
    n: usize,
    context: &'static str,
) -> Result<ElementRef<'a>> {
    let selector = Selector::parse(selector)?;
    element
        .select(&selector)
        .nth(n)
        .ok_or(AcmError::ElementNotFound { context })
}

/// The `n`th element of the whole document matching `selector`.
pub(crate) fn nth_in<'a>(
    document: &'a Html,
    selector: &str,
    n: usize,
    context: &'static str,
) -> Result<ElementRef<'a>> {
    let selector = Selector::parse(selector)?;
    document
        .select(&selector)
        .nth(n)
        .ok_or(AcmError::ElementNotFound { context })
}

/// Like [`nth`], for elements whose absence is not an error.
pub(crate) fn find_nth<'a>(
    element: ElementRef<'a>,
    selector: &str,
    n: usize,
) -> Result<Option<ElementRef<'a>>> {
    let selector = Selector::parse(selector)?;
    Ok(element.select(&selector).nth(n))
}

/// All text beneath `element`, trimmed.
pub(crate) fn inner_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Leading integer of `text`, read the way a lenient number parser does:
/// leading whitespace and an optional sign, then digits up to the first
/// non-digit. `"1234"`, `" 87th"` and `"-3 pts"` all parse.
pub(crate) fn leading_int(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (sign, rest) = match text.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, text.strip_prefix('+').unwrap_or(text)),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    rest[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Last non-empty segment of a link target's path.
pub(crate) fn trailing_segment(href: &str) -> Option<&str> {
    let path = href.split(['?', '#']).next().unwrap_or_default();
    path.rsplit('/').find(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::transport::fake::FakeTransport;

    #[test]
    fn test_leading_int() {
        assert_eq!(leading_int("1234"), Some(1234));
        assert_eq!(leading_int("  87th"), Some(87));
        assert_eq!(leading_int("-3 pts"), Some(-3));
        assert_eq!(leading_int("--"), None);
        assert_eq!(leading_int(""), None);
    }

    #[test]
    fn test_trailing_segment() {
        assert_eq!(
            trailing_segment("/acm/contest/profile/123456"),
            Some("123456")
        );
        assert_eq!(trailing_segment("/acm/contest/profile/42/"), Some("42"));
        assert_eq!(trailing_segment("/profile/7?tab=1"), Some("7"));
        assert_eq!(trailing_segment(""), None);
    }

    #[test]
    fn test_nth_reports_context() {
        let document = Html::parse_document("<ul><li>a</li><li>b</li></ul>");
        let second = nth_in(&document, "li", 1, "second item").unwrap();
        assert_eq!(inner_text(second), "b");

        let err = nth_in(&document, "li", 2, "third item").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert_eq!(err.to_string(), "页面解析失败: third item");
    }

    #[tokio::test]
    async fn test_get_document_rejects_error_status() {
        let transport = FakeTransport::new().status("https://example.com/", 503, "busy");
        let err = get_document(&transport, "https://example.com/")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Fetch);
        assert!(matches!(
            err,
            AcmError::UnexpectedStatus { status: 503, .. }
        ));
    }

    #[tokio::test]
    async fn test_get_json_decodes_body() {
        #[derive(Debug, serde::Deserialize)]
        struct Body {
            status: String,
        }

        let transport = FakeTransport::new()
            .page("https://example.com/ok", r#"{"status":"OK"}"#)
            .page("https://example.com/bad", "<html></html>");

        let body: Body = get_json(&transport, "https://example.com/ok").await.unwrap();
        assert_eq!(body.status, "OK");

        let err = get_json::<Body>(&transport, "https://example.com/bad")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }
}
