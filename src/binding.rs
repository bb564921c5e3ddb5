//! Handles that chat users saved for each platform.
//!
//! Storage belongs to the host application; this crate only reads it.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::{AcmError, Result};
use crate::model::Platform;

/// Read access to the handle a chat user bound for a platform.
#[async_trait]
pub trait HandleBindings: Send + Sync {
    async fn lookup(&self, user_id: &str, platform: Platform) -> Option<String>;
}

/// In-process bindings, for hosts without a database and for tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryBindings {
    handles: HashMap<(String, Platform), String>,
}

impl MemoryBindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, user_id: impl Into<String>, platform: Platform, handle: impl Into<String>) {
        self.handles.insert((user_id.into(), platform), handle.into());
    }
}

#[async_trait]
impl HandleBindings for MemoryBindings {
    async fn lookup(&self, user_id: &str, platform: Platform) -> Option<String> {
        self.handles
            .get(&(user_id.to_string(), platform))
            .cloned()
    }
}

/// The handle to query: an explicit non-empty one, else the bound one.
pub async fn resolve_handle(
    explicit: Option<&str>,
    user_id: &str,
    platform: Platform,
    bindings: &dyn HandleBindings,
) -> Result<String> {
    if let Some(handle) = explicit.filter(|h| !h.is_empty()) {
        return Ok(handle.to_string());
    }
    bindings
        .lookup(user_id, platform)
        .await
        .filter(|h| !h.is_empty())
        .ok_or(AcmError::MissingHandle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bindings() -> MemoryBindings {
        let mut bindings = MemoryBindings::new();
        bindings.bind("10001", Platform::Codeforces, "tourist");
        bindings.bind("10001", Platform::Niuke, "");
        bindings
    }

    #[tokio::test]
    async fn test_explicit_handle_wins() {
        let handle = resolve_handle(Some("jiangly"), "10001", Platform::Codeforces, &bindings())
            .await
            .unwrap();
        assert_eq!(handle, "jiangly");
    }

    #[tokio::test]
    async fn test_falls_back_to_binding() {
        let handle = resolve_handle(Some(""), "10001", Platform::Codeforces, &bindings())
            .await
            .unwrap();
        assert_eq!(handle, "tourist");
    }

    #[tokio::test]
    async fn test_missing_or_empty_binding() {
        let err = resolve_handle(None, "10001", Platform::Niuke, &bindings())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "给个名字吧朋友，不然我查谁呢");

        let err = resolve_handle(None, "20002", Platform::Atcoder, &bindings())
            .await
            .unwrap_err();
        assert!(matches!(err, AcmError::MissingHandle));
    }
}
