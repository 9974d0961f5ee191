//! Per-client session state

use serde_json::{json, Value};
use std::sync::{PoisonError, RwLock};

/// In-memory state shared by every clone of a [`crate::RestClient`].
///
/// Each field has one logical writer (the facade setter) and any number of
/// readers. Locks are held only long enough to copy a value in or out.
#[derive(Debug)]
pub struct SessionContext {
    token: RwLock<Option<String>>,
    workspace_path: RwLock<Option<String>>,
    system_info: RwLock<Value>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            token: RwLock::new(None),
            workspace_path: RwLock::new(None),
            system_info: RwLock::new(json!({})),
        }
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.into());
    }

    pub fn workspace_path(&self) -> Option<String> {
        self.workspace_path.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn set_workspace_path(&self, path: impl Into<String>) {
        *self.workspace_path.write().unwrap_or_else(PoisonError::into_inner) = Some(path.into());
    }

    /// Last system info received from the backend, `{}` until the first fetch succeeds
    pub fn system_info(&self) -> Value {
        self.system_info.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Replace the cached system info wholesale
    pub fn set_system_info(&self, info: Value) {
        *self.system_info.write().unwrap_or_else(PoisonError::into_inner) = info;
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}
