use serde::{Deserialize, Serialize};

/// Error envelope returned by the analyze and calc endpoints on non-2xx
/// responses. The `error` field is optional; callers fall back to a generic
/// message when it is missing or unparseable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}
