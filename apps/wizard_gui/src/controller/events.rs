//! Backend→UI events applied to the wizard controller.

use serde_json::Value;
use shared::{domain::UserId, protocol::CalcResponse};

pub enum UiEvent {
    IdentityResolved(UserId),
    /// No host identity and no cached demo identifier; solicit one.
    IdentityPromptRequired,
    /// Fatal for the session; the wizard stays locked.
    IdentityUnavailable(String),
    AccessGranted,
    /// Fatal for the session; every action is disabled.
    AccessDenied(String),
    CatalogueLoaded(Vec<String>),
    /// Analyzed material properties, emitted as soon as the analyze stage
    /// resolves so they survive a later calc failure.
    MaterialAnalyzed(Value),
    ChainCompleted(CalcResponse),
    ChainFailed(String),
    Info(String),
}
