//! Backend commands queued from UI to the backend worker.

use client_core::CuttingSelection;
use shared::domain::UserId;

pub enum BackendCommand {
    /// Startup identity resolution; on success the worker continues straight
    /// into the access check.
    ResolveIdentity,
    /// Raw text from the demo-identifier prompt.
    SubmitIdentity { input: String },
    /// The step-4 analyze-then-calculate chain.
    RunCuttingChain {
        user_id: UserId,
        selection: CuttingSelection,
    },
}
