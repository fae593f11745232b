//! Session identity resolution: embedding-host introspection with a cached
//! demo-identifier fallback.

use shared::domain::UserId;

/// Capability surface of the embedding messaging-client SDK. Absence of the
/// host is a normal, supported path, modelled by [`NoHostEnvironment`]
/// rather than runtime probing.
pub trait HostEnvironment: Send {
    /// Readiness handshake with the host; no-op outside a real host.
    fn ready(&self);

    /// Identifier from the host's (untrusted) initialization payload.
    fn user_id(&self) -> Option<UserId>;
}

/// The wizard is running outside any embedding host.
pub struct NoHostEnvironment;

impl HostEnvironment for NoHostEnvironment {
    fn ready(&self) {}

    fn user_id(&self) -> Option<UserId> {
        None
    }
}

/// Host stand-in fed from configuration, so the host-present path is
/// exercisable outside the real messaging client.
pub struct ConfiguredHost {
    user_id: UserId,
}

impl ConfiguredHost {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}

impl HostEnvironment for ConfiguredHost {
    fn ready(&self) {}

    fn user_id(&self) -> Option<UserId> {
        Some(self.user_id)
    }
}

/// Session-scoped storage for the prompted demo identifier. Nothing else is
/// persisted across a session.
pub trait SessionCache: Send {
    fn load(&self) -> Option<UserId>;
    fn store(&mut self, user_id: UserId);
}

#[derive(Default)]
pub struct InMemorySessionCache {
    cached: Option<UserId>,
}

impl SessionCache for InMemorySessionCache {
    fn load(&self) -> Option<UserId> {
        self.cached
    }

    fn store(&mut self, user_id: UserId) {
        self.cached = Some(user_id);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityResolution {
    Resolved(UserId),
    /// No host identity and nothing cached; the caller must solicit one.
    PromptRequired,
}

/// One-time startup resolution: host init data first, then the cached demo
/// identifier, otherwise the caller prompts interactively.
pub fn resolve_identity(
    host: &dyn HostEnvironment,
    cache: &dyn SessionCache,
) -> IdentityResolution {
    host.ready();
    if let Some(user_id) = host.user_id() {
        return IdentityResolution::Resolved(user_id);
    }
    if let Some(user_id) = cache.load() {
        return IdentityResolution::Resolved(user_id);
    }
    IdentityResolution::PromptRequired
}

/// The backend expects an integral identifier; anything else counts as
/// identity-unresolvable.
pub fn parse_prompted_identity(input: &str) -> Option<UserId> {
    input.trim().parse::<i64>().ok().map(UserId)
}

#[cfg(test)]
#[path = "tests/identity_tests.rs"]
mod tests;
