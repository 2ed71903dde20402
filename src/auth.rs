//! Caller identity as a pluggable capability.
//!
//! Request handlers depend on [`IdentityProvider`] rather than on a concrete
//! session mechanism; resolution to a stored user happens in
//! [`UserQuery::resolve`](crate::queries::UserQuery::resolve).

use crate::models::Identity;

pub trait IdentityProvider {
    /// The authenticated caller, or `None` for anonymous requests.
    fn current_user(&self) -> Option<Identity>;
}

/// Fixed identity, for CLIs, tests and trusted callers.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity(Option<Identity>);

impl StaticIdentity {
    pub fn signed_in(identity: Identity) -> Self {
        Self(Some(identity))
    }

    pub fn anonymous() -> Self {
        Self(None)
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_user(&self) -> Option<Identity> {
        self.0.clone()
    }
}

impl<F> IdentityProvider for F
where
    F: Fn() -> Option<Identity>,
{
    fn current_user(&self) -> Option<Identity> {
        self()
    }
}
