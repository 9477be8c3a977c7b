use crate::{AuthSession, Authorizer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Granted,
    Denied,
    /// The session is still fetching permissions.
    Pending,
}

impl GateDecision {
    pub fn is_granted(self) -> bool {
        matches!(self, GateDecision::Granted)
    }

    /// Choose the content to render for this decision.
    ///
    /// `Pending` renders the fallback; use [`GateDecision::pick_or_loading`]
    /// to show a loading placeholder instead.
    pub fn pick<T>(self, granted: T, fallback: T) -> T {
        match self {
            GateDecision::Granted => granted,
            GateDecision::Denied | GateDecision::Pending => fallback,
        }
    }

    pub fn pick_or_loading<T>(self, granted: T, fallback: T, loading: T) -> T {
        match self {
            GateDecision::Granted => granted,
            GateDecision::Denied => fallback,
            GateDecision::Pending => loading,
        }
    }
}

impl From<bool> for GateDecision {
    fn from(allowed: bool) -> Self {
        if allowed {
            GateDecision::Granted
        } else {
            GateDecision::Denied
        }
    }
}

/// Guards one `(action, object)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionGate {
    pub action: String,
    pub object: String,
    /// Report `Pending` while the session is loading; otherwise deny until
    /// loading finishes.
    pub show_loading: bool,
}

impl PermissionGate {
    pub fn new(action: impl Into<String>, object: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            object: object.into(),
            show_loading: true,
        }
    }

    pub fn show_loading(mut self, show_loading: bool) -> Self {
        self.show_loading = show_loading;
        self
    }

    /// Decide with a server-side enforce call.
    pub async fn evaluate(&self, session: &AuthSession) -> GateDecision {
        if session.snapshot().await.loading {
            return if self.show_loading {
                GateDecision::Pending
            } else {
                GateDecision::Denied
            };
        }
        let decision = GateDecision::from(session.can(&self.object, &self.action).await);
        tracing::debug!(action = %self.action, object = %self.object, ?decision, "gate evaluated");
        decision
    }

    /// Decide from the authorizer's loaded permission map.
    pub fn evaluate_local(&self, authorizer: &Authorizer) -> GateDecision {
        GateDecision::from(authorizer.can(&self.action, &self.object))
    }
}
