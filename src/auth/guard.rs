use super::session::{SessionState, SessionStore};

pub const LOGIN_PATH: &str = "/admin/login";

/// What a protected admin view should do for the current session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Verification has not settled yet; show a loading placeholder.
    Placeholder,
    /// Not logged in; the requested path has been stashed for after login.
    RedirectToLogin { login_path: String, return_to: String },
    Render,
}

impl GuardDecision {
    pub fn for_state(state: &SessionState, path: &str) -> Self {
        if state.loading {
            GuardDecision::Placeholder
        } else if !state.authenticated {
            GuardDecision::RedirectToLogin {
                login_path: LOGIN_PATH.to_string(),
                return_to: path.to_string(),
            }
        } else {
            GuardDecision::Render
        }
    }

    pub fn allows(&self) -> bool {
        matches!(self, GuardDecision::Render)
    }
}

/// Gate in front of every admin view and command.
pub struct RouteGuard<'a> {
    session: &'a SessionStore,
}

impl<'a> RouteGuard<'a> {
    pub fn new(session: &'a SessionStore) -> Self {
        Self { session }
    }

    /// Decision for the current state, without waiting.
    pub fn check(&self, path: &str) -> GuardDecision {
        let decision = GuardDecision::for_state(&self.session.get_state(), path);
        if let GuardDecision::RedirectToLogin { return_to, .. } = &decision {
            tracing::debug!("unauthenticated access to {}, redirecting to login", return_to);
            self.session.stash_redirect(return_to);
        }
        decision
    }

    /// Waits for the loading phase to end, then decides.
    pub async fn settle(&self, path: &str) -> GuardDecision {
        let mut rx = self.session.subscribe();
        if rx.wait_for(|state| !state.loading).await.is_err() {
            tracing::warn!("session state channel closed while waiting for verification");
        }
        self.check(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_shows_placeholder() {
        let decision = GuardDecision::for_state(&SessionState::unknown(), "/admin");
        assert_eq!(decision, GuardDecision::Placeholder);
        assert!(!decision.allows());
    }

    #[test]
    fn test_anonymous_redirects_with_return_path() {
        let decision = GuardDecision::for_state(&SessionState::anonymous(), "/admin/blog");
        assert_eq!(
            decision,
            GuardDecision::RedirectToLogin {
                login_path: LOGIN_PATH.to_string(),
                return_to: "/admin/blog".to_string(),
            }
        );
    }

    #[test]
    fn test_authenticated_renders() {
        let decision = GuardDecision::for_state(&SessionState::authenticated("admin"), "/admin");
        assert!(decision.allows());
    }
}
