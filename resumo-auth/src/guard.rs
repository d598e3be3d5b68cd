use crate::auth_state::AuthSnapshot;

/// What a protected screen should do with the current login state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Startup check still running; show a loader, don't redirect yet.
    Wait,
    RedirectToLogin,
    Allow,
}

pub fn guard(snapshot: &AuthSnapshot) -> RouteDecision {
    if snapshot.loading() {
        return RouteDecision::Wait;
    }

    if !snapshot.is_logged_in() {
        return RouteDecision::RedirectToLogin;
    }

    RouteDecision::Allow
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth_state::AuthPhase;

    #[test]
    fn loading_waits_instead_of_redirecting() {
        let snapshot = AuthSnapshot {
            phase: AuthPhase::Initializing,
        };
        assert_eq!(guard(&snapshot), RouteDecision::Wait);
    }

    #[test]
    fn logged_out_redirects() {
        let snapshot = AuthSnapshot {
            phase: AuthPhase::Ready { logged_in: false },
        };
        assert_eq!(guard(&snapshot), RouteDecision::RedirectToLogin);
    }

    #[test]
    fn logged_in_allows() {
        let snapshot = AuthSnapshot {
            phase: AuthPhase::Ready { logged_in: true },
        };
        assert_eq!(guard(&snapshot), RouteDecision::Allow);
    }
}
