use super::*;

use crate::mock::mock_user;

const ROLES: [Role; 3] = [Role::Student, Role::Lecturer, Role::Admin];

fn authenticated(role: Role) -> Session {
    Session {
        user: Some(mock_user(role)),
        is_authenticated: true,
        loading: false,
        error: None,
    }
}

fn unauthenticated() -> Session {
    Session { user: None, is_authenticated: false, loading: false, error: None }
}

// =============================================================================
// loading
// =============================================================================

#[test]
fn loading_session_waits_for_every_role() {
    let session = Session::default();
    for role in ROLES {
        assert_eq!(RouteGuard::new(role).evaluate(&session), GuardDecision::Wait);
    }
}

#[test]
fn loading_wins_even_when_authenticated() {
    let mut session = authenticated(Role::Student);
    session.loading = true;
    assert_eq!(
        RouteGuard::new(Role::Student).evaluate(&session),
        GuardDecision::Wait
    );
}

// =============================================================================
// unauthenticated
// =============================================================================

#[test]
fn unauthenticated_never_renders_for_any_role() {
    for role in ROLES {
        assert_eq!(
            RouteGuard::new(role).evaluate(&unauthenticated()),
            GuardDecision::RedirectToLogin
        );
    }
}

#[test]
fn unauthenticated_lecturer_guard_redirects_to_login() {
    assert_eq!(
        RouteGuard::new(Role::Lecturer).evaluate(&unauthenticated()),
        GuardDecision::RedirectToLogin
    );
}

#[test]
fn flag_without_user_record_reads_as_unauthenticated() {
    let session = Session { user: None, is_authenticated: true, loading: false, error: None };
    assert_eq!(
        RouteGuard::new(Role::Admin).evaluate(&session),
        GuardDecision::RedirectToLogin
    );
}

#[test]
fn user_without_flag_reads_as_unauthenticated() {
    let session = Session {
        user: Some(mock_user(Role::Admin)),
        is_authenticated: false,
        loading: false,
        error: None,
    };
    assert_eq!(
        RouteGuard::new(Role::Admin).evaluate(&session),
        GuardDecision::RedirectToLogin
    );
}

// =============================================================================
// role matching
// =============================================================================

#[test]
fn matching_role_renders() {
    for role in ROLES {
        assert_eq!(
            RouteGuard::new(role).evaluate(&authenticated(role)),
            GuardDecision::Render
        );
    }
}

#[test]
fn mismatched_role_bounces_to_own_home_never_login() {
    for actual in ROLES {
        for required in ROLES {
            if actual == required {
                continue;
            }
            let decision = RouteGuard::new(required).evaluate(&authenticated(actual));
            assert_eq!(decision, GuardDecision::Redirect(actual.home_route()));
        }
    }
}

#[test]
fn student_on_admin_guard_goes_to_student_dashboard() {
    let decision = RouteGuard::new(Role::Admin).evaluate(&authenticated(Role::Student));
    assert_eq!(decision, GuardDecision::Redirect(Route::StudentDashboard));
}

#[test]
fn admin_on_lecturer_guard_goes_to_admin_dashboard() {
    let decision = RouteGuard::new(Role::Lecturer).evaluate(&authenticated(Role::Admin));
    assert_eq!(decision, GuardDecision::Redirect(Route::AdminDashboard));
}

// =============================================================================
// re-evaluation on session change
// =============================================================================

#[test]
fn guard_decision_follows_logout() {
    let guard = RouteGuard::new(Role::Student);
    let mut session = authenticated(Role::Student);
    assert_eq!(guard.evaluate(&session), GuardDecision::Render);

    // Expiry watchdog or another tab's action cleared the session.
    session.user = None;
    session.is_authenticated = false;
    assert_eq!(guard.evaluate(&session), GuardDecision::RedirectToLogin);
}

#[test]
fn required_role_accessor() {
    assert_eq!(RouteGuard::new(Role::Lecturer).required_role(), Role::Lecturer);
}
