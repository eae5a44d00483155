use super::*;

use std::sync::Arc;

// =============================================================================
// AuthError display
// =============================================================================

#[test]
fn invalid_credentials_display() {
    assert_eq!(AuthError::InvalidCredentials.to_string(), "invalid credentials");
}

#[test]
fn invalid_token_display() {
    let msg = AuthError::InvalidToken.to_string();
    assert!(msg.contains("invalid"));
    assert!(msg.contains("token"));
}

#[test]
fn profile_fetch_display_carries_detail() {
    let msg = AuthError::ProfileFetch("503".into()).to_string();
    assert!(msg.contains("profile"));
    assert!(msg.contains("503"));
}

#[test]
fn refresh_failed_display_carries_detail() {
    let msg = AuthError::RefreshFailed("session revoked".into()).to_string();
    assert!(msg.contains("refresh"));
    assert!(msg.contains("session revoked"));
}

// =============================================================================
// trait object
// =============================================================================

#[tokio::test]
async fn auth_service_is_object_safe() {
    let service: Arc<dyn AuthService> =
        Arc::new(crate::mock::MockAuthService::with_latency(std::time::Duration::ZERO));
    let err = service
        .login(&crate::user::Credentials { nim: "nobody".into(), password: "wrong".into() })
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
}
