use super::*;

#[test]
fn login_is_root_path() {
    assert_eq!(Route::Login.path(), "/");
}

#[test]
fn dashboard_paths_match_router() {
    assert_eq!(Route::StudentDashboard.path(), "/dashboard");
    assert_eq!(Route::LecturerDashboard.path(), "/lecturer/dashboard");
    assert_eq!(Route::AdminDashboard.path(), "/admin/dashboard");
}

#[test]
fn route_serde_round_trip() {
    let json = serde_json::to_string(&Route::LecturerDashboard).unwrap();
    let restored: Route = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, Route::LecturerDashboard);
}
