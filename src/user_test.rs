use super::*;

// =============================================================================
// Role
// =============================================================================

#[test]
fn role_as_str_round_trips_from_str() {
    for role in [Role::Student, Role::Lecturer, Role::Admin] {
        assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
    }
}

#[test]
fn role_from_str_rejects_unknown() {
    let err = "superuser".parse::<Role>().unwrap_err();
    assert!(err.to_string().contains("superuser"));
}

#[test]
fn role_serde_uses_lowercase() {
    assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), r#""admin""#);
    let role: Role = serde_json::from_str(r#""lecturer""#).unwrap();
    assert_eq!(role, Role::Lecturer);
}

#[test]
fn role_home_routes() {
    assert_eq!(Role::Student.home_route(), Route::StudentDashboard);
    assert_eq!(Role::Lecturer.home_route(), Route::LecturerDashboard);
    assert_eq!(Role::Admin.home_route(), Route::AdminDashboard);
}

// =============================================================================
// User serde
// =============================================================================

fn student_json() -> &'static str {
    r#"{
        "nim": "12345678",
        "name": "John Doe",
        "email": "12345678@binus.ac.id",
        "role": "student",
        "enrolledClasses": [
            { "id": 1, "name": "Programming Fundamentals", "code": "COMP6047", "semester": "2024/2025-1" }
        ]
    }"#
}

#[test]
fn user_deserialize_flattens_details() {
    let user: User = serde_json::from_str(student_json()).unwrap();
    assert_eq!(user.nim, "12345678");
    assert_eq!(user.role, Role::Student);
    assert!(user.details.contains_key("enrolledClasses"));
}

#[test]
fn user_serialize_round_trip_preserves_role_and_nim() {
    let user: User = serde_json::from_str(student_json()).unwrap();
    let json = serde_json::to_string(&user).unwrap();
    let restored: User = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.role, Role::Student);
    assert_eq!(restored.nim, user.nim);
    assert_eq!(restored.details, user.details);
}

#[test]
fn student_classes_read_enrolled() {
    let user: User = serde_json::from_str(student_json()).unwrap();
    let classes = user.classes();
    assert_eq!(classes.len(), 1);
    assert_eq!(classes[0].code, "COMP6047");
    assert_eq!(classes[0].semester, "2024/2025-1");
}

#[test]
fn lecturer_classes_read_assigned() {
    let user = crate::mock::mock_user(Role::Lecturer);
    let classes = user.classes();
    assert_eq!(classes.len(), 3);
    assert_eq!(classes[1].code, "COMP6048");
}

#[test]
fn admin_classes_empty() {
    let user = crate::mock::mock_user(Role::Admin);
    assert!(user.classes().is_empty());
}

#[test]
fn classes_missing_key_defaults_empty() {
    let user = User {
        nim: "1".into(),
        name: "n".into(),
        email: "e".into(),
        role: Role::Student,
        details: serde_json::Map::new(),
    };
    assert!(user.classes().is_empty());
}
