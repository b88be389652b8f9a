use super::*;

// =============================================================================
// Profile
// =============================================================================

#[test]
fn anonymous_is_not_authenticated() {
    let profile = Profile::anonymous();
    assert!(profile.id.is_nil());
    assert!(!profile.is_authenticated());
    assert!(profile.email.is_none());
}

#[test]
fn real_identity_is_authenticated() {
    let profile = Profile { id: Uuid::new_v4(), name: "Ada".into(), email: None };
    assert!(profile.is_authenticated());
}

// =============================================================================
// serde
// =============================================================================

#[test]
fn deserializes_me_payload() {
    let id = Uuid::new_v4();
    let json = format!(r#"{{"id":"{id}","name":"Ada","email":"ada@example.com"}}"#);
    let profile: Profile = serde_json::from_str(&json).unwrap();
    assert_eq!(profile.id, id);
    assert_eq!(profile.name, "Ada");
    assert_eq!(profile.email.as_deref(), Some("ada@example.com"));
    assert!(profile.is_authenticated());
}

#[test]
fn missing_email_defaults_to_none() {
    let id = Uuid::new_v4();
    let json = format!(r#"{{"id":"{id}","name":"Ada"}}"#);
    let profile: Profile = serde_json::from_str(&json).unwrap();
    assert!(profile.email.is_none());
}

#[test]
fn round_trip_preserves_identity() {
    let original = Profile { id: Uuid::new_v4(), name: "Grace".into(), email: Some("g@example.com".into()) };
    let json = serde_json::to_string(&original).unwrap();
    let restored: Profile = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, original);
}
