use super::*;
use serde_json::json;

#[test]
fn deserializes_known_fields() {
    let info: AuthorizationInfo = serde_json::from_value(json!({
        "clientId": "messaging-client",
        "clientName": "Messaging",
        "redirectUri": "http://127.0.0.1:8080/authorized",
        "scopes": ["message.read", "message.write"],
        "state": "xyz",
        "principalName": "admin"
    }))
    .unwrap();

    assert_eq!(info.client_id.as_deref(), Some("messaging-client"));
    assert_eq!(info.client_name.as_deref(), Some("Messaging"));
    assert_eq!(info.scopes, vec!["message.read", "message.write"]);
    assert_eq!(info.principal_name.as_deref(), Some("admin"));
    assert!(info.extra.is_empty());
}

#[test]
fn unknown_fields_are_preserved() {
    let info: AuthorizationInfo = serde_json::from_value(json!({
        "clientId": "c1",
        "previouslyApprovedScopes": ["openid"]
    }))
    .unwrap();

    assert_eq!(info.extra.get("previouslyApprovedScopes"), Some(&json!(["openid"])));
    let back = serde_json::to_value(&info).unwrap();
    assert_eq!(back["previouslyApprovedScopes"], json!(["openid"]));
}

#[test]
fn empty_object_is_accepted() {
    let info: AuthorizationInfo = serde_json::from_str("{}").unwrap();
    assert_eq!(info, AuthorizationInfo::default());
}

// =============================================================================
// display_name
// =============================================================================

#[test]
fn display_name_prefers_client_name() {
    let info = AuthorizationInfo {
        client_id: Some("c1".into()),
        client_name: Some("Client One".into()),
        ..AuthorizationInfo::default()
    };
    assert_eq!(info.display_name(), "Client One");
}

#[test]
fn display_name_falls_back_to_id_then_placeholder() {
    let by_id = AuthorizationInfo { client_id: Some("c1".into()), ..AuthorizationInfo::default() };
    assert_eq!(by_id.display_name(), "c1");
    assert_eq!(AuthorizationInfo::default().display_name(), "unknown client");
}
