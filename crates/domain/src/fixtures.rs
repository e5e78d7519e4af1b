//! Fixed example payloads for user-related tests.

use serde_json::{Value, json};

/// Standard valid user payload.
#[must_use]
pub fn valid_user() -> Value {
    json!({
        "name": "John Doe",
        "username": "johndoe",
        "email": "john.doe@example.com",
        "phone": "555-0123",
        "website": "johndoe.com"
    })
}

/// User payload with only the required fields.
#[must_use]
pub fn minimal_user() -> Value {
    json!({
        "name": "Jane Smith",
        "username": "janesmith",
        "email": "jane.smith@example.com"
    })
}

/// User payload whose email is not an address.
#[must_use]
pub fn invalid_email_user() -> Value {
    json!({
        "name": "Bad Email User",
        "username": "bademail",
        "email": "not-an-email"
    })
}

/// User payload missing name, username and email.
#[must_use]
pub fn missing_required_fields() -> Value {
    json!({
        "phone": "555-0123"
    })
}

/// Partial payload for user updates.
#[must_use]
pub fn update_data() -> Value {
    json!({
        "name": "Updated Name",
        "email": "updated@example.com"
    })
}

/// Adds an `id` to a payload, the way the upstream echoes a created resource.
#[must_use]
pub fn with_id(mut payload: Value, id: u64) -> Value {
    if let Value::Object(map) = &mut payload {
        map.insert("id".to_string(), json!(id));
    }
    payload
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_field_fixtures_differ_as_documented() {
        assert!(minimal_user().get("phone").is_none());
        assert!(missing_required_fields().get("email").is_none());
        assert_eq!(invalid_email_user()["email"], "not-an-email");
    }

    #[test]
    fn with_id_only_touches_objects() {
        assert_eq!(with_id(valid_user(), 11)["id"], 11);
        assert_eq!(with_id(json!([1]), 11), json!([1]));
    }
}
