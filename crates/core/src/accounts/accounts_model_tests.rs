//! Tests for account domain models and their validation rules.

#[cfg(test)]
mod tests {
    use crate::accounts::{NewAccount, ProfileUpdate};

    fn new_account(username: &str, age: i32) -> NewAccount {
        NewAccount {
            username: username.to_string(),
            credential: "secret".to_string(),
            name: "Test User".to_string(),
            age,
            is_admin: false,
        }
    }

    // ==================== NewAccount validation ====================

    #[test]
    fn test_new_account_valid() {
        assert!(new_account("alice", 30).validate().is_ok());
    }

    #[test]
    fn test_new_account_age_bounds_inclusive() {
        assert!(new_account("alice", 18).validate().is_ok());
        assert!(new_account("alice", 120).validate().is_ok());
    }

    #[test]
    fn test_new_account_rejects_underage() {
        assert!(new_account("alice", 17).validate().is_err());
    }

    #[test]
    fn test_new_account_rejects_overage() {
        assert!(new_account("alice", 121).validate().is_err());
    }

    #[test]
    fn test_new_account_rejects_blank_username() {
        assert!(new_account("   ", 30).validate().is_err());
    }

    #[test]
    fn test_new_account_rejects_empty_credential() {
        let mut account = new_account("alice", 30);
        account.credential = String::new();
        assert!(account.validate().is_err());
    }

    // ==================== ProfileUpdate normalization ====================

    #[test]
    fn test_profile_update_empty_strings_become_noops() {
        let update = ProfileUpdate {
            username: "alice".to_string(),
            credential: Some(String::new()),
            name: Some(String::new()),
        }
        .normalized();

        assert!(update.credential.is_none());
        assert!(update.name.is_none());
        assert!(update.is_noop());
    }

    #[test]
    fn test_profile_update_keeps_supplied_fields() {
        let update = ProfileUpdate {
            username: "alice".to_string(),
            credential: Some("new-secret".to_string()),
            name: None,
        }
        .normalized();

        assert_eq!(update.credential.as_deref(), Some("new-secret"));
        assert!(update.name.is_none());
        assert!(!update.is_noop());
    }

    #[test]
    fn test_profile_update_requires_username() {
        let update = ProfileUpdate {
            username: String::new(),
            credential: None,
            name: None,
        };
        assert!(update.validate().is_err());
    }

    // ==================== Serde shape ====================

    #[test]
    fn test_new_account_wire_field_names() {
        let json = serde_json::to_value(new_account("alice", 30)).unwrap();
        assert!(json.get("username").is_some());
        assert!(json.get("credential").is_some());
        assert!(json.get("isAdmin").is_some());
    }
}
