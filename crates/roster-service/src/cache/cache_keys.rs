//! Cache key generators.

/// Key holding the full user list.
pub const ALL_USERS: &str = "users:all";

/// Generate a cache key for a user by username.
///
/// Usernames are case-sensitive, so the key preserves case. Returns `None`
/// for the username `all`, whose key would alias [`ALL_USERS`]; such lookups
/// go straight to the store.
#[must_use]
pub fn user_by_username(username: &str) -> Option<String> {
    let key = format!("users:{}", username);
    (key != ALL_USERS).then_some(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_by_username_key() {
        assert_eq!(user_by_username("alice").as_deref(), Some("users:alice"));
        assert_eq!(user_by_username("Alice").as_deref(), Some("users:Alice"));
    }

    #[test]
    fn test_username_all_is_not_cached() {
        assert!(user_by_username("all").is_none());
        assert_eq!(user_by_username("All").as_deref(), Some("users:All"));
    }
}
