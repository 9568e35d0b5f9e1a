//! Test factory for serenity `User` objects.

use serenity::all::User;

/// Creates a user account with a new-style username (no discriminator).
///
/// # Arguments
/// - `user_id` - Discord user ID (snowflake)
/// - `username` - Unique username
/// - `global_name` - Optional display name shown instead of the username
///
/// # Panics
/// - If the JSON cannot be deserialized into a User (indicates invalid test data)
pub fn create_test_user(user_id: u64, username: &str, global_name: Option<&str>) -> User {
    user_json(user_id, username, global_name, false)
}

/// Creates a bot account.
pub fn create_test_bot(user_id: u64, username: &str) -> User {
    user_json(user_id, username, None, true)
}

fn user_json(user_id: u64, username: &str, global_name: Option<&str>, bot: bool) -> User {
    serde_json::from_value(serde_json::json!({
        "id": user_id.to_string(),
        "username": username,
        "discriminator": "0",
        "global_name": global_name,
        "avatar": null,
        "bot": bot,
    }))
    .expect("Failed to create test user - invalid JSON structure")
}
