//! Test factory for serenity `Member` objects.

use serenity::all::{Member, User};

/// Creates a guild member for `user`.
///
/// # Arguments
/// - `guild_id` - Guild the member belongs to
/// - `user` - Account behind the membership
/// - `nick` - Optional guild nickname
/// - `roles` - Role IDs in the order Discord reports them
///
/// # Panics
/// - If the JSON cannot be deserialized into a Member (indicates invalid test data)
pub fn create_test_member(guild_id: u64, user: User, nick: Option<&str>, roles: &[u64]) -> Member {
    let roles: Vec<String> = roles.iter().map(|id| id.to_string()).collect();

    serde_json::from_value(serde_json::json!({
        "guild_id": guild_id.to_string(),
        "user": user,
        "nick": nick,
        "avatar": null,
        "roles": roles,
        "joined_at": "2020-01-01T00:00:00.000000+00:00",
        "premium_since": null,
        "deaf": false,
        "mute": false,
        "flags": 0,
        "pending": false,
        "communication_disabled_until": null,
    }))
    .expect("Failed to create test member - invalid JSON structure")
}
