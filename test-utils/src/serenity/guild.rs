//! Test factory for serenity `Guild` objects.

use serenity::all::Guild;

/// Creates a guild as delivered by a `GUILD_CREATE` event.
///
/// The guild starts with no roles, channels or members; insert them into the
/// public maps as needed. A short icon hash is padded to Discord's 32
/// character format.
///
/// # Arguments
/// - `guild_id` - Discord guild ID (snowflake)
/// - `name` - Guild name
/// - `owner_id` - User ID of the guild owner
/// - `icon_hash` - Optional icon hash
///
/// # Panics
/// - If the JSON cannot be deserialized into a Guild (indicates invalid test data)
pub fn create_test_guild(guild_id: u64, name: &str, owner_id: u64, icon_hash: Option<&str>) -> Guild {
    let icon = icon_hash.map(|hash| format!("{:0<32}", hash));

    serde_json::from_value(serde_json::json!({
        "id": guild_id.to_string(),
        "name": name,
        "icon": icon,
        "icon_hash": icon,
        "owner_id": owner_id.to_string(),
        "afk_timeout": 300,
        "verification_level": 0,
        "default_message_notifications": 0,
        "explicit_content_filter": 0,
        "roles": [],
        "emojis": [],
        "stickers": [],
        "features": [],
        "mfa_level": 0,
        "system_channel_flags": 0,
        "premium_tier": 0,
        "premium_subscription_count": 0,
        "premium_progress_bar_enabled": false,
        "preferred_locale": "en-US",
        "nsfw_level": 0,
        "joined_at": "2020-01-01T00:00:00.000000+00:00",
        "large": false,
        "member_count": 0,
        "voice_states": [],
        "channels": [],
        "threads": [],
        "presences": [],
        "unavailable": false,
        "members": [],
        "stage_instances": [],
        "guild_scheduled_events": [],
    }))
    .expect("Failed to create test guild - invalid JSON structure")
}
