use dioxus_logger::tracing;
use serenity::all::{Context, Ready};

/// Logs the connection once the gateway handshake completes.
pub async fn handle_ready(_ctx: Context, ready: Ready) {
    tracing::info!(
        "{} is connected to Discord in {} guild(s)",
        ready.user.name,
        ready.guilds.len()
    );
}
