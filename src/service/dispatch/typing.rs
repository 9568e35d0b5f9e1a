use dioxus_logger::tracing;
use serenity::all::ChannelId;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::service::messenger::Messenger;

/// Discord shows a typing indicator for about ten seconds per broadcast.
const TYPING_INTERVAL: Duration = Duration::from_secs(5);

/// Keeps the typing indicator alive in a channel until dropped.
pub struct TypingIndicator {
    handle: JoinHandle<()>,
}

impl TypingIndicator {
    /// Starts broadcasting typing immediately and then every few seconds.
    pub fn start(messenger: Arc<dyn Messenger>, channel: ChannelId) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(TYPING_INTERVAL);
            loop {
                interval.tick().await;
                if let Err(e) = messenger.broadcast_typing(channel).await {
                    tracing::debug!("Failed to broadcast typing in {}: {}", channel, e);
                    break;
                }
            }
        });

        Self { handle }
    }
}

impl Drop for TypingIndicator {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::messenger::testing::RecordingMessenger;

    /// Tests that typing is rebroadcast until the indicator is dropped.
    ///
    /// Expected: broadcasts at 0s, 5s and 10s, none after drop
    #[tokio::test(start_paused = true)]
    async fn ticks_until_dropped() {
        let messenger = Arc::new(RecordingMessenger::new());
        let indicator = TypingIndicator::start(messenger.clone(), ChannelId::new(600));

        tokio::time::sleep(Duration::from_secs(11)).await;
        assert_eq!(messenger.typing_count(), 3);

        drop(indicator);
        tokio::time::sleep(Duration::from_secs(20)).await;
        assert_eq!(messenger.typing_count(), 3);
    }
}
