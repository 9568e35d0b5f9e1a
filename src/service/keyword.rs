//! Keyword responder and reactor.
//!
//! Both modules look at messages the command dispatcher left alone. The
//! responder answers with the first rule whose triggers all occur in the
//! message; the reactor adds the emoji of every matching rule.

use dioxus_logger::tracing;
use std::time::Duration;
use tokio::time::Instant;

use crate::{
    error::AppError,
    model::{
        context::TemplateContext,
        keyword::{ReactionRule, ResponseRule},
    },
    service::{
        dispatch::{actions::deliver, cooldown::Cooldown},
        messenger::Messenger,
        template::TemplateExpander,
    },
};

pub struct Responder {
    rules: Vec<ResponseRule>,
    cooldown: Cooldown,
    expander: TemplateExpander,
    embed_color: u32,
}

impl Responder {
    pub fn new(
        rules: Vec<ResponseRule>,
        cooldown: Duration,
        expander: TemplateExpander,
        embed_color: u32,
    ) -> Self {
        Self {
            rules,
            cooldown: Cooldown::new(cooldown),
            expander,
            embed_color,
        }
    }

    /// Answers a message with the first matching rule's template.
    ///
    /// A match during the cooldown is skipped without notice.
    ///
    /// # Returns
    /// - `Ok(true)` - A response was expanded and delivered
    /// - `Ok(false)` - No rule matched, or the cooldown was active
    /// - `Err(AppError)` - Expansion or delivery failed
    pub async fn respond(
        &self,
        messenger: &dyn Messenger,
        ctx: &TemplateContext,
    ) -> Result<bool, AppError> {
        let Some(rule) = self
            .rules
            .iter()
            .find(|rule| rule.matches(&ctx.message.content))
        else {
            return Ok(false);
        };
        let Some(origin) = ctx.origin() else {
            return Ok(false);
        };

        let now = Instant::now();
        if let Err(remaining) = self.cooldown.check(now) {
            tracing::debug!("Responder on cooldown for another {}s", remaining);
            return Ok(false);
        }
        self.cooldown.mark(now);

        let results = self.expander.expand(&rule.response, ctx).await?;
        deliver(messenger, origin, &results, ctx, self.embed_color).await?;

        Ok(true)
    }
}

pub struct Reactor {
    rules: Vec<ReactionRule>,
}

impl Reactor {
    pub fn new(rules: Vec<ReactionRule>) -> Self {
        Self { rules }
    }

    /// Reacts with the emoji of every matching rule.
    ///
    /// Reactions Discord rejects are logged and skipped.
    ///
    /// # Returns
    /// - Number of reactions added
    pub async fn react(&self, messenger: &dyn Messenger, ctx: &TemplateContext) -> usize {
        let Some(origin) = ctx.origin() else {
            return 0;
        };

        let mut added = 0;
        for rule in self
            .rules
            .iter()
            .filter(|rule| rule.matches(&ctx.message.content))
        {
            match messenger
                .add_reaction(origin.channel_id, origin.message_id, &rule.emoji)
                .await
            {
                Ok(()) => added += 1,
                Err(e) => tracing::warn!("Failed to add reaction '{}': {}", rule.emoji, e),
            }
        }

        added
    }
}
