use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::{
    config::ModuleSwitches,
    model::{
        command::{CommandDefinition, CommandTable},
        context::test_support::sample_context,
        messages::Messages,
    },
    service::{
        dispatch::{CommandDispatcher, DispatchOutcome, DispatchSettings},
        messenger::{
            testing::{RecordingMessenger, Sent},
            Messenger,
        },
        template::{shell::ShellRunner, TemplateExpander},
    },
};


fn settings() -> DispatchSettings {
    DispatchSettings {
        prefix: "bb".to_string(),
        command_cooldown: Duration::from_secs(5),
        quote_cooldown: Duration::from_secs(5),
        embed_color: 0x2F3136,
        files_dir: std::env::temp_dir().join("bonebot-no-such-dir"),
        modules: ModuleSwitches::default(),
    }
}

fn dispatcher(
    settings: DispatchSettings,
    commands: Vec<CommandDefinition>,
    quotes: Vec<&str>,
) -> CommandDispatcher {
    CommandDispatcher::new(
        settings,
        CommandTable::from_definitions(commands),
        quotes.into_iter().map(str::to_string).collect(),
        Arc::new(Messages::default()),
        TemplateExpander::new(ShellRunner::new(Duration::from_secs(5))),
    )
}

fn greet() -> CommandDefinition {
    CommandDefinition::new("greet", "Greets you", "Hello $PING$!")
}

/// A recorder and the same recorder as a trait object.
fn recorder() -> (Arc<RecordingMessenger>, Arc<dyn Messenger>) {
    let recorder = Arc::new(RecordingMessenger::new());
    let messenger: Arc<dyn Messenger> = recorder.clone();
    (recorder, messenger)
}
