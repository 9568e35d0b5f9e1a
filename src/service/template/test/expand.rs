use super::*;

/// Tests that plain templates only get identity and whitespace treatment.
///
/// Expanding the output a second time changes nothing.
///
/// Expected: substituted, normalized text that is stable on a second pass
#[tokio::test]
async fn plain_template_is_idempotent() {
    let ctx = sample_context("bbhi");
    let expander = expander();

    let first = expander
        .expand_segment("  Hi   $NAME$,\\nI am $BOT$  ", &ctx)
        .await
        .unwrap();
    assert_eq!(first.text, "Hi Tester,\nI am BoneBot");
    assert_eq!(first.shell, None);
    assert!(!first.reply);

    let second = expander.expand_segment(&first.text, &ctx).await.unwrap();
    assert_eq!(second.text, first.text);
}

/// Tests that each segment is expanded separately.
///
/// Expected: two results, the directive only on the second
#[tokio::test]
async fn expands_each_segment() {
    let ctx = sample_context("bbtwo");

    let results = expander()
        .expand("first$&&$second $REACT$🔥$REACT$", &ctx)
        .await
        .unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].text, "first");
    assert_eq!(results[0].reaction, None);
    assert_eq!(results[1].text, "second");
    assert_eq!(results[1].reaction.as_deref(), Some("🔥"));
}

/// Tests a file directive naming a missing file.
///
/// Expected: no attachment and the span still removed
#[tokio::test]
async fn drops_missing_file() {
    let ctx = sample_context("bbpic");

    let result = expander()
        .expand_segment("pic $FILE$ /definitely/not/here.png $FILE$", &ctx)
        .await
        .unwrap();

    assert_eq!(result.file, None);
    assert_eq!(result.text, "pic");
}

/// Tests a file directive naming a directory.
///
/// Expected: no attachment
#[tokio::test]
async fn drops_directory_file() {
    let ctx = sample_context("bbpic");
    let template = format!("$FILE${}$FILE$", env!("CARGO_MANIFEST_DIR"));

    let result = expander().expand_segment(&template, &ctx).await.unwrap();

    assert_eq!(result.file, None);
    assert!(result.is_silent());
}

/// Tests a file directive naming an existing file.
///
/// Expected: attachment set, segment not silent despite empty text
#[tokio::test]
async fn attaches_existing_file() {
    let ctx = sample_context("bbpic");
    let template = format!("$FILE$ {} $FILE$", existing_file().display());

    let result = expander().expand_segment(&template, &ctx).await.unwrap();

    assert_eq!(result.file, Some(existing_file()));
    assert_eq!(result.text, "");
    assert!(!result.is_silent());
}

/// Tests an embed title with placeholders.
///
/// Expected: title substituted, remaining text is the body
#[tokio::test]
async fn expands_embed_title() {
    let ctx = sample_context("bbme");

    let result = expander()
        .expand_segment("$EMBED$ About $NAME$ $EMBED$ Member of $GUILD$ $REPLY$", &ctx)
        .await
        .unwrap();

    assert_eq!(result.embed_title.as_deref(), Some("About Tester"));
    assert_eq!(result.text, "Member of Test Server");
    assert!(result.reply);
}

/// Tests command output capture with the exported environment.
///
/// Expected: output of the shell substituted in place of $CMDOUT$
#[cfg(unix)]
#[tokio::test]
async fn substitutes_command_output() {
    let ctx = sample_context("bbwho");

    let result = expander()
        .expand_segment(
            "$CMD$ echo \"$NAME$ in $BB_GUILD_NAME\" $CMD$ You are: $CMDOUT$",
            &ctx,
        )
        .await
        .unwrap();

    assert_eq!(result.text, "You are: Tester in Test Server");
    assert_eq!(
        result.shell.as_deref(),
        Some("echo \"Tester in $BB_GUILD_NAME\"")
    );
}

/// Tests identity placeholders inside single quotes in a shell directive.
///
/// Expected: the invoker's name is part of the command and printed as is
#[cfg(unix)]
#[tokio::test]
async fn fills_identity_inside_single_quotes() {
    let ctx = sample_context("bbwho");

    let result = expander()
        .expand_segment("$CMD$ echo '$NAME$' $CMD$ $CMDOUT$", &ctx)
        .await
        .unwrap();

    assert_eq!(result.shell.as_deref(), Some("echo 'Tester'"));
    assert_eq!(result.text, "Tester");
}

/// Tests shell directives with env references enabled.
///
/// Expected: placeholders become variable references, output unchanged
#[cfg(unix)]
#[tokio::test]
async fn uses_env_references_when_enabled() {
    let ctx = sample_context("bbwho");

    let result = expander()
        .with_env_references(true)
        .expand_segment("$CMD$ echo \"$NAME$ on $BOT$\" $CMD$ $CMDOUT$", &ctx)
        .await
        .unwrap();

    assert_eq!(
        result.shell.as_deref(),
        Some("echo \"${BB_NAME} on ${BB_BOT_NAME}\"")
    );
    assert_eq!(result.text, "Tester on BoneBot");
}

/// Tests that $CMDOUT$ without a command becomes empty.
///
/// Expected: placeholder removed
#[tokio::test]
async fn output_without_command_is_empty() {
    let ctx = sample_context("bbx");

    let result = expander()
        .expand_segment("out:$CMDOUT$!", &ctx)
        .await
        .unwrap();

    assert_eq!(result.text, "out:!");
}

/// Tests that a hanging command is cut off.
///
/// Expected: empty output once the timeout passes
#[cfg(unix)]
#[tokio::test]
async fn times_out_hanging_command() {
    let ctx = sample_context("bbslow");
    let expander = TemplateExpander::new(ShellRunner::new(Duration::from_millis(200)));

    let result = expander
        .expand_segment("[$CMD$ sleep 5; echo late $CMD$$CMDOUT$]", &ctx)
        .await
        .unwrap();

    assert_eq!(result.text, "[]");
}
